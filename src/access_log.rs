//! HDFS audit-log parsing
//!
//! The NameNode audit log records one file-system operation per line:
//!
//! ```text
//! 2013-11-21 17:24:54,697: ugi=root	ip=/127.0.0.1	cmd=open	src=/input/log_1	dst=null	perm=null
//! ```
//!
//! Only `open` operations are read accesses; everything else is parsed but
//! reported as not valid for mining.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

static AUDIT_LINE: OnceLock<Regex> = OnceLock::new();

fn audit_line() -> &'static Regex {
    AUDIT_LINE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<time>.+?): ",
            r"ugi=(?P<ugi>[^\t]*)\t",
            r"ip=(?P<ip>[^\t]*)\t",
            r"cmd=(?P<cmd>[^\t]*)\t",
            r"src=(?P<src>[^\t]*)\t",
            r"dst=(?P<dst>[^\t]*)\t",
            r"perm=(?P<perm>[^\t]*)",
            r"(?:\t.*)?$",
        ))
        .expect("audit line pattern is a valid regex")
    })
}

/// One parsed audit-log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessLog {
    /// `yyyy-MM-dd HH:mm:ss,SSS`
    pub time: String,
    pub ugi: String,
    pub ip: String,
    /// open, create, delete, rename, mkdirs, listStatus, ...
    pub cmd: String,
    pub src: String,
    pub dst: String,
    pub perm: String,
}

impl AccessLog {
    /// Parse one line; malformed lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(caps) = audit_line().captures(line) else {
            tracing::debug!(line, "Invalid audit log line");
            return None;
        };

        Some(Self {
            time: caps["time"].to_string(),
            ugi: caps["ugi"].to_string(),
            ip: caps["ip"].to_string(),
            cmd: caps["cmd"].to_string(),
            src: caps["src"].to_string(),
            dst: caps["dst"].to_string(),
            perm: caps["perm"].to_string(),
        })
    }

    /// Read accesses only
    pub fn is_valid(&self) -> bool {
        self.cmd.eq_ignore_ascii_case("open")
    }

    /// Source path with a shared directory prefix removed
    ///
    /// Paths outside `prefix` are returned unchanged.
    pub fn strip_prefix<'a>(&'a self, prefix: &str) -> &'a str {
        self.src.strip_prefix(prefix).unwrap_or(&self.src)
    }
}

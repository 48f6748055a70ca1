#![no_main]

use corrminer::access_log::AccessLog;
use corrminer::trace::{parse_trace, TraceFormat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Audit lines come straight from NameNode logs; nothing here may panic
        if let Some(log) = AccessLog::parse(input) {
            let _ = log.is_valid();
            let _ = log.strip_prefix("/");
        }
        let _ = parse_trace(input, TraceFormat::Audit, Some("/"));
    }
});

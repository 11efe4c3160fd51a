#![no_main]

use libfuzzer_sys::fuzz_target;
use quizstats::exam_session::parse_generated_questions;

fuzz_target!(|data: &[u8]| {
    // Generator output is untrusted text; parsing must never panic
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_generated_questions(input);
    }
});

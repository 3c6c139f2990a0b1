#![no_main]

use libfuzzer_sys::fuzz_target;
use unified_errors::{format_template, MessageArg, MessageArgs};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // First line is the template, the rest are arguments.
    let mut lines = text.split('\n');
    let template = lines.next().unwrap_or_default();
    let args: MessageArgs = lines.take(8).map(MessageArg::from).collect();

    let out = format_template(template, &args);
    if args.is_empty() {
        assert_eq!(out, template);
    }
});

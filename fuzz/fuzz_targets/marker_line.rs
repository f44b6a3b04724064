#![no_main]

use libfuzzer_sys::fuzz_target;
use tracemark::MarkerLine;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte picks the bound, the rest is the message
    let max_len = usize::from(data[0]).max(1);
    let text = String::from_utf8_lossy(&data[1..]);

    let mut line = MarkerLine::render(max_len, format_args!("{}", text));
    assert!(line.len() <= max_len);
    assert!(text.starts_with(line.as_str()));
    if let Some(payload) = line.finish() {
        assert!(payload.len() <= max_len + 1);
        assert_eq!(payload.last(), Some(&b'\n'));
    }
});

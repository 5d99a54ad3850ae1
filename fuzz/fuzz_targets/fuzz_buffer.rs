#![no_main]
use libfuzzer_sys::fuzz_target;
use srcmap::Buffer;

fuzz_target!(|data: &[u8]| {
    // Detection must never panic, whatever the bytes look like.
    let _ = srcmap::recognize_encoding(data);

    let buffer = Buffer::new("(fuzz)");
    if buffer.set_source(data).is_err() {
        return;
    }

    // Every offset up to one past the end must decompose, and every indexed
    // line (including the synthetic final one) must be readable.
    let len = buffer.source().map_or(0, str::len);
    for offset in 0..=len {
        let _ = buffer.decompose_position(offset);
    }
    let last = buffer.last_line().unwrap_or(1);
    for line in buffer.first_line()..=last {
        let _ = buffer.source_line(line);
    }
});

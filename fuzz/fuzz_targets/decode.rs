#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = pktview::decode(data) {
        let _lines = pktview::render(&frame);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use hif::hif_decode;

fuzz_target!(|data: &[u8]| {
    // Arbitrary headers can declare up to 12 GB of pixels
    if data.len() >= 12 {
        let width = u16::from_be_bytes([data[6], data[7]]) as usize;
        let height = u16::from_be_bytes([data[10], data[11]]) as usize;
        if width * height > 1 << 20 {
            return;
        }
    }
    let _ = hif_decode(data);
});

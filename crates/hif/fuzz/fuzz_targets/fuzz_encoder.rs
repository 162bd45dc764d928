#![no_main]

use libfuzzer_sys::fuzz_target;
use hif::{hif_encode, Container, EncodeOptions};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
    preset: u8,
    lzma: bool,
}

fuzz_target!(|input: FuzzInput| {
    let width = input.width as usize;
    let height = input.height as usize;

    let opts = EncodeOptions {
        preset: (input.preset % 4) as u32,
        container: if input.lzma { Container::Lzma } else { Container::Xz },
        ..EncodeOptions::default()
    };

    // Mismatched lengths and zero sizes must come back as errors
    let _ = hif_encode(&input.pixels, width, height, &opts);
});

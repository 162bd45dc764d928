#![no_main]

use libfuzzer_sys::fuzz_target;
use hif::{hif_decode, hif_encode, EncodeOptions};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = (input.width as usize).clamp(1, 64);
    let height = (input.height as usize).clamp(1, 64);

    let expected_size = width * height * 3;
    if input.pixels.len() < expected_size {
        return;
    }

    let pixels = &input.pixels[..expected_size];
    let opts = EncodeOptions {
        preset: 1,
        ..EncodeOptions::default()
    };

    let file = hif_encode(pixels, width, height, &opts).expect("valid input must encode");
    let decoded = hif_decode(&file).expect("encoded file must decode");

    assert_eq!(decoded.width(), width);
    assert_eq!(decoded.height(), height);
    assert_eq!(decoded.pixels, pixels);
});

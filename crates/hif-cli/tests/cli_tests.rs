use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use hif::{hif_encode_default, HifHeader};
use pretty_assertions::assert_eq;

fn hifview(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hifview"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to spawn hifview")
}

#[test]
fn test_missing_file_exits_with_io_status() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.hif");

    let output = hifview(&[missing.as_path()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "stderr: {stderr}");
    assert!(!stderr.contains("opened"), "no window may be created: {stderr}");
}

#[test]
fn test_export_two_by_two_red() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("red.hif");
    let png = dir.path().join("red.png");
    fs::write(&input, hif_encode_default(&[255, 0, 0].repeat(4), 2, 2).unwrap()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_hifview"))
        .arg(&input)
        .arg("--export")
        .arg(&png)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "{output:?}");

    let exported = image::open(&png).unwrap().to_rgb8();
    assert_eq!(exported.dimensions(), (2, 2));
    assert!(exported.pixels().all(|p| p.0 == [255, 0, 0]));
}

#[test]
fn test_export_keeps_orientation() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wide.hif");
    let png = dir.path().join("wide.png");
    // 3x1: red, green, blue
    let rgb = [255, 0, 0, 0, 255, 0, 0, 0, 255];
    fs::write(&input, hif_encode_default(&rgb, 3, 1).unwrap()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_hifview"))
        .arg(&input)
        .arg("-o")
        .arg(&png)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let exported = image::open(&png).unwrap().to_rgb8();
    assert_eq!(exported.dimensions(), (3, 1));
    assert_eq!(exported.get_pixel(2, 0).0, [0, 0, 255]);
}

#[test]
fn test_corrupt_payload_exits_with_decompress_status() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("corrupt.hif");
    let mut file = hif_encode_default(&[1, 2, 3], 1, 1).unwrap();
    file[12] = 0xFF;
    fs::write(&input, file).unwrap();

    let output = hifview(&[input.as_path()]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("The input is not in the .xz format"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_header_only_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.hif");
    fs::write(&input, HifHeader::new(2, 2).to_bytes()).unwrap();

    let output = hifview(&[input.as_path()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_argument_prints_usage() {
    let output = hifview(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

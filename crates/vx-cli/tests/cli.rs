//! End-to-end runs of the `vx` binary.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn vx() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vx"))
}

/// Writes an 8x8 RGB gradient.
fn write_gradient(path: &Path) {
    let mut data = Vec::new();
    for y in 0..8u8 {
        for x in 0..8u8 {
            data.extend_from_slice(&[x * 32, y * 32, 128]);
        }
    }
    let mut encoder = png::Encoder::new(BufWriter::new(File::create(path).unwrap()), 8, 8);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.write_header().unwrap().write_image_data(&data).unwrap();
}

fn stdout(cmd: &mut Command) -> String {
    let out = cmd.output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    String::from_utf8(out.stdout).unwrap()
}

#[test]
fn info_reports_format_and_sizes() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("grad.png");
    write_gradient(&input);

    let text = stdout(vx().arg("info").arg(&input));
    assert!(text.contains("Resolution: 8x8"), "{text}");
    assert!(text.contains("24 BGR888"), "{text}");
    assert!(text.contains("Mip levels: 4"), "{text}");
    assert!(text.contains("DXT1:       32 B"), "{text}");
}

#[test]
fn dxt_writes_preview() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("grad.png");
    let preview = dir.path().join("preview.png");
    write_gradient(&input);

    let text = stdout(vx().args(["dxt", "-f", "dxt5", "-o"]).arg(&preview).arg(&input));
    assert!(text.contains("RMSE"), "{text}");
    assert!(preview.is_file());
}

#[test]
fn resize_and_mipmap() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("grad.png");
    write_gradient(&input);

    let small = dir.path().join("small.png");
    stdout(vx().args(["resize", "-w", "4", "-H", "2", "-f", "bilinear", "-o"]).arg(&small).arg(&input));
    let decoder = png::Decoder::new(std::io::BufReader::new(File::open(&small).unwrap()));
    let reader = decoder.read_info().unwrap();
    assert_eq!((reader.info().width, reader.info().height), (4, 2));

    let mips = dir.path().join("mips");
    let text = stdout(vx().args(["mipmap", "-o"]).arg(&mips).arg(&input));
    assert!(text.contains("Wrote 4 levels"), "{text}");
    assert!(mips.join("grad_mip3.png").is_file());
}

#[test]
fn fitbox_prints_box() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("points.txt");
    std::fs::write(&input, "0 0 0\n4 0 0\n0 2 0\n4 2 0\n0 0 1\n4 0 1\n0 2 1\n4 2 1\n").unwrap();

    let text = stdout(vx().arg("fitbox").arg(&input));
    assert!(text.starts_with("8 points"), "{text}");
    assert!(text.contains("Center:  (2.0000, 1.0000, 0.5000)"), "{text}");
}

#[test]
fn bad_format_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("grad.png");
    write_gradient(&input);

    let out = vx().args(["dxt", "-f", "dxt9"]).arg(&input).output().unwrap();
    assert!(!out.status.success());
}

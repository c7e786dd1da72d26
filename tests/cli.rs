extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn smoothbrot() -> Command {
    Command::cargo_bin("smoothbrot").unwrap()
}

#[test]
fn writes_a_pixmap() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("mandel.ppm");
    smoothbrot()
        .args(&["-o", out.to_str().unwrap(), "-s", "32x24", "-i", "64", "-t", "1"])
        .assert()
        .success();
    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"P6"));
    // Header plus three bytes a pixel.
    assert!(bytes.len() > 32 * 24 * 3);
}

#[test]
fn smooth_lookup_render_succeeds() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("smooth.ppm");
    smoothbrot()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "40x30",
            "-b",
            "16",
            "--smooth",
            "--lookup",
            "--offset",
            "-5",
            "--from",
            "#102030",
        ])
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn lookup_needs_smooth() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("nope.ppm");
    smoothbrot()
        .args(&["-o", out.to_str().unwrap(), "--lookup"])
        .assert()
        .failure();
}

#[test]
fn rejects_bad_color() {
    smoothbrot()
        .args(&["-o", "unused.ppm", "--interior", "#12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse color"));
}

#[test]
fn rejects_inverted_plane() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("inverted.ppm");
    smoothbrot()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "8x8",
            "-l",
            "1.0,1.0",
            "-r",
            "-1.0,-1.0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
    assert!(!out.exists());
}

#[test]
fn rejects_empty_image() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("empty.ppm");
    smoothbrot()
        .args(&["-o", out.to_str().unwrap(), "-s", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-zero"));
}

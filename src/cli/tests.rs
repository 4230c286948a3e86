use std::fs;
use std::path::PathBuf;

use clap::Parser;

use super::{Cli, run};

fn write_layout(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("layout.yaml");
    fs::write(&path, "title: cli\nwidth: 4\nheight: 4\nchannels: 2\nslices: 3\n").expect("write");
    path
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("arguments")
}

#[test]
fn info_and_offsets_run_on_a_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = write_layout(&dir);
    let layout = layout.to_str().expect("utf-8 path");

    run(parse(&["image5d", "info", "--layout", layout])).expect("info");
    run(parse(&["image5d", "-v", "offsets", "--layout", layout])).expect("offsets");
}

#[test]
fn expand_accepts_shared_fill() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = write_layout(&dir);
    let layout = layout.to_str().expect("utf-8 path");

    let cli = parse(&[
        "image5d",
        "expand",
        "--layout",
        layout,
        "--dimension",
        "frame",
        "--size",
        "4",
        "--fill",
        "shared",
    ]);
    assert!(!cli.verbose);
    run(cli).expect("expand");
}

#[test]
fn errors_surface_as_messages() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = write_layout(&dir);
    let layout = layout.to_str().expect("utf-8 path");

    let zero = parse(&[
        "image5d",
        "expand",
        "--layout",
        layout,
        "--dimension",
        "slice",
        "--size",
        "0",
    ]);
    let message = run(zero).expect_err("zero size");
    assert!(message.contains("at least 1"));

    let missing = dir.path().join("missing.json");
    let missing = missing.to_str().expect("utf-8 path");
    assert!(run(parse(&["image5d", "info", "--layout", missing])).is_err());

    let fixed_axis = Cli::try_parse_from([
        "image5d",
        "expand",
        "--layout",
        layout,
        "--dimension",
        "width",
        "--size",
        "2",
    ]);
    assert!(fixed_axis.is_err());
}

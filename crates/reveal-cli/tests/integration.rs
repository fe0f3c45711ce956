//! Integration tests for the reveal CLI.
//!
//! These run the actual binary and check end-to-end behaviour.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn reveal() -> Command {
    Command::new(env!("CARGO_BIN_EXE_reveal"))
}

fn run(args: &[&str]) -> Output {
    reveal().args(args).output().expect("Failed to execute command")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("reveal-cli-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn modes_command_lists_all_types() {
    let output = run(&["modes"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["triangles", "rectangles", "shards"] {
        assert!(stdout.contains(name), "missing {name}");
    }
}

#[test]
fn cover_json_has_requested_tiles() {
    let output = run(&["cover", "640", "480", "-n", "15", "-m", "shards", "--seed", "3", "-f", "json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["polygons"].as_array().unwrap().len(), 15);
    assert_eq!(json["seed"], 3);
    assert_eq!(json["mode"], "Shards");
    assert!(json["polygons"][0]["pnts"][0]["x"].is_number());
}

#[test]
fn cover_is_reproducible_with_seed() {
    let args = ["cover", "300", "200", "-n", "9", "-m", "triangles", "--seed", "77"];
    assert_eq!(run(&args).stdout, run(&args).stdout);
}

#[test]
fn cover_svg_to_file() {
    let dir = scratch_dir("svg");
    let path = dir.join("covering.svg");
    let output = run(&["cover", "100", "100", "-n", "7", "-o", path.to_str().unwrap()]);
    assert!(output.status.success());

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<path").count(), 7);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn too_many_tiles_fails_cleanly() {
    let output = run(&["cover", "10", "10", "-n", "50"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("50"), "stderr: {stderr}");
}

#[test]
fn unknown_mode_is_rejected() {
    let output = run(&["cover", "100", "100", "-m", "hexagons"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("hexagons"));
}

#[test]
fn settings_file_drives_defaults() {
    let dir = scratch_dir("settings");
    let path = dir.join("settings.json");
    std::fs::write(&path, r#"{ "covering_type": "Triangles", "covering_object_count": 12 }"#).unwrap();

    let output = run(&["--settings", path.to_str().unwrap(), "cover", "200", "200", "-f", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mode"], "Triangles");
    assert_eq!(json["polygons"].as_array().unwrap().len(), 12);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn play_reports_each_step() {
    let mut child = reveal()
        .args(["play", "400", "300", "-n", "3", "--seed", "5", "--images", "2"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn");

    let script = "\
# reveal everything one tile at a time
key space
action uncover
swipe 10 10 12 12
action uncover
swipe 300 100 50 100
swipe 0 0 100 5 multi
";
    child.stdin.take().unwrap().write_all(script.as_bytes()).unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let lines: Vec<serde_json::Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 7);

    assert_eq!(lines[0]["input"], "start");
    assert_eq!(lines[0]["tiles"], 3);
    assert_eq!(lines[0]["state"], "Covered");

    assert_eq!(lines[1]["visible"], 2);
    assert_eq!(lines[3]["visible"], 0);
    assert_eq!(lines[3]["state"], "Uncovered");
    assert_eq!(lines[4]["outcome"]["Redraw"], "Nothing");

    // Leftward swipe: next image, fresh covering.
    assert_eq!(lines[5]["outcome"]["ShowImage"]["index"], 1);
    assert_eq!(lines[5]["visible"], 3);

    // Multi-touch is ignored.
    assert!(lines[6].get("outcome").is_none());
    assert_eq!(lines[6]["visible"], 3);
}

#[test]
fn render_writes_png_of_same_size() {
    let dir = scratch_dir("render");
    let input = dir.join("photo.png");
    let output_path = dir.join("covered.png");
    image::RgbImage::from_pixel(64, 48, image::Rgb([10, 200, 30]))
        .save(&input)
        .unwrap();

    let output = run(&[
        "render",
        input.to_str().unwrap(),
        "-n",
        "6",
        "--seed",
        "2",
        "--uncover",
        "2",
        "-o",
        output_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let rendered = image::open(&output_path).unwrap();
    assert_eq!((rendered.width(), rendered.height()), (64, 48));
    std::fs::remove_dir_all(&dir).unwrap();
}

use std::fs;
use std::process::Command;

use notegraph::LayoutSnapshot;

#[test]
fn lays_out_fixture_notes_to_svg_and_json() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let svg_path = dir.path().join("layout.svg");
    let json_path = dir.path().join("layout.json");

    let status = Command::new(env!("CARGO_BIN_EXE_notegraph"))
        .args([
            "layout",
            "--input",
            "tests/fixtures/notes.yaml",
            "--output",
            svg_path.to_str().unwrap(),
            "--json",
            json_path.to_str().unwrap(),
            "--seed",
            "7",
        ])
        .status()
        .expect("Failed to execute notegraph");

    assert!(status.success(), "notegraph exited with error");

    let svg = fs::read_to_string(&svg_path).expect("Failed to read layout.svg");
    assert!(svg.contains(r#"width="400.00""#), "Missing bounding box");
    assert_eq!(svg.matches("class=\"anchor\"").count(), 6);
    assert_eq!(svg.matches("class=\"note\"").count(), 6);
    assert_eq!(svg.matches("class=\"edge\"").count(), 12);
    assert!(svg.contains("<title>D</title>"), "Missing note label");

    let snapshot: LayoutSnapshot =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert!(snapshot.step > 0);
    assert_eq!(snapshot.note_positions().len(), 6);
    assert!(snapshot.anchor_positions().is_some());
    for position in snapshot.note_positions() {
        assert!(position.x.is_finite() && position.y.is_finite());
    }
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("out.json");

    let status = Command::new(env!("CARGO_BIN_EXE_notegraph"))
        .args([
            "layout",
            "-i",
            "tests/fixtures/notes.yaml",
            "-o",
            json_path.to_str().unwrap(),
            "--config",
            "tests/fixtures/fast_cooling.yaml",
            "--bbox",
            "300",
            "--max-steps",
            "3",
        ])
        .status()
        .expect("Failed to execute notegraph");
    assert!(status.success());

    let snapshot: LayoutSnapshot =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    // Hexagon radius for a 300 side with the default margin
    let center = snapshot.center().unwrap();
    assert!((center.x - 144.0).abs() < 1e-9);
    assert!((center.y - 144.0).abs() < 1e-9);

    // cooling_rate 0.2 from the config file: 4 * 0.8^3, where the default
    // rate would leave 4 * 0.95^3
    assert_eq!(snapshot.step, 3);
    assert!(
        (snapshot.temperature - 2.048).abs() < 1e-9,
        "temperature {}",
        snapshot.temperature
    );
}

#[test]
fn animate_writes_final_frame() {
    let dir = tempfile::tempdir().unwrap();
    let svg_path = dir.path().join("frames").join("live.svg");

    let output = Command::new(env!("CARGO_BIN_EXE_notegraph"))
        .args([
            "animate",
            "--input",
            "tests/fixtures/notes.yaml",
            "--output",
            svg_path.to_str().unwrap(),
            "--interval-ms",
            "1",
            "--max-steps",
            "25",
        ])
        .output()
        .expect("Failed to execute notegraph");

    assert!(
        output.status.success(),
        "animate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let svg = fs::read_to_string(&svg_path).expect("Failed to read live.svg");
    assert!(svg.contains("</svg>"));
}

#[test]
fn rejects_pull_weights_that_do_not_sum_to_one() {
    let dir = tempfile::tempdir().unwrap();
    let svg_path = dir.path().join("never.svg");

    let output = Command::new(env!("CARGO_BIN_EXE_notegraph"))
        .args([
            "layout",
            "--input",
            "tests/fixtures/bad_weights.json",
            "--output",
            svg_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute notegraph");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Overweight"), "unexpected stderr: {stderr}");
    assert!(!svg_path.exists());
}

#[test]
fn rejects_unsupported_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("layout.png");

    let status = Command::new(env!("CARGO_BIN_EXE_notegraph"))
        .args([
            "layout",
            "--input",
            "tests/fixtures/notes.yaml",
            "--output",
            out.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute notegraph");

    assert!(!status.success());
    assert!(!out.exists());
}

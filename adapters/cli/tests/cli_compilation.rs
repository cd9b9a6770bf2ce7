use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "tile-maze"])
        .status()
        .expect("failed to invoke cargo check for tile-maze CLI binary");

    assert!(status.success(), "cargo check --bin tile-maze should succeed");
}

#[test]
fn generate_prints_a_seeded_map() {
    let output = Command::new(env!("CARGO_BIN_EXE_tile-maze"))
        .args(["generate", "--rows", "4", "--columns", "6", "--level", "3", "--seed", "42"])
        .output()
        .expect("failed to run tile-maze generate");

    assert!(output.status.success());
    let map = String::from_utf8(output.stdout).expect("utf-8 output");
    let lines: Vec<&str> = map.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|line| line.chars().count() == 6));
    assert_eq!(map.matches('S').count(), 1);
    assert_eq!(map.matches('E').count(), 1);
}

#[test]
fn best_score_defaults_to_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = Command::new(env!("CARGO_BIN_EXE_tile-maze"))
        .arg("best-score")
        .arg("--scores")
        .arg(dir.path().join("best.txt"))
        .output()
        .expect("failed to run tile-maze best-score");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0");
}

#[test]
fn play_records_the_final_score() {
    let dir = tempfile::tempdir().expect("temp dir");
    let scores = dir.path().join("best.txt");
    let status = Command::new(env!("CARGO_BIN_EXE_tile-maze"))
        .args(["play", "--moves", "ES", "--seed", "7", "--scores"])
        .arg(&scores)
        .status()
        .expect("failed to run tile-maze play");

    assert!(status.success());
    let best: u64 = std::fs::read_to_string(&scores)
        .expect("score file written")
        .trim()
        .parse()
        .expect("numeric score");
    assert!(best >= 100);
}

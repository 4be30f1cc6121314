// Black-box tests for the `alvic` binary.
// Run with: cargo test -p alvic-cli --test cli_tests

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// `alvic` running inside `dir`, isolated from the user's config.
fn alvic(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_alvic"));
    cmd.current_dir(dir)
        .env_remove("ALVIC_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn translate_in(dir: &TempDir, extra: &[&str]) -> Output {
    let parts = fixture("parts_header.csv");
    let catalog = fixture("alvic_catalog.csv");
    let mut args = vec![
        "translate".to_string(),
        parts.display().to_string(),
        "--catalog".to_string(),
        catalog.display().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    alvic(dir.path()).args(&args).output().expect("run alvic translate")
}

// ---------------------------------------------------------------------------
// translate
// ---------------------------------------------------------------------------

#[test]
fn translate_writes_default_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let output = translate_in(&dir, &[]);

    assert!(output.status.success(), "exit code: {:?}\nstderr: {}", output.status, stderr(&output));
    assert!(dir.path().join("output_alvic_mecanizadas.csv").is_file());
    assert!(dir.path().join("output_alvic_sin_mecanizar.csv").is_file());

    let err = stderr(&output);
    assert!(err.contains("translated 10 parts"), "stderr: {err}");
    assert!(err.contains("2 machined"), "stderr: {err}");
    assert!(err.contains("1 NO_MATCH"), "stderr: {err}");
}

#[test]
fn translate_custom_output_paths() {
    let dir = tempfile::tempdir().unwrap();
    let output = translate_in(&dir, &["--machined-out", "mec.csv", "--non-machined-out", "sin.csv"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let machined = std::fs::read_to_string(dir.path().join("mec.csv")).unwrap();
    assert_eq!(machined.lines().count(), 3);
    assert!(machined.lines().next().unwrap().ends_with("Es_LAC,Es_Mecanizada"));

    let non_machined = std::fs::read_to_string(dir.path().join("sin.csv")).unwrap();
    assert_eq!(non_machined.lines().count(), 9);
}

#[test]
fn translate_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let output = translate_in(&dir, &["--json", "--output", "run.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON on stdout");
    assert_eq!(json["summary"]["total"], 10);
    assert_eq!(json["summary"]["machined"], 2);
    assert_eq!(json["summary"]["match_type_counts"]["EXACT"], 2);
    assert_eq!(json["summary"]["match_type_counts"][""], 1);
    assert_eq!(json["meta"]["layout"], "header");
    assert_eq!(json["meta"]["catalog_entries"], 5);

    let written = std::fs::read_to_string(dir.path().join("run.json")).unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&written).unwrap(), json);
}

#[test]
fn fail_on_no_match_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = translate_in(&dir, &["--fail-on-no-match"]);
    assert_eq!(output.status.code(), Some(8), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("no catalog panel"));
    // Files are still written.
    assert!(dir.path().join("output_alvic_sin_mecanizar.csv").is_file());
}

#[test]
fn same_output_for_both_partitions_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = translate_in(&dir, &["--machined-out", "x.csv", "--non-machined-out", "x.csv"]);
    assert_eq!(output.status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// catalog resolution
// ---------------------------------------------------------------------------

#[test]
fn missing_catalog_exit_code_and_hint() {
    let dir = tempfile::tempdir().unwrap();
    let output = alvic(dir.path())
        .args(["translate", fixture("parts_header.csv").to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let err = stderr(&output);
    assert!(err.contains("base_datos_alvic_2026.csv"), "stderr: {err}");
    assert!(err.contains("hint:"), "stderr: {err}");
    assert!(!dir.path().join("output_alvic_mecanizadas.csv").exists());
}

#[test]
fn default_catalog_location_is_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(fixture("alvic_catalog.csv"), dir.path().join("base_datos_alvic_2026.csv")).unwrap();

    let output = alvic(dir.path())
        .args(["translate", fixture("parts_header.csv").to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[test]
fn unrecognized_input_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = alvic(dir.path())
        .args([
            "translate",
            fixture("parts_bad_format.csv").to_str().unwrap(),
            "--catalog",
            fixture("alvic_catalog.csv").to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Ancho"));
}

#[test]
fn invalid_config_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("alvic.toml");
    std::fs::write(&config, "[catalog]\nunknown_key = 1\n").unwrap();

    let output = translate_in(&dir, &["--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(6), "stderr: {}", stderr(&output));
}

#[test]
fn config_from_environment_sets_output_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("alvic.toml");
    std::fs::write(&config, "[output]\nmachined = \"m.csv\"\nnon_machined = \"n.csv\"\n").unwrap();

    let output = alvic(dir.path())
        .env("ALVIC_CONFIG", &config)
        .args([
            "translate",
            fixture("parts_header.csv").to_str().unwrap(),
            "--catalog",
            fixture("alvic_catalog.csv").to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("m.csv").is_file());
    assert!(dir.path().join("n.csv").is_file());
}

#[test]
fn missing_subcommand_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = alvic(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn debug_logging_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = translate_in(&dir, &["-vv", "--json"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("catalog loaded"));
    // stdout stays pure JSON.
    assert!(serde_json::from_str::<serde_json::Value>(&stdout(&output)).is_ok());
}

// ---------------------------------------------------------------------------
// preview + catalog check
// ---------------------------------------------------------------------------

#[test]
fn preview_reports_layout_and_lac_count() {
    let dir = tempfile::tempdir().unwrap();
    let output = alvic(dir.path())
        .args(["preview", fixture("parts_header.csv").to_str().unwrap(), "--rows", "2"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("layout:  header"));
    assert!(out.contains("rows:    10"));
    assert!(out.contains("lac:     9"));
    assert!(out.contains("Ancho"));
    assert!(out.contains("P2"));
    assert!(!out.contains("P3\t"));
}

#[test]
fn catalog_check_reports_stats() {
    let dir = tempfile::tempdir().unwrap();
    let output = alvic(dir.path())
        .args(["catalog", "check", "--catalog", fixture("alvic_catalog.csv").to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("rows read:    7"));
    assert!(out.contains("retained:     5"));
    assert!(out.contains("thickness:    19, 22"));
}

#[test]
fn catalog_check_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = alvic(dir.path())
        .args(["catalog", "check", "--json", "--catalog", fixture("alvic_catalog.csv").to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["stats"]["incomplete"], 1);
    assert_eq!(json["stats"]["out_of_scope"], 1);
    assert_eq!(json["colors"], serde_json::json!(["BLANCO SM", "GRIS NUBE SM", "L4596"]));
}

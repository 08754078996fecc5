//! Integration tests for top-level CLI behavior.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::{json, Value};

fn run_purlgen(dir: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_purlgen");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("PURLGEN_CONFIG")
        .env_remove("PURLGEN_RESOURCE_DIR")
        .env_remove("PURLGEN_OUTPUT")
        .env_remove("PURLGEN_SCHEMA_VERSION")
        .env_remove("PURLGEN_ON_COLLISION")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run purlgen binary")
}

fn write_manifest(root: &Path, project: &str, sub: &str, body: &str) {
    let dir = root.join("resource").join(project).join(sub);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("purls.yml"), body).unwrap();
}

fn read_output(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn default_run_cleans_and_aggregates_in_working_directory() {
    let tmp = tempfile::tempdir().unwrap();
    write_manifest(
        tmp.path(),
        "app",
        "foo",
        "purls:\n  - pkg:npm/a@1\n  - pkg:npm/b@2\n",
    );
    write_manifest(
        tmp.path(),
        "lib",
        "bar",
        "purls: [pkg:cargo/serde@1.0.0]\n",
    );
    fs::write(tmp.path().join("resource/.DS_Store"), "").unwrap();
    fs::write(tmp.path().join("resource/app/foo/.DS_Store"), "").unwrap();

    let output = run_purlgen(tmp.path(), &[]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!tmp.path().join("resource/.DS_Store").exists());
    assert!(!tmp.path().join("resource/app/foo/.DS_Store").exists());
    assert_eq!(
        read_output(&tmp.path().join("purls.json")),
        json!({
            "version": "1.1",
            "foo": ["pkg:npm/a@1", "pkg:npm/b@2"],
            "bar": ["pkg:cargo/serde@1.0.0"],
        })
    );
}

#[test]
fn output_uses_two_space_indentation() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("resource")).unwrap();

    let output = run_purlgen(tmp.path(), &[]);

    assert!(output.status.success());
    let text = fs::read_to_string(tmp.path().join("purls.json")).unwrap();
    assert_eq!(text, "{\n  \"version\": \"1.1\"\n}");
}

#[test]
fn broken_manifest_is_logged_and_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    write_manifest(tmp.path(), "app", "bad", "purls: [unterminated\n");
    write_manifest(tmp.path(), "app", "good", "purls: [x]\n");

    let output = run_purlgen(tmp.path(), &["aggregate"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("could not parse"), "stdout: {stdout}");
    assert_eq!(
        read_output(&tmp.path().join("purls.json")),
        json!({"version": "1.1", "good": ["x"]})
    );
}

#[test]
fn strict_flag_turns_skips_into_failure() {
    let tmp = tempfile::tempdir().unwrap();
    write_manifest(tmp.path(), "app", "nokey", "packages: [x]\n");

    let output = run_purlgen(tmp.path(), &["--strict"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("1 entries could not be processed"));
    // The document is still written before the exit status is decided.
    assert!(tmp.path().join("purls.json").exists());
}

#[test]
fn missing_resource_dir_exits_with_error() {
    let tmp = tempfile::tempdir().unwrap();

    let output = run_purlgen(tmp.path(), &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("cannot read resource directory"));
    assert!(!tmp.path().join("purls.json").exists());
}

#[test]
fn flags_and_config_file_select_paths_and_version() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir_all(data.join("p/web")).unwrap();
    fs::write(data.join("p/web/purls.yml"), "purls: [a]\n").unwrap();
    let config = "resource_dir: data\nversion: \"2.0\"\n";
    fs::write(tmp.path().join("purlgen.yml"), config).unwrap();

    let output = run_purlgen(tmp.path(), &["--output", "out/all.json"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        read_output(&tmp.path().join("out/all.json")),
        json!({"version": "2.0", "web": ["a"]})
    );
}

#[test]
fn environment_overrides_schema_version() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("resource")).unwrap();

    let bin = env!("CARGO_BIN_EXE_purlgen");
    let output = Command::new(bin)
        .current_dir(tmp.path())
        .env("PURLGEN_SCHEMA_VERSION", "3.1")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        read_output(&tmp.path().join("purls.json")),
        json!({"version": "3.1"})
    );
}

#[test]
fn collision_error_policy_keeps_first_project() {
    let tmp = tempfile::tempdir().unwrap();
    write_manifest(tmp.path(), "a", "shared", "purls: [first]\n");
    write_manifest(tmp.path(), "b", "shared", "purls: [second]\n");

    let default_run = run_purlgen(tmp.path(), &["aggregate"]);
    assert!(default_run.status.success());
    assert_eq!(
        read_output(&tmp.path().join("purls.json")),
        json!({"version": "1.1", "shared": ["second"]})
    );

    let error_run = run_purlgen(tmp.path(), &["aggregate", "--on-collision", "error"]);
    assert!(error_run.status.success());
    assert_eq!(
        read_output(&tmp.path().join("purls.json")),
        json!({"version": "1.1", "shared": ["first"]})
    );
}

#[test]
fn clean_subcommand_does_not_write_output() {
    let tmp = tempfile::tempdir().unwrap();
    write_manifest(tmp.path(), "app", "foo", "purls: []\n");
    fs::write(tmp.path().join("resource/app/.DS_Store"), "").unwrap();

    let output = run_purlgen(tmp.path(), &["clean"]);

    assert!(output.status.success());
    assert!(!tmp.path().join("resource/app/.DS_Store").exists());
    assert!(!tmp.path().join("purls.json").exists());
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let tmp = tempfile::tempdir().unwrap();
    let output = run_purlgen(tmp.path(), &["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

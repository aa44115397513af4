use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn validate(path_env: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lsv-convert"));
    cmd.arg("validate")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("PATH", path_env);
    cmd
}

/// Directory with a fake `vector` that rejects any file whose name contains
/// "bad".
#[cfg(unix)]
fn fake_vector() -> tempfile::TempDir {
    use std::os::unix::fs::PermissionsExt;

    let bin = tempdir().expect("tempdir");
    let script = bin.path().join("vector");
    fs::write(
        &script,
        "#!/bin/sh\n\
         for arg in \"$@\"; do last=\"$arg\"; done\n\
         case \"${last##*/}\" in\n\
           *bad*) echo \"x: unknown field\" >&2; exit 78 ;;\n\
         esac\n\
         echo \"Validated\"\n",
    )
    .expect("script");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
    bin
}

#[cfg(unix)]
#[test]
fn valid_files_pass() {
    let bin = fake_vector();
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("good.toml");
    fs::write(&file, "[sources.a]\ntype = \"stdin\"\n").expect("write");

    validate(bin.path())
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("good.toml: valid"))
        .stdout(predicate::str::contains("All files are valid!"));
}

#[cfg(unix)]
#[test]
fn invalid_and_missing_files_fail() {
    let bin = fake_vector();
    let dir = tempdir().expect("tempdir");
    let good = dir.path().join("good.toml");
    let bad = dir.path().join("bad.toml");
    fs::write(&good, "").expect("write");
    fs::write(&bad, "").expect("write");

    validate(bin.path())
        .arg(&good)
        .arg(&bad)
        .arg(dir.path().join("gone.toml"))
        .arg("--verbose")
        .assert()
        .failure()
        .stdout(predicate::str::contains("good.toml: valid"))
        .stdout(predicate::str::contains("bad.toml: invalid"))
        .stdout(predicate::str::contains("x: unknown field"))
        .stdout(predicate::str::contains("gone.toml: file not found"))
        .stdout(predicate::str::contains("All files are valid!").not())
        .stderr(predicate::str::contains("some files failed validation"));
}

#[cfg(unix)]
#[test]
fn defaults_to_toml_files_in_current_directory() {
    let bin = fake_vector();
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("one.toml"), "").expect("write");
    fs::write(dir.path().join("two.toml"), "").expect("write");
    fs::write(dir.path().join("notes.md"), "").expect("write");

    let output = validate(bin.path())
        .current_dir(dir.path())
        .arg("--format")
        .arg("json")
        .output()
        .expect("run");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["file"], "one.toml");
    assert_eq!(rows[0]["status"], "valid");
    assert_eq!(rows[1]["file"], "two.toml");
}

#[test]
fn no_toml_files_is_an_error() {
    let empty = tempdir().expect("tempdir");
    validate(empty.path())
        .current_dir(empty.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no .toml files found to validate"));
}

#[test]
fn missing_vector_cli_marks_files_invalid() {
    let empty_path = tempdir().expect("tempdir");
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("config.toml");
    fs::write(&file, "").expect("write");

    validate(empty_path.path())
        .arg(&file)
        .arg("-v")
        .assert()
        .failure()
        .stdout(predicate::str::contains("config.toml: invalid"))
        .stdout(predicate::str::contains("Vector CLI not found in PATH"));
}

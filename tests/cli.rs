//! CLI tests for paths that fail or finish before a cluster connection is made.
use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("cqlfixture").expect("binary");
    cmd.env_remove("CQLFIXTURE_HOSTS")
        .env_remove("CQLFIXTURE_USERNAME")
        .env_remove("CQLFIXTURE_PASSWORD");
    cmd
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("validate_same"))
        .stdout(predicate::str::contains("validate_empty"));
}

#[test]
fn table_name_is_required() {
    cmd()
        .args(["validate_empty", "--keyspace-name", "ks1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--table-name"));
}

#[test]
fn load_rejects_non_integer_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("bad.csv");
    std::fs::write(&data, "foo,bar,baz,quux\n1,2,3,4\n1,x,3,4\n").expect("write");

    cmd()
        .arg("load")
        .arg(&data)
        .args(["--keyspace-name", "ks1", "--table-name", "t1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 3"))
        .stderr(predicate::str::contains("is not an integer"));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");

    cmd()
        .arg("load")
        .arg(dir.path().join("missing.csv"))
        .args(["--keyspace-name", "ks1", "--table-name", "t1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to open file"));
}

#[test]
fn validate_same_rejects_short_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("short.csv");
    std::fs::write(&data, "foo,bar,baz,quux\n1,2,3\n").expect("write");

    cmd()
        .current_dir(dir.path())
        .arg("validate_same")
        .arg(&data)
        .args(["--keyspace-name", "ks1", "--table-name", "t1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected 4 fields, found 3"));

    assert!(!dir.path().join("bad_contents.csv").exists());
}

#[test]
fn generate_rejects_inverted_range() {
    cmd()
        .args([
            "generate",
            "-n",
            "5",
            "--min-value",
            "10",
            "--max-value",
            "-10",
            "--keyspace-name",
            "ks1",
            "--table-name",
            "t1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value range"));
}

#[test]
fn username_requires_password() {
    cmd()
        .args([
            "--username",
            "cassandra",
            "validate_empty",
            "--keyspace-name",
            "ks1",
            "--table-name",
            "t1",
        ])
        .assert()
        .code(2);
}

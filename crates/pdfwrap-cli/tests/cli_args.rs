use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("pdfwrap").unwrap();
    for var in ["PDFWRAP_BACKEND", "PDFWRAP_BINARY", "PDFWRAP_TIMEOUT"] {
        cmd.env_remove(var);
    }
    cmd
}

/// An existing file to pass as `--binary`; commands below fail before it runs.
fn stand_in_binary(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("tool");
    std::fs::write(&path, b"").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("join"))
        .stdout(predicate::str::contains("join-pattern"))
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("reorder"))
        .stdout(predicate::str::contains("set-bookmarks"))
        .stdout(predicate::str::contains("set-metadata"))
        .stdout(predicate::str::contains("--backend"));
}

#[test]
fn pages_subcommand_help() {
    cmd()
        .args(["pages", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("PDFWRAP_BACKEND"));
}

#[test]
fn split_subcommand_help() {
    cmd()
        .args(["split", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME=PAGES"))
        .stdout(predicate::str::contains("--output-dir"));
}

#[test]
fn no_subcommand_fails() {
    cmd().assert().failure();
}

#[test]
fn unknown_backend_rejected() {
    cmd()
        .args(["--backend", "qpdf", "pages", "a.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("qpdf"));
}

#[test]
fn join_requires_output() {
    cmd().args(["join", "a.pdf", "b.pdf"]).assert().failure();
}

#[test]
fn missing_binary_reported() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("no-such-pdftk");

    cmd()
        .args(["--binary", binary.to_str().unwrap(), "pages", "a.pdf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: not found: pdftk binary"))
        .stderr(predicate::str::contains("PDFWRAP_BINARY"));
}

#[test]
fn backend_chosen_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("no-such-pdfcpu");

    cmd()
        .env("PDFWRAP_BACKEND", "pdfcpu")
        .env("PDFWRAP_BINARY", &binary)
        .args(["metadata", "a.pdf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pdfcpu binary"));
}

#[test]
fn missing_input_reported() {
    let dir = tempfile::tempdir().unwrap();
    let binary = stand_in_binary(&dir);
    let missing = dir.path().join("missing.pdf");

    cmd()
        .args(["--binary", &binary, "pages", missing.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found: PDF"))
        .stderr(predicate::str::contains("missing.pdf"));
}

#[test]
fn join_of_missing_file_names_operation() {
    let dir = tempfile::tempdir().unwrap();
    let binary = stand_in_binary(&dir);
    let out = dir.path().join("out.pdf");

    cmd()
        .args(["--binary", &binary, "join", "nope.pdf", "-o", out.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to join PDF"));
}

#[test]
fn join_pattern_without_match_reported() {
    let dir = tempfile::tempdir().unwrap();
    let binary = stand_in_binary(&dir);
    let out = dir.path().join("out.pdf");

    cmd()
        .args([
            "--binary",
            &binary,
            "join-pattern",
            dir.path().to_str().unwrap(),
            "*.pdf",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("matching the pattern \"*.pdf\""));
}

#[test]
fn reorder_rejects_page_zero() {
    let dir = tempfile::tempdir().unwrap();
    let binary = stand_in_binary(&dir);

    cmd()
        .args(["--binary", &binary, "reorder", "a.pdf", "2,0,1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("page 0 is invalid"));
}

#[test]
fn reorder_rejects_huge_range() {
    let dir = tempfile::tempdir().unwrap();
    let binary = stand_in_binary(&dir);

    cmd()
        .args(["--binary", &binary, "reorder", "a.pdf", "1-4294967295"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("too long"));
}

#[test]
fn split_rejects_malformed_part() {
    let dir = tempfile::tempdir().unwrap();
    let binary = stand_in_binary(&dir);

    cmd()
        .args(["--binary", &binary, "split", "a.pdf", "--part", "first.pdf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected NAME=PAGES"));
}

#[test]
fn set_metadata_rejects_entry_without_value() {
    let dir = tempfile::tempdir().unwrap();
    let binary = stand_in_binary(&dir);

    cmd()
        .args(["--binary", &binary, "set-metadata", "a.pdf", "Title"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn set_bookmarks_rejects_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let binary = stand_in_binary(&dir);
    let json = dir.path().join("bookmarks.json");
    std::fs::write(&json, "{not json").unwrap();

    cmd()
        .args([
            "--binary",
            &binary,
            "set-bookmarks",
            "a.pdf",
            json.to_str().unwrap(),
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid bookmarks"));
}

//! End-to-end tests for `index-md check`.

#![cfg(unix)]

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_check_reports_version() {
    let fixture = TestFixture::new();
    let program = fixture.summarizer(summarizers::UTILITY);

    fixture
        .command()
        .arg("check")
        .arg("--program")
        .arg(&program)
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK]"))
        .stdout(predicate::str::contains("fake-summarizer 1.0"));
}

#[test]
fn test_check_reads_program_from_environment() {
    let fixture = TestFixture::new();
    let program = fixture.summarizer(summarizers::UTILITY);

    fixture
        .command()
        .env("INDEX_MD_SUMMARIZER", &program)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("fake-summarizer 1.0"));
}

#[test]
fn test_check_reads_program_from_config() {
    let fixture = TestFixture::new();
    let program = fixture.summarizer(summarizers::UTILITY);
    fixture.write(
        ".index-md.yaml",
        &format!("summarizer-program: {}\n", program.display()),
    );

    fixture
        .command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("fake-summarizer 1.0"));
}

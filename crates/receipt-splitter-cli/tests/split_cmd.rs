//! Integration tests for the `split` subcommand.

mod common;

use std::fs;

use common::{cmd_in, file_names, write_receipt_pdf};
use predicates::prelude::*;

const MARIA: &[&str] = &["Valor: R$ 100,00", "Favorecido: Maria Souza - CPF 123"];
const JOAO: &[&str] = &[
    "Banco do Brasil",
    "Valor principal: R$ 1.234,56",
    "Favorecido: Joao Silva - CPF 456",
];
const NO_VALUE: &[&str] = &["Comprovante", "Favorecido: Ana Lima - CPF 789"];

#[test]
fn split_directory_writes_named_pages_next_to_input() {
    let tmp = tempfile::tempdir().unwrap();
    write_receipt_pdf(&tmp.path().join("in").join("batch.pdf"), &[MARIA, JOAO]);

    cmd_in(tmp.path())
        .args(["split", "in"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing batch.pdf (2 page(s))"))
        .stdout(predicate::str::contains("Page 2 of 2  ok"))
        .stdout(predicate::str::contains("Pages processed successfully: 2 of 2"));

    assert_eq!(
        file_names(&tmp.path().join("in").join("output")),
        vec!["1.234,56 - Joao Silva - BB.pdf", "100,00 - Maria Souza.pdf"]
    );
}

#[test]
fn page_without_value_exits_with_partial_code() {
    let tmp = tempfile::tempdir().unwrap();
    write_receipt_pdf(&tmp.path().join("in").join("mixed.pdf"), &[NO_VALUE, MARIA]);

    cmd_in(tmp.path())
        .args(["split", "in", "-o", "out"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Page 1 of 2  failed"))
        .stdout(predicate::str::contains("no identifying data"))
        .stdout(predicate::str::contains("Pages processed successfully: 1 of 2"));

    assert_eq!(
        file_names(&tmp.path().join("out")),
        vec!["100,00 - Maria Souza.pdf"]
    );
}

#[test]
fn template_override_and_numbering_across_runs() {
    let tmp = tempfile::tempdir().unwrap();
    write_receipt_pdf(&tmp.path().join("in").join("a.pdf"), &[MARIA, MARIA]);

    for _ in 0..2 {
        cmd_in(tmp.path())
            .args(["split", "in", "-o", "out", "-t", "{RECIPIENT}"])
            .assert()
            .success();
    }

    assert_eq!(
        file_names(&tmp.path().join("out")),
        vec![
            "Maria Souza.pdf",
            "Maria Souza_1.pdf",
            "Maria Souza_2.pdf",
            "Maria Souza_3.pdf",
        ]
    );
}

#[test]
fn single_file_input() {
    let tmp = tempfile::tempdir().unwrap();
    write_receipt_pdf(&tmp.path().join("one.pdf"), &[JOAO]);

    cmd_in(tmp.path())
        .args(["split", "one.pdf", "-t", "{BANK} {VALUE}"])
        .assert()
        .success();

    assert_eq!(
        file_names(&tmp.path().join("output")),
        vec!["BB 1.234,56.pdf"]
    );
}

#[test]
fn folders_come_from_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    write_receipt_pdf(&tmp.path().join("scans").join("a.pdf"), &[MARIA]);
    fs::write(
        tmp.path().join("receipt-splitter.toml"),
        r#"
[app]
title = "Monthly receipts"

[folder]
input_folder = "scans"
output_folder = "done"
output_filename = "{VALUE}"
"#,
    )
    .unwrap();

    cmd_in(tmp.path())
        .arg("split")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly receipts"));

    assert_eq!(file_names(&tmp.path().join("done")), vec!["100,00.pdf"]);
}

#[test]
fn quiet_prints_only_summary() {
    let tmp = tempfile::tempdir().unwrap();
    write_receipt_pdf(&tmp.path().join("in").join("a.pdf"), &[MARIA]);

    cmd_in(tmp.path())
        .args(["split", "in", "--quiet"])
        .assert()
        .success()
        .stdout("Pages processed successfully: 1 of 1\n");
}

#[test]
fn unreadable_pdf_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    write_receipt_pdf(&input.join("good.pdf"), &[MARIA]);
    fs::write(input.join("broken.pdf"), b"not a pdf").unwrap();

    cmd_in(tmp.path())
        .args(["split", "in"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Skipping broken.pdf"))
        .stdout(predicate::str::contains("Documents skipped: 1"));

    assert_eq!(file_names(&input.join("output")).len(), 1);
}

#[test]
fn empty_input_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("in")).unwrap();

    cmd_in(tmp.path())
        .args(["split", "in"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no documents found"));
}

#[test]
fn missing_explicit_config_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();

    cmd_in(tmp.path())
        .args(["--config", "nope.toml", "split"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn invalid_config_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("receipt-splitter.toml"), "[folder\n").unwrap();

    cmd_in(tmp.path())
        .arg("split")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration error"));
}

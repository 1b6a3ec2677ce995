use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DICTIONARY: &str = r#"[
    {"key": "Verduras", "value": ["Zanahoria suelta", "Papa elegida", "Choclo amarillo"]},
    {"key": "Carnes", "value": ["Paleta clasica", "Molida comun", "Trasero de novillo"]},
    {"key": "Almacén", "value": ["Galletas Caricias", "Mayonesa Hellmanns", "Lentejas secas"]}
]"#;

const RECEIPT: &str = "1/4 TRASERO SOYCHU (10.50) 98.89\n\n202148000000 1.350 X 29.99\n\nPAPA ELEGIDA SUELT (10.50) 40.49\nSUBTOT. 139.34\n\nTOTAL. 139. 34\n\n";

fn ticket(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ticket").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join("config"));
    cmd
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/categoryArray.json"), DICTIONARY).unwrap();
    fs::write(dir.path().join("receipt.txt"), RECEIPT).unwrap();
    dir
}

#[test]
fn test_total() {
    let dir = workspace();
    ticket(dir.path())
        .arg("total")
        .arg(dir.path().join("receipt.txt"))
        .assert()
        .success()
        .stdout("139.34\n");
}

#[test]
fn test_total_of_blank_receipt_is_nan() {
    let dir = workspace();
    fs::write(dir.path().join("blank.txt"), "\n\r\n\u{000C}\n").unwrap();
    ticket(dir.path())
        .arg("total")
        .arg(dir.path().join("blank.txt"))
        .assert()
        .success()
        .stdout("NaN\n");
}

#[test]
fn test_items_from_stdin() {
    let dir = workspace();
    ticket(dir.path())
        .args(["items", "-"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout("PAPA ELEGIDA SUELT\n");
}

#[test]
fn test_analyze_json() {
    let dir = workspace();
    ticket(dir.path())
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("analyze")
        .arg(dir.path().join("receipt.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Verduras\""))
        .stdout(predicate::str::contains("\"value\": 139.34"));

    assert!(dir.path().join("data/trainingData.json").exists());
}

#[test]
fn test_categories() {
    let dir = workspace();
    ticket(dir.path())
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("categories")
        .assert()
        .success()
        .stdout("Verduras\nCarnes\nAlmacén\n");
}

#[test]
fn test_correct_and_retrain() {
    let dir = workspace();
    let data = dir.path().join("data");
    fs::write(dir.path().join("bollitos.txt"), "Bollitos (10,50)\n").unwrap();

    ticket(dir.path())
        .arg("--data-dir")
        .arg(&data)
        .args(["classify", "-f", "csv"])
        .arg(dir.path().join("bollitos.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0,Bollitos,Verduras"));

    ticket(dir.path())
        .arg("--data-dir")
        .arg(&data)
        .args(["correct", "Almacén", "Bollitos", "--retrain"])
        .assert()
        .success();

    ticket(dir.path())
        .arg("--data-dir")
        .arg(&data)
        .args(["classify", "-f", "csv"])
        .arg(dir.path().join("bollitos.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0,Bollitos,Almacén"));
}

#[test]
fn test_missing_dictionary_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("receipt.txt"), RECEIPT).unwrap();

    ticket(dir.path())
        .arg("--data-dir")
        .arg(dir.path().join("empty"))
        .arg("analyze")
        .arg(dir.path().join("receipt.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize the categorizer"));
}

#[test]
fn test_missing_input_file() {
    let dir = workspace();
    ticket(dir.path())
        .args(["total", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_batch_blank_receipt() {
    let dir = workspace();
    let scans = dir.path().join("scans");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("blank.txt"), "\n\r\n\u{000C}\r\n").unwrap();
    fs::write(scans.join("receipt.txt"), RECEIPT).unwrap();

    ticket(dir.path())
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("batch")
        .arg(scans.join("*.txt").to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"items\": []"))
        .stdout(predicate::str::contains("\"value\": null"))
        .stdout(predicate::str::contains("\"value\": 139.34"));
}

#[test]
fn test_correct_retrain_without_snapshot_trains_once() {
    let dir = workspace();
    let data = dir.path().join("data");

    ticket(dir.path())
        .arg("--data-dir")
        .arg(&data)
        .args(["correct", "Almacén", "Bollitos", "--retrain"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Trained model"))
        .stderr(predicate::str::contains("Retrained").not());

    assert!(data.join("trainingData.json").exists());
    fs::write(dir.path().join("bollitos.txt"), "Bollitos (10,50)\n").unwrap();
    ticket(dir.path())
        .arg("--data-dir")
        .arg(&data)
        .args(["classify", "-f", "csv"])
        .arg(dir.path().join("bollitos.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0,Bollitos,Almacén"));
}

#[test]
fn test_config_init_and_paths() {
    let dir = workspace();
    let config = dir.path().join("ticket.json");
    let data = dir.path().join("data");

    ticket(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("--data-dir")
        .arg(&data)
        .args(["config", "init"])
        .assert()
        .success();

    ticket(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min_line_length\": 7"))
        .stdout(predicate::str::contains(data.display().to_string()));

    ticket(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            data.join("categoryArray.json").display().to_string(),
        ))
        .stdout(predicate::str::contains("exists"));

    ticket(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

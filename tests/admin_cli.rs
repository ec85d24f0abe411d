mod common;

use assert_cmd::Command;
use named_links::domain::repositories::EntryRepository;
use predicates::prelude::*;
use tempfile::TempDir;

fn admin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_admin"));
    cmd.env_remove("STORE_PATH").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_check_missing_store_fails_and_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("typo").join("dbb.json");

    admin()
        .arg("--store")
        .arg(&missing)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open store"));

    assert!(!missing.exists());
    assert!(!dir.path().join("typo").exists());
}

#[test]
fn test_check_missing_file_in_existing_dir_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("dbb.json");

    admin()
        .args(["--store", missing.to_str().unwrap(), "check"])
        .assert()
        .failure();

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_check_existing_store_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let repo = common::open_repository(&dir).await;
    repo.insert("docs", "https://example.com/docs").await.unwrap();

    let path = common::store_path(&dir);
    let before = std::fs::read(&path).unwrap();
    let leftover = dir.path().join("db.json.tmp.1.0");
    std::fs::write(&leftover, b"[").unwrap();

    admin()
        .arg("--store")
        .arg(&path)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Store OK").and(predicate::str::contains("1 entries")));

    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert!(leftover.exists());
}

#[tokio::test]
async fn test_list_shows_entries() {
    let dir = TempDir::new().unwrap();
    let repo = common::open_repository(&dir).await;
    repo.insert("docs", "https://example.com/docs").await.unwrap();
    repo.increment_and_get("docs").await.unwrap();

    admin()
        .arg("--store")
        .arg(common::store_path(&dir))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("docs").and(predicate::str::contains("https://example.com/docs")));
}

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn svodka_cmd() -> Command {
    Command::cargo_bin("svodka").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    svodka_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("bot"))
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("sources"));
}

#[test]
fn test_run_help_shows_dry_run_flag() {
    svodka_cmd()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_send_help_shows_limit_default() {
    svodka_cmd()
        .arg("send")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("5"));
}

#[test]
fn test_missing_token_reports_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    svodka_cmd()
        .arg("sources")
        .env_remove("TELEGRAM_BOT_TOKEN")
        .env("SVODKA_DB_PATH", db_path.to_str().unwrap())
        .env("KEYWORDS", "волгоград")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("TELEGRAM_BOT_TOKEN"));
}

#[test]
fn test_missing_keywords_reports_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    svodka_cmd()
        .arg("sources")
        .env("TELEGRAM_BOT_TOKEN", "123:test")
        .env("SVODKA_DB_PATH", db_path.to_str().unwrap())
        .env_remove("KEYWORDS")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEYWORDS"));
}

#[test]
fn test_sources_lists_all_sites() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    svodka_cmd()
        .arg("sources")
        .env("TELEGRAM_BOT_TOKEN", "123:test")
        .env("SVODKA_DB_PATH", db_path.to_str().unwrap())
        .env("KEYWORDS", "волгоград")
        .env_remove("VK_ACCESS_TOKEN")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("bloknot-volgograd"))
        .stdout(predicate::str::contains("riac34"))
        .stdout(predicate::str::contains("gorvesti"))
        .stdout(predicate::str::contains("v102"))
        .stdout(predicate::str::contains("novostivolgograda"))
        .stdout(predicate::str::contains("vk").not());
}

#[test]
fn test_sources_includes_vk_when_configured() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    svodka_cmd()
        .arg("sources")
        .env("TELEGRAM_BOT_TOKEN", "123:test")
        .env("SVODKA_DB_PATH", db_path.to_str().unwrap())
        .env("KEYWORDS", "волгоград")
        .env("VK_ACCESS_TOKEN", "vk-test-token")
        .env("VK_GROUPS", "club123,club456")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("https://vk.com"));
}

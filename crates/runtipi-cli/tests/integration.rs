#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn runtipi(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("runtipi").unwrap();
    cmd.current_dir(dir.path()).env("RUNTIPI_ROOT", dir.path());
    cmd
}

fn read_env(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join(".env")).unwrap()
}

fn env_value(dir: &TempDir, key: &str) -> Option<String> {
    read_env(dir)
        .lines()
        .find_map(|l| l.strip_prefix(&format!("{key}=")).map(str::to_string))
}

// ---------------------------------------------------------------------------
// runtipi start
// ---------------------------------------------------------------------------

#[test]
fn start_generates_env_and_state() {
    let dir = TempDir::new().unwrap();
    runtipi(&dir)
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains(".env"));

    assert!(dir.path().join("state/seed").exists());
    assert!(dir.path().join("state/settings.json").exists());
    assert_eq!(env_value(&dir, "POSTGRES_HOST").as_deref(), Some("runtipi-db"));
    assert_eq!(env_value(&dir, "REDIS_HOST").as_deref(), Some("runtipi-redis"));
    assert_eq!(env_value(&dir, "TIPI_VERSION").as_deref(), Some("dev"));
    assert_eq!(read_env(&dir).lines().count(), 16);
}

#[test]
fn start_twice_keeps_secrets() {
    let dir = TempDir::new().unwrap();
    runtipi(&dir).arg("start").assert().success();
    let first = read_env(&dir);
    runtipi(&dir).arg("restart").assert().success();
    assert_eq!(read_env(&dir), first);
}

#[test]
fn start_with_env_file_overrides_settings() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("state")).unwrap();
    std::fs::write(
        dir.path().join("state/settings.json"),
        r#"{"domain":"a.test","nginxPort":8080}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("custom.env"), "DOMAIN=b.test\n").unwrap();

    runtipi(&dir)
        .args(["start", "--env-file", "custom.env"])
        .assert()
        .success();

    assert_eq!(env_value(&dir, "DOMAIN").as_deref(), Some("b.test"));
    assert_eq!(env_value(&dir, "NGINX_PORT").as_deref(), Some("8080"));
}

#[test]
fn start_with_missing_data_path_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("state")).unwrap();
    std::fs::write(
        dir.path().join("state/settings.json"),
        r#"{"appDataPath":"/does/not/exist"}"#,
    )
    .unwrap();

    runtipi(&dir)
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/does/not/exist"));
    assert_eq!(read_env(&dir), "");
}

#[test]
fn start_with_malformed_settings_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("state")).unwrap();
    std::fs::write(dir.path().join("state/settings.json"), "{ nope").unwrap();

    runtipi(&dir)
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains("settings.json"));
}

#[test]
fn start_json_reports_env_file() {
    let dir = TempDir::new().unwrap();
    let output = runtipi(&dir).args(["start", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["env_file"].as_str().unwrap().ends_with(".env"));
    assert_eq!(value["version"], "dev");
}

// ---------------------------------------------------------------------------
// runtipi env
// ---------------------------------------------------------------------------

#[test]
fn env_show_masks_secrets() {
    let dir = TempDir::new().unwrap();
    runtipi(&dir).arg("start").assert().success();
    let password = env_value(&dir, "POSTGRES_PASSWORD").unwrap();

    runtipi(&dir)
        .args(["env", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("POSTGRES_PASSWORD"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains(password.as_str()).not());

    runtipi(&dir)
        .args(["env", "show", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains(password.as_str()));
}

#[test]
fn env_get_prints_value() {
    let dir = TempDir::new().unwrap();
    runtipi(&dir).arg("start").assert().success();
    runtipi(&dir)
        .args(["env", "get", "LOCAL_DOMAIN"])
        .assert()
        .success()
        .stdout("tipi.local\n");
}

#[test]
fn env_get_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    runtipi(&dir).arg("start").assert().success();
    runtipi(&dir)
        .args(["env", "get", "NOT_A_KEY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOT_A_KEY"));
}

#[test]
fn env_show_before_start_fails() {
    let dir = TempDir::new().unwrap();
    runtipi(&dir)
        .args(["env", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtipi start"));
}

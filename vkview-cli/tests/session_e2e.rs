//! End-to-end tests: spawn the `vkview` binary with a scripted stdin
//! against the mock API server.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::Result;

use vkview_cli::test_utils::{numbered_users, MockApi};
use vkview_core::api::Album;

fn write_config(dir: &Path, link: &str) -> Result<PathBuf> {
    let path = dir.join("config.toml");
    let content = format!(
        r#"
[API]
ver = "5.131"
req_link = "{link}"
main_method = "users.get"

[App]
token = "e2e-token"

[MenuItems]
friends = "Friends"
albums = "Photo albums"

[Methods]
friends = "friends.get"
albums = "photos.getAlbums"
"#
    );
    std::fs::write(&path, content)?;
    Ok(path)
}

fn run_binary(config: &Path, script: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_vkview"))
        .arg("--config")
        .arg(config)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin is piped");
    stdin.write_all(script.as_bytes())?;
    drop(stdin);

    Ok(child.wait_with_output()?)
}

#[test]
fn full_session_against_mock_server() -> Result<()> {
    let mock = MockApi::new();
    mock.seed_users(numbered_users(1..=4));
    mock.seed_friends(vec![2, 3, 4]);
    mock.seed_albums(vec![Album {
        id: 42,
        title: "Travel".to_string(),
        size: 17,
    }]);
    let link = mock.start()?;

    let dir = tempfile::tempdir()?;
    let config = write_config(dir.path(), &link)?;

    let output = run_binary(&config, "1\n1\n2\n0\nexit\n")?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("[INFO]: Parsing config..."));
    assert!(stdout.contains("[INFO]: Ready to go!"));
    assert!(stdout.contains(&format!("{:<24}{}", "[INFO]: First name", "First1")));
    assert!(stdout.contains("[INFO]: [1] Friends"));
    assert!(stdout.contains("[INFO]: [2] Photo albums"));
    assert!(stdout.contains("[INFO]: User's friends are:"));
    assert!(stdout.contains("(id2)"));
    assert!(stdout.contains("[INFO]: User's photo albums list:"));
    assert!(stdout.contains("Travel"));

    assert_eq!(mock.calls("friends.get"), 1);
    assert_eq!(mock.calls("photos.getAlbums"), 1);
    // initial resolve plus one friends chunk
    assert_eq!(mock.calls("users.get"), 2);
    Ok(())
}

#[test]
fn application_error_is_reported_and_loop_survives() -> Result<()> {
    let mock = MockApi::new();
    mock.fail_api("users.get", 0, 5, "bad token");
    mock.seed_users(numbered_users(1..=1));
    let link = mock.start()?;

    let dir = tempfile::tempdir()?;
    let config = write_config(dir.path(), &link)?;

    // first resolve fails with an application error, second succeeds
    let output = run_binary(&config, "1\n1\n0\nexit\n")?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("[ERROR]: Code: 5"));
    assert!(stdout.contains("[ERROR]: Message: bad token"));
    assert!(stdout.contains(&format!("{:<24}{}", "[INFO]: First name", "First1")));
    Ok(())
}

#[test]
fn missing_config_aborts_with_distinct_status() -> Result<()> {
    let output = run_binary(Path::new("/nonexistent/vkview-config.toml"), "")?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Configuration error"));
    assert!(stderr.contains("not found"));
    Ok(())
}

#[test]
fn malformed_config_aborts_with_distinct_status() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[API]\nver = \"5.131\"\n")?;

    let output = run_binary(&path, "")?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Configuration error"));
    Ok(())
}

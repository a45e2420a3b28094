//! Integration tests for signup, login, logout, and whoami.

mod fixtures;

use std::fs;

use fixtures::{blog_cmd, can_bind_localhost, session_file, write_session, TOKEN};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Commands that never reach the network still need a configured server.
const UNUSED_SERVER: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn signup_creates_an_account() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(body_json(json!({ "username": "ada", "password": "secret123" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 12, "username": "ada" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    blog_cmd(&dir, &server.uri())
        .args(["signup", "-u", "ada", "-p", "secret123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created successfully"))
        .stdout(predicate::str::contains("User ID: 12"))
        .stdout(predicate::str::contains("blog login -u ada"));
}

#[test]
fn signup_rejects_short_passwords() {
    let dir = TempDir::new().unwrap();

    blog_cmd(&dir, UNUSED_SERVER)
        .args(["signup", "-u", "ada", "-p", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Password must be at least 6 characters long",
        ));
}

#[test]
fn signup_rejects_empty_usernames() {
    let dir = TempDir::new().unwrap();

    blog_cmd(&dir, UNUSED_SERVER)
        .args(["signup", "-u", "", "-p", "secret123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username cannot be empty"));
}

#[tokio::test]
async fn login_saves_a_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "ada", "password": "secret123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": TOKEN,
            "user": { "id": 7, "username": "ada" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    blog_cmd(&dir, &server.uri())
        .args(["login", "-u", "ada", "-p", "secret123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login successful"))
        .stdout(predicate::str::contains("Welcome back, ada"));

    let raw = fs::read_to_string(session_file(&dir)).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["token"], TOKEN);
    assert_eq!(saved["user"]["id"], 7);
    assert_eq!(saved["user"]["username"], "ada");
}

#[tokio::test]
async fn failed_login_reports_the_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("Invalid username or password"),
        )
        .expect(1)
        .mount(&server)
        .await;

    blog_cmd(&dir, &server.uri())
        .args(["login", "-u", "ada", "-p", "wrongpass"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login failed"))
        .stderr(predicate::str::contains("Invalid username or password"));

    assert!(!session_file(&dir).exists());
}

#[test]
fn logout_clears_the_session() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, 7, "ada");

    blog_cmd(&dir, UNUSED_SERVER)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out successfully"));

    assert!(!session_file(&dir).exists());
}

#[test]
fn logout_without_a_session_still_succeeds() {
    let dir = TempDir::new().unwrap();

    blog_cmd(&dir, UNUSED_SERVER)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out successfully"));
}

#[test]
fn whoami_reports_the_logged_in_user() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, 7, "ada");

    blog_cmd(&dir, UNUSED_SERVER)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as: ada"))
        .stdout(predicate::str::contains("User ID: 7"));
}

#[test]
fn whoami_without_a_session_points_at_login() {
    let dir = TempDir::new().unwrap();

    blog_cmd(&dir, UNUSED_SERVER)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"))
        .stdout(predicate::str::contains("blog login"));
}

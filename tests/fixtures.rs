//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;

pub const TOKEN: &str = "test-token-123";

pub fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// A `blog` command pointed at the given server, run from its own working
/// directory so session files stay isolated.
pub fn blog_cmd(dir: &TempDir, base_url: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("blog");
    cmd.current_dir(dir.path()).env("BLOG_API_URL", base_url);
    cmd
}

pub fn session_file(dir: &TempDir) -> PathBuf {
    dir.path().join(".blog-session")
}

/// Drops a logged-in session into the directory the command runs from.
pub fn write_session(dir: &TempDir, user_id: i64, username: &str) {
    let session = json!({
        "token": TOKEN,
        "user": { "id": user_id, "username": username }
    });
    fs::write(session_file(dir), session.to_string()).unwrap();
}

/// A post in the shape the backend returns.
pub fn post_json(
    id: i64,
    title: &str,
    author_name: &str,
    username: &str,
    user_id: i64,
    tags: &[(i64, &str)],
) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} in full.", title),
        "author_name": author_name,
        "username": username,
        "user_id": user_id,
        "tags": tags
            .iter()
            .map(|(tag_id, name)| json!({ "id": tag_id, "name": name }))
            .collect::<Vec<_>>(),
    })
}

pub fn comment_json(
    id: i64,
    content: &str,
    author_name: &str,
    created_at: &str,
    replies: Vec<Value>,
) -> Value {
    json!({
        "id": id,
        "content": content,
        "author_name": author_name,
        "created_at": created_at,
        "replies": replies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_json_includes_tags() {
        let post = post_json(1, "Hello", "Ada L.", "ada", 7, &[(2, "rust")]);
        assert_eq!(post["tags"][0]["name"], "rust");
        assert_eq!(post["user_id"], 7);
    }
}

//! Login session persisted next to where the CLI runs.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::User;

pub const SESSION_FILE: &str = ".blog-session";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn save(&self) -> Result<()> {
        self.save_to(Path::new(SESSION_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load() -> Option<Self> {
        Self::load_from(Path::new(SESSION_FILE))
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        if path.exists() {
            let data = fs::read_to_string(path).ok()?;
            serde_json::from_str(&data).ok()
        } else {
            None
        }
    }

    pub fn clear() -> Result<()> {
        Self::clear_at(Path::new(SESSION_FILE))
    }

    pub fn clear_at(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

pub fn require_login() -> Result<Session> {
    Session::load()
        .ok_or_else(|| anyhow::anyhow!("You must be logged in. Use: blog login -u <username> -p <password>"))
}

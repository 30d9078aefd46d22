//! Session marker and language preference.
//!
//! The stored profile is only a presence flag that unlocks the kitchen
//! commands; it is not checked against anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use super::kv_store::{KeyValueStore, LANGUAGE_KEY, USER_KEY};
use crate::error::{KitchenError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn sign_up(kv: &mut KeyValueStore, profile: &UserProfile) -> Result<()> {
    kv.set(USER_KEY, serde_json::to_string(profile)?);
    info!("Signed up as {}", profile.email);
    Ok(())
}

/// The signed-in profile, if any. An unreadable marker still counts as
/// signed in, with blank fields.
pub fn current_user(kv: &KeyValueStore) -> Option<UserProfile> {
    let raw = kv.get(USER_KEY)?;
    match serde_json::from_str(raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!("Stored user profile is unreadable: {}", e);
            Some(UserProfile {
                name: String::new(),
                email: String::new(),
                password: String::new(),
            })
        }
    }
}

pub fn require_user(kv: &KeyValueStore) -> Result<UserProfile> {
    current_user(kv).ok_or(KitchenError::NotSignedIn)
}

pub fn log_out(kv: &mut KeyValueStore) {
    if kv.remove(USER_KEY).is_some() {
        info!("Logged out");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    pub fn load(kv: &KeyValueStore) -> Self {
        kv.get(LANGUAGE_KEY)
            .and_then(|tag| tag.parse().ok())
            .unwrap_or_default()
    }

    pub fn save(&self, kv: &mut KeyValueStore) {
        kv.set(LANGUAGE_KEY, self.tag());
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::English),
            "es" => Ok(Language::Spanish),
            other => Err(format!("unsupported language '{}' (expected en or es)", other)),
        }
    }
}

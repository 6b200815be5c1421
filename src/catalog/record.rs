//! Catalog records as published by the free-to-play games service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Coarse platform tag used to parameterize the catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Pc,
    Browser,
}

impl Platform {
    /// Identifier sent as the `platform` query parameter.
    pub fn as_api_value(&self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Browser => "browser",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::Browser => "Browser",
        }
    }

    /// The other platform; the selector only ever has two options.
    pub fn toggled(&self) -> Platform {
        match self {
            Platform::Pc => Platform::Browser,
            Platform::Browser => Platform::Pc,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_value())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown platform '{0}' (expected 'pc' or 'browser')")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" => Ok(Platform::Pc),
            "browser" => Ok(Platform::Browser),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// One catalog entry. Owned by the remote service and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    pub title: String,
    pub thumbnail: String,
    pub short_description: String,
    pub genre: String,
    /// Free-form platform tag from the service, e.g. "PC (Windows)" or "Web Browser".
    pub platform: String,
    pub game_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freetogame_profile_url: Option<String>,
}

#[cfg(test)]
impl GameRecord {
    /// Minimal record for tests that only care about identity and title.
    pub(crate) fn titled(id: u64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            thumbnail: format!("https://example.test/{id}/thumbnail.jpg"),
            short_description: String::new(),
            genre: "Shooter".to_string(),
            platform: "PC (Windows)".to_string(),
            game_url: format!("https://example.test/open/{id}"),
            publisher: None,
            developer: None,
            release_date: None,
            freetogame_profile_url: None,
        }
    }
}

// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

const REQUIRED_COOKIES: [&str; 2] = ["li_at", "JSESSIONID"];

/// An already-authenticated LinkedIn session, expressed as its cookies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookies: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct SessionFile {
    cookies: BTreeMap<String, String>,
}

impl Session {
    pub fn from_cookies<I, K, V>(cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cookies: cookies
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Load the session from `LINKEDIN_SESSION_FILE` (default `session.yaml`) when it exists,
    /// otherwise from the `LINKEDIN_LI_AT` / `LINKEDIN_JSESSIONID` environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var("LINKEDIN_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("session.yaml"));

        let session = if path.exists() {
            Self::from_file(&path)?
        } else {
            info!("No session file at {}, reading cookies from environment", path.display());
            Self::from_env()?
        };

        session.validate()?;
        Ok(session)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;

        let file: SessionFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;

        info!("Loaded {} cookies from {}", file.cookies.len(), path.display());
        Ok(Self::from_cookies(file.cookies))
    }

    fn from_env() -> Result<Self> {
        let li_at = std::env::var("LINKEDIN_LI_AT")
            .context("LINKEDIN_LI_AT environment variable not set")?;
        let jsessionid = std::env::var("LINKEDIN_JSESSIONID")
            .context("LINKEDIN_JSESSIONID environment variable not set")?;

        Ok(Self::from_cookies([("li_at", li_at), ("JSESSIONID", jsessionid)]))
    }

    /// Ensure the cookies needed for authenticated calls are present
    pub fn validate(&self) -> Result<()> {
        for name in REQUIRED_COOKIES {
            if self.cookie(name).map_or(true, str::is_empty) {
                anyhow::bail!("Session is missing the {} cookie", name);
            }
        }
        Ok(())
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }
}

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use devfeed_engine::{FetchSettings, SmtpSettings, DEFAULT_API_BASE, DEFAULT_SMTP_HOST};

pub const DEFAULT_STATE_DIR: &str = "./.devfeed";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Process configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub state_dir: PathBuf,
    pub bind: SocketAddr,
    pub smtp_host: String,
    pub email_user: Option<String>,
    pub email_password: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bind_text = get("DEVFEED_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text
            .parse::<SocketAddr>()
            .map_err(|err| anyhow!("invalid socket addr for DEVFEED_BIND: {err}"))?;

        Ok(Self {
            api_base: get("DEVFEED_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            state_dir: get("DEVFEED_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
            bind,
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            email_user: get("EMAIL_USER"),
            email_password: get("EMAIL_PASSWORD"),
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            api_base: self.api_base.clone(),
            ..FetchSettings::default()
        }
    }

    /// Mail credentials, required only when relaying.
    pub fn smtp_settings(&self) -> Result<SmtpSettings> {
        Ok(SmtpSettings {
            host: self.smtp_host.clone(),
            user: self.email_user.clone().context("missing env: EMAIL_USER")?,
            password: self
                .email_password
                .clone()
                .context("missing env: EMAIL_PASSWORD")?,
        })
    }
}

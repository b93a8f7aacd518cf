//! Application configuration loaded from environment variables and
//! command-line flags.

use std::env;
use std::path::PathBuf;

use clap::Parser;

use refadmin_core::SessionPolicy;
use refadmin_infra::ApiConfig;

use crate::telemetry::TelemetryConfig;

const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Terminal admin console for the referral platform.
#[derive(Debug, Default, Parser)]
#[command(name = "refadmin", version, about)]
pub struct Cli {
    /// Backend base URL (overrides REFADMIN_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Cookie jar location (overrides REFADMIN_COOKIE_FILE)
    #[arg(long)]
    pub cookie_file: Option<PathBuf>,

    /// Emit JSON logs on stderr
    #[arg(long)]
    pub json_logs: bool,

    /// Keep the session in memory; nothing is written to disk
    #[arg(long)]
    pub memory_session: bool,
}

/// Where the session cookie lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStore {
    File(PathBuf),
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// `0` selects a session-only cookie.
    pub session_ttl_secs: u64,
    pub session_store: SessionStore,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let session_store = env::var("REFADMIN_COOKIE_FILE")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(default_cookie_file)
            .map(SessionStore::File)
            .unwrap_or(SessionStore::Memory);

        Self {
            api: ApiConfig::from_env(),
            session_ttl_secs: env::var("REFADMIN_SESSION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            session_store,
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// Apply command-line overrides.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api.base_url = url.clone();
        }
        if let Some(path) = &cli.cookie_file {
            self.session_store = SessionStore::File(path.clone());
        }
        if cli.memory_session {
            self.session_store = SessionStore::Memory;
        }
        if cli.json_logs {
            self.telemetry.json_logs = true;
        }
        self
    }

    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy::from_ttl_secs(self.session_ttl_secs)
    }
}

/// `<config dir>/refadmin/cookies.json`
fn default_cookie_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("refadmin").join("cookies.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AppConfig {
        AppConfig {
            api: ApiConfig::new("http://localhost:3000"),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            session_store: SessionStore::File(PathBuf::from("/tmp/cookies.json")),
            telemetry: TelemetryConfig::default(),
        }
    }

    #[test]
    fn test_cli_overrides_environment() {
        let cli = Cli::parse_from([
            "refadmin",
            "--api-url",
            "https://admin.example.com",
            "--json-logs",
            "--memory-session",
        ]);

        let config = base().with_cli(&cli);

        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert!(config.telemetry.json_logs);
        assert_eq!(config.session_store, SessionStore::Memory);
    }

    #[test]
    fn test_cookie_file_flag() {
        let cli = Cli::parse_from(["refadmin", "--cookie-file", "/var/tmp/jar.json"]);

        let config = base().with_cli(&cli);

        assert_eq!(
            config.session_store,
            SessionStore::File(PathBuf::from("/var/tmp/jar.json"))
        );
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_zero_ttl_is_session_only() {
        let mut config = base();
        assert_eq!(config.session_policy(), SessionPolicy::default());

        config.session_ttl_secs = 0;
        assert_eq!(config.session_policy(), SessionPolicy::SessionOnly);
    }
}

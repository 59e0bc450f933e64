//! Terminal configuration
//!
//! Command-line flags with environment fallbacks; a `.env` file in the
//! working directory is read first.

use std::{path::PathBuf, time::Duration};

use clap::{Args, ValueEnum};
use rusty_money::iso::{self, Currency};

use crate::{backend::BackendConfig, session::Session};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Currency amounts are printed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CurrencyCode {
    /// US dollar.
    Usd,

    /// Euro.
    Eur,

    /// Pound sterling.
    Gbp,

    /// Mexican peso.
    Mxn,

    /// Peruvian sol.
    Pen,
}

impl CurrencyCode {
    /// ISO currency for formatting.
    #[must_use]
    pub fn currency(self) -> &'static Currency {
        match self {
            CurrencyCode::Usd => iso::USD,
            CurrencyCode::Eur => iso::EUR,
            CurrencyCode::Gbp => iso::GBP,
            CurrencyCode::Mxn => iso::MXN,
            CurrencyCode::Pen => iso::PEN,
        }
    }
}

/// Terminal settings.
#[derive(Debug, Args)]
pub struct TerminalConfig {
    /// Session file holding the API URL, token and business details
    #[arg(long, env = "CAJA_SESSION_FILE", default_value = ".caja/session.json", global = true)]
    pub session_file: PathBuf,

    /// Backend API base URL; overrides the session's
    #[arg(long, env = "CAJA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Backend request timeout in seconds
    #[arg(long, env = "CAJA_HTTP_TIMEOUT_SECONDS", default_value_t = 15_u64, global = true)]
    pub http_timeout_seconds: u64,

    /// Currency amounts are printed in
    #[arg(long, env = "CAJA_CURRENCY", value_enum, default_value_t = CurrencyCode::Usd, global = true)]
    pub currency: CurrencyCode,
}

impl TerminalConfig {
    /// Backend request timeout.
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Backend settings for `session`, with the API URL override applied.
    #[must_use]
    pub fn backend(&self, session: &Session) -> BackendConfig {
        let mut config = BackendConfig::from_session(session, self.http_timeout());

        if let Some(api_url) = &self.api_url {
            config.api_url.clone_from(api_url);
        }

        config
    }
}

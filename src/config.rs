// ⚙️ Runtime configuration - environment variables with defaults
//
// LOAN_MONITOR_ADDR     API bind address        (default 127.0.0.1:3000)
// LOAN_MONITOR_TICK_MS  TUI input poll interval (default 250)
// RUST_LOG              tracing filter          (default depends on the binary)

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const ADDR_VAR: &str = "LOAN_MONITOR_ADDR";
pub const TICK_VAR: &str = "LOAN_MONITOR_TICK_MS";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TICK_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub tick: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_raw = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a socket address: {:?}", ADDR_VAR, addr_raw))?;

        let tick_ms = match lookup(TICK_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a whole number of milliseconds: {:?}", TICK_VAR, raw))?,
            None => DEFAULT_TICK_MS,
        };
        if tick_ms == 0 {
            anyhow::bail!("{} must be greater than zero", TICK_VAR);
        }

        Ok(Config {
            addr,
            tick: Duration::from_millis(tick_ms),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            tick: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides `default_filter`.
/// Output goes to stderr so it never mixes with CSV written to stdout.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "tracing subscriber already installed");
            false
        }
    }
}

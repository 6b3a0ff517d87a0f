//! Runtime configuration.
//!
//! Resolution order, later wins: built-in defaults, environment
//! (`REGISTRY_BIND`, `REGISTRY_DATA_DIR`), command-line flags (`--bind`, `--data-dir`).

use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_DIR: &str = "data";

pub const ENV_BIND: &str = "REGISTRY_BIND";
pub const ENV_DATA_DIR: &str = "REGISTRY_DATA_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Directory holding `counters.json`, `organizations.json`, `groups.json`, `users.json`.
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl ServerConfig {
    /// Builds the configuration from the process environment and arguments.
    pub fn from_env_and_args() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::resolve(|key| std::env::var(key).ok(), &args)
    }

    /// `lookup` stands in for the environment; `args` excludes the program name.
    pub fn resolve<F>(lookup: F, args: &[String]) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup(ENV_BIND) {
            config.bind_addr = parse_addr(&bind).with_context(|| format!("invalid {ENV_BIND}"))?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = flag_value(args, i)?;
                    config.bind_addr = parse_addr(value).context("invalid --bind")?;
                    i += 2;
                }
                "--data-dir" => {
                    config.data_dir = PathBuf::from(flag_value(args, i)?);
                    i += 2;
                }
                other => {
                    tracing::debug!("Ignoring unknown argument {}", other);
                    i += 1;
                }
            }
        }

        Ok(config)
    }
}

fn flag_value(args: &[String], i: usize) -> Result<&str> {
    match args.get(i + 1) {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => bail!("{} requires a value", args[i]),
    }
}

fn parse_addr(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .with_context(|| format!("`{raw}` is not a socket address"))
}

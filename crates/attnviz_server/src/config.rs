//! Server configuration from command-line flags and environment.

use attnviz_core::default_log_level;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_PATH: &str = "./textdata.db";

/// Runtime settings for `attnviz-server`.
///
/// Every flag can also be supplied through its `ATTNVIZ_*` variable; an
/// explicit flag wins over the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "attnviz-server")]
#[command(version)]
#[command(about = "Text records API with token relevance visualization")]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[arg(long, env = "ATTNVIZ_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// SQLite database file, created when missing.
    #[arg(long, env = "ATTNVIZ_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "ATTNVIZ_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "ATTNVIZ_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

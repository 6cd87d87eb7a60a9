//! Command-line arguments and logging setup for the console.

use clap::Parser;
use servery_core::role::Role;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "servery")]
#[command(version)]
#[command(about = "Restaurant order console: takeaway and dine-in queues with a served-order index", long_about = None)]
pub struct Args {
    /// Menu file (RON, TOML or JSON) or a directory holding `menu.*`.
    /// The house menu is used when absent.
    #[arg(short, long)]
    pub menu: Option<PathBuf>,

    /// Console role; prompted for when absent.
    #[arg(short, long)]
    pub role: Option<Role>,

    /// Journal file, appended to.
    #[arg(long, default_value = "log.txt")]
    pub log_file: PathBuf,

    /// Log level used when RUST_LOG is unset.
    #[arg(short = 'l', long, default_value = "warn", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// Pause after each console step, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

impl Args {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

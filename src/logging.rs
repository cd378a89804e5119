use crate::config::LogConfig;
use anyhow::Context;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Send log messages to the file named in `config`, if any.  `RUST_LOG`
/// takes precedence over the configured level.
pub(crate) fn init(config: &LogConfig) -> anyhow::Result<()> {
    let Some(path) = config.file.as_deref() else {
        return Ok(());
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level {:?}", config.level))?,
    };
    let file = fs_err::File::create(path).context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install logger")?;
    tracing::debug!(path = %path.display(), "logging started");
    Ok(())
}

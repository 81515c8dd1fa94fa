//! tracing subscriber の初期化
//!
//! UI シェル（またはテストハーネス）が起動時に一度だけ呼びます。
//! `RUST_LOG` が設定されていればそちらを優先します。

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::domain::errors::TodoError;

/// fmt subscriber を stderr に設定する
///
/// すでに subscriber が設定されていてもエラーにはしません。
pub fn init_tracing(default_level: &str) -> Result<(), TodoError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| TodoError::InvalidLogFilter(e.to_string()))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_fine() {
        assert!(init_tracing("debug").is_ok());
        assert!(init_tracing("debug").is_ok());
    }
}

//! Logging setup utilities for the leaderboard binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers both the binary's own crate and this shared crate. The
/// log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "leaderboard-daemon")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use leaderboard_shared::logger::setup_logger;
///
/// setup_logger("leaderboard-daemon", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the `EnvFilter` directive used when `RUST_LOG` is unset.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_uses_crate_targets() {
        // テスト項目: ハイフンを含むバイナリ名が tracing の target 形式に変換される
        // given (前提条件):
        let binary_name = "leaderboard-daemon";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(filter, "leaderboard_shared=debug,leaderboard_daemon=debug");
    }
}

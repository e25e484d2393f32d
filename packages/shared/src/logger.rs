//! Logging setup utilities for the Roomchat binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose log output is enabled at the default level.
const WORKSPACE_CRATES: [&str; 3] = ["roomchat_server", "roomchat_client", "roomchat_shared"];

/// Build the default filter directive used when `RUST_LOG` is not set.
fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let mut directives: Vec<String> = WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, default_log_level))
        .collect();
    directives.push(format!(
        "{}={}",
        binary_name.replace('-', "_"),
        default_log_level
    ));
    directives.push(format!("tower_http={}", default_log_level));
    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "roomchat-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use roomchat_shared::logger::setup_logger;
///
/// setup_logger("roomchat-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_workspace_and_binary() {
        // テスト項目: デフォルトのフィルタにワークスペースのクレートとバイナリが含まれる
        // given (前提条件):
        let binary_name = "roomchat-server";

        // when (操作):
        let directive = default_directive(binary_name, "debug");

        // then (期待する結果):
        assert!(directive.contains("roomchat_server=debug"));
        assert!(directive.contains("roomchat_client=debug"));
        assert!(directive.contains("tower_http=debug"));
        assert!(directive.split(',').any(|d| d == "roomchat_server=debug"));
    }
}

//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "XPOST_LOG";

/// Filter used by `xpost chat` when `XPOST_LOG` is unset.
pub const CHAT_DEFAULT_FILTER: &str = "xpost=warn";
/// Filter used by `xpost serve` when `XPOST_LOG` is unset.
pub const SERVE_DEFAULT_FILTER: &str = "xpost=info";

fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Install the global subscriber, writing to stderr so stdout only carries
/// the chat transcript. A second call is a no-op.
pub fn init_logging(default_directives: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(default_directives))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_used_without_env() {
        if std::env::var(LOG_ENV).is_err() {
            assert_eq!(env_filter(CHAT_DEFAULT_FILTER).to_string(), CHAT_DEFAULT_FILTER);
        }
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging(SERVE_DEFAULT_FILTER);
        init_logging(SERVE_DEFAULT_FILTER);
    }
}

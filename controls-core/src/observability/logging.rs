use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use std::sync::OnceLock;

use crate::config::{LogFormat, LoggingConfig};

static LOG_INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber once. `RUST_LOG` takes precedence over the
/// configured level.
pub fn setup_logging(config: &LoggingConfig) {
    LOG_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let json_layer = (config.format == LogFormat::Json).then(|| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
        });

        let pretty_layer = (config.format == LogFormat::Pretty).then(|| {
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
        });

        if let Err(err) = tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(pretty_layer)
            .try_init()
        {
            tracing::debug!(error = %err, "global subscriber already set, keeping it");
        }
    });
}

#[macro_export]
macro_rules! log_control {
    ($level:ident, $control:expr, $($arg:tt)*) => {
        tracing::$level!(
            target: "control",
            control = $control,
            $($arg)*
        );
    };
}

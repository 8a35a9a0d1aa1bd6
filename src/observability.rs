//! This module provides observability and diagnostics for the kernels.
//!
//! Kernels report through the `log` facade only; installing a backend is the
//! embedding application's choice. `init_logging` is a convenience that wires
//! up `env_logger` for tools and tests that have no logger of their own.
//!
//! The `log_metric!` macro emits a structured key-value line at `debug` level.
//! The `#[cfg(debug_assertions)]` attribute compiles it out of release builds.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::CodecError;

/// Logs a structured key-value metric string at `debug` level, only in debug builds.
///
/// # Example
/// ```
/// use stripcodec::log_metric;
/// let codes = 42;
/// log_metric!("event" = "lzw_decode", "codes" = &codes);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            log::debug!("STRIPCODEC_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `level`, once per process.
///
/// When `log_file` is given, records are appended to that file instead of
/// stderr. Later calls are no-ops, including when another logger was already
/// installed by the host application.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), CodecError> {
    let mut result = Ok(());
    INIT_LOGGER.call_once(|| {
        let file = match log_file {
            Some(path) => match OpenOptions::new().append(true).create(true).open(path) {
                Ok(file) => Some(file),
                Err(err) => {
                    result = Err(CodecError::Io(err));
                    return;
                }
            },
            None => None,
        };

        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    result
}

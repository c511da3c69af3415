#![forbid(unsafe_code)]

//! Log file setup.
//!
//! Stdout is the drawing surface, so logs go to a file. Nothing is installed
//! unless `GLYPHFIELD_LOG` holds a filter directive.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "GLYPHFIELD_LOG";

/// Parse a filter directive such as `info,glyphfield_engine=trace`.
pub fn filter(directive: &str) -> io::Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(io::Error::other)
}

/// Install a file subscriber when `GLYPHFIELD_LOG` is set.
///
/// Returns whether logging was enabled.
pub fn init(path: &Path) -> io::Result<bool> {
    let Ok(directive) = std::env::var(LOG_ENV) else {
        return Ok(false);
    };
    let filter = filter(&directive)?;
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(io::Error::other)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_directives_parse() {
        assert!(filter("info").is_ok());
        assert!(filter("warn,glyphfield_engine=trace").is_ok());
    }

    #[test]
    fn invalid_directive_is_an_error() {
        assert!(filter("glyphfield_engine=loud").is_err());
    }
}

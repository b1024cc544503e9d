// ============================================================================
// Logging Setup
// tracing-subscriber initialization for binaries and demos
// ============================================================================

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `default_directive` (for example
/// `"pi_engine=debug"`) selects what is logged.
///
/// # Errors
/// Returns a message if the directive does not parse or a global subscriber
/// is already installed.
pub fn init_logging(default_directive: &str) -> Result<(), String> {
    let directive: Directive = default_directive
        .parse()
        .map_err(|e| format!("Invalid log directive {:?}: {}", default_directive, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_directive() {
        assert!(init_logging("pi_engine=loudest").is_err());
    }
}

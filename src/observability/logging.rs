use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count when `RUST_LOG` is unset.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "cognibank=warn",
        1 => "cognibank=info",
        2 => "cognibank=debug",
        _ => "cognibank=trace",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for JSON and markdown output. Calling this twice is a no-op.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_levels() {
        assert_eq!(filter_directive(0), "cognibank=warn");
        assert_eq!(filter_directive(2), "cognibank=debug");
        assert_eq!(filter_directive(9), "cognibank=trace");
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(0);
        init_logging(3);
    }
}

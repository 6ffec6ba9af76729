use tracing_subscriber::EnvFilter;

const CRATE_TARGETS: &[&str] = &["rust_compstat"];

/// Map `-v` occurrences to a level: none -> warn, -v -> info, -vv -> debug,
/// more -> trace. A set `RUST_LOG` wins over the flag.
pub fn filter_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the fmt subscriber on stderr so stdout stays machine readable.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(filter_directives(0), "rust_compstat=warn");
        assert_eq!(filter_directives(2), "rust_compstat=debug");
        assert_eq!(filter_directives(9), "rust_compstat=trace");
    }
}

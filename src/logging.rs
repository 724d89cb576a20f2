use tracing_subscriber::EnvFilter;

/// Targets whose events are shown; dependencies stay quiet.
const CRATE_TARGETS: &[&str] = &["koyomi"];

/// Installs the stderr subscriber for the `koyomi` binary.
///
/// Loaded files log at `info`, grid builds and controller transitions at
/// `debug`, per-date work at `trace`. Output goes to stderr so that
/// `--json` output on stdout stays parseable.
///
/// Mapping of `-v` flags:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `RUST_LOG` env var overrides the CLI flag if set.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

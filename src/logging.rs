use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Filter for the fmt subscriber, built from `RUST_LOG`-style directives.
/// Falls back to `info` when nothing usable is given.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| match EnvFilter::try_new(d) {
            Ok(filter) => Some(filter),
            Err(e) => {
                eprintln!("ignoring log filter {d:?}: {e}");
                None
            }
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

use tracing_subscriber::filter::LevelFilter;

use suggest_relay::logging::log_filter;

#[test]
fn test_default_filter_is_info() {
    assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
}

#[test]
fn test_debug_directive_enables_skipped_item_logs() {
    let filter = log_filter(Some("suggest_relay=debug"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
}

#[test]
fn test_unparseable_directive_falls_back_to_info() {
    let filter = log_filter(Some("suggest_relay=loudest"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
}

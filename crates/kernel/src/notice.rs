//! Bulk-action feedback notices.
//!
//! Only success is ever announced; a request that did nothing simply
//! renders no notice.

/// Build the success notices for the current request, if its query string
/// carries positive `favorited`/`unfavorited` counts from a bulk redirect.
pub fn bulk_notices(favorited: Option<&str>, unfavorited: Option<&str>) -> Vec<String> {
    let mut notices = Vec::new();

    if let Some(count) = parse_count(favorited) {
        notices.push(message(count, "favorited"));
    }
    if let Some(count) = parse_count(unfavorited) {
        notices.push(message(count, "unfavorited"));
    }

    notices
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw?.parse::<u64>().ok().filter(|count| *count > 0)
}

fn message(count: u64, verb: &str) -> String {
    if count == 1 {
        format!("Plugin {verb}.")
    } else {
        format!("{count} plugins {verb}.")
    }
}

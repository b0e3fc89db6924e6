//! Route labels for request spans and metrics.

use uuid::Uuid;

/// `path` with identifier segments collapsed, keeping metric label cardinality bounded.
///
/// UUIDs become `{uuid}` and cart line ids, which follow `items`, become `{item}`.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut previous = "";
    let mut segments = Vec::new();

    for segment in path.trim_start_matches('/').split('/') {
        segments.push(if Uuid::parse_str(segment).is_ok() {
            "{uuid}"
        } else if previous == "items" {
            "{item}"
        } else {
            segment
        });

        previous = segment;
    }

    format!("/{}", segments.join("/"))
}

//! Pure helpers shared by the listings handlers.

use roost_config::ListingsConfig;

/// Derives the edit-form thumbnail from a stored image URL.
///
/// The configured transformation is inserted right after the first
/// occurrence of the transform segment, so `.../upload/v1/a.jpg` becomes
/// `.../upload/h_300,w_250/v1/a.jpg`. URLs without the segment come back
/// unchanged.
pub fn thumbnail_url(url: &str, config: &ListingsConfig) -> String {
    let segment = config.transform_segment.as_str();
    if segment.is_empty() {
        return url.to_string();
    }
    match url.find(segment) {
        Some(pos) => {
            let rest = &url[pos + segment.len()..];
            let sep = if segment.ends_with('/') { "/" } else { "" };
            format!(
                "{}{}{}{}{}",
                &url[..pos],
                segment,
                config.thumbnail_transform,
                sep,
                rest
            )
        }
        None => url.to_string(),
    }
}

/// Trimmed search term, or `None` when it is missing or blank.
pub fn normalize_search(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

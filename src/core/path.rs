/// Normalizes a request path: trimmed, exactly one leading `/`, no repeated
/// separators and no trailing `/` (root stays `/`).
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

/// The served URL shape: query and fragment dropped, non-root paths end in `/`.
pub fn canonical_path(path: &str) -> String {
    let without_query = path.split(['?', '#']).next().unwrap_or_default();
    let normalized = normalize_path(without_query);
    if normalized == "/" {
        normalized
    } else {
        format!("{}/", normalized)
    }
}

/// `site_url` must already be normalized (no trailing `/`).
pub fn canonical_url(site_url: &str, path: &str) -> String {
    format!("{}{}", site_url.trim_end_matches('/'), canonical_path(path))
}

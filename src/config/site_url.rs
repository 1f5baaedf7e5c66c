//! Site URL and build timestamp resolution shared by every config source.

use crate::utils::error::{Result, SiteError};
use chrono::{DateTime, Utc};

pub const LOCAL_SITE_URL: &str = "http://localhost:3000";

/// Explicit site URL; wins over every hosting-provider variable.
pub const SITE_URL_ENV: &str = "SITE_URL";
/// Bare host name set by Vercel deployments.
pub const VERCEL_URL_ENV: &str = "VERCEL_URL";
pub const CF_PAGES_URL_ENV: &str = "CF_PAGES_URL";
/// RFC 3339 timestamp used as the sitemap `lastmod`.
pub const BUILD_TIME_ENV: &str = "SITE_BUILD_TIME";

/// Trims, adds `https://` when no scheme is given (an explicit `http://`
/// is kept) and drops trailing slashes. Blank input gives `None`.
pub fn normalize_site_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let normalized = with_scheme.trim_end_matches('/');
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Like [`resolve_site_url`], reading variables through `lookup`.
pub fn resolve_site_url_with<F>(explicit: Option<&str>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let raw = explicit
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .or_else(|| non_empty(SITE_URL_ENV))
        .or_else(|| non_empty(VERCEL_URL_ENV).map(|host| format!("https://{}", host.trim())))
        .or_else(|| non_empty(CF_PAGES_URL_ENV));

    raw.as_deref()
        .and_then(normalize_site_url)
        .unwrap_or_else(|| LOCAL_SITE_URL.to_string())
}

/// Explicit value, then `SITE_URL`, `VERCEL_URL`, `CF_PAGES_URL`, then the
/// local development address.
pub fn resolve_site_url(explicit: Option<&str>) -> String {
    resolve_site_url_with(explicit, |name| std::env::var(name).ok())
}

pub fn resolve_build_time_with<F>(explicit: Option<DateTime<Utc>>, lookup: F) -> Result<DateTime<Utc>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(time) = explicit {
        return Ok(time);
    }

    match lookup(BUILD_TIME_ENV).filter(|value| !value.trim().is_empty()) {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|time| time.with_timezone(&Utc))
            .map_err(|e| SiteError::InvalidConfigValueError {
                field: BUILD_TIME_ENV.to_string(),
                value: raw.clone(),
                reason: format!("expected an RFC 3339 timestamp: {}", e),
            }),
        None => Ok(Utc::now()),
    }
}

/// 一次建置只取一個時間戳，所有 sitemap 項目共用
pub fn resolve_build_time(explicit: Option<DateTime<Utc>>) -> Result<DateTime<Utc>> {
    resolve_build_time_with(explicit, |name| std::env::var(name).ok())
}

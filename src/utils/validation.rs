use crate::utils::error::{Result, SiteError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 站點網址必須是 http(s) 且不帶查詢字串或片段
pub fn validate_site_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, &format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field_name,
                url_str,
                &format!("Unsupported URL scheme: {}", scheme),
            ))
        }
    }

    if url.host_str().is_none() {
        return Err(invalid(field_name, url_str, "URL must include a host"));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            url_str,
            "URL must not carry a query string or fragment",
        ));
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// 檢查清單內的值都屬於允許集合，且不重複
pub fn validate_choices(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();
    let mut seen = HashSet::new();

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(invalid(
                field_name,
                value,
                &format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
            ));
        }
        if !seen.insert(value.as_str()) {
            return Err(invalid(field_name, value, "Value is listed more than once"));
        }
    }

    Ok(())
}

fn invalid(field: &str, value: &str, reason: &str) -> SiteError {
    SiteError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_site_url() {
        assert!(validate_site_url("site.url", "https://cookconvert.com").is_ok());
        assert!(validate_site_url("site.url", "http://localhost:3000").is_ok());
        assert!(validate_site_url("site.url", "").is_err());
        assert!(validate_site_url("site.url", "not a url").is_err());
        assert!(validate_site_url("site.url", "ftp://cookconvert.com").is_err());
        assert!(validate_site_url("site.url", "https://cookconvert.com/?ref=x").is_err());
    }

    #[test]
    fn test_validate_choices() {
        let formats = vec!["json".to_string(), "csv".to_string()];
        assert!(validate_choices("output.formats", &formats, &["json", "csv"]).is_ok());

        let unknown = vec!["xml".to_string()];
        assert!(validate_choices("output.formats", &unknown, &["json", "csv"]).is_err());

        let repeated = vec!["json".to_string(), "json".to_string()];
        assert!(validate_choices("output.formats", &repeated, &["json", "csv"]).is_err());
    }
}

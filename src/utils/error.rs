use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    /// 路由不存在或查詢字串無效，對呼叫端一律呈現為同一種結果
    #[error("Route not found: {path}")]
    NotFound { path: String },

    #[error("Registry inconsistency for '{key}': {message}")]
    RegistryError { key: String, message: String },

    #[error("Duplicate route generated: {path}")]
    DuplicateRoute { path: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Archive operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Sitemap XML error: {message}")]
    XmlError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Routing,
    Registry,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn not_found(path: impl Into<String>) -> Self {
        SiteError::NotFound { path: path.into() }
    }

    pub fn registry(key: impl Into<String>, message: impl Into<String>) -> Self {
        SiteError::RegistryError {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SiteError::NotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::NotFound { .. } => ErrorCategory::Routing,
            SiteError::RegistryError { .. } | SiteError::DuplicateRoute { .. } => {
                ErrorCategory::Registry
            }
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SiteError::IoError(_)
            | SiteError::SerializationError(_)
            | SiteError::CsvError(_)
            | SiteError::ZipError(_)
            | SiteError::XmlError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SiteError::NotFound { .. } => ErrorSeverity::Low,
            SiteError::IoError(_) => ErrorSeverity::Medium,
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::SerializationError(_)
            | SiteError::CsvError(_)
            | SiteError::ZipError(_)
            | SiteError::XmlError { .. } => ErrorSeverity::High,
            // 啟動時的註冊表不一致屬於程式錯誤
            SiteError::RegistryError { .. } | SiteError::DuplicateRoute { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 建置失敗時的退出碼，一律非零，CI 才不會把失敗當成功
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::NotFound { path } => format!("No page exists for '{}'", path),
            SiteError::RegistryError { key, message } => {
                format!("The ingredient registry is inconsistent ({}): {}", key, message)
            }
            SiteError::DuplicateRoute { path } => {
                format!("Two pages would be generated at '{}'", path)
            }
            SiteError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            SiteError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            SiteError::MissingConfigError { field } => {
                format!("The setting '{}' is required", field)
            }
            SiteError::IoError(e) => format!("Could not read or write output files: {}", e),
            SiteError::SerializationError(e) => format!("Could not encode output data: {}", e),
            SiteError::CsvError(e) => format!("Could not write the CSV route feed: {}", e),
            SiteError::ZipError(e) => format!("Could not create the output archive: {}", e),
            SiteError::XmlError { message } => format!("Could not render sitemap.xml: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Routing => {
                "Check the path against routes.json; query slugs look like 200-grams-flour-to-cups"
            }
            ErrorCategory::Registry => {
                "Fix the ingredient tables so every key has exactly one name and one positive density"
            }
            ErrorCategory::Configuration => {
                "Review the command line flags or the TOML configuration file"
            }
            ErrorCategory::Output => {
                "Make sure the output directory exists, is writable and has free space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_low_severity_routing_error() {
        let err = SiteError::not_found("/q/abc-grams-flour-to-cups");
        assert!(err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::Routing);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.to_string().contains("abc-grams-flour-to-cups"));
    }

    #[test]
    fn test_registry_errors_are_critical() {
        let err = SiteError::registry("flour", "missing density");
        assert_eq!(err.category(), ErrorCategory::Registry);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("missing density"));
    }

    #[test]
    fn test_io_errors_convert() {
        let err: SiteError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_every_failure_exits_non_zero() {
        assert_eq!(SiteError::not_found("/q/abc").exit_code(), 1);
        assert_eq!(
            SiteError::IoError(std::io::Error::other("disk full")).exit_code(),
            2
        );
        assert_eq!(
            SiteError::MissingConfigError {
                field: "site.url".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(SiteError::registry("flour", "missing density").exit_code(), 3);
    }
}

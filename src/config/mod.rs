pub mod cli;
pub mod site_url;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

/// Output formats accepted on the command line and in TOML. `routes.json`
/// is always written; `csv` adds `routes.csv`.
pub const OUTPUT_FORMATS: &[&str] = &["json", "csv"];

#[cfg(feature = "cli")]
mod cli_config {
    use super::site_url::{resolve_build_time, resolve_site_url, LOCAL_SITE_URL};
    use super::OUTPUT_FORMATS;
    use crate::core::ConfigProvider;
    use crate::utils::error::{Result, SiteError};
    use crate::utils::validation::{
        validate_choices, validate_non_empty_string, validate_path, validate_site_url, Validate,
    };
    use chrono::{DateTime, Utc};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "cookconvert")]
    #[command(about = "Generate the CookConvert route feed, page data and sitemap")]
    pub struct CliConfig {
        #[arg(long, help = "Public site URL (defaults to SITE_URL, VERCEL_URL, CF_PAGES_URL)")]
        pub site_url: Option<String>,

        #[arg(long, default_value = "./dist")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "json,csv")]
        pub formats: Vec<String>,

        #[arg(long, help = "RFC 3339 timestamp used as sitemap lastmod (defaults to SITE_BUILD_TIME or now)")]
        pub build_time: Option<DateTime<Utc>>,

        #[arg(long, help = "Also bundle every output file into this zip archive")]
        pub archive: Option<String>,

        #[arg(long, help = "Skip the per-page JSON files")]
        pub no_pages: bool,

        #[arg(long, help = "Log as JSON lines")]
        pub json_logs: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log phase timings and memory usage")]
        pub monitor: bool,
    }

    impl CliConfig {
        /// 補上環境變數提供的預設值，之後的讀取都不再碰環境
        pub fn resolve(mut self) -> Result<Self> {
            self.site_url = Some(resolve_site_url(self.site_url.as_deref()));
            self.build_time = Some(resolve_build_time(self.build_time)?);
            Ok(self)
        }
    }

    impl ConfigProvider for CliConfig {
        fn site_url(&self) -> &str {
            self.site_url.as_deref().unwrap_or(LOCAL_SITE_URL)
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn build_time(&self) -> DateTime<Utc> {
            self.build_time.unwrap_or_else(Utc::now)
        }

        fn write_csv(&self) -> bool {
            self.formats.iter().any(|format| format == "csv")
        }

        fn write_pages(&self) -> bool {
            !self.no_pages
        }

        fn archive_filename(&self) -> Option<&str> {
            self.archive.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_site_url("site_url", self.site_url())?;
            validate_path("output_path", &self.output_path)?;
            validate_choices("formats", &self.formats, OUTPUT_FORMATS)?;

            if let Some(archive) = &self.archive {
                validate_non_empty_string("archive", archive)?;
                if !archive.ends_with(".zip") || archive.contains('/') {
                    return Err(SiteError::InvalidConfigValueError {
                        field: "archive".to_string(),
                        value: archive.clone(),
                        reason: "must be a plain file name ending in .zip".to_string(),
                    });
                }
            }

            Ok(())
        }
    }

}

use crate::domain::model::{RouteRecord, SiteArtifacts};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 建置所需的設定來源（CLI 旗標或 TOML 檔）
pub trait ConfigProvider: Send + Sync {
    fn site_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn build_time(&self) -> DateTime<Utc>;
    fn write_csv(&self) -> bool;
    fn write_pages(&self) -> bool;
    fn archive_filename(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RouteRecord>>;
    async fn transform(&self, routes: Vec<RouteRecord>) -> Result<SiteArtifacts>;
    async fn load(&self, artifacts: SiteArtifacts) -> Result<String>;
}

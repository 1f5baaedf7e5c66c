use crate::core::pages::build_page;
use crate::core::registry::Registry;
use crate::core::routes::{enumerate, RouteSet};
use crate::core::search::build_index;
use crate::core::sitemap::{build_entries, render_robots, render_xml};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{RouteRecord, SiteArtifacts};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ROUTES_JSON: &str = "routes.json";
pub const ROUTES_CSV: &str = "routes.csv";
pub const SITEMAP_XML: &str = "sitemap.xml";
pub const ROBOTS_TXT: &str = "robots.txt";
pub const SEARCH_INDEX_JSON: &str = "search-index.json";

/// `/` -> `pages/index.json`, `/a/b` -> `pages/a/b/index.json`
pub fn page_file(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "pages/index.json".to_string()
    } else {
        format!("pages/{}/index.json", trimmed)
    }
}

/// 路由 -> 頁面資料 -> 輸出檔
pub struct SitePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    registry: Registry,
}

impl<S: Storage, C: ConfigProvider> SitePipeline<S, C> {
    pub fn new(storage: S, config: C, registry: Registry) -> Self {
        Self {
            storage,
            config,
            registry,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn routes_csv(&self, routes: &[RouteRecord]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["path", "family", "priority"])?;
        for route in routes {
            let priority = format!("{:.1}", route.priority);
            writer.write_record([route.path.as_str(), route.family.as_str(), priority.as_str()])?;
        }
        Ok(writer.into_inner().map_err(|e| e.into_error())?)
    }

    fn archive(&self, files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for (name, data) in files {
            zip.start_file(name.as_str(), SimpleFileOptions::default())?;
            zip.write_all(data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SitePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RouteRecord>> {
        let routes = enumerate(&self.registry)?;
        tracing::debug!("Route families: {:?}", routes.count_by_family());
        Ok(routes.records().to_vec())
    }

    async fn transform(&self, routes: Vec<RouteRecord>) -> Result<SiteArtifacts> {
        // 重新解析每條路徑，頁面資料與 sitemap 都來自同一份路由集合
        let route_set = RouteSet::from_records(&self.registry, &routes)?;

        let pages = route_set
            .tuples()
            .iter()
            .map(|route| build_page(&self.registry, &route_set, route))
            .collect::<Vec<_>>();

        let sitemap = build_entries(&route_set, self.config.site_url(), self.config.build_time());
        let sitemap_xml = render_xml(&sitemap)?;
        let robots_txt = render_robots(self.config.site_url());
        let search_index = build_index(&self.registry);

        tracing::debug!(
            "Sitemap has {} entries for {}",
            sitemap.len(),
            self.config.site_url()
        );

        // 輸出的路由清單一律取自解析後的集合，而不是傳入的原始紀錄
        Ok(SiteArtifacts {
            routes: route_set.records().to_vec(),
            static_params: route_set.static_params(),
            pages,
            sitemap,
            sitemap_xml,
            robots_txt,
            search_index,
        })
    }

    async fn load(&self, artifacts: SiteArtifacts) -> Result<String> {
        let mut files: Vec<(String, Vec<u8>)> = Vec::new();

        files.push((
            ROUTES_JSON.to_string(),
            serde_json::to_vec_pretty(&artifacts.static_params)?,
        ));

        if self.config.write_csv() {
            files.push((ROUTES_CSV.to_string(), self.routes_csv(&artifacts.routes)?));
        }

        if self.config.write_pages() {
            for page in &artifacts.pages {
                files.push((page_file(&page.path), serde_json::to_vec_pretty(page)?));
            }
        }

        files.push((SITEMAP_XML.to_string(), artifacts.sitemap_xml.into_bytes()));
        files.push((ROBOTS_TXT.to_string(), artifacts.robots_txt.into_bytes()));
        files.push((
            SEARCH_INDEX_JSON.to_string(),
            serde_json::to_vec_pretty(&artifacts.search_index)?,
        ));

        tracing::debug!("Writing {} output files", files.len());
        for (name, data) in &files {
            self.storage.write_file(name, data).await?;
        }

        if let Some(archive_name) = self.config.archive_filename() {
            let zip_data = self.archive(&files)?;
            tracing::debug!("Writing archive {} ({} bytes)", archive_name, zip_data.len());
            self.storage.write_file(archive_name, &zip_data).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}

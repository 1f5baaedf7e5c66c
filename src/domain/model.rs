use crate::domain::units::Unit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 食材：鍵值、顯示名稱與密度（每杯公克數）
///
/// Only the registry builds these, after checking the key shape and that the
/// density is finite and positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    key: String,
    name: String,
    density: f64,
}

impl Ingredient {
    pub(crate) fn new(key: String, name: String, density: f64) -> Self {
        Self { key, name, density }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grams per US cup.
    pub fn density(&self) -> f64 {
        self.density
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub input_amount: f64,
    pub input_unit: Unit,
    pub output_amount: f64,
    pub output_unit: Unit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelatedLink {
    pub title: String,
    pub path: String,
}

/// 轉換表的一列，已格式化為顯示字串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteFamily {
    Static,
    ConverterIndex,
    IngredientConverter,
    PureConverter,
    IngredientProfile,
    Query,
}

impl RouteFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteFamily::Static => "static",
            RouteFamily::ConverterIndex => "converter-index",
            RouteFamily::IngredientConverter => "ingredient-converter",
            RouteFamily::PureConverter => "pure-converter",
            RouteFamily::IngredientProfile => "ingredient-profile",
            RouteFamily::Query => "query",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

/// One entry of the static-generation feed. The sitemap is derived from the
/// same records, never from a separate loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub path: String,
    pub family: RouteFamily,
    pub params: BTreeMap<String, String>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchKind {
    IngredientConverter,
    PureConverter,
    IngredientPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub title: String,
    pub href: String,
    pub kind: SearchKind,
    pub description: String,
}

/// 每一頁交給呈現層的計算結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    pub path: String,
    pub canonical_path: String,
    pub family: RouteFamily,
    pub title: String,
    pub params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Ingredient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ConversionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_display: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub table: Vec<TableRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quick_values: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RelatedLink>,
    pub related: Vec<RelatedLink>,
}

/// 靜態產生清單的一筆（routes.json）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticParams {
    pub path: String,
    pub family: RouteFamily,
    pub params: BTreeMap<String, String>,
}

impl From<&RouteRecord> for StaticParams {
    fn from(record: &RouteRecord) -> Self {
        Self {
            path: record.path.clone(),
            family: record.family,
            params: record.params.clone(),
        }
    }
}

/// Everything one build produces, ready to be written out. `routes`,
/// `static_params`, `pages` and `sitemap` all come from the same resolved
/// route set and share one order.
#[derive(Debug, Clone)]
pub struct SiteArtifacts {
    pub routes: Vec<RouteRecord>,
    pub static_params: Vec<StaticParams>,
    pub pages: Vec<PageRecord>,
    pub sitemap: Vec<SitemapEntry>,
    pub sitemap_xml: String,
    pub robots_txt: String,
    pub search_index: Vec<SearchEntry>,
}

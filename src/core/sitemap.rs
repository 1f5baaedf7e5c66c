//! sitemap.xml and robots.txt.
//!
//! Entries are derived from a [`RouteSet`] record-for-record, so the sitemap
//! lists exactly the pages that get pre-materialized, in the same order.

use crate::core::path::canonical_url;
use crate::core::routes::RouteSet;
use crate::domain::model::SitemapEntry;
use crate::utils::error::{Result, SiteError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct Urlset<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    url: Vec<UrlElement<'a>>,
}

#[derive(Debug, Serialize)]
struct UrlElement<'a> {
    loc: &'a str,
    lastmod: &'a str,
    changefreq: &'static str,
    priority: String,
}

/// One entry per route. Every entry shares the single build timestamp so the
/// output is reproducible for a fixed `lastmod`.
pub fn build_entries(routes: &RouteSet<'_>, site_url: &str, lastmod: DateTime<Utc>) -> Vec<SitemapEntry> {
    let lastmod = lastmod.to_rfc3339_opts(SecondsFormat::Millis, true);

    routes
        .records()
        .iter()
        .map(|record| SitemapEntry {
            loc: canonical_url(site_url, &record.path),
            lastmod: lastmod.clone(),
            changefreq: record.change_frequency,
            priority: record.priority,
        })
        .collect()
}

/// sitemaps.org 0.9 `<urlset>`, two-space indented, priority with one decimal.
pub fn render_xml(entries: &[SitemapEntry]) -> Result<String> {
    let urlset = Urlset {
        xmlns: SITEMAP_NAMESPACE,
        url: entries
            .iter()
            .map(|entry| UrlElement {
                loc: &entry.loc,
                lastmod: &entry.lastmod,
                changefreq: entry.changefreq.as_str(),
                priority: format!("{:.1}", entry.priority),
            })
            .collect(),
    };

    let mut xml = String::from(XML_DECLARATION);
    let mut serializer = quick_xml::se::Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    urlset
        .serialize(serializer)
        .map_err(|e| SiteError::XmlError {
            message: e.to_string(),
        })?;
    xml.push('\n');
    Ok(xml)
}

/// Allows every crawler and points at the sitemap.
pub fn render_robots(site_url: &str) -> String {
    format!(
        "User-Agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        site_url.trim_end_matches('/')
    )
}

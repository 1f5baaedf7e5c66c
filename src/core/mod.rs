pub mod conversion;
pub mod engine;
pub mod pages;
pub mod path;
pub mod pipeline;
pub mod query;
pub mod registry;
pub mod related;
pub mod routes;
pub mod search;
pub mod sitemap;
pub mod tables;

pub use crate::domain::model::{PageRecord, RouteRecord, SiteArtifacts};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use registry::Registry;
pub use routes::{RouteSet, RouteTuple};

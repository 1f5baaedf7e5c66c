//! Route enumeration and resolution.
//!
//! [`enumerate`] is the only place the page set is decided. The static
//! generation feed and the sitemap both read the resulting [`RouteSet`], and
//! [`resolve`] maps any enumerated path back to the tuple that produced it.

use crate::core::path::normalize_path;
use crate::core::query::{self, ConversionRequest};
use crate::core::registry::Registry;
use crate::domain::model::{ChangeFrequency, Ingredient, RouteFamily, RouteRecord};
pub use crate::domain::model::StaticParams;
use crate::domain::units::{slug_to_title, ConverterKind, PureUnitPair, QueryForm};
use crate::utils::error::{Result, SiteError};
use std::collections::{BTreeMap, HashMap};

/// 固定內容頁（首頁、工具列表、指南等）
#[derive(Debug, PartialEq)]
pub struct StaticPage {
    pub path: &'static str,
    pub title: &'static str,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

impl StaticPage {
    pub fn is_guide_article(&self) -> bool {
        self.path.starts_with("/guides/")
    }
}

pub const STATIC_PAGES: &[StaticPage] = &[
    StaticPage {
        path: "/",
        title: "CookConvert - Free Cooking Measurement Converter",
        change_frequency: ChangeFrequency::Weekly,
        priority: 1.0,
    },
    StaticPage {
        path: "/tools",
        title: "All Cooking Conversion Tools",
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.9,
    },
    StaticPage {
        path: "/ingredients",
        title: "Cooking Ingredients Guide",
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.9,
    },
    StaticPage {
        path: "/about",
        title: "About CookConvert",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.7,
    },
    StaticPage {
        path: "/privacy",
        title: "Privacy Policy",
        change_frequency: ChangeFrequency::Yearly,
        priority: 0.3,
    },
    StaticPage {
        path: "/terms",
        title: "Terms of Service",
        change_frequency: ChangeFrequency::Yearly,
        priority: 0.3,
    },
    StaticPage {
        path: "/contact",
        title: "Contact Us",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.5,
    },
    StaticPage {
        path: "/guides",
        title: "Cooking Measurement Guides",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    },
    StaticPage {
        path: "/guides/grams-vs-cups-complete-guide",
        title: "Grams vs Cups: Complete Guide to Weight vs Volume Measurements",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    },
    StaticPage {
        path: "/guides/why-baking-needs-precision",
        title: "Why Baking Needs Precision",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    },
    StaticPage {
        path: "/guides/how-to-measure-flour-correctly",
        title: "How to Measure Flour Correctly",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    },
    StaticPage {
        path: "/guides/common-measurement-mistakes-in-baking",
        title: "Common Measurement Mistakes in Baking",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    },
    StaticPage {
        path: "/guides/kitchen-conversion-chart-guide",
        title: "Kitchen Conversion Chart Guide",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    },
];

const GENERATED_PRIORITY: f32 = 0.8;
const QUERY_PRIORITY: f32 = 0.7;

/// Identifies exactly one generated page. Ingredient components borrow from
/// the [`Registry`], so a tuple cannot name an unregistered ingredient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteTuple<'r> {
    Static(&'static StaticPage),
    ConverterIndex(ConverterKind),
    IngredientConverter(ConverterKind, &'r Ingredient),
    PureConverter(PureUnitPair),
    IngredientProfile(&'r Ingredient),
    Query(ConversionRequest<'r>),
}

impl<'r> RouteTuple<'r> {
    pub fn path(&self) -> String {
        match self {
            RouteTuple::Static(page) => page.path.to_string(),
            RouteTuple::ConverterIndex(kind) => format!("/{}", kind.slug()),
            RouteTuple::IngredientConverter(kind, ingredient) => {
                format!("/{}/{}", kind.slug(), ingredient.key())
            }
            RouteTuple::PureConverter(pair) => format!("/{}", pair.slug()),
            RouteTuple::IngredientProfile(ingredient) => {
                format!("/ingredients/{}", ingredient.key())
            }
            RouteTuple::Query(request) => request.path(),
        }
    }

    pub fn family(&self) -> RouteFamily {
        match self {
            RouteTuple::Static(_) => RouteFamily::Static,
            RouteTuple::ConverterIndex(_) => RouteFamily::ConverterIndex,
            RouteTuple::IngredientConverter(..) => RouteFamily::IngredientConverter,
            RouteTuple::PureConverter(_) => RouteFamily::PureConverter,
            RouteTuple::IngredientProfile(_) => RouteFamily::IngredientProfile,
            RouteTuple::Query(_) => RouteFamily::Query,
        }
    }

    /// Dynamic segments the page is pre-materialized with.
    pub fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        match self {
            RouteTuple::Static(_) | RouteTuple::PureConverter(_) => {}
            RouteTuple::ConverterIndex(kind) => {
                params.insert("converter".to_string(), kind.slug().to_string());
            }
            RouteTuple::IngredientConverter(kind, ingredient) => {
                params.insert("converter".to_string(), kind.slug().to_string());
                params.insert("ingredient".to_string(), ingredient.key().to_string());
            }
            RouteTuple::IngredientProfile(ingredient) => {
                params.insert("ingredient".to_string(), ingredient.key().to_string());
            }
            RouteTuple::Query(request) => {
                params.insert("query".to_string(), request.slug());
            }
        }
        params
    }

    pub fn title(&self) -> String {
        match self {
            RouteTuple::Static(page) => page.title.to_string(),
            RouteTuple::ConverterIndex(kind) => format!("{} Converter", slug_to_title(kind.slug())),
            RouteTuple::IngredientConverter(kind, ingredient) => format!(
                "{}: {} Converter",
                ingredient.name(),
                slug_to_title(kind.slug())
            ),
            RouteTuple::PureConverter(pair) => format!(
                "{} to {} Converter",
                pair.source_unit().title(),
                pair.target_unit().title()
            ),
            RouteTuple::IngredientProfile(ingredient) => format!(
                "{} - Density, Conversion Chart & Cooking Tips",
                ingredient.name()
            ),
            RouteTuple::Query(request) => request.title(),
        }
    }

    pub fn ingredient(&self) -> Option<&'r Ingredient> {
        match *self {
            RouteTuple::IngredientConverter(_, ingredient) | RouteTuple::IngredientProfile(ingredient) => {
                Some(ingredient)
            }
            RouteTuple::Query(request) => Some(request.ingredient()),
            RouteTuple::Static(_) | RouteTuple::ConverterIndex(_) | RouteTuple::PureConverter(_) => {
                None
            }
        }
    }

    pub fn change_frequency(&self) -> ChangeFrequency {
        match self {
            RouteTuple::Static(page) => page.change_frequency,
            _ => ChangeFrequency::Monthly,
        }
    }

    pub fn priority(&self) -> f32 {
        match self {
            RouteTuple::Static(page) => page.priority,
            RouteTuple::Query(_) => QUERY_PRIORITY,
            _ => GENERATED_PRIORITY,
        }
    }

    pub fn record(&self) -> RouteRecord {
        RouteRecord {
            path: self.path(),
            family: self.family(),
            params: self.params(),
            change_frequency: self.change_frequency(),
            priority: self.priority(),
        }
    }
}

/// The ordered, duplicate-free page set of one build.
#[derive(Debug, Clone)]
pub struct RouteSet<'r> {
    tuples: Vec<RouteTuple<'r>>,
    records: Vec<RouteRecord>,
    positions: HashMap<String, usize>,
}

impl<'r> RouteSet<'r> {
    pub fn from_tuples(tuples: Vec<RouteTuple<'r>>) -> Result<Self> {
        let records: Vec<RouteRecord> = tuples.iter().map(RouteTuple::record).collect();

        let mut positions = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if positions.insert(record.path.clone(), position).is_some() {
                return Err(SiteError::DuplicateRoute {
                    path: record.path.clone(),
                });
            }
        }

        Ok(Self {
            tuples,
            records,
            positions,
        })
    }

    /// Rebuilds a set from records produced by an earlier [`enumerate`],
    /// resolving every path again against the registry.
    pub fn from_records(registry: &'r Registry, records: &[RouteRecord]) -> Result<Self> {
        let tuples = records
            .iter()
            .map(|record| resolve(registry, &record.path))
            .collect::<Result<Vec<_>>>()?;
        Self::from_tuples(tuples)
    }

    pub fn tuples(&self) -> &[RouteTuple<'r>] {
        &self.tuples
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.path.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.positions.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&RouteTuple<'r>> {
        self.positions.get(path).map(|&position| &self.tuples[position])
    }

    /// The pre-materialization feed.
    pub fn static_params(&self) -> Vec<StaticParams> {
        self.records.iter().map(StaticParams::from).collect()
    }

    pub fn count_by_family(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.family.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Enumerates every page in a fixed order: static pages, converter hubs,
/// converter x ingredient (converter-major), pure converters, ingredient
/// profiles, then query samples (amount-major, grams before cups).
pub fn enumerate(registry: &Registry) -> Result<RouteSet<'_>> {
    let ingredients = registry.ingredients();
    let mut tuples = Vec::new();

    tuples.extend(STATIC_PAGES.iter().map(RouteTuple::Static));
    tuples.extend(registry.converter_kinds().iter().copied().map(RouteTuple::ConverterIndex));

    for kind in registry.converter_kinds() {
        for ingredient in ingredients {
            tuples.push(RouteTuple::IngredientConverter(*kind, ingredient));
        }
    }

    tuples.extend(registry.pure_pairs().iter().copied().map(RouteTuple::PureConverter));
    tuples.extend(ingredients.iter().map(RouteTuple::IngredientProfile));

    for form in QueryForm::ALL {
        for amount in form.sample_amounts() {
            for ingredient in ingredients {
                tuples.push(RouteTuple::Query(ConversionRequest::new(
                    *amount, form, ingredient,
                )));
            }
        }
    }

    let set = RouteSet::from_tuples(tuples)?;
    tracing::debug!("Enumerated {} routes: {:?}", set.len(), set.count_by_family());
    Ok(set)
}

/// Maps a request path to the page it names. Unknown components and
/// malformed query slugs all give the same `NotFound` for the path.
pub fn resolve<'r>(registry: &'r Registry, path: &str) -> Result<RouteTuple<'r>> {
    let without_query = path.split(['?', '#']).next().unwrap_or_default();
    let normalized = normalize_path(without_query);

    if let Some(page) = STATIC_PAGES.iter().find(|page| page.path == normalized) {
        return Ok(RouteTuple::Static(page));
    }

    let not_found = || SiteError::not_found(normalized.as_str());
    let segments: Vec<&str> = normalized.trim_start_matches('/').split('/').collect();

    match segments.as_slice() {
        ["q", slug] => query::parse(registry, slug)
            .map(RouteTuple::Query)
            .map_err(|_| not_found()),
        ["ingredients", key] => registry
            .ingredient(key)
            .map(RouteTuple::IngredientProfile)
            .ok_or_else(not_found),
        [slug] => ConverterKind::from_slug(slug)
            .map(RouteTuple::ConverterIndex)
            .or_else(|| PureUnitPair::from_slug(slug).map(RouteTuple::PureConverter))
            .ok_or_else(not_found),
        [converter, key] => {
            let kind = ConverterKind::from_slug(converter).ok_or_else(not_found)?;
            let ingredient = registry.ingredient(key).ok_or_else(not_found)?;
            Ok(RouteTuple::IngredientConverter(kind, ingredient))
        }
        _ => Err(not_found()),
    }
}

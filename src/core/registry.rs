//! Ingredient registry.
//!
//! The shipped data lives in three parallel tables (keys, display names and
//! densities in grams per US cup). They are checked for totality once, when
//! the registry is built; after that every lookup is infallible for a
//! registered key.

use crate::domain::model::Ingredient;
use crate::domain::units::{ConverterKind, PureUnitPair};
use crate::utils::error::{Result, SiteError};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

pub const INGREDIENT_KEYS: &[&str] = &[
    "flour",
    "sugar",
    "brown-sugar",
    "butter",
    "milk",
    "water",
    "honey",
    "olive-oil",
    "rice",
    "salt",
    "baking-powder",
    "cocoa-powder",
    "oats",
    "yogurt",
    "cream",
    "chopped-onion",
    "shredded-cheese",
    "breadcrumbs",
    "peanut-butter",
    "jam",
];

pub const INGREDIENT_NAMES: &[(&str, &str)] = &[
    ("flour", "Flour"),
    ("sugar", "Sugar"),
    ("brown-sugar", "Brown Sugar"),
    ("butter", "Butter"),
    ("milk", "Milk"),
    ("water", "Water"),
    ("honey", "Honey"),
    ("olive-oil", "Olive Oil"),
    ("rice", "Rice"),
    ("salt", "Salt"),
    ("baking-powder", "Baking Powder"),
    ("cocoa-powder", "Cocoa Powder"),
    ("oats", "Oats"),
    ("yogurt", "Yogurt"),
    ("cream", "Cream"),
    ("chopped-onion", "Chopped Onion"),
    ("shredded-cheese", "Shredded Cheese"),
    ("breadcrumbs", "Breadcrumbs"),
    ("peanut-butter", "Peanut Butter"),
    ("jam", "Jam"),
];

/// Grams per US cup.
pub const INGREDIENT_DENSITIES: &[(&str, f64)] = &[
    ("flour", 120.0),
    ("sugar", 200.0),
    ("brown-sugar", 220.0),
    ("butter", 227.0),
    ("milk", 240.0),
    ("water", 236.0),
    ("honey", 340.0),
    ("olive-oil", 215.0),
    ("rice", 185.0),
    ("salt", 288.0),
    ("baking-powder", 192.0),
    ("cocoa-powder", 100.0),
    ("oats", 90.0),
    ("yogurt", 245.0),
    ("cream", 240.0),
    ("chopped-onion", 160.0),
    ("shredded-cheese", 110.0),
    ("breadcrumbs", 120.0),
    ("peanut-butter", 270.0),
    ("jam", 320.0),
];

/// Related-link priority order.
pub const POPULAR_INGREDIENTS: &[&str] = &[
    "flour", "sugar", "butter", "milk", "water", "honey", "olive-oil", "rice",
];

static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("ingredient key pattern is valid")
});

#[derive(Debug, Clone)]
pub struct Registry {
    ingredients: Vec<Ingredient>,
    index: HashMap<String, usize>,
    popular: Vec<usize>,
}

impl Registry {
    /// 載入內建資料表並檢查一致性
    pub fn builtin() -> Result<Self> {
        Self::from_tables(
            INGREDIENT_KEYS,
            INGREDIENT_NAMES,
            INGREDIENT_DENSITIES,
            POPULAR_INGREDIENTS,
        )
    }

    /// Builds a registry from parallel tables, failing on the first
    /// inconsistency: malformed or duplicate keys, a name or density missing
    /// for a key, an entry for an unknown key, a non-positive density, or a
    /// popular ingredient that is not registered.
    pub fn from_tables(
        keys: &[&str],
        names: &[(&str, &str)],
        densities: &[(&str, f64)],
        popular: &[&str],
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(keys.len());
        for (position, key) in keys.iter().enumerate() {
            if !KEY_PATTERN.is_match(key) {
                return Err(SiteError::registry(
                    *key,
                    "key must be lowercase words joined by single hyphens",
                ));
            }
            if index.insert(key.to_string(), position).is_some() {
                return Err(SiteError::registry(*key, "key is registered more than once"));
            }
        }

        let name_map = Self::total_map("name", &index, names)?;
        let density_map = Self::total_map("density", &index, densities)?;

        let mut ingredients = Vec::with_capacity(keys.len());
        for key in keys {
            let name = name_map[key];
            let density = density_map[key];

            if name.trim().is_empty() {
                return Err(SiteError::registry(*key, "display name is empty"));
            }
            if !density.is_finite() || density <= 0.0 {
                return Err(SiteError::registry(
                    *key,
                    format!("density must be a positive number, got {}", density),
                ));
            }

            ingredients.push(Ingredient::new(key.to_string(), name.to_string(), density));
        }

        let mut popular_positions = Vec::with_capacity(popular.len());
        let mut seen = HashSet::new();
        for key in popular {
            let position = *index.get(*key).ok_or_else(|| {
                SiteError::registry(*key, "popular ingredient is not a registered key")
            })?;
            if seen.insert(position) {
                popular_positions.push(position);
            }
        }

        tracing::debug!(
            "Registry loaded: {} ingredients, {} popular",
            ingredients.len(),
            popular_positions.len()
        );

        Ok(Self {
            ingredients,
            index,
            popular: popular_positions,
        })
    }

    /// 確認對照表恰好涵蓋每個鍵一次
    fn total_map<'a, V: Copy>(
        what: &str,
        index: &HashMap<String, usize>,
        entries: &[(&'a str, V)],
    ) -> Result<HashMap<&'a str, V>> {
        let mut map = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            if !index.contains_key(*key) {
                return Err(SiteError::registry(
                    *key,
                    format!("{} given for an unregistered key", what),
                ));
            }
            if map.insert(*key, *value).is_some() {
                return Err(SiteError::registry(*key, format!("{} given more than once", what)));
            }
        }

        if let Some(missing) = index.keys().find(|key| !map.contains_key(key.as_str())) {
            return Err(SiteError::registry(missing.as_str(), format!("no {} registered", what)));
        }

        Ok(map)
    }

    /// Ingredients in registry order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn ingredient(&self, key: &str) -> Option<&Ingredient> {
        self.index.get(key).map(|&position| &self.ingredients[position])
    }

    pub fn popular(&self) -> impl Iterator<Item = &Ingredient> + '_ {
        self.popular.iter().map(|&position| &self.ingredients[position])
    }

    pub fn is_popular(&self, key: &str) -> bool {
        self.index
            .get(key)
            .is_some_and(|position| self.popular.contains(position))
    }

    pub fn converter_kinds(&self) -> &'static [ConverterKind] {
        &ConverterKind::ALL
    }

    pub fn pure_pairs(&self) -> &'static [PureUnitPair] {
        &PureUnitPair::ALL
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

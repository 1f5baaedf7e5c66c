//! Site search index and its scoring.

use crate::core::registry::Registry;
use crate::domain::model::{SearchEntry, SearchKind};
use crate::domain::units::slug_to_title;

pub const MAX_RESULTS: usize = 10;

const EXACT_TITLE_SCORE: u32 = 1000;
const TITLE_PREFIX_SCORE: u32 = 500;
const TITLE_SUBSTRING_SCORE: u32 = 200;
const WORD_IN_TITLE_SCORE: u32 = 50;
const WORD_IN_DESCRIPTION_SCORE: u32 = 10;
const INGREDIENT_CONVERTER_BOOST: u32 = 5;

/// Ingredient converters, then pure converters, then ingredient profiles.
pub fn build_index(registry: &Registry) -> Vec<SearchEntry> {
    let mut index = Vec::new();

    for kind in registry.converter_kinds() {
        let converter_title = slug_to_title(kind.slug());
        for ingredient in registry.ingredients() {
            index.push(SearchEntry {
                title: format!("{} {}", ingredient.name(), converter_title),
                href: format!("/{}/{}", kind.slug(), ingredient.key()),
                kind: SearchKind::IngredientConverter,
                description: format!(
                    "Convert {} for {}",
                    converter_title.to_lowercase(),
                    ingredient.name()
                ),
            });
        }
    }

    for pair in registry.pure_pairs() {
        let title = slug_to_title(pair.slug());
        index.push(SearchEntry {
            description: format!("Convert {}", title.to_lowercase()),
            href: format!("/{}", pair.slug()),
            kind: SearchKind::PureConverter,
            title,
        });
    }

    for ingredient in registry.ingredients() {
        index.push(SearchEntry {
            title: format!("{} - Ingredient Guide", ingredient.name()),
            href: format!("/ingredients/{}", ingredient.key()),
            kind: SearchKind::IngredientPage,
            description: format!("Learn about {} and its conversions", ingredient.name()),
        });
    }

    index
}

/// 依相關度計分；沒有任何文字命中的項目得 0 分
fn score(entry: &SearchEntry, query: &str, words: &[&str]) -> u32 {
    let title = entry.title.to_lowercase();
    let description = entry.description.to_lowercase();

    let mut score = if title == query {
        EXACT_TITLE_SCORE
    } else if title.starts_with(query) {
        TITLE_PREFIX_SCORE
    } else if title.contains(query) {
        TITLE_SUBSTRING_SCORE
    } else {
        0
    };

    for word in words {
        if title.contains(word) {
            score += WORD_IN_TITLE_SCORE;
        }
        if description.contains(word) {
            score += WORD_IN_DESCRIPTION_SCORE;
        }
    }

    if score > 0 && entry.kind == SearchKind::IngredientConverter {
        score += INGREDIENT_CONVERTER_BOOST;
    }
    score
}

/// Top results for `query`, best first. Ties keep index order.
///
/// The ingredient-converter boost only reorders entries that already match
/// some text, so a query that matches nothing returns nothing rather than the
/// first ten converter pages.
pub fn search<'a>(index: &'a [SearchEntry], query: &str) -> Vec<&'a SearchEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let words: Vec<&str> = query.split_whitespace().collect();

    let mut scored: Vec<(u32, &SearchEntry)> = index
        .iter()
        .map(|entry| (score(entry, &query, &words), entry))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(MAX_RESULTS).map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_shape() {
        let registry = Registry::builtin().unwrap();
        let index = build_index(&registry);

        assert_eq!(index.len(), 60 + 6 + 20);
        assert_eq!(index[0].title, "Flour Cups to Grams");
        assert_eq!(index[0].href, "/cups-to-grams/flour");
        assert_eq!(index[0].description, "Convert cups to grams for Flour");
        assert_eq!(index[60].title, "Cups to Ml");
        assert_eq!(index[60].kind, SearchKind::PureConverter);
        assert_eq!(index[66].href, "/ingredients/flour");
    }

    #[test]
    fn test_exact_title_ranks_first() {
        let registry = Registry::builtin().unwrap();
        let index = build_index(&registry);
        let results = search(&index, "  Honey Cups to Grams ");

        assert_eq!(results[0].href, "/cups-to-grams/honey");
        assert!(results.len() <= MAX_RESULTS);
    }

    #[test]
    fn test_prefix_beats_substring() {
        let registry = Registry::builtin().unwrap();
        let index = build_index(&registry);
        let results = search(&index, "butter");

        // "Butter ..." titles start with the query, "Peanut Butter ..." only contain it.
        assert!(results[0].title.starts_with("Butter"));
        let first_peanut = results.iter().position(|r| r.title.starts_with("Peanut")).unwrap();
        let last_plain = results.iter().rposition(|r| r.title.starts_with("Butter")).unwrap();
        assert!(last_plain < first_peanut);
    }

    #[test]
    fn test_no_match_and_empty_query() {
        let registry = Registry::builtin().unwrap();
        let index = build_index(&registry);

        assert!(search(&index, "").is_empty());
        assert!(search(&index, "   ").is_empty());
        assert!(search(&index, "saffron").is_empty());
    }

    #[test]
    fn test_boost_ranks_converters_above_equal_matches() {
        let registry = Registry::builtin().unwrap();
        let index = build_index(&registry);

        let results = search(&index, "honey");
        assert!(!results.is_empty());
        assert_eq!(results[0].kind, SearchKind::IngredientConverter);
        assert!(results.iter().all(|entry| entry.title.to_lowercase().contains("honey")
            || entry.description.to_lowercase().contains("honey")));
    }
}

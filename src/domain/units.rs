//! Closed sets of measurement units and conversion directions.
//!
//! Every page family is keyed by one of these enums, so a misspelled or
//! unsupported converter is a compile error instead of a fallthrough.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Cups,
    Grams,
    Tablespoons,
    Teaspoons,
    Milliliters,
    Ounces,
}

impl Unit {
    /// 網址中使用的單位代號
    pub fn slug(self) -> &'static str {
        match self {
            Unit::Cups => "cups",
            Unit::Grams => "grams",
            Unit::Tablespoons => "tbsp",
            Unit::Teaspoons => "tsp",
            Unit::Milliliters => "ml",
            Unit::Ounces => "oz",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Unit::Cups => "cup",
            Unit::Grams => "gram",
            Unit::Tablespoons => "tablespoon",
            Unit::Teaspoons => "teaspoon",
            Unit::Milliliters => "milliliter",
            Unit::Ounces => "ounce",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Unit::Cups => "cups",
            Unit::Grams => "grams",
            Unit::Tablespoons => "tablespoons",
            Unit::Teaspoons => "teaspoons",
            Unit::Milliliters => "milliliters",
            Unit::Ounces => "ounces",
        }
    }

    /// "Cups", "Milliliters"
    pub fn title(self) -> String {
        let plural = self.plural();
        let mut chars = plural.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn label(self, amount: f64) -> &'static str {
        if amount == 1.0 {
            self.singular()
        } else {
            self.plural()
        }
    }

    /// Decimal places used when a single result in this unit is shown.
    pub fn display_decimals(self) -> usize {
        match self {
            Unit::Grams => 0,
            _ => 2,
        }
    }
}

/// Ingredient-dependent conversion directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConverterKind {
    CupsToGrams,
    GramsToCups,
    TbspToGrams,
}

impl ConverterKind {
    pub const ALL: [ConverterKind; 3] = [
        ConverterKind::CupsToGrams,
        ConverterKind::GramsToCups,
        ConverterKind::TbspToGrams,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ConverterKind::CupsToGrams => "cups-to-grams",
            ConverterKind::GramsToCups => "grams-to-cups",
            ConverterKind::TbspToGrams => "tbsp-to-grams",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn source_unit(self) -> Unit {
        match self {
            ConverterKind::CupsToGrams => Unit::Cups,
            ConverterKind::GramsToCups => Unit::Grams,
            ConverterKind::TbspToGrams => Unit::Tablespoons,
        }
    }

    pub fn target_unit(self) -> Unit {
        match self {
            ConverterKind::CupsToGrams | ConverterKind::TbspToGrams => Unit::Grams,
            ConverterKind::GramsToCups => Unit::Cups,
        }
    }

    /// Preset amounts offered next to the converter input.
    pub fn quick_values(self) -> &'static [f64] {
        match self {
            ConverterKind::CupsToGrams => &[0.25, 0.5, 1.0, 2.0, 3.0],
            ConverterKind::GramsToCups => &[50.0, 100.0, 200.0, 300.0, 500.0],
            ConverterKind::TbspToGrams => &[1.0, 2.0, 4.0, 8.0, 16.0],
        }
    }
}

/// Ingredient-independent conversions with fixed physical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PureUnitPair {
    CupsToMl,
    MlToCups,
    OzToGrams,
    GramsToOz,
    TbspToMl,
    TspToMl,
}

impl PureUnitPair {
    pub const ALL: [PureUnitPair; 6] = [
        PureUnitPair::CupsToMl,
        PureUnitPair::MlToCups,
        PureUnitPair::OzToGrams,
        PureUnitPair::GramsToOz,
        PureUnitPair::TbspToMl,
        PureUnitPair::TspToMl,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            PureUnitPair::CupsToMl => "cups-to-ml",
            PureUnitPair::MlToCups => "ml-to-cups",
            PureUnitPair::OzToGrams => "oz-to-grams",
            PureUnitPair::GramsToOz => "grams-to-oz",
            PureUnitPair::TbspToMl => "tbsp-to-ml",
            PureUnitPair::TspToMl => "tsp-to-ml",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pair| pair.slug() == slug)
    }

    pub fn source_unit(self) -> Unit {
        match self {
            PureUnitPair::CupsToMl => Unit::Cups,
            PureUnitPair::MlToCups => Unit::Milliliters,
            PureUnitPair::OzToGrams => Unit::Ounces,
            PureUnitPair::GramsToOz => Unit::Grams,
            PureUnitPair::TbspToMl => Unit::Tablespoons,
            PureUnitPair::TspToMl => Unit::Teaspoons,
        }
    }

    pub fn target_unit(self) -> Unit {
        match self {
            PureUnitPair::CupsToMl | PureUnitPair::TbspToMl | PureUnitPair::TspToMl => {
                Unit::Milliliters
            }
            PureUnitPair::MlToCups => Unit::Cups,
            PureUnitPair::OzToGrams => Unit::Grams,
            PureUnitPair::GramsToOz => Unit::Ounces,
        }
    }
}

/// The two free-form query grammars, `<n>-grams-<ingredient>-to-cups` and
/// `<n>-cups-<ingredient>-to-grams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryForm {
    GramsToCups,
    CupsToGrams,
}

impl QueryForm {
    /// 解析時依此順序嘗試
    pub const ALL: [QueryForm; 2] = [QueryForm::GramsToCups, QueryForm::CupsToGrams];

    pub fn converter(self) -> ConverterKind {
        match self {
            QueryForm::GramsToCups => ConverterKind::GramsToCups,
            QueryForm::CupsToGrams => ConverterKind::CupsToGrams,
        }
    }

    pub fn source_unit(self) -> Unit {
        self.converter().source_unit()
    }

    pub fn target_unit(self) -> Unit {
        self.converter().target_unit()
    }

    /// Amounts pre-built for every ingredient.
    pub fn sample_amounts(self) -> &'static [f64] {
        match self {
            QueryForm::GramsToCups => &[50.0, 100.0, 200.0, 250.0, 500.0],
            QueryForm::CupsToGrams => &[0.5, 1.0, 2.0, 3.0],
        }
    }
}

/// "cups-to-grams" -> "Cups to Grams"
pub fn slug_to_title(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            if word.eq_ignore_ascii_case("to") {
                return "to".to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for kind in ConverterKind::ALL {
            assert_eq!(ConverterKind::from_slug(kind.slug()), Some(kind));
        }
        for pair in PureUnitPair::ALL {
            assert_eq!(PureUnitPair::from_slug(pair.slug()), Some(pair));
        }
        assert_eq!(ConverterKind::from_slug("cups-to-ml"), None);
        assert_eq!(PureUnitPair::from_slug("cups-to-grams"), None);
    }

    #[test]
    fn test_slug_matches_units() {
        for kind in ConverterKind::ALL {
            let expected = format!("{}-to-{}", kind.source_unit().slug(), kind.target_unit().slug());
            assert_eq!(kind.slug(), expected);
        }
        for pair in PureUnitPair::ALL {
            let expected = format!("{}-to-{}", pair.source_unit().slug(), pair.target_unit().slug());
            assert_eq!(pair.slug(), expected);
        }
    }

    #[test]
    fn test_query_forms_map_to_converters() {
        assert_eq!(QueryForm::GramsToCups.converter(), ConverterKind::GramsToCups);
        assert_eq!(QueryForm::CupsToGrams.source_unit(), Unit::Cups);
        assert_eq!(QueryForm::CupsToGrams.target_unit(), Unit::Grams);
    }

    #[test]
    fn test_slug_to_title() {
        assert_eq!(slug_to_title("cups-to-grams"), "Cups to Grams");
        assert_eq!(slug_to_title("tbsp-to-ml"), "Tbsp to Ml");
        assert_eq!(slug_to_title("200-grams-brown-sugar-to-cups"), "200 Grams Brown Sugar to Cups");
    }

    #[test]
    fn test_unit_label_pluralizes() {
        assert_eq!(Unit::Cups.label(1.0), "cup");
        assert_eq!(Unit::Cups.label(0.5), "cups");
        assert_eq!(Unit::Grams.label(200.0), "grams");
        assert_eq!(Unit::Milliliters.title(), "Milliliters");
    }
}

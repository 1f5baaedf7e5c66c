//! Free-form conversion queries such as `200-grams-flour-to-cups`.
//!
//! The slug a request renders to and the pattern that parses it back are
//! both built from [`QueryForm`]'s unit slugs, so the two cannot drift.

use crate::core::conversion::format_amount;
use crate::core::registry::Registry;
use crate::domain::model::{ConversionResult, Ingredient};
use crate::domain::units::{ConverterKind, QueryForm, Unit};
use crate::utils::error::{Result, SiteError};
use regex::Regex;
use std::sync::LazyLock;

const AMOUNT_PATTERN: &str = r"(\d+(?:\.\d+)?)";

/// `^(\d+(?:\.\d+)?)-<source>-(.+)-to-<target>$`
pub fn pattern_for(form: QueryForm) -> String {
    format!(
        "^{}-{}-(.+)-to-{}$",
        AMOUNT_PATTERN,
        form.source_unit().slug(),
        form.target_unit().slug()
    )
}

static QUERY_PATTERNS: LazyLock<Vec<(QueryForm, Regex)>> = LazyLock::new(|| {
    QueryForm::ALL
        .into_iter()
        .map(|form| {
            let regex = Regex::new(&pattern_for(form)).expect("query pattern is valid");
            (form, regex)
        })
        .collect()
});

/// A validated query: positive finite amount, registered ingredient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest<'r> {
    amount: f64,
    form: QueryForm,
    ingredient: &'r Ingredient,
}

impl<'r> ConversionRequest<'r> {
    pub(crate) fn new(amount: f64, form: QueryForm, ingredient: &'r Ingredient) -> Self {
        Self {
            amount,
            form,
            ingredient,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn form(&self) -> QueryForm {
        self.form
    }

    pub fn ingredient(&self) -> &'r Ingredient {
        self.ingredient
    }

    pub fn source_unit(&self) -> Unit {
        self.form.source_unit()
    }

    pub fn target_unit(&self) -> Unit {
        self.form.target_unit()
    }

    pub fn converter(&self) -> ConverterKind {
        self.form.converter()
    }

    /// Canonical slug; `parse` maps it back to an equal request.
    pub fn slug(&self) -> String {
        format!(
            "{}-{}-{}-to-{}",
            self.amount,
            self.source_unit().slug(),
            self.ingredient.key(),
            self.target_unit().slug()
        )
    }

    pub fn path(&self) -> String {
        format!("/q/{}", self.slug())
    }

    pub fn evaluate(&self) -> ConversionResult {
        self.converter().convert(self.amount, self.ingredient)
    }

    /// "200g" or "2 cups"
    pub fn amount_display(&self) -> String {
        match self.form {
            QueryForm::GramsToCups => format!("{}g", self.amount),
            QueryForm::CupsToGrams => {
                format!("{} {}", self.amount, Unit::Cups.label(self.amount))
            }
        }
    }

    /// Cups keep two decimals, grams are rounded to a whole number.
    pub fn result_display(&self) -> String {
        let output = self.evaluate().output_amount;
        match self.form {
            QueryForm::GramsToCups => {
                format!("{} {}", format_amount(output, 2), Unit::Cups.label(output))
            }
            QueryForm::CupsToGrams => format!("{}g", format_amount(output, 0)),
        }
    }

    /// "200g Flour to Cups"
    pub fn title(&self) -> String {
        format!(
            "{} {} to {}",
            self.amount_display(),
            self.ingredient.name(),
            self.target_unit().title()
        )
    }

    /// The ingredient-converter page this query is a sample of.
    pub fn converter_path(&self) -> String {
        format!("/{}/{}", self.converter().slug(), self.ingredient.key())
    }
}

/// Parses a query slug (the part after `/q/`).
///
/// Forms are tried in [`QueryForm::ALL`] order. Any failure, whether the
/// grammar does not match, the amount is not a positive finite number, the
/// converted amount would not be finite or the ingredient is not registered,
/// yields the same `NotFound`.
pub fn parse<'r>(registry: &'r Registry, slug: &str) -> Result<ConversionRequest<'r>> {
    for (form, pattern) in QUERY_PATTERNS.iter() {
        let Some(captures) = pattern.captures(slug) else {
            continue;
        };

        let amount = captures[1].parse::<f64>().ok();
        let ingredient = registry.ingredient(&captures[2]);

        if let (Some(amount), Some(ingredient)) = (amount, ingredient) {
            // 換算結果也必須是有限值，極大的數量會溢位成 inf
            let output = form.converter().apply(amount, ingredient);
            if amount.is_finite() && amount > 0.0 && output.is_finite() {
                return Ok(ConversionRequest::new(amount, *form, ingredient));
            }
        }
    }

    tracing::debug!("Query slug rejected: {}", slug);
    Err(SiteError::not_found(slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_exact() {
        assert_eq!(
            pattern_for(QueryForm::GramsToCups),
            r"^(\d+(?:\.\d+)?)-grams-(.+)-to-cups$"
        );
        assert_eq!(
            pattern_for(QueryForm::CupsToGrams),
            r"^(\d+(?:\.\d+)?)-cups-(.+)-to-grams$"
        );
    }

    #[test]
    fn test_parse_grams_to_cups() {
        let registry = Registry::builtin().unwrap();
        let request = parse(&registry, "200-grams-flour-to-cups").unwrap();

        assert_eq!(request.amount(), 200.0);
        assert_eq!(request.source_unit(), Unit::Grams);
        assert_eq!(request.target_unit(), Unit::Cups);
        assert_eq!(request.ingredient().key(), "flour");
        assert!((request.evaluate().output_amount - 1.6667).abs() < 1e-4);
        assert_eq!(request.result_display(), "1.67 cups");
        assert_eq!(request.title(), "200g Flour to Cups");
    }

    #[test]
    fn test_parse_cups_to_grams() {
        let registry = Registry::builtin().unwrap();
        let request = parse(&registry, "2-cups-sugar-to-grams").unwrap();

        assert_eq!(request.form(), QueryForm::CupsToGrams);
        assert_eq!(request.evaluate().output_amount, 400.0);
        assert_eq!(request.result_display(), "400g");
        assert_eq!(request.title(), "2 cups Sugar to Grams");
    }

    #[test]
    fn test_hyphenated_ingredient() {
        let registry = Registry::builtin().unwrap();
        let request = parse(&registry, "0.5-cups-peanut-butter-to-grams").unwrap();
        assert_eq!(request.ingredient().key(), "peanut-butter");
        assert_eq!(request.amount(), 0.5);
        assert_eq!(request.amount_display(), "0.5 cups");
        assert_eq!(request.converter_path(), "/cups-to-grams/peanut-butter");
    }

    #[test]
    fn test_rejections_are_uniform() {
        let registry = Registry::builtin().unwrap();
        for slug in [
            "abc-grams-flour-to-cups",
            "-5-grams-flour-to-cups",
            "0-grams-flour-to-cups",
            "200-grams-saffron-to-cups",
            "200-grams-flour-to-cups-extra",
            "200-ounces-flour-to-cups",
            "200-grams-Flour-to-cups",
            "",
        ] {
            let err = parse(&registry, slug).unwrap_err();
            assert!(matches!(err, SiteError::NotFound { ref path } if path == slug));
        }
    }

    #[test]
    fn test_slug_round_trip() {
        let registry = Registry::builtin().unwrap();
        let honey = registry.ingredient("honey").unwrap();
        let request = ConversionRequest::new(0.5, QueryForm::CupsToGrams, honey);

        assert_eq!(request.slug(), "0.5-cups-honey-to-grams");
        assert_eq!(parse(&registry, &request.slug()).unwrap(), request);
    }

    #[test]
    fn test_out_of_sample_amounts_parse() {
        let registry = Registry::builtin().unwrap();
        let request = parse(&registry, "137-grams-rice-to-cups").unwrap();
        assert_eq!(request.evaluate().output_amount, 137.0 / 185.0);

        let trailing_zero = parse(&registry, "1.50-cups-milk-to-grams").unwrap();
        assert_eq!(trailing_zero.slug(), "1.5-cups-milk-to-grams");
    }

    #[test]
    fn test_amount_that_overflows_the_result_is_rejected() {
        let registry = Registry::builtin().unwrap();

        let huge_cups = format!("1{}-cups-honey-to-grams", "0".repeat(307));
        let err = parse(&registry, &huge_cups).unwrap_err();
        assert!(err.is_not_found());

        // 公克換杯是除法，同樣的數量仍是有限值
        let huge_grams = format!("1{}-grams-honey-to-cups", "0".repeat(307));
        let request = parse(&registry, &huge_grams).unwrap();
        assert!(request.evaluate().output_amount.is_finite());
    }
}

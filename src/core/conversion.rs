//! Conversion arithmetic.
//!
//! Everything here is a pure function of its inputs: amounts are assumed to
//! be finite and non-negative (the parser and the enumerator only produce
//! such values), and an [`Ingredient`] always carries a positive density, so
//! there is no error path.

use crate::domain::model::{ConversionResult, Ingredient};
use crate::domain::units::{ConverterKind, PureUnitPair};

/// Milliliters in one US cup.
pub const CUP_ML: f64 = 236.5882365;
/// Grams in one avoirdupois ounce.
pub const OUNCE_GRAMS: f64 = 28.349523125;
/// Milliliters in one US tablespoon (a sixteenth of a cup).
pub const TBSP_ML: f64 = 14.78676478125;
/// Milliliters in one US teaspoon.
pub const TSP_ML: f64 = 4.92892159375;
pub const TBSP_PER_CUP: f64 = 16.0;

/// 杯 -> 公克
pub fn volume_to_mass(cups: f64, ingredient: &Ingredient) -> f64 {
    cups * ingredient.density()
}

/// 公克 -> 杯
pub fn mass_to_volume(grams: f64, ingredient: &Ingredient) -> f64 {
    grams / ingredient.density()
}

/// 湯匙 -> 公克
pub fn small_volume_to_mass(tablespoons: f64, ingredient: &Ingredient) -> f64 {
    (tablespoons / TBSP_PER_CUP) * ingredient.density()
}

pub fn cups_to_ml(cups: f64) -> f64 {
    cups * CUP_ML
}

pub fn ml_to_cups(ml: f64) -> f64 {
    ml / CUP_ML
}

pub fn oz_to_grams(ounces: f64) -> f64 {
    ounces * OUNCE_GRAMS
}

pub fn grams_to_oz(grams: f64) -> f64 {
    grams / OUNCE_GRAMS
}

pub fn tbsp_to_ml(tablespoons: f64) -> f64 {
    tablespoons * TBSP_ML
}

pub fn tsp_to_ml(teaspoons: f64) -> f64 {
    teaspoons * TSP_ML
}

impl ConverterKind {
    pub fn apply(self, amount: f64, ingredient: &Ingredient) -> f64 {
        match self {
            ConverterKind::CupsToGrams => volume_to_mass(amount, ingredient),
            ConverterKind::GramsToCups => mass_to_volume(amount, ingredient),
            ConverterKind::TbspToGrams => small_volume_to_mass(amount, ingredient),
        }
    }

    pub fn convert(self, amount: f64, ingredient: &Ingredient) -> ConversionResult {
        ConversionResult {
            input_amount: amount,
            input_unit: self.source_unit(),
            output_amount: self.apply(amount, ingredient),
            output_unit: self.target_unit(),
            ingredient: Some(ingredient.key().to_string()),
        }
    }
}

impl PureUnitPair {
    pub fn apply(self, amount: f64) -> f64 {
        match self {
            PureUnitPair::CupsToMl => cups_to_ml(amount),
            PureUnitPair::MlToCups => ml_to_cups(amount),
            PureUnitPair::OzToGrams => oz_to_grams(amount),
            PureUnitPair::GramsToOz => grams_to_oz(amount),
            PureUnitPair::TbspToMl => tbsp_to_ml(amount),
            PureUnitPair::TspToMl => tsp_to_ml(amount),
        }
    }

    pub fn convert(self, amount: f64) -> ConversionResult {
        ConversionResult {
            input_amount: amount,
            input_unit: self.source_unit(),
            output_amount: self.apply(amount),
            output_unit: self.target_unit(),
            ingredient: None,
        }
    }
}

/// Rounds half away from zero to `decimals` places and drops trailing zeros.
///
/// ```
/// use cookconvert::core::conversion::format_amount;
///
/// assert_eq!(format_amount(1.666_666, 2), "1.67");
/// assert_eq!(format_amount(2.5, 2), "2.5");
/// assert_eq!(format_amount(340.0, 2), "340");
/// assert_eq!(format_amount(240.4, 0), "240");
/// ```
pub fn format_amount(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let mut rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        // 避免輸出 "-0"
        rounded = 0.0;
    }

    let text = format!("{:.*}", decimals, rounded);
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

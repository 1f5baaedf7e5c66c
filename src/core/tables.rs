//! Printable conversion charts shown on converter and profile pages.

use crate::core::conversion::format_amount;
use crate::domain::model::{Ingredient, TableRow};
use crate::domain::units::{ConverterKind, PureUnitPair};

const TABLE_DECIMALS: usize = 2;

/// `count` evenly spaced amounts starting at `step`. Amounts are computed by
/// multiplication, not accumulation, so 0.25 * 8 is exactly 2.
fn amounts(step: f64, count: usize) -> impl Iterator<Item = f64> {
    (1..=count).map(move |i| i as f64 * step)
}

fn row(input: f64, output: f64) -> TableRow {
    TableRow {
        input: format_amount(input, TABLE_DECIMALS),
        output: format_amount(output, TABLE_DECIMALS),
    }
}

/// (step, rows) for each ingredient converter.
fn converter_range(kind: ConverterKind) -> (f64, usize) {
    match kind {
        ConverterKind::CupsToGrams => (0.25, 8),
        ConverterKind::GramsToCups => (50.0, 10),
        ConverterKind::TbspToGrams => (1.0, 16),
    }
}

fn pure_range(pair: PureUnitPair) -> (f64, usize) {
    match pair {
        PureUnitPair::CupsToMl => (0.5, 10),
        PureUnitPair::MlToCups => (50.0, 10),
        PureUnitPair::OzToGrams => (2.0, 10),
        PureUnitPair::GramsToOz => (50.0, 10),
        PureUnitPair::TbspToMl | PureUnitPair::TspToMl => (1.0, 10),
    }
}

pub fn converter_table(kind: ConverterKind, ingredient: &Ingredient) -> Vec<TableRow> {
    let (step, count) = converter_range(kind);
    amounts(step, count)
        .map(|amount| row(amount, kind.apply(amount, ingredient)))
        .collect()
}

pub fn pure_table(pair: PureUnitPair) -> Vec<TableRow> {
    let (step, count) = pure_range(pair);
    amounts(step, count)
        .map(|amount| row(amount, pair.apply(amount)))
        .collect()
}

/// 食材頁：0.25 到 2 杯對應的公克數
pub fn profile_table(ingredient: &Ingredient) -> Vec<TableRow> {
    converter_table(ConverterKind::CupsToGrams, ingredient)
}

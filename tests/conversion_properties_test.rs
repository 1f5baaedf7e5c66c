use cookconvert::core::conversion::{format_amount, CUP_ML, TBSP_PER_CUP};
use cookconvert::domain::units::{ConverterKind, PureUnitPair};
use cookconvert::Registry;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_cups_and_grams_are_inverse_for_every_ingredient() {
    let registry = Registry::builtin().unwrap();

    for ingredient in registry.ingredients() {
        for cups in [0.25, 1.0, 3.5] {
            let grams = ConverterKind::CupsToGrams.apply(cups, ingredient);
            let back = ConverterKind::GramsToCups.apply(grams, ingredient);
            assert!(close(back, cups), "{}: {} != {}", ingredient.key(), back, cups);
        }
    }
}

#[test]
fn test_tablespoon_is_a_sixteenth_of_a_cup() {
    let registry = Registry::builtin().unwrap();

    for ingredient in registry.ingredients() {
        let per_tbsp = ConverterKind::TbspToGrams.apply(1.0, ingredient);
        let per_cup = ConverterKind::CupsToGrams.apply(1.0, ingredient);
        assert!(close(per_tbsp * TBSP_PER_CUP, per_cup));
    }
}

#[test]
fn test_pure_pairs_invert_each_other() {
    let pairs = [
        (PureUnitPair::CupsToMl, PureUnitPair::MlToCups),
        (PureUnitPair::OzToGrams, PureUnitPair::GramsToOz),
    ];
    for (forward, backward) in pairs {
        for amount in [0.5, 1.0, 12.0, 250.0] {
            assert!(close(backward.apply(forward.apply(amount)), amount));
        }
    }

    assert!(close(PureUnitPair::CupsToMl.apply(1.0), CUP_ML));
    assert!(close(PureUnitPair::TbspToMl.apply(16.0), CUP_ML));
    assert!(close(PureUnitPair::TspToMl.apply(3.0), PureUnitPair::TbspToMl.apply(1.0)));
}

#[test]
fn test_conversions_scale_linearly() {
    let registry = Registry::builtin().unwrap();
    let butter = registry.ingredient("butter").unwrap();

    for kind in ConverterKind::ALL {
        let one = kind.apply(1.0, butter);
        assert!(close(kind.apply(7.0, butter), one * 7.0));
    }
    for pair in PureUnitPair::ALL {
        assert!(close(pair.apply(0.0), 0.0));
        assert!(close(pair.apply(4.0), pair.apply(1.0) * 4.0));
    }
}

#[test]
fn test_convert_reports_units_and_ingredient() {
    let registry = Registry::builtin().unwrap();
    let sugar = registry.ingredient("sugar").unwrap();

    let result = ConverterKind::GramsToCups.convert(100.0, sugar);
    assert_eq!(result.input_unit, ConverterKind::GramsToCups.source_unit());
    assert_eq!(result.output_unit, ConverterKind::GramsToCups.target_unit());
    assert_eq!(result.ingredient.as_deref(), Some("sugar"));
    assert!(close(result.output_amount, 0.5));

    assert!(PureUnitPair::MlToCups.convert(100.0).ingredient.is_none());
}

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(0.125, 2), "0.13");
    assert_eq!(format_amount(2.0, 2), "2");
    assert_eq!(format_amount(2.10, 2), "2.1");
    assert_eq!(format_amount(-0.001, 2), "0");
    assert_eq!(format_amount(1234.0, 0), "1234");
    assert_eq!(format_amount(1000.0, 2), "1000");
    assert_eq!(format_amount(59.147, 1), "59.1");
}

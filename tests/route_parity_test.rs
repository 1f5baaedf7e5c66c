use cookconvert::core::path::canonical_path;
use cookconvert::core::routes::{enumerate, resolve};
use cookconvert::domain::model::RouteFamily;
use cookconvert::Registry;

#[test]
fn test_every_enumerated_path_resolves_to_itself() {
    let registry = Registry::builtin().unwrap();
    let routes = enumerate(&registry).unwrap();

    for record in routes.records() {
        let resolved = resolve(&registry, &record.path)
            .unwrap_or_else(|e| panic!("{} did not resolve: {}", record.path, e));
        assert_eq!(resolved.record(), *record);

        // 帶尾斜線與查詢字串的網址也要對到同一頁
        let served = format!("{}?utm_source=test#top", canonical_path(&record.path));
        assert_eq!(resolve(&registry, &served).unwrap().path(), record.path);
    }
}

#[test]
fn test_family_counts() {
    let registry = Registry::builtin().unwrap();
    let routes = enumerate(&registry).unwrap();
    let counts = routes.count_by_family();

    assert_eq!(counts[RouteFamily::Static.as_str()], 13);
    assert_eq!(counts[RouteFamily::ConverterIndex.as_str()], 3);
    assert_eq!(counts[RouteFamily::IngredientConverter.as_str()], 60);
    assert_eq!(counts[RouteFamily::PureConverter.as_str()], 6);
    assert_eq!(counts[RouteFamily::IngredientProfile.as_str()], 20);
    assert_eq!(counts[RouteFamily::Query.as_str()], 180);
    assert_eq!(routes.len(), 282);
}

#[test]
fn test_paths_are_unique_and_normalized() {
    let registry = Registry::builtin().unwrap();
    let routes = enumerate(&registry).unwrap();

    let mut seen = std::collections::HashSet::new();
    for path in routes.paths() {
        assert!(seen.insert(path.to_string()), "duplicate {}", path);
        assert!(path.starts_with('/'));
        assert!(path == "/" || !path.ends_with('/'));
    }
}

#[test]
fn test_unknown_paths_are_not_found() {
    let registry = Registry::builtin().unwrap();

    for path in [
        "/cups-to-grams/unobtainium",
        "/grams-to-cups/flour/extra",
        "/ingredients/unobtainium",
        "/q/two-cups-flour-to-grams",
        "/q/2-cups-unobtainium-to-grams",
        "/liters-to-gallons",
        "/guides/not-a-guide",
    ] {
        let err = resolve(&registry, path).unwrap_err();
        assert!(err.is_not_found(), "{} should be not found", path);
    }
}

#[test]
fn test_records_carry_params() {
    let registry = Registry::builtin().unwrap();

    let converter = resolve(&registry, "/tbsp-to-grams/butter").unwrap().record();
    assert_eq!(converter.family, RouteFamily::IngredientConverter);
    assert_eq!(converter.params["converter"], "tbsp-to-grams");
    assert_eq!(converter.params["ingredient"], "butter");

    let home = resolve(&registry, "/").unwrap().record();
    assert_eq!(home.family, RouteFamily::Static);
    assert!(home.params.is_empty());
    assert_eq!(home.priority, 1.0);
}

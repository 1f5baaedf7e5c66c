use cookconvert::core::related::{related_links, related_links_for, MAX_RELATED_LINKS};
use cookconvert::core::routes::{enumerate, resolve};
use cookconvert::Registry;
use std::collections::HashSet;

fn paths_for(registry: &Registry, path: &str) -> Vec<String> {
    let route = resolve(registry, path).unwrap();
    related_links(registry, &route)
        .into_iter()
        .map(|link| link.path)
        .collect()
}

#[test]
fn test_ingredient_converter_selection_order() {
    let registry = Registry::builtin().unwrap();

    assert_eq!(
        paths_for(&registry, "/cups-to-grams/flour"),
        vec![
            "/grams-to-cups/flour",
            "/tbsp-to-grams/flour",
            "/cups-to-grams/sugar",
            "/cups-to-grams/butter",
            "/cups-to-grams/milk",
            "/cups-to-grams/water",
            "/cups-to-grams/honey",
            "/cups-to-grams/olive-oil",
        ]
    );
}

#[test]
fn test_less_popular_ingredient_links_to_popular_ones() {
    let registry = Registry::builtin().unwrap();
    let links = paths_for(&registry, "/grams-to-cups/jam");

    assert_eq!(links.len(), MAX_RELATED_LINKS);
    assert_eq!(links[0], "/cups-to-grams/jam");
    assert_eq!(links[1], "/tbsp-to-grams/jam");
    assert_eq!(links[2], "/grams-to-cups/flour");
}

#[test]
fn test_query_page_reuses_converter_selection() {
    let registry = Registry::builtin().unwrap();

    let from_query = paths_for(&registry, "/q/200-grams-flour-to-cups");
    let from_converter = paths_for(&registry, "/grams-to-cups/flour");
    assert_eq!(from_query, from_converter);
}

#[test]
fn test_pure_and_profile_links() {
    let registry = Registry::builtin().unwrap();

    let pure = paths_for(&registry, "/cups-to-ml");
    assert_eq!(pure.len(), 5);
    assert!(!pure.contains(&"/cups-to-ml".to_string()));

    let profile = paths_for(&registry, "/ingredients/honey");
    assert_eq!(
        profile,
        vec!["/cups-to-grams/honey", "/grams-to-cups/honey", "/tbsp-to-grams/honey"]
    );

    assert!(paths_for(&registry, "/about").is_empty());
    assert!(paths_for(&registry, "/cups-to-grams").is_empty());
}

#[test]
fn test_links_never_point_to_self_repeat_or_leave_the_site() {
    let registry = Registry::builtin().unwrap();
    let routes = enumerate(&registry).unwrap();

    for route in routes.tuples() {
        let links = related_links(&registry, route);
        assert!(links.len() <= MAX_RELATED_LINKS);

        let mut seen = HashSet::new();
        for link in &links {
            assert_ne!(link.path, route.path());
            assert!(seen.insert(link.path.clone()), "repeated link on {}", route.path());
            assert!(routes.contains(&link.path), "{} links to unknown {}", route.path(), link.path);
        }
    }
}

#[test]
fn test_current_path_is_normalized_before_exclusion() {
    let registry = Registry::builtin().unwrap();
    let flour = registry.ingredient("flour").unwrap();

    let links = related_links_for(&registry, "/grams-to-cups/flour/", Some(flour));
    assert!(links.iter().all(|link| link.path != "/grams-to-cups/flour"));
    assert_eq!(links[0].title, "Flour Cups to Grams");
}

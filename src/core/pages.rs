//! Per-page computed data handed to the presentation layer.

use crate::core::path::canonical_path;
use crate::core::related::related_links;
use crate::core::registry::Registry;
use crate::core::routes::{RouteSet, RouteTuple, STATIC_PAGES};
use crate::core::tables::{converter_table, profile_table, pure_table};
use crate::domain::model::{PageRecord, RelatedLink};
use crate::domain::units::ConverterKind;

/// Ingredients listed under each converter on the tools page.
const TOOLS_INGREDIENTS_PER_CONVERTER: usize = 5;

/// Builds the page record for one enumerated route.
pub fn build_page(registry: &Registry, routes: &RouteSet<'_>, route: &RouteTuple<'_>) -> PageRecord {
    let path = route.path();

    let mut page = PageRecord {
        canonical_path: canonical_path(&path),
        family: route.family(),
        title: route.title(),
        params: route.params(),
        ingredient: route.ingredient().cloned(),
        result: None,
        result_display: None,
        table: Vec::new(),
        quick_values: Vec::new(),
        links: listing_links(registry, routes, route),
        related: related_links(registry, route),
        path,
    };

    match *route {
        RouteTuple::IngredientConverter(kind, ingredient) => {
            page.table = converter_table(kind, ingredient);
            page.quick_values = kind.quick_values().to_vec();
        }
        RouteTuple::PureConverter(pair) => {
            page.table = pure_table(pair);
        }
        RouteTuple::IngredientProfile(ingredient) => {
            page.table = profile_table(ingredient);
        }
        RouteTuple::Query(request) => {
            page.result = Some(request.evaluate());
            page.result_display = Some(request.result_display());
        }
        RouteTuple::Static(_) | RouteTuple::ConverterIndex(_) => {}
    }

    page
}

/// 只保留實際存在於路由集合中的連結
fn push_link(routes: &RouteSet<'_>, links: &mut Vec<RelatedLink>, path: String, title: Option<String>) {
    match routes.get(&path) {
        Some(target) => links.push(RelatedLink {
            title: title.unwrap_or_else(|| target.title()),
            path,
        }),
        None => tracing::warn!("⚠️ Listing link to unknown route skipped: {}", path),
    }
}

fn listing_links(registry: &Registry, routes: &RouteSet<'_>, route: &RouteTuple<'_>) -> Vec<RelatedLink> {
    let mut links = Vec::new();

    match *route {
        RouteTuple::Static(page) => match page.path {
            "/" => {
                for kind in registry.converter_kinds() {
                    push_link(routes, &mut links, format!("/{}", kind.slug()), None);
                }
                for pair in registry.pure_pairs() {
                    push_link(routes, &mut links, format!("/{}", pair.slug()), None);
                }
            }
            "/tools" => {
                for kind in registry.converter_kinds() {
                    push_link(routes, &mut links, format!("/{}", kind.slug()), None);
                    for ingredient in registry.ingredients().iter().take(TOOLS_INGREDIENTS_PER_CONVERTER) {
                        push_link(
                            routes,
                            &mut links,
                            format!("/{}/{}", kind.slug(), ingredient.key()),
                            Some(ingredient.name().to_string()),
                        );
                    }
                }
                for pair in registry.pure_pairs() {
                    push_link(routes, &mut links, format!("/{}", pair.slug()), None);
                }
            }
            "/ingredients" => {
                for ingredient in registry.ingredients() {
                    push_link(
                        routes,
                        &mut links,
                        format!("/ingredients/{}", ingredient.key()),
                        Some(ingredient.name().to_string()),
                    );
                }
            }
            "/guides" => {
                for guide in STATIC_PAGES.iter().filter(|page| page.is_guide_article()) {
                    push_link(routes, &mut links, guide.path.to_string(), None);
                }
            }
            _ => {}
        },
        RouteTuple::ConverterIndex(kind) => {
            for ingredient in registry.ingredients() {
                push_link(
                    routes,
                    &mut links,
                    format!("/{}/{}", kind.slug(), ingredient.key()),
                    Some(ingredient.name().to_string()),
                );
            }
        }
        RouteTuple::IngredientConverter(_, ingredient) => {
            push_link(routes, &mut links, format!("/ingredients/{}", ingredient.key()), None);
        }
        RouteTuple::Query(request) => {
            push_link(routes, &mut links, request.converter_path(), None);
            push_link(
                routes,
                &mut links,
                format!("/ingredients/{}", request.ingredient().key()),
                None,
            );
        }
        RouteTuple::IngredientProfile(ingredient) => {
            for kind in ConverterKind::ALL {
                push_link(routes, &mut links, format!("/{}/{}", kind.slug(), ingredient.key()), None);
            }
        }
        RouteTuple::PureConverter(_) => {}
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routes::{enumerate, resolve};
    use crate::domain::model::RouteFamily;
    use crate::domain::units::Unit;

    #[test]
    fn test_query_page() {
        let registry = Registry::builtin().unwrap();
        let routes = enumerate(&registry).unwrap();
        let route = resolve(&registry, "/q/200-grams-flour-to-cups").unwrap();
        let page = build_page(&registry, &routes, &route);

        assert_eq!(page.path, "/q/200-grams-flour-to-cups");
        assert_eq!(page.canonical_path, "/q/200-grams-flour-to-cups/");
        assert_eq!(page.family, RouteFamily::Query);
        assert_eq!(page.title, "200g Flour to Cups");
        assert_eq!(page.result_display.as_deref(), Some("1.67 cups"));

        let result = page.result.unwrap();
        assert_eq!(result.input_unit, Unit::Grams);
        assert_eq!(result.output_unit, Unit::Cups);
        assert_eq!(page.links[0].path, "/grams-to-cups/flour");
        assert_eq!(page.links[1].path, "/ingredients/flour");
        assert!(page.table.is_empty());
    }

    #[test]
    fn test_converter_page() {
        let registry = Registry::builtin().unwrap();
        let routes = enumerate(&registry).unwrap();
        let route = resolve(&registry, "/tbsp-to-grams/butter").unwrap();
        let page = build_page(&registry, &routes, &route);

        assert_eq!(page.table.len(), 16);
        assert_eq!(page.quick_values, vec![1.0, 2.0, 4.0, 8.0, 16.0]);
        assert_eq!(page.ingredient.as_ref().map(|i| i.key()), Some("butter"));
        assert_eq!(page.related.len(), 8);
        assert!(page.result.is_none());
    }

    #[test]
    fn test_listing_pages() {
        let registry = Registry::builtin().unwrap();
        let routes = enumerate(&registry).unwrap();

        let home = build_page(&registry, &routes, &resolve(&registry, "/").unwrap());
        assert_eq!(home.links.len(), 3 + 6);

        let tools = build_page(&registry, &routes, &resolve(&registry, "/tools").unwrap());
        assert_eq!(tools.links.len(), 3 * 6 + 6);
        assert_eq!(tools.links[0].path, "/cups-to-grams");
        assert_eq!(tools.links[1].title, "Flour");

        let hub = build_page(&registry, &routes, &resolve(&registry, "/grams-to-cups").unwrap());
        assert_eq!(hub.links.len(), registry.len());

        let guides = build_page(&registry, &routes, &resolve(&registry, "/guides").unwrap());
        assert_eq!(guides.links.len(), 5);

        let index = build_page(&registry, &routes, &resolve(&registry, "/ingredients").unwrap());
        assert_eq!(index.links.len(), registry.len());
    }

    #[test]
    fn test_all_links_are_routes() {
        let registry = Registry::builtin().unwrap();
        let routes = enumerate(&registry).unwrap();

        for route in routes.tuples() {
            let page = build_page(&registry, &routes, route);
            for link in page.links.iter().chain(page.related.iter()) {
                assert!(routes.contains(&link.path), "{} links to {}", page.path, link.path);
            }
        }
    }
}

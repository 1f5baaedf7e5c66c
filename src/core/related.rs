use crate::core::path::normalize_path;
use crate::core::registry::Registry;
use crate::core::routes::RouteTuple;
use crate::domain::model::{Ingredient, RelatedLink};
use crate::domain::units::{slug_to_title, ConverterKind};
use std::collections::HashSet;

pub const MAX_RELATED_LINKS: usize = 8;
/// Links to the same ingredient under other converters come first, at most this many.
const SAME_INGREDIENT_LINKS: usize = 2;

/// 收集連結，略過目前頁面與重複路徑
struct LinkCollector {
    current: String,
    seen: HashSet<String>,
    links: Vec<RelatedLink>,
}

impl LinkCollector {
    fn new(current_path: &str) -> Self {
        Self {
            current: normalize_path(current_path),
            seen: HashSet::new(),
            links: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.links.len()
    }

    fn is_full(&self) -> bool {
        self.links.len() >= MAX_RELATED_LINKS
    }

    fn push(&mut self, title: String, path: String) {
        if self.is_full() || path == self.current || !self.seen.insert(path.clone()) {
            return;
        }
        self.links.push(RelatedLink { title, path });
    }

    fn finish(self) -> Vec<RelatedLink> {
        self.links
    }
}

fn converter_link(kind: ConverterKind, ingredient: &Ingredient) -> (String, String) {
    (
        format!("{} {}", ingredient.name(), slug_to_title(kind.slug())),
        format!("/{}/{}", kind.slug(), ingredient.key()),
    )
}

/// Related pages for a page already resolved to a tuple.
///
/// Query pages borrow the selection of the converter page they sample;
/// profiles link every converter for their ingredient; static and hub pages
/// have none.
pub fn related_links(registry: &Registry, route: &RouteTuple<'_>) -> Vec<RelatedLink> {
    match *route {
        RouteTuple::IngredientConverter(_, ingredient) => {
            related_links_for(registry, &route.path(), Some(ingredient))
        }
        RouteTuple::Query(request) => {
            related_links_for(registry, &request.converter_path(), Some(request.ingredient()))
        }
        RouteTuple::PureConverter(_) => related_links_for(registry, &route.path(), None),
        RouteTuple::IngredientProfile(ingredient) => {
            let mut collector = LinkCollector::new(&route.path());
            for kind in registry.converter_kinds() {
                let (title, path) = converter_link(*kind, ingredient);
                collector.push(title, path);
            }
            collector.finish()
        }
        RouteTuple::Static(_) | RouteTuple::ConverterIndex(_) => Vec::new(),
    }
}

/// Selects up to eight related links for `current_path`.
///
/// With an ingredient: the same ingredient under other converters (at most
/// two), then the current converter for popular ingredients, then for the
/// rest of the registry in order. Without one: the other pure converters.
pub fn related_links_for(
    registry: &Registry,
    current_path: &str,
    ingredient: Option<&Ingredient>,
) -> Vec<RelatedLink> {
    let mut collector = LinkCollector::new(current_path);

    let Some(ingredient) = ingredient else {
        for pair in registry.pure_pairs() {
            collector.push(slug_to_title(pair.slug()), format!("/{}", pair.slug()));
        }
        return collector.finish();
    };

    for kind in registry.converter_kinds() {
        if collector.len() >= SAME_INGREDIENT_LINKS {
            break;
        }
        let (title, path) = converter_link(*kind, ingredient);
        collector.push(title, path);
    }

    let current_kind = collector
        .current
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(ConverterKind::from_slug);

    if let Some(kind) = current_kind {
        let others = registry
            .popular()
            .chain(
                registry
                    .ingredients()
                    .iter()
                    .filter(|other| !registry.is_popular(other.key())),
            )
            .filter(|other| other.key() != ingredient.key());

        for other in others {
            if collector.is_full() {
                break;
            }
            let (title, path) = converter_link(kind, other);
            collector.push(title, path);
        }
    }

    collector.finish()
}

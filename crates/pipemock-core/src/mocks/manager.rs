//! Mocks manager for storing routes and collections.
//!
//! `MocksManager` resolves collections (with `from` inheritance) and single
//! route references into [`ActiveRoute`]s. `MocksController` uses it as the
//! source of truth when the active scenario changes.

use crate::types::collection::Collection;
use crate::types::preset::Preset;
use crate::types::route::{Route, RouteReference};
use crate::types::variant::Variant;
use std::collections::{HashMap, HashSet};

/// Route with its selected preset and variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRoute {
    /// Base route definition
    pub route: Route,
    /// Selected preset from the route
    pub preset: Preset,
    /// Selected variant from the preset
    pub variant: Variant,
}

impl ActiveRoute {
    /// Reference string this route was activated with.
    pub fn reference(&self) -> RouteReference {
        RouteReference {
            route_id: self.route.id.clone(),
            preset_id: self.preset.id.clone(),
            variant_id: self.variant.id.clone(),
        }
    }
}

/// Errors that can occur while resolving collections and route references
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Collection not found: {collection_id}")]
    CollectionNotFound { collection_id: String },
    #[error("Route not found: {route_id}")]
    RouteNotFound { route_id: String },
    #[error("Preset '{preset_id}' not found in route '{route_id}'")]
    PresetNotFound { route_id: String, preset_id: String },
    #[error("Variant '{variant_id}' not found in preset '{preset_id}' of route '{route_id}'")]
    VariantNotFound {
        route_id: String,
        preset_id: String,
        variant_id: String,
    },
    #[error("Invalid route reference format: {reference}")]
    InvalidRouteReference { reference: String },
    #[error("Circular dependency detected involving collection: {collection_id}")]
    CircularDependency { collection_id: String },
}

/// Store of routes and collections.
#[derive(Debug, Clone, Default)]
pub struct MocksManager {
    collections: HashMap<String, Collection>,
    routes: HashMap<String, Route>,
}

impl MocksManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection, replacing any collection with the same ID
    pub fn add_collection(&mut self, collection: Collection) {
        self.collections.insert(collection.id.clone(), collection);
    }

    pub fn add_collections(&mut self, collections: impl IntoIterator<Item = Collection>) {
        for collection in collections {
            self.add_collection(collection);
        }
    }

    /// Add a route, replacing any route with the same ID
    pub fn add_route(&mut self, route: Route) {
        self.routes.insert(route.id.clone(), route);
    }

    pub fn add_routes(&mut self, routes: impl IntoIterator<Item = Route>) {
        for route in routes {
            self.add_route(route);
        }
    }

    pub fn route(&self, route_id: &str) -> Option<&Route> {
        self.routes.get(route_id)
    }

    /// Resolve a collection by ID, returning its active routes in order.
    ///
    /// Parent routes come first. A child route with the same route ID as a
    /// parent route replaces it in the parent's position.
    pub fn resolve_collection(&self, collection_id: &str) -> Result<Vec<ActiveRoute>, ResolveError> {
        let mut visiting = HashSet::new();
        let mut resolved = Vec::new();
        self.resolve_collection_into(collection_id, &mut visiting, &mut resolved)?;
        Ok(resolved)
    }

    fn resolve_collection_into(
        &self,
        collection_id: &str,
        visiting: &mut HashSet<String>,
        resolved: &mut Vec<ActiveRoute>,
    ) -> Result<(), ResolveError> {
        if !visiting.insert(collection_id.to_string()) {
            return Err(ResolveError::CircularDependency {
                collection_id: collection_id.to_string(),
            });
        }

        let collection =
            self.collections
                .get(collection_id)
                .ok_or_else(|| ResolveError::CollectionNotFound {
                    collection_id: collection_id.to_string(),
                })?;

        if let Some(parent_id) = &collection.from {
            self.resolve_collection_into(parent_id, visiting, resolved)?;
        }

        for reference in &collection.routes {
            let active_route = self.resolve_route_reference(reference)?;
            match resolved
                .iter_mut()
                .find(|existing| existing.route.id == active_route.route.id)
            {
                Some(existing) => *existing = active_route,
                None => resolved.push(active_route),
            }
        }

        visiting.remove(collection_id);
        Ok(())
    }

    /// Resolve a single `route_id:preset_id:variant_id` reference.
    pub fn resolve_route_reference(&self, reference: &str) -> Result<ActiveRoute, ResolveError> {
        let route_ref =
            RouteReference::parse(reference).ok_or_else(|| ResolveError::InvalidRouteReference {
                reference: reference.to_string(),
            })?;

        let route = self
            .routes
            .get(&route_ref.route_id)
            .ok_or_else(|| ResolveError::RouteNotFound {
                route_id: route_ref.route_id.clone(),
            })?;

        let preset = route
            .presets
            .iter()
            .find(|p| p.id == route_ref.preset_id)
            .ok_or_else(|| ResolveError::PresetNotFound {
                route_id: route_ref.route_id.clone(),
                preset_id: route_ref.preset_id.clone(),
            })?;

        let variant = preset
            .variants
            .iter()
            .find(|v| v.id == route_ref.variant_id)
            .ok_or_else(|| ResolveError::VariantNotFound {
                route_id: route_ref.route_id.clone(),
                preset_id: route_ref.preset_id.clone(),
                variant_id: route_ref.variant_id.clone(),
            })?;

        Ok(ActiveRoute {
            route: route.clone(),
            preset: preset.clone(),
            variant: variant.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::route::HttpMethod;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn route(id: &str, presets: &[(&str, &[&str])]) -> Route {
        Route {
            id: id.to_string(),
            url: format!("/api/{id}"),
            method: Some(HttpMethod::Get),
            presets: presets
                .iter()
                .map(|(preset_id, variants)| {
                    Preset::any(
                        *preset_id,
                        variants
                            .iter()
                            .map(|v| Variant::json(*v, json!({ "variant": v })))
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    #[fixture]
    fn manager() -> MocksManager {
        let mut manager = MocksManager::new();
        manager.add_routes([
            route("route1", &[("preset1", &["variant1"]), ("preset2", &["variant2"])]),
            route("route2", &[("preset2", &["variant2"])]),
            route("route3", &[("preset3", &["variant3"])]),
        ]);
        manager
    }

    fn ids(routes: &[ActiveRoute]) -> Vec<String> {
        routes.iter().map(|r| r.reference().to_string()).collect()
    }

    #[rstest]
    fn test_resolve_simple_collection(mut manager: MocksManager) {
        manager.add_collection(Collection::new("c", ["route1:preset1:variant1"]));
        let result = manager.resolve_collection("c").unwrap();
        assert_eq!(ids(&result), ["route1:preset1:variant1"]);
        assert_eq!(result[0].variant.body, Some(json!({"variant": "variant1"})));
    }

    #[rstest]
    fn test_resolve_collection_with_inheritance(mut manager: MocksManager) {
        manager.add_collections([
            Collection::new("parent", ["route1:preset1:variant1"]),
            Collection::new("child", ["route2:preset2:variant2"]).extending("parent"),
        ]);
        let result = manager.resolve_collection("child").unwrap();
        assert_eq!(ids(&result), ["route1:preset1:variant1", "route2:preset2:variant2"]);
    }

    #[rstest]
    fn test_resolve_collection_child_overrides_parent_in_place(mut manager: MocksManager) {
        manager.add_collections([
            Collection::new("parent", ["route1:preset1:variant1", "route2:preset2:variant2"]),
            Collection::new("child", ["route3:preset3:variant3", "route1:preset2:variant2"])
                .extending("parent"),
        ]);
        let result = manager.resolve_collection("child").unwrap();
        assert_eq!(
            ids(&result),
            [
                "route1:preset2:variant2",
                "route2:preset2:variant2",
                "route3:preset3:variant3"
            ]
        );
    }

    #[rstest]
    fn test_resolve_collection_multiple_levels(mut manager: MocksManager) {
        manager.add_collections([
            Collection::new("grandparent", ["route1:preset1:variant1"]),
            Collection::new("parent", ["route2:preset2:variant2"]).extending("grandparent"),
            Collection::new("child", ["route3:preset3:variant3"]).extending("parent"),
        ]);
        let result = manager.resolve_collection("child").unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[2].route.id, "route3");
    }

    #[rstest]
    fn test_resolve_collection_circular_dependency(mut manager: MocksManager) {
        manager.add_collections([
            Collection::new("A", Vec::<String>::new()).extending("B"),
            Collection::new("B", Vec::<String>::new()).extending("A"),
        ]);
        assert!(matches!(
            manager.resolve_collection("A"),
            Err(ResolveError::CircularDependency { .. })
        ));
    }

    #[rstest]
    #[case("missing-parent", ResolveError::CollectionNotFound { collection_id: "nowhere".to_string() })]
    #[case("bad-route", ResolveError::RouteNotFound { route_id: "nope".to_string() })]
    #[case("bad-preset", ResolveError::PresetNotFound { route_id: "route1".to_string(), preset_id: "nope".to_string() })]
    #[case("bad-variant", ResolveError::VariantNotFound { route_id: "route1".to_string(), preset_id: "preset1".to_string(), variant_id: "nope".to_string() })]
    #[case("bad-format", ResolveError::InvalidRouteReference { reference: "route1".to_string() })]
    #[case("unknown", ResolveError::CollectionNotFound { collection_id: "unknown".to_string() })]
    fn test_resolve_collection_errors(
        mut manager: MocksManager,
        #[case] collection_id: &str,
        #[case] expected: ResolveError,
    ) {
        manager.add_collections([
            Collection::new("missing-parent", Vec::<String>::new()).extending("nowhere"),
            Collection::new("bad-route", ["nope:preset1:variant1"]),
            Collection::new("bad-preset", ["route1:nope:variant1"]),
            Collection::new("bad-variant", ["route1:preset1:nope"]),
            Collection::new("bad-format", ["route1"]),
        ]);
        assert_eq!(manager.resolve_collection(collection_id), Err(expected));
    }

    #[rstest]
    fn test_resolve_route_reference(manager: MocksManager) {
        let active = manager.resolve_route_reference("route1:preset2:variant2").unwrap();
        assert_eq!(active.preset.id, "preset2");
        assert_eq!(active.reference().to_string(), "route1:preset2:variant2");
    }

    #[rstest]
    fn test_add_route_replaces_same_id(mut manager: MocksManager) {
        manager.add_route(route("route1", &[("only", &["one"])]));
        assert_eq!(manager.route("route1").unwrap().presets.len(), 1);
    }

    #[rstest]
    fn test_resolve_error_display() {
        let error = ResolveError::VariantNotFound {
            route_id: "route1".to_string(),
            preset_id: "preset1".to_string(),
            variant_id: "variant1".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("route1"));
        assert!(message.contains("preset1"));
        assert!(message.contains("variant1"));

        let error = ResolveError::CircularDependency {
            collection_id: "A".to_string(),
        };
        assert!(error.to_string().contains("Circular dependency"));
    }
}

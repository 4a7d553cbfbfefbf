//! Controller for managing active routes and switching between collections.
//!
//! `MocksController` keeps the resolved routes of the current scenario and
//! looks up the first one matching an incoming request.

use crate::matching::{
    headers_matches, parse_query_string, payload_matches, query_matches, url_matches,
};
use crate::mocks::manager::{ActiveRoute, MocksManager, ResolveError};
use crate::mocks::response::MockResponse;
use crate::types::route::HttpMethod;
use serde_json::Value;
use std::collections::HashMap;

/// HTTP request for route matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Request URL (path + query string)
    pub url: String,
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters (parsed from URL if `None`)
    pub query: Option<HashMap<String, String>>,
    /// Request body/payload
    pub payload: Option<Value>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            query: None,
            payload: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Explicit query parameters, or those parsed from the URL.
    pub fn query_params(&self) -> HashMap<String, String> {
        match &self.query {
            Some(query) => query.clone(),
            None => self
                .url
                .split_once('?')
                .map(|(_, query)| query.split('#').next().unwrap_or(""))
                .map(parse_query_string)
                .unwrap_or_default(),
        }
    }
}

/// Holds the active routes of the current scenario.
#[derive(Debug, Clone)]
pub struct MocksController {
    /// Source of routes and collections
    mocks_manager: MocksManager,
    /// Currently active collection ID
    active_collection_id: Option<String>,
    /// Resolved routes, in match priority order
    active_routes: Vec<ActiveRoute>,
}

impl MocksController {
    /// Create a controller without any active routes.
    pub fn new(mocks_manager: MocksManager) -> Self {
        Self {
            mocks_manager,
            active_collection_id: None,
            active_routes: Vec::new(),
        }
    }

    /// Mutable access for registering more routes and collections.
    /// Active routes are not re-resolved until the next `use_*` call.
    pub fn manager_mut(&mut self) -> &mut MocksManager {
        &mut self.mocks_manager
    }

    /// Activate a collection by ID, replacing all active routes.
    ///
    /// On error the previous active routes stay in place.
    pub fn use_collection(&mut self, collection_id: &str) -> Result<(), ResolveError> {
        let active_routes = self.mocks_manager.resolve_collection(collection_id)?;
        tracing::info!(
            collection = collection_id,
            routes = active_routes.len(),
            "activated collection"
        );
        self.active_collection_id = Some(collection_id.to_string());
        self.active_routes = active_routes;
        Ok(())
    }

    /// Apply specific routes without changing the entire collection.
    ///
    /// All references are resolved first; if any fails nothing changes.
    /// A new route replaces the active route with the same ID in place,
    /// other new routes are appended.
    pub fn use_routes<S: AsRef<str>>(&mut self, routes: &[S]) -> Result<(), ResolveError> {
        let new_routes = routes
            .iter()
            .map(|r| self.mocks_manager.resolve_route_reference(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        for active_route in new_routes {
            tracing::debug!(route = %active_route.reference(), "applying route");
            match self
                .active_routes
                .iter_mut()
                .find(|existing| existing.route.id == active_route.route.id)
            {
                Some(existing) => *existing = active_route,
                None => self.active_routes.push(active_route),
            }
        }
        Ok(())
    }

    /// Drop every active route. Registered routes and collections are kept.
    pub fn clear(&mut self) {
        tracing::debug!(cleared = self.active_routes.len(), "cleared active routes");
        self.active_collection_id = None;
        self.active_routes.clear();
    }

    /// Currently active routes, in match priority order.
    pub fn get_active_routes(&self) -> &[ActiveRoute] {
        &self.active_routes
    }

    /// Returns `None` if no collection is currently active.
    pub fn active_collection_id(&self) -> Option<&str> {
        self.active_collection_id.as_deref()
    }

    /// Find the first active route matching the request.
    pub fn find_route(&self, request: &Request) -> Option<&ActiveRoute> {
        let query = request.query_params();
        let found = self
            .active_routes
            .iter()
            .find(|active_route| route_matches_request(active_route, request, &query));

        match found {
            Some(active_route) => tracing::debug!(
                method = %request.method,
                url = %request.url,
                route = %active_route.reference(),
                "request matched"
            ),
            None => tracing::debug!(method = %request.method, url = %request.url, "no route matched"),
        }
        found
    }

    /// Canned response for the request, if any active route matches.
    pub fn respond(&self, request: &Request) -> Option<MockResponse> {
        self.find_route(request).map(MockResponse::from)
    }
}

/// Method, URL, path params, headers, query and payload must all match.
fn route_matches_request(
    active_route: &ActiveRoute,
    request: &Request,
    query: &HashMap<String, String>,
) -> bool {
    let route = &active_route.route;
    let preset = &active_route.preset;

    if route.method.is_some_and(|method| method != request.method) {
        return false;
    }

    let url_result = url_matches(&route.url, &request.url);
    if !url_result.matched {
        return false;
    }

    if let Some(expected_params) = &preset.params {
        let params_match = expected_params
            .iter()
            .all(|(key, value)| url_result.params.get(key) == Some(value));
        if !params_match {
            return false;
        }
    }

    headers_matches(preset.headers.as_ref(), &request.headers)
        && query_matches(preset.query.as_ref(), query)
        && payload_matches(preset.payload.as_ref(), request.payload.as_ref())
}

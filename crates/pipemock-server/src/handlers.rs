//! Replay and admin handlers.

use crate::error::ApiError;
use crate::AppState;
use axum::{
    body::{Body, Bytes},
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use pipemock_core::mocks::{MockResponse, MocksController, Request};
use pipemock_core::types::route::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One active route as reported by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRouteSummary {
    pub route: String,
    pub preset: String,
    pub variant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRoutes {
    pub collection: Option<String>,
    pub routes: Vec<ActiveRouteSummary>,
}

impl From<&MocksController> for ActiveRoutes {
    fn from(controller: &MocksController) -> Self {
        Self {
            collection: controller.active_collection_id().map(str::to_string),
            routes: controller
                .get_active_routes()
                .iter()
                .map(|active| ActiveRouteSummary {
                    route: active.route.id.clone(),
                    preset: active.preset.id.clone(),
                    variant: active.variant.id.clone(),
                    method: active.route.method,
                    url: active.route.url.clone(),
                })
                .collect(),
        }
    }
}

/// Replay the first active route matching the request.
pub async fn replay(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
        .to_string();

    let Ok(http_method) = method.as_str().parse::<HttpMethod>() else {
        return miss(StatusCode::METHOD_NOT_ALLOWED, "Unsupported HTTP method", method.as_str(), &url);
    };

    let request = to_request(http_method, url, &headers, &body);
    let found = state.controller.read().await.respond(&request);

    match found {
        Some(mock) => {
            if let Some(delay) = mock.delay {
                tokio::time::sleep(delay).await;
            }
            into_http_response(mock)
        }
        None => miss(StatusCode::NOT_FOUND, "No mock route matched", method.as_str(), &request.url),
    }
}

fn to_request(method: HttpMethod, url: String, headers: &HeaderMap, body: &Bytes) -> Request {
    let mut request = Request::new(method, url);
    request.headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    if !body.is_empty() {
        let payload = serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()));
        request.payload = Some(payload);
    }
    request
}

fn into_http_response(mock: MockResponse) -> Response {
    let status = StatusCode::from_u16(mock.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Body::from(mock.body_bytes())).into_response();

    let response_headers = response.headers_mut();
    for (name, value) in &mock.headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                response_headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, source = %mock.source, "skipping invalid response header"),
        }
    }
    response
}

fn miss(status: StatusCode, error: &str, method: &str, url: &str) -> Response {
    let body = Json(json!({ "error": error, "method": method, "url": url }));
    (status, body).into_response()
}

pub async fn list_routes(State(state): State<AppState>) -> Json<ActiveRoutes> {
    let controller = state.controller.read().await;
    Json(ActiveRoutes::from(&*controller))
}

pub async fn use_collection(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
) -> Result<Json<ActiveRoutes>, ApiError> {
    let mut controller = state.controller.write().await;
    controller
        .use_collection(&collection_id)
        .map_err(ApiError::not_found)?;
    Ok(Json(ActiveRoutes::from(&*controller)))
}

/// Merge `route:preset:variant` references into the active routes.
pub async fn use_routes(
    State(state): State<AppState>,
    references: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<Json<ActiveRoutes>, ApiError> {
    let Json(references) =
        references.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let mut controller = state.controller.write().await;
    controller
        .use_routes(references.as_slice())
        .map_err(ApiError::bad_request)?;
    Ok(Json(ActiveRoutes::from(&*controller)))
}

pub async fn clear_routes(State(state): State<AppState>) -> StatusCode {
    state.controller.write().await.clear();
    StatusCode::NO_CONTENT
}

pub async fn admin_method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {method} not allowed on {}", uri.path()),
    )
}

pub async fn admin_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("Unknown admin endpoint: {}", uri.path()))
}

//! Task pipeline scenario.
//!
//! Five canned exchanges against a fake `tasks` resource: read, save, remove
//! and two pages of a web-linked paged read. Every exchange succeeds with a
//! fixed JSON payload. The same scenario ships as YAML under `mocks/`.

use crate::mocks::{MocksController, MocksManager, ResolveError};
use crate::types::collection::Collection;
use crate::types::preset::{Preset, QueryOrExpression};
use crate::types::route::{HttpMethod, Route};
use crate::types::task::{EncodedTask, Task};
use crate::types::variant::Variant;
use chrono::NaiveDate;
use serde_json::json;

pub const COLLECTION_ID: &str = "tasks";

pub const READ_ROUTE: &str = "tasks-read";
pub const SAVE_ROUTE: &str = "tasks-save";
pub const REMOVE_ROUTE: &str = "tasks-remove";
pub const PAGE_MIDDLE_ROUTE: &str = "page-web-link-middle";
pub const PAGE_FIRST_ROUTE: &str = "page-web-link-first";

pub const PAGED_URL: &str = "pageTestWebLink";

/// Link header served for `offset=1&limit=2`.
pub const MIDDLE_PAGE_LINKS: &str = "<http://fakeLink.com?offset=2&limit=2>; rel=\"next\", <http://fakeLink.com?offset=0&limit=2>; rel=\"previous\"";
/// Link header served for any other paged read.
pub const FIRST_PAGE_LINKS: &str = "<http://fakeLink.com?offset=1&limit=2>; rel=\"next\"";

const DEFAULT_PRESET: &str = "default";
const SUCCESS_VARIANT: &str = "success";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// The two records returned by reads.
pub fn default_tasks() -> Vec<EncodedTask> {
    vec![
        EncodedTask::new(Task::new(12345, "Do Something", date(2012, 8, 1))),
        EncodedTask::new(Task::new(67890, "Do Something Else", date(2012, 8, 2))),
    ]
}

/// The record returned by saves.
pub fn updated_task() -> EncodedTask {
    EncodedTask::new(Task::new(11223, "Updated Task", date(2012, 8, 1)))
}

fn single_preset_route(id: &str, method: HttpMethod, url: &str, preset: Preset) -> Route {
    Route {
        id: id.to_string(),
        url: url.to_string(),
        method: Some(method),
        presets: vec![preset],
    }
}

fn success(body: serde_json::Value) -> Vec<Variant> {
    vec![Variant::json(SUCCESS_VARIANT, body)]
}

/// The five routes, in registration order.
pub fn tasks_routes() -> Vec<Route> {
    vec![
        single_preset_route(
            READ_ROUTE,
            HttpMethod::Get,
            "tasks",
            Preset::any(DEFAULT_PRESET, success(json!(default_tasks()))),
        ),
        single_preset_route(
            SAVE_ROUTE,
            HttpMethod::Put,
            "tasks/*",
            Preset::any(DEFAULT_PRESET, success(json!(updated_task()))),
        ),
        single_preset_route(
            REMOVE_ROUTE,
            HttpMethod::Delete,
            "tasks/123",
            Preset::any(DEFAULT_PRESET, success(json!([]))),
        ),
        single_preset_route(
            PAGE_MIDDLE_ROUTE,
            HttpMethod::Get,
            PAGED_URL,
            Preset::any(
                DEFAULT_PRESET,
                vec![Variant::json(SUCCESS_VARIANT, json!(default_tasks()))
                    .with_header("Link", MIDDLE_PAGE_LINKS)],
            )
            .with_query(QueryOrExpression::map([("offset", "1"), ("limit", "2")])),
        ),
        single_preset_route(
            PAGE_FIRST_ROUTE,
            HttpMethod::Get,
            PAGED_URL,
            Preset::any(
                DEFAULT_PRESET,
                vec![Variant::json(SUCCESS_VARIANT, json!(default_tasks()))
                    .with_header("Link", FIRST_PAGE_LINKS)],
            ),
        ),
    ]
}

/// Collection activating all five routes. The query-specific page comes
/// before the catch-all page so it wins for `offset=1&limit=2`.
pub fn tasks_collection() -> Collection {
    Collection::new(
        COLLECTION_ID,
        [
            READ_ROUTE,
            SAVE_ROUTE,
            REMOVE_ROUTE,
            PAGE_MIDDLE_ROUTE,
            PAGE_FIRST_ROUTE,
        ]
        .map(|route_id| format!("{route_id}:{DEFAULT_PRESET}:{SUCCESS_VARIANT}")),
    )
}

/// Register the scenario's routes and collection with a manager.
pub fn register(manager: &mut MocksManager) {
    manager.add_routes(tasks_routes());
    manager.add_collection(tasks_collection());
}

/// Controller with any previous mocks cleared and the scenario active.
pub fn controller() -> Result<MocksController, ResolveError> {
    let mut manager = MocksManager::new();
    register(&mut manager);
    let mut controller = MocksController::new(manager);
    controller.clear();
    controller.use_collection(COLLECTION_ID)?;
    Ok(controller)
}

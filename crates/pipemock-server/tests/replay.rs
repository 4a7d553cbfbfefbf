use pipemock_core::paging::{PageLinks, PageRequest};
use pipemock_core::types::task::Task;
use pipemock_server::{build_router, load_controller, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn start_server() -> String {
    let controller = load_controller(None, None, None).unwrap();
    let app = build_router(AppState::new(controller));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn link_header(response: &reqwest::Response) -> PageLinks {
    let value = response.headers()["link"].to_str().unwrap();
    PageLinks::from_link_header(value)
}

#[tokio::test]
async fn test_task_pipeline_over_http() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let tasks: Vec<Task> = client
        .get(format!("{base}/tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), [12345, 67890]);

    let saved: Task = client
        .put(format!("{base}/tasks/11223"))
        .json(&json!({"id": 11223, "title": "Updated Task", "date": "2012-08-01"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved.title, "Updated Task");

    let removed = client.delete(format!("{base}/tasks/123")).send().await.unwrap();
    assert_eq!(removed.status(), StatusCode::OK);
    assert_eq!(removed.json::<Value>().await.unwrap(), json!([]));

    let missing = client.delete(format!("{base}/tasks/456")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_paging_follows_links() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let first = client
        .get(format!("{base}/pageTestWebLink"))
        .send()
        .await
        .unwrap();
    let links = link_header(&first);
    assert!(links.previous.is_none());
    let next = PageRequest::from_uri(&links.next.unwrap().uri);
    assert_eq!(next, PageRequest { offset: Some(1), limit: Some(2) });

    let middle = client
        .get(format!("{base}/pageTestWebLink"))
        .query(&[("offset", next.offset.unwrap()), ("limit", next.limit.unwrap())])
        .send()
        .await
        .unwrap();
    let links = link_header(&middle);
    assert_eq!(
        PageRequest::from_uri(&links.next.unwrap().uri),
        PageRequest { offset: Some(2), limit: Some(2) }
    );
    assert_eq!(
        PageRequest::from_uri(&links.previous.unwrap().uri),
        PageRequest { offset: Some(0), limit: Some(2) }
    );
    assert_eq!(middle.json::<Vec<Task>>().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_admin_switches_scenario() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let cleared = client
        .delete(format!("{base}/__admin/routes"))
        .send()
        .await
        .unwrap();
    assert_eq!(cleared.status(), StatusCode::NO_CONTENT);
    let miss = client.get(format!("{base}/tasks")).send().await.unwrap();
    assert_eq!(miss.status(), StatusCode::NOT_FOUND);

    let restored = client
        .put(format!("{base}/__admin/collection/tasks"))
        .send()
        .await
        .unwrap();
    assert_eq!(restored.status(), StatusCode::OK);
    let body: Value = restored.json().await.unwrap();
    assert_eq!(body["collection"], "tasks");
    assert_eq!(body["routes"].as_array().unwrap().len(), 5);

    let hit = client.get(format!("{base}/tasks")).send().await.unwrap();
    assert_eq!(hit.status(), StatusCode::OK);
}

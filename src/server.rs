// src/server.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{convert::Infallible, net::SocketAddr, sync::Arc};
use tracing::info;
use warp::{reject::Rejection, reply::Reply, Filter};

use crate::callbacks::{Dispatcher, Inputs, OutputUpdate};
use crate::data::SalesTable;
use crate::layout::{self, Component};

const SERVICE_NAME: &str = "autosales-dashboard";

/// Everything the handlers read. Built once after the data load.
pub struct AppState {
    pub table: Arc<SalesTable>,
    pub dispatcher: Dispatcher,
    pub layout: Component,
    page: String,
}

impl AppState {
    pub fn new(table: Arc<SalesTable>) -> Self {
        let layout = layout::app_layout();
        let page = layout::render_page(&layout);
        Self {
            table,
            dispatcher: Dispatcher::new(),
            layout,
            page,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub changed: Vec<String>,
    #[serde(default)]
    pub inputs: Inputs,
}

#[derive(Serialize)]
struct UpdateResponse {
    outputs: Vec<Value>,
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

async fn health_check(state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "rows": state.table.len(),
    })))
}

async fn update_component(
    req: UpdateRequest,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    info!(changed = ?req.changed, inputs = ?req.inputs, "update");
    let outputs = state
        .dispatcher
        .dispatch(&state.table, &req.changed, &req.inputs)
        .iter()
        .map(OutputUpdate::to_wire)
        .collect();
    Ok(warp::reply::json(&UpdateResponse { outputs }))
}

pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|s: Arc<AppState>| warp::reply::html(s.page.clone()));

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(health_check);

    let layout = warp::path("_layout")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|s: Arc<AppState>| warp::reply::json(&s.layout));

    let dependencies = warp::path("_dependencies")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|s: Arc<AppState>| warp::reply::json(&s.dispatcher.dependencies()));

    let update = warp::path("_update")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(16 * 1024))
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(update_component);

    index.or(health).or(layout).or(dependencies).or(update)
}

/// Serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    info!("Dashboard running at http://{}", addr);
    info!("Health check: http://{}/health", addr);
    warp::serve(routes(state).with(warp::trace::request()))
        .run(addr)
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::tests::sample_table;
    use serde_json::json;
    use warp::http::StatusCode;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(Arc::new(sample_table())))
    }

    async fn post_update(body: Value) -> (StatusCode, Value) {
        let resp = warp::test::request()
            .method("POST")
            .path("/_update")
            .json(&body)
            .reply(&routes(state()))
            .await;
        let status = resp.status();
        let json = serde_json::from_slice(resp.body()).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_check() {
        let resp = warp::test::request()
            .path("/health")
            .reply(&routes(state()))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["rows"], 8);
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let resp = warp::test::request().path("/").reply(&routes(state())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8_lossy(resp.body());
        assert!(html.contains(layout::TITLE));
        assert!(html.contains("output-container"));
    }

    #[tokio::test]
    async fn layout_and_dependencies_are_json() {
        let st = state();
        let resp = warp::test::request().path("/_layout").reply(&routes(st.clone())).await;
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["type"], "Div");

        let resp = warp::test::request().path("/_dependencies").reply(&routes(st)).await;
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body.as_array().map(|a| a.len()), Some(2));
    }

    #[tokio::test]
    async fn yearly_without_year_empties_output() {
        let (status, body) = post_update(json!({
            "changed": ["dropdown-statistics"],
            "inputs": { "dropdown-statistics": "Yearly", "select-year": null }
        }))
        .await;
        assert_eq!(status, StatusCode::OK);

        let outputs = body["outputs"].as_array().cloned().unwrap_or_default();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0]["value"]["display"], "block");
        assert_eq!(outputs[1]["value"], json!([]));
    }

    #[tokio::test]
    async fn selecting_a_year_renders_four_figures() {
        let (_, body) = post_update(json!({
            "changed": ["select-year"],
            "inputs": { "dropdown-statistics": "Yearly", "select-year": "2000" }
        }))
        .await;

        let outputs = body["outputs"].as_array().cloned().unwrap_or_default();
        assert_eq!(outputs.len(), 1);
        let panels = outputs[0]["value"].as_array().cloned().unwrap_or_default();
        let figures: usize = panels
            .iter()
            .map(|p| p["figures"].as_array().map_or(0, |f| f.len()))
            .sum();
        assert_eq!(figures, 4);
        let bar_title = &panels[1]["figures"][0]["layout"]["title"]["text"];
        assert_eq!(bar_title, "Average Vehicles Sold by Vehicle Type in 2000");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let resp = warp::test::request()
            .method("POST")
            .path("/_update")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&routes(state()))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let resp = warp::test::request().path("/nope").reply(&routes(state())).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

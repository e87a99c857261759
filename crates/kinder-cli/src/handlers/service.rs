//! Service-level handlers

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use kinder_core::{ByAge, ById, TreeKind, TreePolicy};
use serde::Serialize;
use std::sync::Arc;

/// One mounted tree
#[derive(Debug, Serialize)]
pub struct TreeInfo {
    pub kind: TreeKind,
    pub description: &'static str,
    pub path: String,
    pub records: usize,
}

/// Service description
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub trees: Vec<TreeInfo>,
}

fn tree_info<P: TreePolicy>(records: usize) -> TreeInfo {
    TreeInfo {
        kind: P::KIND,
        description: P::KIND.description(),
        path: format!("/children/{}", P::KIND),
        records,
    }
}

/// GET / - Describe the service and its trees
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Children Management API",
        version: env!("CARGO_PKG_VERSION"),
        trees: vec![
            tree_info::<ByAge>(state.bst.count()),
            tree_info::<ById>(state.avl.count()),
        ],
    })
}

/// GET /health - Health check
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

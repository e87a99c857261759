//! Child record handlers, shared by the BST and AVL routers

use crate::ApiError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use kinder_core::{Record, RecordUpdate, SharedTree, TraversalOrder, TreePolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Routes for one tree under `prefix`, e.g. `/children/avl`.
///
/// The collection answers both with and without a trailing slash.
pub fn router<P, S>(prefix: &str, tree: Arc<SharedTree<P>>) -> Router<S>
where
    P: TreePolicy,
    S: Clone + Send + Sync + 'static,
{
    let collection = get(list_children::<P>).post(create_child::<P>);

    Router::new()
        .route(prefix, collection.clone())
        .route(&format!("{prefix}/"), collection)
        .route(&format!("{prefix}/stats/tree"), get(tree_stats::<P>))
        .route(
            &format!("{prefix}/{{id}}"),
            get(get_child::<P>)
                .put(update_child::<P>)
                .delete(delete_child::<P>),
        )
        .with_state(tree)
}

/// Query parameters for listing
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// `in`, `pre` or `post`; defaults to `in`
    pub order: Option<String>,
}

/// Plain message body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Tree statistics body
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeStatsResponse {
    pub tree_height: usize,
    pub total_nodes: usize,
    pub is_balanced: bool,
    pub tree_type: String,
}

/// POST / - Insert a child
pub async fn create_child<P: TreePolicy>(
    State(tree): State<Arc<SharedTree<P>>>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(record) = payload?;
    let stored = tree.insert(record)?;

    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

/// GET /{id} - Get a child by id
pub async fn get_child<P: TreePolicy>(
    State(tree): State<Arc<SharedTree<P>>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Record>, ApiError> {
    let Path(id) = id?;
    Ok(Json(tree.search(id)?))
}

/// GET /?order=in|pre|post - List all children in traversal order
pub async fn list_children<P: TreePolicy>(
    State(tree): State<Arc<SharedTree<P>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let order = match params.order.as_deref() {
        Some(order) => order.parse::<TraversalOrder>()?,
        None => TraversalOrder::default(),
    };

    Ok(Json(tree.traverse(order)))
}

/// PUT /{id} - Update some fields of a child
pub async fn update_child<P: TreePolicy>(
    State(tree): State<Arc<SharedTree<P>>>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<RecordUpdate>, JsonRejection>,
) -> Result<Json<Record>, ApiError> {
    let Path(id) = id?;
    let Json(changes) = payload?;
    if changes.is_empty() {
        return Err(ApiError::bad_request("No update data provided"));
    }

    Ok(Json(tree.update(id, &changes)?))
}

/// DELETE /{id} - Delete a child
pub async fn delete_child<P: TreePolicy>(
    State(tree): State<Arc<SharedTree<P>>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    tree.delete(id)?;

    Ok(Json(MessageResponse {
        message: format!("Child with ID {id} deleted successfully"),
    }))
}

/// GET /stats/tree - Height, size and balance of the tree
pub async fn tree_stats<P: TreePolicy>(
    State(tree): State<Arc<SharedTree<P>>>,
) -> Json<TreeStatsResponse> {
    let stats = tree.stats();

    Json(TreeStatsResponse {
        tree_height: stats.height,
        total_nodes: stats.count,
        is_balanced: stats.is_balanced,
        tree_type: stats.kind.description().to_string(),
    })
}

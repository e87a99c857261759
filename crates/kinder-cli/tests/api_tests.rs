use kinder_cli::{routes, AppState, GatewayConfig};
use kinder_core::DuplicatePolicy;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

// Helper to spawn a server on a random port
async fn spawn_server(config: GatewayConfig) -> String {
    let state = Arc::new(AppState::new(config));
    let app = routes::create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn child(id: u64, name: &str, age: u8, gender: &str) -> Value {
    json!({"id": id, "name": name, "age": age, "gender": gender})
}

async fn ids(client: &Client, url: String) -> Vec<u64> {
    let res = client.get(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<Value> = res.json().await.unwrap();
    body.iter().map(|c| c["id"].as_u64().unwrap()).collect()
}

#[tokio::test]
async fn test_child_lifecycle() {
    let base_url = spawn_server(GatewayConfig::default()).await;
    let client = Client::new();
    let juan = child(1001, "Juan", 10, "M");

    for tree in ["bst", "avl"] {
        let url = format!("{}/children/{}", base_url, tree);

        // 1. Create
        let res = client.post(&url).json(&juan).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.json::<Value>().await.unwrap(), juan);

        // 2. Duplicate id is rejected
        let res = client
            .post(&url)
            .json(&child(1001, "Otro Juan", 3, "M"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["code"], "DuplicateIdentifier");
        assert_eq!(body["detail"], "Child with ID 1001 already exists");

        // 3. Fetch
        let res = client.get(format!("{}/1001", url)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.json::<Value>().await.unwrap(), juan);

        // 4. Partial update keeps other fields
        let res = client
            .put(format!("{}/1001", url))
            .json(&json!({"name": "Juan Carlos"}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            child(1001, "Juan Carlos", 10, "M")
        );

        // 5. Delete
        let res = client.delete(format!("{}/1001", url)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Child with ID 1001 deleted successfully");

        // 6. Gone
        let res = client.get(format!("{}/1001", url)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = client.delete(format!("{}/1001", url)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_avl_traversals_and_stats() {
    let base_url = spawn_server(GatewayConfig::default()).await;
    let client = Client::new();
    let url = format!("{}/children/avl", base_url);

    for id in 1..=7 {
        let res = client
            .post(&url)
            .json(&child(id, "Niño", 5, "Otro"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    assert_eq!(ids(&client, url.clone()).await, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(
        ids(&client, format!("{}/?order=pre", url)).await,
        vec![4, 2, 1, 3, 6, 5, 7]
    );
    assert_eq!(
        ids(&client, format!("{}/?order=post", url)).await,
        vec![1, 3, 2, 5, 7, 6, 4]
    );

    let res = client.get(format!("{}/stats/tree", url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats: Value = res.json().await.unwrap();
    assert_eq!(stats["tree_height"], 3);
    assert_eq!(stats["total_nodes"], 7);
    assert_eq!(stats["is_balanced"], true);
    assert_eq!(stats["tree_type"], "AVL Tree (Self-balancing)");
}

#[tokio::test]
async fn test_bst_orders_by_age() {
    let base_url = spawn_server(GatewayConfig::default()).await;
    let client = Client::new();
    let url = format!("{}/children/bst", base_url);

    for (id, age) in [(10, 8), (11, 4), (12, 12)] {
        client
            .post(&url)
            .json(&child(id, "Ana", age, "F"))
            .send()
            .await
            .unwrap();
    }
    assert_eq!(ids(&client, url.clone()).await, vec![11, 10, 12]);

    // Changing the age moves the record to its new place
    let res = client
        .put(format!("{}/11", url))
        .json(&json!({"age": 15}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(ids(&client, url.clone()).await, vec![10, 12, 11]);

    let stats: Value = client
        .get(format!("{}/stats/tree", url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total_nodes"], 3);
    assert_eq!(stats["tree_type"], "Binary Search Tree (unbalanced)");
}

#[tokio::test]
async fn test_bad_requests() {
    let base_url = spawn_server(GatewayConfig::default()).await;
    let client = Client::new();
    let url = format!("{}/children/avl", base_url);

    client.post(&url).json(&child(1, "Ana", 6, "F")).send().await.unwrap();

    // Unknown traversal order
    let res = client.get(format!("{}/?order=level", url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Empty update
    let res = client.put(format!("{}/1", url)).json(&json!({})).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"], "No update data provided");

    // Field validation
    for invalid in [
        child(2, "Ana", 19, "F"),
        child(2, "", 5, "F"),
        child(0, "Ana", 5, "F"),
        child(2, "Ana", 5, "X"),
    ] {
        let res = client.post(&url).json(&invalid).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "{invalid}");
    }
    let res = client
        .put(format!("{}/1", url))
        .json(&json!({"age": 40}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Field validation runs before the lookup
    let res = client
        .put(format!("{}/99", url))
        .json(&json!({"age": 40}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Malformed id
    let res = client.get(format!("{}/abc", url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "InvalidRequest");

    // Update of a missing record
    let res = client
        .put(format!("{}/99", url))
        .json(&json!({"age": 4}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Nothing changed
    assert_eq!(ids(&client, url).await, vec![1]);
}

#[tokio::test]
async fn test_ignore_duplicates() {
    let mut config = GatewayConfig::default();
    config.avl.duplicates = DuplicatePolicy::Ignore;
    let base_url = spawn_server(config).await;
    let client = Client::new();
    let url = format!("{}/children/avl", base_url);

    let first = child(5, "Luis", 9, "M");
    client.post(&url).json(&first).send().await.unwrap();
    let res = client
        .post(&url)
        .json(&child(5, "Pedro", 2, "M"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), first);

    // The BST keeps the default policy
    let bst = format!("{}/children/bst", base_url);
    client.post(&bst).json(&first).send().await.unwrap();
    let res = client.post(&bst).json(&first).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_service_info_and_request_id() {
    let base_url = spawn_server(GatewayConfig::default()).await;
    let client = Client::new();

    let res = client.get(format!("{}/health", base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "OK");

    client
        .post(format!("{}/children/bst", base_url))
        .json(&child(3, "Eva", 1, "F"))
        .send()
        .await
        .unwrap();

    let res = client.get(format!("{}/", base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let info: Value = res.json().await.unwrap();
    assert_eq!(info["trees"][0]["path"], "/children/bst");
    assert_eq!(info["trees"][0]["records"], 1);
    assert_eq!(info["trees"][1]["kind"], "avl");
    assert_eq!(info["trees"][1]["records"], 0);
}

//! Full sync lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `RemoteTodoStore`
//! over real HTTP through `UreqTransport`. Validates the request building,
//! status handling and reconciliation end-to-end.

use todo_sync::{ApiError, ClientConfig, RemoteTodoGateway, RemoteTodoStore, TodoGateway, TodoItem};

async fn start_server() -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    ClientConfig::new().with_base_url(format!("http://{addr}"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn store_lifecycle() {
    let config = start_server().await;
    let store = RemoteTodoStore::connect(&config);

    // Step 1: refresh against an empty server.
    store.refresh().await.unwrap();
    assert!(store.items().is_empty(), "expected empty list");
    assert!(!store.is_loading());

    // Step 2: add two drafts; server ids and timestamps replace the drafts.
    let walk = store
        .add(TodoItem::draft("Walk dog").with_description("before noon"))
        .await
        .unwrap();
    let feed = store.add(TodoItem::draft("Feed cat")).await.unwrap();
    assert_eq!(walk.id, Some(1));
    assert_eq!(feed.id, Some(2));
    assert!(walk.created_at.is_some());
    assert_eq!(store.items(), vec![walk.clone(), feed.clone()]);

    // Step 3: toggle the first one; position is kept.
    let toggled = store.toggle_completion(&walk).await.unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.description.as_deref(), Some("before noon"));
    assert_eq!(toggled.created_at, walk.created_at);
    assert_eq!(store.items()[0], toggled);
    assert_eq!(store.items()[1], feed);

    // Step 4: a fresh refresh agrees with the local collection.
    let local = store.items();
    store.refresh().await.unwrap();
    assert_eq!(store.items(), local);

    // Step 5: remove the second one.
    store.remove(&feed).await.unwrap();
    assert_eq!(store.items(), vec![toggled.clone()]);

    // Step 6: removing it again surfaces the 404 and keeps the collection.
    let err = store.remove(&feed).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert!(store.has_error());
    assert_eq!(store.items(), vec![toggled]);

    // Step 7: the next successful command clears the error.
    store.refresh().await.unwrap();
    assert!(!store.has_error());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rejected_create_is_reported_as_status() {
    let config = start_server().await;
    let store = RemoteTodoStore::connect(&config);

    let err = store.add(TodoItem::draft("   ")).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 422, .. }));
    assert!(store.items().is_empty());
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = ClientConfig::new().with_base_url(format!("http://127.0.0.1:{port}"));
    let gateway = RemoteTodoGateway::new(&config);

    assert!(matches!(gateway.list().unwrap_err(), ApiError::Transport(_)));
    assert!(matches!(gateway.delete(1).unwrap_err(), ApiError::Transport(_)));
}

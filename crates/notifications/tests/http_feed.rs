use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, put},
};
use serde_json::json;

use stockwise_core::NotificationId;
use stockwise_notifications::{FeedError, HttpNotificationFeed, NotificationFeed, NotificationKind};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn backend(writes: Arc<AtomicUsize>) -> Router {
    let read_writes = writes.clone();
    let all_writes = writes.clone();
    let delete_writes = writes;

    Router::new()
        .route(
            "/api/notifications",
            get(|| async {
                Json(json!({
                    "notifications": [
                        {"_id": "n1", "type": "LOW_STOCK", "title": "Low stock", "isRead": false},
                        {"_id": "n2", "type": "STOCK_OUT", "title": "Out of stock", "isRead": true},
                        {"_id": "n3", "type": "NOT_A_KIND"}
                    ],
                    "unreadCount": 1
                }))
            }),
        )
        .route(
            "/api/notifications/read-all",
            put(move || {
                let w = all_writes.clone();
                async move {
                    w.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"ok": true}))
                }
            }),
        )
        .route(
            "/api/notifications/:id/read",
            put(move |Path(id): Path<String>| {
                let w = read_writes.clone();
                async move {
                    if id == "missing" {
                        return (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})));
                    }
                    w.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::OK, Json(json!({"ok": true})))
                }
            }),
        )
        .route(
            "/api/notifications/:id",
            delete(move |Path(_id): Path<String>| {
                let w = delete_writes.clone();
                async move {
                    w.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"ok": true}))
                }
            }),
        )
}

#[tokio::test]
async fn fetches_and_normalizes_notifications() {
    let server = TestServer::spawn(backend(Arc::new(AtomicUsize::new(0)))).await;
    let feed = HttpNotificationFeed::new(&server.base_url);

    let snapshot = feed.fetch().await.unwrap();
    assert_eq!(snapshot.notifications.len(), 2);
    assert_eq!(snapshot.notifications[0].kind, NotificationKind::LowStock);
    assert_eq!(snapshot.unread_count, Some(1));
}

#[tokio::test]
async fn write_actions_hit_the_backend() {
    let writes = Arc::new(AtomicUsize::new(0));
    let server = TestServer::spawn(backend(writes.clone())).await;
    let feed = HttpNotificationFeed::new(format!("{}/", server.base_url));

    feed.mark_read(&NotificationId::new("n1").unwrap()).await.unwrap();
    feed.mark_all_read().await.unwrap();
    feed.delete(&NotificationId::new("n2").unwrap()).await.unwrap();
    assert_eq!(writes.load(Ordering::SeqCst), 3);

    let err = feed.mark_read(&NotificationId::new("missing").unwrap()).await.unwrap_err();
    assert!(matches!(err, FeedError::Status(404)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind and immediately drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let feed = HttpNotificationFeed::new(format!("http://{}", addr));
    let err = feed.fetch().await.unwrap_err();
    assert!(matches!(err, FeedError::Transport(_)));
}

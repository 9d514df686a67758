use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use messages_config::{AppConfig, StorageBackend};
use messages_gateway::{create_router, GatewayState};
use messages_runtime::BackendServices;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    services: BackendServices,
    _db_dir: TempDir,
}

struct TestResponse {
    status: StatusCode,
    json: Value,
}

impl TestApp {
    async fn new() -> Self {
        let db_dir = TempDir::new().expect("create temp dir");
        let db_path = db_dir.path().join("messages-test.db");

        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Sqlite;
        config.database.url = format!("sqlite://{}", db_path.to_string_lossy());
        config.database.max_connections = 5;

        let services = BackendServices::initialise(&config)
            .await
            .expect("initialise backend services");

        let router = create_router(GatewayState::new(services.store.clone()));

        Self {
            router,
            services,
            _db_dir: db_dir,
        }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        send(self.router.clone(), method, uri, body).await
    }
}

async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = if let Some(json_body) = body {
        let bytes = serde_json::to_vec(&json_body).expect("serialize request body");
        builder = builder.header(CONTENT_TYPE, "application/json");
        Body::from(bytes)
    } else {
        Body::empty()
    };

    let response = router
        .oneshot(builder.body(body).expect("build request"))
        .await
        .expect("dispatch request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect response body")
        .to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap_or_default();
    let json = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::Null)
    };

    TestResponse { status, json }
}

#[tokio::test(flavor = "multi_thread")]
async fn messages_flow_through_sqlite() {
    let app = TestApp::new().await;

    let greeting = app.request(Method::GET, "/", None).await;
    assert_eq!(greeting.status, StatusCode::OK);
    assert_eq!(greeting.json["message"], "Hello World v3");

    let empty = app.request(Method::GET, "/messages", None).await;
    assert_eq!(empty.json, json!([]));

    let first = app
        .request(
            Method::POST,
            "/messages",
            Some(json!({
                "message": "first",
                "roomId": "room-1",
                "senderId": "alice",
                "timestamp": "2024-01-01T12:00:00Z"
            })),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request(
            Method::POST,
            "/messages",
            Some(json!({
                "message": "second",
                "roomId": "room-2",
                "senderId": "bob",
                "timestamp": "2024-01-01T11:00:00Z",
                "isRead": true
            })),
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);

    let listed = app.request(Method::GET, "/messages", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json, json!([second.json, first.json]));

    let room = app
        .request(Method::GET, "/messages?roomId=room-1", None)
        .await;
    assert_eq!(room.json, json!([first.json]));

    app.services.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_messages_are_not_persisted() {
    let app = TestApp::new().await;

    let rejected = app
        .request(
            Method::POST,
            "/messages",
            Some(json!({ "message": "orphan", "roomId": "", "senderId": "alice" })),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let listed = app.services.store.list().await.expect("list messages");
    assert!(listed.is_empty());

    app.services.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_posts_are_all_stored() {
    let app = TestApp::new().await;

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let router = app.router.clone();
        tasks.spawn(async move {
            let body = json!({
                "message": format!("message {i}"),
                "roomId": "room-1",
                "senderId": "alice"
            });
            send(router, Method::POST, "/messages", Some(body)).await
        });
    }

    while let Some(response) = tasks.join_next().await {
        assert_eq!(response.expect("join request task").status, StatusCode::CREATED);
    }

    let listed = app.services.store.list().await.expect("list messages");
    assert_eq!(listed.len(), 8);

    app.services.shutdown().await;
}

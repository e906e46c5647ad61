use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use orrery::api::AppState;
use orrery::clients::mars_rover::{RoverCamera, RoverPhoto, RoverPhotoApi};
use orrery::clients::nasa_images::{CollectionItem, ImageSearchApi, ImageSearchRequest, ItemData, ItemLink};
use orrery::config::Config;
use orrery::db::Store;
use orrery::models::dataset::NewDataset;
use orrery::state::SharedState;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

struct FakeImages {
    calls: AtomicUsize,
}

#[async_trait]
impl ImageSearchApi for FakeImages {
    async fn search(&self, request: &ImageSearchRequest) -> anyhow::Result<Vec<CollectionItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((0..request.page_size.min(20))
            .map(|i| CollectionItem {
                data: vec![ItemData {
                    nasa_id: Some(format!("PIA{i:05}")),
                    title: Some(format!("Saturn view {i}")),
                    description: Some("Cassini wide angle camera".to_string()),
                    keywords: vec!["saturn".to_string()],
                    date_created: Some("2005-03-01T00:00:00Z".to_string()),
                    media_type: Some("image".to_string()),
                    center: Some("JPL".to_string()),
                }],
                links: vec![ItemLink {
                    rel: Some("preview".to_string()),
                    href: Some(format!("https://images-assets.nasa.gov/PIA{i:05}~thumb.jpg")),
                    render: Some("image".to_string()),
                }],
            })
            .collect())
    }
}

struct FakeRovers;

#[async_trait]
impl RoverPhotoApi for FakeRovers {
    async fn latest_photos(&self, rover: &str) -> anyhow::Result<Vec<RoverPhoto>> {
        Ok(vec![RoverPhoto {
            id: 7,
            camera: RoverCamera {
                name: "MAST".to_string(),
                full_name: "Mast Camera".to_string(),
            },
            earth_date: "2024-02-19".to_string(),
            img_src: format!("https://mars.nasa.gov/{rover}/7.jpg"),
        }])
    }
}

struct TestApp {
    router: Router,
    state: Arc<AppState>,
    images: Arc<FakeImages>,
    tiles_root: PathBuf,
}

async fn spawn_app() -> TestApp {
    let tiles_root = std::env::temp_dir().join(format!("orrery-api-{}", uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&tiles_root).await.unwrap();

    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.tiles_root = tiles_root.to_string_lossy().to_string();
    // Nothing listens on the discard port, so APOD calls fail fast.
    config.nasa.api_base_url = "http://127.0.0.1:9".to_string();

    let store = Store::new(&config.general.database_path)
        .await
        .expect("Failed to open store");
    let images = Arc::new(FakeImages {
        calls: AtomicUsize::new(0),
    });

    let shared = Arc::new(SharedState::with_clients(
        config,
        store,
        images.clone(),
        Arc::new(FakeRovers),
        reqwest::Client::new(),
    ));
    let state = orrery::api::create_app_state(shared, None);

    TestApp {
        router: orrery::api::router(state.clone()),
        state,
        images,
        tiles_root,
    }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_api_root() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Orrery"));
    assert!(body["endpoints"].as_array().unwrap().len() > 5);
}

#[tokio::test]
async fn test_tile_falls_back_to_jpg() {
    let app = spawn_app().await;
    let dir = app.tiles_root.join("mars/3/2");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("1.jpg"), b"jpeg-data").await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/tiles/mars/3/2/1.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=86400"
    );
    assert_eq!(
        response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"jpeg-data");

    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/tiles/mars/3/2/9.png")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/tiles/mars/3/2/1.gif")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/tiles/mars/three/2/1.png")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    tokio::fs::remove_dir_all(&app.tiles_root).await.ok();
}

#[tokio::test]
async fn test_datasets_and_annotations() {
    let app = spawn_app().await;
    app.state
        .store()
        .upsert_dataset(&NewDataset::new("moon", "Lunar Reconnaissance Mosaic"))
        .await
        .unwrap();

    let (status, body) = get_json(&app, "/api/datasets/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["slug"], "moon");
    assert_eq!(body["data"][0]["annotations_count"], 0);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/annotations/",
            &json!({"dataset": "moon", "feature_name": "Tycho", "x": 10.5, "y": 20.25, "zoom": 4}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&body).unwrap();
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["dataset_slug"], "moon");

    let (_, body) = get_json(&app, "/api/datasets/moon/").await;
    assert_eq!(body["data"]["annotations_count"], 1);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/annotations/{id}/"),
            &json!({"dataset": "moon", "feature_name": "Tycho crater", "x": 11.0, "y": 20.0, "note": "ray system"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated["data"]["feature_name"], "Tycho crater");

    let (_, body) = get_json(&app, "/api/search/?q=TYCHO").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = get_json(&app, "/api/annotations/?dataset=mars").await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/annotations/{id}/"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get_json(&app, &format!("/api/annotations/{id}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_annotation_validation() {
    let app = spawn_app().await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/annotations/",
            &json!({"dataset": "nowhere", "x": 1.0, "y": 2.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/api/datasets/nowhere/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nasa_search_flow() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/search/nasa/?q=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get_json(&app, "/api/search/nasa/?q=Saturn&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(body[0]["center"], "JPL");

    let (_, body) = get_json(&app, "/api/search/nasa/?q=saturn&limit=5").await;
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(app.images.calls.load(Ordering::SeqCst), 1);

    let (_, body) = get_json(&app, "/api/search/popular/").await;
    assert_eq!(body["data"][0]["query"], "saturn");
    assert_eq!(body["data"][0]["search_count"], 2);

    let (status, body) = get_json(&app, "/api/nasa/image/PIA00000/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Saturn view 0");

    let (status, _) = get_json(&app, "/api/nasa/image/missing/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&app, "/api/search/nasa/?q=saturn&limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mars_search_uses_rovers() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/search/nasa/?q=MARS%20rover").await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|image| image["nasa_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["mars_curiosity_7", "mars_perseverance_7", "mars_opportunity_7"]
    );
    assert_eq!(body[0]["title"], "Curiosity - Mast Camera");
    assert_eq!(app.images.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_metrics_disabled_message() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/metrics")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("not enabled"));
}

#[tokio::test]
async fn test_apod_failure_is_bad_request() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/nasa/apod/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to fetch APOD data");

    let (status, body) = get_json(&app, "/api/nasa/apod/?date=2024-13-40").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_ne!(body["error"], "Failed to fetch APOD data");
}

#[tokio::test]
async fn test_wildcard_queries_do_not_match_cache() {
    let app = spawn_app().await;

    let (_, body) = get_json(&app, "/api/search/nasa/?q=saturn&limit=3").await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    get_json(&app, "/api/search/nasa/?q=s_turn&limit=3").await;
    get_json(&app, "/api/search/nasa/?q=%25&limit=3").await;
    assert_eq!(app.images.calls.load(Ordering::SeqCst), 3);

    let (status, body) = get_json(&app, "/api/search/?q=%25").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

//! Router tests against in-memory geocoder and generator

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::FixedOffset;
use serde_json::{json, Value};
use tower::ServiceExt;

use thatnightsky_api::{create_router, ApiPipeline, AppState};
use thatnightsky_astro::SkySettings;
use thatnightsky_core::models::{Catalogue, CatalogueStar, ConstellationLine, Lang};
use thatnightsky_geocode::{GeocodedPlace, Geocoder, ObserverResolver, StaticGeocoder};
use thatnightsky_llm::StaticGenerator;

fn catalogue() -> Arc<Catalogue> {
    Arc::new(Catalogue::new(
        vec![
            CatalogueStar::new(11767, 37.946_146_89, 89.264_138_05, 1.97),
            CatalogueStar::new(85822, 263.054_154_9, 86.586_460_47, 4.35),
            CatalogueStar::new(32349, 101.287_155, -16.716_116, -1.44),
        ],
        vec![ConstellationLine::new("UMi", 11767, 85822)],
    ))
}

fn pipeline(catalogue: Arc<Catalogue>, display_name: &str) -> ApiPipeline {
    let geocoder: Arc<dyn Geocoder> = Arc::new(StaticGeocoder::new().with_place(
        "부산",
        GeocodedPlace {
            latitude: 35.18,
            longitude: 129.08,
            display_name: display_name.to_string(),
        },
    ));
    let offset = FixedOffset::east_opt(9 * 3600).unwrap();
    ApiPipeline::new(ObserverResolver::new(geocoder, offset), catalogue)
}

fn app() -> Router {
    let catalogue = catalogue();
    let ko = pipeline(catalogue.clone(), "부산광역시")
        .with_generator(Arc::new(StaticGenerator::new("북극성이 보이던 밤.")));
    let en = pipeline(catalogue, "Busan");
    create_router(Arc::new(AppState::new(ko, en, SkySettings::default(), Lang::Ko)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "thatnightsky-api");
}

#[tokio::test]
async fn test_catalogue_summary() {
    let request = Request::builder().uri("/api/v1/catalogue").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stars"], 3);
    assert_eq!(body["lines"], 1);
    assert_eq!(body["constellations"], 1);
}

#[tokio::test]
async fn test_sky_for_address() {
    let request = post(
        "/api/v1/sky",
        json!({"address": "부산", "when": "1995-01-15 00:00", "narrative": true}),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["narrative"], "북극성이 보이던 밤.");
    assert_eq!(body["sky"]["observer"]["address_display"], "부산광역시");
    assert_eq!(body["sky"]["observer"]["instant_utc"], "1995-01-14T15:00:00Z");

    let stars = body["sky"]["stars"].as_array().unwrap();
    assert!(stars.iter().any(|s| s["id"] == 11767));
    assert!(stars.iter().all(|s| s["alt_deg"].as_f64().unwrap() >= 0.0));
    assert_eq!(body["sky"]["visible_constellations"], json!(["UMi"]));
}

#[tokio::test]
async fn test_sky_uses_language_pipeline() {
    let request = post(
        "/api/v1/sky",
        json!({"address": "부산", "when": "1995-01-15 00:00", "lang": "en", "narrative": true}),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sky"]["observer"]["address_display"], "Busan");
    // No generator on the English pipeline
    assert_eq!(body["narrative"], "That night. The sky.");
}

#[tokio::test]
async fn test_narrative_absent_unless_requested() {
    let request = post("/api/v1/sky", json!({"address": "부산", "when": "1995-01-15 00:00"}));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["narrative"].is_null());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_observer_requests() {
    let mut tasks = tokio::task::JoinSet::new();
    for hour in 0..8 {
        let body = json!({
            "latitude": 35.18,
            "longitude": 129.08,
            "instant": format!("1995-01-14T{:02}:00:00Z", hour),
        });
        tasks.spawn(send(app(), post("/api/v1/sky/observer", body)));
    }

    let mut completed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (status, body) = joined.unwrap();
        assert_eq!(status, StatusCode::OK);
        // Polaris is always up from Busan
        assert!(body["stars"].as_array().unwrap().iter().any(|s| s["id"] == 11767));
        completed += 1;
    }
    assert_eq!(completed, 8);
}

#[tokio::test]
async fn test_sky_limiting_magnitude_override() {
    let request = post(
        "/api/v1/sky",
        json!({"address": "부산", "when": "1995-01-15 00:00", "limiting_magnitude": 3.0}),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sky"]["limiting_magnitude"], 3.0);
    assert!(body["sky"]["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_address_is_bad_request() {
    let request = post("/api/v1/sky", json!({"address": "화성", "when": "1995-01-15 00:00"}));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Address could not be resolved");
}

#[tokio::test]
async fn test_bad_time_is_bad_request() {
    let request = post("/api/v1/sky", json!({"address": "부산", "when": "last tuesday"}));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid local time");
}

#[tokio::test]
async fn test_sky_for_observer() {
    let request = post(
        "/api/v1/sky/observer",
        json!({"latitude": 35.18, "longitude": 129.08, "instant": "1995-01-14T15:00:00Z"}),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    let polaris = body["stars"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == 11767)
        .cloned()
        .unwrap();
    assert!((polaris["alt_deg"].as_f64().unwrap() - 35.18).abs() < 1.5);
}

#[tokio::test]
async fn test_observer_out_of_range_is_bad_request() {
    let request = post(
        "/api/v1/sky/observer",
        json!({"latitude": 91.0, "longitude": 0.0, "instant": "2000-01-01T00:00:00Z"}),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid observer");
}

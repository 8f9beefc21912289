use axum_test::TestServer;
use serde_json::json;

use brandpulse_api::api::{create_router, AppState};
use brandpulse_api::services::dataset::generate_dataset;
use brandpulse_api::services::forest::ForestParams;
use brandpulse_api::services::predictor::{
    LearnedPredictor, ENGAGEMENT_MODEL_FILE, REACH_MODEL_FILE,
};

/// Server with no model artifacts on disk: always the fallback path.
fn create_demo_server() -> TestServer {
    let state = AppState::new("/nonexistent/models");
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

/// Server backed by small freshly trained artifacts: the live path.
fn create_live_server(dir: &std::path::Path) -> TestServer {
    let samples = generate_dataset(600, 42);
    let params = ForestParams {
        n_trees: 10,
        max_depth: 8,
        ..ForestParams::default()
    };
    let (_, engagement, reach) = LearnedPredictor::train(&samples, &params, &params).unwrap();
    engagement.save(&dir.join(ENGAGEMENT_MODEL_FILE)).unwrap();
    reach.save(&dir.join(REACH_MODEL_FILE)).unwrap();

    let state = AppState::new(dir);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check_reports_demo_mode() {
    let server = create_demo_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let health: serde_json::Value = response.json();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["ml_available"], false);
    assert_eq!(health["mode"], "demo");
}

#[tokio::test]
async fn test_health_check_reports_live_mode() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_live_server(dir.path());

    let response = server.get("/health").await;
    response.assert_status_ok();

    let health: serde_json::Value = response.json();
    assert_eq!(health["ml_available"], true);
    assert_eq!(health["mode"], "live");
}

#[tokio::test]
async fn test_fallback_prediction_for_off_peak_image_post() {
    let server = create_demo_server();

    let response = server
        .post("/api/predict-performance")
        .json(&json!({
            "platform": "Instagram",
            "content_type": "Image",
            "industry": "Fitness",
            "posting_hour": 1,
            "caption_length": 10,
            "cta": false,
            "influencer": true
        }))
        .await;
    response.assert_status_ok();

    let report: serde_json::Value = response.json();
    assert_eq!(report["mode"], "demo");
    // 12000 * 1.0 * 1.3 * 1.4 reach; 3.8 * 1.3 engagement.
    assert_eq!(report["predicted_reach"], 21840);
    assert_eq!(report["engagement_rate"], "4.94%");
    assert_eq!(report["effectiveness"], "High");
    assert_eq!(report["best_posting_time"], "12PM-2PM and 7PM-9PM EST");

    let recs: Vec<String> = report["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(!recs.is_empty());
    assert!(recs.len() <= 6);
    assert!(recs.iter().any(|r| r.contains("Instagram Reels")));
    assert!(recs.iter().any(|r| r.contains("peak user activity windows")));
    assert!(recs.iter().any(|r| r.contains("Call-To-Action")));
}

#[tokio::test]
async fn test_closed_gaps_drop_their_recommendations() {
    let server = create_demo_server();

    let response = server
        .post("/api/predict-performance")
        .json(&json!({
            "platform": "Instagram",
            "content_type": "Reel",
            "industry": "Fitness",
            "posting_hour": 19,
            "caption_length": 10,
            "cta": true,
            "influencer": true
        }))
        .await;
    response.assert_status_ok();

    let report: serde_json::Value = response.json();
    let recs: Vec<String> = report["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();

    assert!(!recs.iter().any(|r| r.contains("Instagram Reels")));
    assert!(!recs.iter().any(|r| r.contains("Call-To-Action")));
    assert!(recs.iter().any(|r| r.contains("longer, value-driven captions")));
}

#[tokio::test]
async fn test_unknown_platform_degrades_to_default_rates() {
    let server = create_demo_server();

    let response = server
        .post("/api/predict-performance")
        .json(&json!({
            "platform": "Snapchat",
            "content_type": "Image",
            "industry": "General",
            "posting_hour": 13,
            "caption_length": 150,
            "cta": true,
            "influencer": false
        }))
        .await;
    response.assert_status_ok();

    let report: serde_json::Value = response.json();
    // Instagram base rates without any multiplier.
    assert_eq!(report["predicted_reach"], 12000);
    assert_eq!(report["engagement_rate"], "3.80%");
    assert!(!report["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_numerics_are_clamped_not_rejected() {
    let server = create_demo_server();

    let response = server
        .post("/api/predict-performance")
        .json(&json!({
            "platform": "Instagram",
            "content_type": "Reel",
            "industry": "Fitness",
            "posting_hour": 99,
            "caption_length": -40,
            "cta": true,
            "influencer": true
        }))
        .await;
    response.assert_status_ok();

    let report: serde_json::Value = response.json();
    // Hour clamps to 23 (off-peak) and caption to 0 (short).
    let recs: Vec<String> = report["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(recs.iter().any(|r| r.contains("peak user activity windows")));
    assert!(recs.iter().any(|r| r.contains("longer, value-driven captions")));
}

#[tokio::test]
async fn test_live_path_caps_recommendations_at_four() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_live_server(dir.path());

    let response = server
        .post("/api/predict-performance")
        .json(&json!({
            "platform": "Instagram",
            "content_type": "Image",
            "industry": "Fitness",
            "posting_hour": 1,
            "caption_length": 10,
            "cta": false,
            "influencer": false
        }))
        .await;
    response.assert_status_ok();

    let report: serde_json::Value = response.json();
    assert_eq!(report["mode"], "live");

    let recs = report["recommendations"].as_array().unwrap();
    assert!(!recs.is_empty());
    assert!(recs.len() <= 4);
}

#[tokio::test]
async fn test_missing_fields_use_defaults() {
    let server = create_demo_server();

    let response = server
        .post("/api/predict-performance")
        .json(&json!({
            "platform": "TikTok",
            "content_type": "Video"
        }))
        .await;
    response.assert_status_ok();

    let report: serde_json::Value = response.json();
    // 25000 * 1.8 reach with default General industry and no influencer.
    assert_eq!(report["predicted_reach"], 45000);
    assert_eq!(report["engagement_rate"], "9.36%");
}

mod common;

use axum::http::StatusCode;
use common::{create_ad, create_company, create_stat, send, test_app};
use serde_json::json;

async fn running_ad(app: &axum::Router) -> i64 {
    let acme = create_company(app, "Acme").await;
    create_ad(app, acme, "2024-01-01", "2024-12-31").await
}

#[tokio::test]
async fn test_stats_listed_newest_entry_first() {
    let ctx = test_app().await;
    let app = &ctx.app;
    let ad = running_ad(app).await;

    create_stat(app, ad, "2024-01-01", 100.0, 1).await;
    create_stat(app, ad, "2024-01-15", 300.0, 3).await;
    create_stat(app, ad, "2024-01-08", 200.0, 2).await;

    let (status, stats) = send(app, "GET", &format!("/ads/{}/stats", ad), None).await;
    assert_eq!(status, StatusCode::OK);
    let weeks: Vec<&str> = stats
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["week_start_date"].as_str().unwrap())
        .collect();
    assert_eq!(weeks, vec!["2024-01-08", "2024-01-15", "2024-01-01"]);

    let (_, none) = send(app, "GET", "/ads/999/stats", None).await;
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stat_totals() {
    let ctx = test_app().await;
    let app = &ctx.app;
    let ad = running_ad(app).await;

    create_stat(app, ad, "2024-01-01", 100.25, 1).await;
    create_stat(app, ad, "2024-01-08", 200.5, 2).await;

    let (status, totals) = send(app, "GET", &format!("/ads/{}/stats/totals", ad), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["ad_id"].as_i64(), Some(ad));
    assert_eq!(totals["weeks"], 2);
    assert_eq!(totals["spend_usd"], 300.75);
    assert_eq!(totals["leads"], 3);
    assert_eq!(totals["clicks"], 30);
    assert_eq!(totals["reach"], 300);

    let (_, empty) = send(app, "GET", "/ads/999/stats/totals", None).await;
    assert_eq!(empty["weeks"], 0);
    assert_eq!(empty["spend_usd"], 0.0);
}

#[tokio::test]
async fn test_stat_crud() {
    let ctx = test_app().await;
    let app = &ctx.app;
    let ad = running_ad(app).await;
    let stat = create_stat(app, ad, "2024-02-05", 80.0, 5).await;

    let (status, body) = send(app, "GET", &format!("/ad-stats/{}", stat), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ad_id"].as_i64(), Some(ad));
    assert_eq!(body["leads"], 5);

    let (status, updated) = send(
        app,
        "PUT",
        &format!("/ad-stats/{}", stat),
        Some(json!({
            "week_start_date": "2024-02-12",
            "spend_usd": 95.5,
            "leads": 7,
            "clicks": 70,
            "reach": 900
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ad_id"].as_i64(), Some(ad));
    assert_eq!(updated["week_start_date"], "2024-02-12");
    assert_eq!(updated["spend_usd"], 95.5);

    let (status, _) = send(app, "DELETE", &format!("/ad-stats/{}", stat), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app, "GET", &format!("/ad-stats/{}", stat), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app, "DELETE", &format!("/ad-stats/{}", stat), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stat_validation() {
    let ctx = test_app().await;
    let app = &ctx.app;
    let ad = running_ad(app).await;

    let valid = json!({
        "ad_id": ad,
        "week_start_date": "2024-03-04",
        "spend_usd": 10.0,
        "leads": 1,
        "clicks": 2,
        "reach": 3
    });

    let mut missing_ad = valid.clone();
    missing_ad["ad_id"] = json!(999);
    let (status, _) = send(app, "POST", "/ad-stats", Some(missing_ad)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut negative_leads = valid.clone();
    negative_leads["leads"] = json!(-1);
    let (status, _) = send(app, "POST", "/ad-stats", Some(negative_leads)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut negative_spend = valid.clone();
    negative_spend["spend_usd"] = json!(-0.01);
    let (status, _) = send(app, "POST", "/ad-stats", Some(negative_spend)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_week = valid.clone();
    bad_week["week_start_date"] = json!("week 10");
    let (status, _) = send(app, "POST", "/ad-stats", Some(bad_week)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app, "POST", "/ad-stats", Some(valid)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_counts_are_capped_so_totals_cannot_overflow() {
    let ctx = test_app().await;
    let app = &ctx.app;
    let ad = running_ad(app).await;

    for _ in 0..2 {
        let (status, _) = send(
            app,
            "POST",
            "/ad-stats",
            Some(json!({
                "ad_id": ad,
                "week_start_date": "2024-04-01",
                "spend_usd": 1.0,
                "leads": i64::MAX,
                "clicks": 0,
                "reach": 0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let cap = ad_dashboard_backend::models::MAX_WEEKLY_COUNT;
    let stat = create_stat(app, ad, "2024-04-01", 1.0, 0).await;
    for week in ["2024-04-08", "2024-04-15"] {
        let (status, _) = send(
            app,
            "POST",
            "/ad-stats",
            Some(json!({
                "ad_id": ad,
                "week_start_date": week,
                "spend_usd": 1.0,
                "leads": cap,
                "clicks": cap,
                "reach": cap
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = send(
        app,
        "PUT",
        &format!("/ad-stats/{}", stat),
        Some(json!({
            "week_start_date": "2024-04-01",
            "spend_usd": 1.0,
            "leads": i64::MAX,
            "clicks": 0,
            "reach": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, totals) = send(app, "GET", &format!("/ads/{}/stats/totals", ad), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["weeks"], 3);
    assert_eq!(totals["leads"].as_i64(), Some(cap * 2));
    assert_eq!(totals["reach"].as_i64(), Some(cap * 2));
}

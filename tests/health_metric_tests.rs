// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health metric endpoint tests: BMI snapshot overwrite semantics, weekly
//! series shape enforcement, and the append-only calorie log.

use axum::http::StatusCode;
use serde_json::json;
use vitatrack::services::SESSION_COOKIE;

mod common;

#[tokio::test]
async fn test_bmi_computed_from_height_and_weight() {
    let (app, state) = common::create_test_app();
    let (_user_id, cookie) = common::register_and_login(&app, &state, "bmi@example.com").await;

    let response = common::post_json_authed(
        &app,
        "/api/health/bmi",
        &cookie,
        json!({ "height": 170, "weight": 70, "age": 25 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert_eq!(body["message"], "Latest BMI data updated successfully");
    assert_eq!(body["latest_bmi"].as_f64().unwrap(), 24.22);
    assert_eq!(body["height"].as_f64().unwrap(), 170.0);
    assert_eq!(body["weight"].as_f64().unwrap(), 70.0);
    assert_eq!(body["age"].as_f64().unwrap(), 25.0);

    // The snapshot persists on the profile.
    let profile = common::get_authed(&app, "/api/auth/profile", &cookie).await;
    let body = common::read_json(profile).await;
    assert_eq!(body["user"]["latest_bmi"].as_f64().unwrap(), 24.22);
    assert_eq!(body["user"]["latest_height"].as_f64().unwrap(), 170.0);
}

#[tokio::test]
async fn test_bmi_partial_submission_clears_omitted_fields() {
    let (app, state) = common::create_test_app();
    let (_user_id, cookie) = common::register_and_login(&app, &state, "bmi@example.com").await;

    let full = common::post_json_authed(
        &app,
        "/api/health/bmi",
        &cookie,
        json!({ "height": 170, "weight": 70, "age": 25 }),
    )
    .await;
    assert_eq!(full.status(), StatusCode::OK);

    // A later submission with only height wipes the rest of the snapshot.
    let partial = common::post_json_authed(
        &app,
        "/api/health/bmi",
        &cookie,
        json!({ "height": 180 }),
    )
    .await;
    assert_eq!(partial.status(), StatusCode::OK);

    let body = common::read_json(partial).await;
    assert!(body["latest_bmi"].is_null());
    assert_eq!(body["height"].as_f64().unwrap(), 180.0);
    assert!(body["weight"].is_null());
    assert!(body["age"].is_null());

    let profile = common::get_authed(&app, "/api/auth/profile", &cookie).await;
    let body = common::read_json(profile).await;
    assert!(body["user"]["latest_bmi"].is_null());
    assert!(body["user"]["latest_weight"].is_null());
    assert_eq!(body["user"]["latest_height"].as_f64().unwrap(), 180.0);
}

#[tokio::test]
async fn test_bmi_zero_measurement_stored_as_absent() {
    let (app, state) = common::create_test_app();
    let (_user_id, cookie) = common::register_and_login(&app, &state, "bmi@example.com").await;

    let response = common::post_json_authed(
        &app,
        "/api/health/bmi",
        &cookie,
        json!({ "height": 0, "weight": 70 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert!(body["latest_bmi"].is_null());
    assert!(body["height"].is_null());
    assert_eq!(body["weight"].as_f64().unwrap(), 70.0);
}

#[tokio::test]
async fn test_heart_rate_week_replaced_wholesale() {
    let (app, state) = common::create_test_app();
    let (_user_id, cookie) = common::register_and_login(&app, &state, "hr@example.com").await;

    let week = vec![60.0, 62.0, 61.0, 59.0, 64.0, 66.0, 63.0];
    let response = common::post_json_authed(
        &app,
        "/api/health/heartrate",
        &cookie,
        json!({ "heart_rate_week": week }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert_eq!(body["message"], "Heart rate updated successfully");
    assert_eq!(body["heart_rate_week"], json!(week));

    let profile = common::get_authed(&app, "/api/auth/profile", &cookie).await;
    let body = common::read_json(profile).await;
    assert_eq!(body["user"]["heart_rate_week"], json!(week));
}

#[tokio::test]
async fn test_heart_rate_week_wrong_length_mutates_nothing() {
    let (app, state) = common::create_test_app();
    let (_user_id, cookie) = common::register_and_login(&app, &state, "hr@example.com").await;

    let response = common::post_json_authed(
        &app,
        "/api/health/heartrate",
        &cookie,
        json!({ "heart_rate_week": [60.0, 62.0, 61.0, 59.0, 64.0, 66.0] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "bad_request");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("exactly 7 values"));

    // The stored week is still the registration default.
    let profile = common::get_authed(&app, "/api/auth/profile", &cookie).await;
    let body = common::read_json(profile).await;
    assert_eq!(body["user"]["heart_rate_week"], json!(vec![0.0; 7]));
}

#[tokio::test]
async fn test_steps_week_replace_and_shape_check() {
    let (app, state) = common::create_test_app();
    let (_user_id, cookie) = common::register_and_login(&app, &state, "steps@example.com").await;

    let week = vec![8000.0, 9500.0, 7200.0, 10400.0, 6100.0, 12000.0, 9900.0];
    let response = common::post_json_authed(
        &app,
        "/api/health/steps",
        &cookie,
        json!({ "steps_week": week }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert_eq!(body["message"], "Steps updated successfully");
    assert_eq!(body["steps_week"], json!(week));

    let too_long = common::post_json_authed(
        &app,
        "/api/health/steps",
        &cookie,
        json!({ "steps_week": vec![1000.0; 8] }),
    )
    .await;
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);

    let profile = common::get_authed(&app, "/api/auth/profile", &cookie).await;
    let body = common::read_json(profile).await;
    assert_eq!(body["user"]["steps_week"], json!(week));
}

#[tokio::test]
async fn test_calorie_records_append_in_order() {
    let (app, state) = common::create_test_app();
    let (_user_id, cookie) = common::register_and_login(&app, &state, "cals@example.com").await;

    let first = common::post_json_authed(
        &app,
        "/api/health/cals",
        &cookie,
        json!({ "burned": 300, "consumed": 2200 }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let body = common::read_json(first).await;
    assert_eq!(body["message"], "Calorie record added successfully");
    assert_eq!(body["calorie_records"].as_array().unwrap().len(), 1);

    // Missing consumed defaults to zero, not an error.
    let second = common::post_json_authed(
        &app,
        "/api/health/cals",
        &cookie,
        json!({ "burned": 450 }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);

    let body = common::read_json(second).await;
    let records = body["calorie_records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["burned"].as_f64().unwrap(), 300.0);
    assert_eq!(records[0]["consumed"].as_f64().unwrap(), 2200.0);
    assert_eq!(records[1]["burned"].as_f64().unwrap(), 450.0);
    assert_eq!(records[1]["consumed"].as_f64().unwrap(), 0.0);
    assert!(!records[0]["recorded_at"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_calorie_non_numeric_value_rejected() {
    let (app, state) = common::create_test_app();
    let (_user_id, cookie) = common::register_and_login(&app, &state, "cals@example.com").await;

    let response = common::post_json_authed(
        &app,
        "/api/health/cals",
        &cookie,
        json!({ "burned": "three hundred" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "bad_request");

    // Nothing was appended.
    let profile = common::get_authed(&app, "/api/auth/profile", &cookie).await;
    let body = common::read_json(profile).await;
    assert_eq!(body["user"]["calorie_records"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_health_routes_require_session() {
    let (app, _state) = common::create_test_app();

    for uri in [
        "/api/health/bmi",
        "/api/health/heartrate",
        "/api/health/steps",
        "/api/health/cals",
    ] {
        let response = common::post_json(&app, uri, json!({})).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri {uri}");
    }
}

#[tokio::test]
async fn test_metric_update_for_vanished_user_is_404() {
    let (app, state) = common::create_test_app();

    // A session whose user document no longer exists.
    let session = state.sessions.create("ghost-user").await.unwrap();
    let cookie = format!("{}={}", SESSION_COOKIE, session.session_id);

    let response = common::post_json_authed(
        &app,
        "/api/health/bmi",
        &cookie,
        json!({ "height": 170, "weight": 70 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use plant_registry::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), 4);
    app(state, 1024 * 1024)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

pub fn user() -> Value {
    json!({ "username": "Silvio", "password": "test", "plants": [] })
}

pub fn plant() -> Value {
    json!({ "name": "Sage", "description": "Sage plant" })
}

pub fn sensor() -> Value {
    json!({ "airTemperature": 23.3, "airHumidity": 87, "lightIntensity": 100, "soilMoisture": 42 })
}

pub fn sensor2() -> Value {
    json!({ "airTemperature": 42, "airHumidity": 100, "lightIntensity": 32, "soilMoisture": 9.0 })
}

pub fn attribute() -> Value {
    json!({ "score": 8.5, "attributes": ["green", "likes sun", "moist terrain"] })
}

/// A fresh app holding user Silvio with plant Sage.
pub async fn app_with_plant() -> Router {
    let app = test_app();
    assert_eq!(post(&app, "/user", user()).await.0, StatusCode::CREATED);
    assert_eq!(put(&app, "/user/Silvio", plant()).await.0, StatusCode::OK);
    app
}

pub fn assert_message(body: &Value, kind: &str) {
    assert_eq!(body["type"], kind, "unexpected body {body}");
    assert!(body["message"].is_string());
}

/// Body of a request rejected before any handler logic ran.
pub fn assert_invalid_body(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "unexpected body {body}");
    assert_eq!(body["error"]["code"], "invalid_body");
    assert!(body["error"]["message"].is_string());
}

//! Route definitions for the HTTP API.
//!
//! Resource routes are mounted under `/api/v1`; the health check sits at the
//! root. Every handler receives [`AppState`] through axum's `State` extractor.

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(user_routes())
        .merge(box_routes())
        .merge(coffee_log_routes())
        .merge(payment_routes())
        .merge(debt_routes());

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::users::list_users))
        .route("/users/:external_id", get(handlers::users::get_user))
}

fn box_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/boxes",
            get(handlers::boxes::list_boxes).post(handlers::boxes::create_box),
        )
        .route("/boxes/:id", get(handlers::boxes::get_box))
        .route("/boxes/:id/deactivate", post(handlers::boxes::deactivate_box))
}

fn coffee_log_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/coffee-logs",
            get(handlers::coffee_logs::list_logs).post(handlers::coffee_logs::log_coffee),
        )
        .route("/coffee-logs/:id", delete(handlers::coffee_logs::delete_log))
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/payments",
            get(handlers::payments::list_payments).post(handlers::payments::create_payment),
        )
        .route("/payments/:id/paid", post(handlers::payments::mark_paid))
}

fn debt_routes() -> Router<AppState> {
    Router::new().route("/debts", get(handlers::debts::get_debts))
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::api::error::ApiErrorResponse;
    use crate::test_utils::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let db = setup_test_db().await.unwrap();
        let app = build_router(AppState::new(db));

        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_two_cup_box_scenario() {
        let (db, alice, coffee_box) = setup_with_box(2, 10.0).await.unwrap();
        let bob = create_test_user(&db, "1002", "bob").await.unwrap();
        let app = build_router(AppState::new(db));
        let log_body = |user_id: i64| json!({ "user_id": user_id, "box_id": coffee_box.id });

        let response = send(&app, Method::POST, "/api/v1/coffee-logs", Some(log_body(alice.id))).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let uri = format!("/api/v1/boxes/{}", coffee_box.id);
        let stats: Value = read_json(send(&app, Method::GET, &uri, None).await).await;
        assert_eq!(stats["remaining_cups"], 1);
        assert_eq!(stats["box"]["name"], "Test Box");

        let response = send(&app, Method::POST, "/api/v1/coffee-logs", Some(log_body(alice.id))).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let uri = format!("/api/v1/debts?user_id={}&box_id={}", alice.id, coffee_box.id);
        let debts: Vec<Value> = read_json(send(&app, Method::GET, &uri, None).await).await;
        assert_eq!(debts[0]["amount"].as_f64(), Some(10.0));

        let response = send(&app, Method::POST, "/api/v1/coffee-logs", Some(log_body(bob.id))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ApiErrorResponse = read_json(response).await;
        assert_eq!(error.error, "EXHAUSTED");
    }

    #[tokio::test]
    async fn test_create_box_validation() {
        let (db, alice) = setup_with_user().await.unwrap();
        let app = build_router(AppState::new(db));

        let body = json!({ "name": "Empty", "total_cups": 0, "price": 5.0, "created_by": alice.id });
        let response = send(&app, Method::POST, "/api/v1/boxes", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let boxes: Vec<Value> = read_json(send(&app, Method::GET, "/api/v1/boxes", None).await).await;
        assert!(boxes.is_empty());
    }

    #[tokio::test]
    async fn test_deactivate_and_log_is_conflict() {
        let (db, alice, coffee_box) = setup_with_box(10, 5.0).await.unwrap();
        let app = build_router(AppState::new(db));

        let uri = format!("/api/v1/boxes/{}/deactivate", coffee_box.id);
        for _ in 0..2 {
            let response = send(&app, Method::POST, &uri, None).await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let body = json!({ "user_id": alice.id, "box_id": coffee_box.id });
        let response = send(&app, Method::POST, "/api/v1/coffee-logs", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ApiErrorResponse = read_json(response).await;
        assert_eq!(error.error, "INACTIVE");
    }

    #[tokio::test]
    async fn test_unknown_resources_are_not_found() {
        let db = setup_test_db().await.unwrap();
        let app = build_router(AppState::new(db));

        let response = send(&app, Method::GET, "/api/v1/boxes/999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::GET, "/api/v1/users/nobody", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::POST, "/api/v1/payments/42/paid", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, "/api/v1/coffee-logs/7", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_payment_lifecycle() {
        let (db, alice, coffee_box) = setup_with_box(4, 8.0).await.unwrap();
        let app = build_router(AppState::new(db));

        let body = json!({ "user_id": alice.id, "box_id": coffee_box.id, "amount": 2.0 });
        let response = send(&app, Method::POST, "/api/v1/payments", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = read_json(response).await;
        assert_eq!(created["is_paid"], false);

        let uri = format!("/api/v1/payments/{}/paid", created["id"]);
        let paid: Value = read_json(send(&app, Method::POST, &uri, None).await).await;
        assert_eq!(paid["is_paid"], true);
        assert!(!paid["paid_at"].is_null());

        let uri = format!("/api/v1/payments?box_id={}", coffee_box.id);
        let listed: Vec<Value> = read_json(send(&app, Method::GET, &uri, None).await).await;
        assert_eq!(listed.len(), 1);

        let response = send(&app, Method::GET, "/api/v1/payments", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_and_delete_logs() {
        let (db, alice, coffee_box) = setup_with_box(10, 5.0).await.unwrap();
        let log = create_test_log(&db, alice.id, coffee_box.id).await.unwrap();
        let app = build_router(AppState::new(db));

        let uri = format!("/api/v1/coffee-logs?user_id={}", alice.id);
        let logs: Vec<Value> = read_json(send(&app, Method::GET, &uri, None).await).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0]["box_name"], "Test Box");

        let delete_uri = format!("/api/v1/coffee-logs/{}", log.id);
        let response = send(&app, Method::DELETE, &delete_uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let logs: Vec<Value> = read_json(send(&app, Method::GET, &uri, None).await).await;
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_requests_get_json_errors() {
        let (db, alice) = setup_with_user().await.unwrap();
        let app = build_router(AppState::new(db));

        // Missing field in the body
        let body = json!({ "user_id": alice.id });
        let response = send(&app, Method::POST, "/api/v1/coffee-logs", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiErrorResponse = read_json(response).await;
        assert_eq!(error.error, "INVALID_ARGUMENT");

        // Query value of the wrong type
        let response = send(&app, Method::GET, "/api/v1/debts?user_id=abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiErrorResponse = read_json(response).await;
        assert_eq!(error.error, "INVALID_ARGUMENT");

        // Non-numeric path id
        let response = send(&app, Method::GET, "/api/v1/boxes/latest", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiErrorResponse = read_json(response).await;
        assert_eq!(error.error, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_zero_log_limit_returns_everything() {
        let (db, alice, coffee_box) = setup_with_box(10, 5.0).await.unwrap();
        for _ in 0..3 {
            create_test_log(&db, alice.id, coffee_box.id).await.unwrap();
        }
        let app = build_router(AppState::new(db));

        let uri = format!("/api/v1/coffee-logs?user_id={}&limit=0", alice.id);
        let logs: Vec<Value> = read_json(send(&app, Method::GET, &uri, None).await).await;
        assert_eq!(logs.len(), 3);
    }
}

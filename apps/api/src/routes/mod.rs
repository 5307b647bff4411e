//! # Route Handlers
//!
//! JSON endpoints over the per-session bill store.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST   /api/bills                                → new session        │
//! │  POST   /api/bills/:id/extraction                 → install items      │
//! │  PUT    /api/bills/:id/tax                        → set tax rate       │
//! │  PUT    /api/bills/:id/tip                        → set tip            │
//! │  GET    /api/bills/:id/summary                    → the split          │
//! │  POST   /api/bills/:id/people                     → add person         │
//! │  DELETE /api/bills/:id/people/:pid                → remove person      │
//! │  PUT    /api/bills/:id/people/:pid/name           → rename person      │
//! │  POST   /api/bills/:id/people/:pid/claims/:index  → toggle claim       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation responds with the refreshed summary so clients never
//! have to re-derive totals themselves.

mod bill;
mod people;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::Sessions;

/// Assembles the API router over a session store.
pub fn router(sessions: Sessions) -> Router {
    Router::new()
        .route("/api/bills", post(bill::create_bill))
        .route("/api/bills/:id/extraction", post(bill::post_extraction))
        .route("/api/bills/:id/tax", put(bill::put_tax_rate))
        .route("/api/bills/:id/tip", put(bill::put_tip))
        .route("/api/bills/:id/summary", get(bill::get_summary))
        .route("/api/bills/:id/people", post(people::add_person))
        .route(
            "/api/bills/:id/people/:person_id",
            delete(people::remove_person),
        )
        .route(
            "/api/bills/:id/people/:person_id/name",
            put(people::rename_person),
        )
        .route(
            "/api/bills/:id/people/:person_id/claims/:item_index",
            post(people::toggle_claim),
        )
        .with_state(sessions)
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn create_bill(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(empty_request("POST", "/api/bills"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["billId"].as_str().unwrap().to_string()
    }

    fn reference_receipt() -> Value {
        json!({
            "items": [
                {"item": "Burger", "price": 12.99},
                {"item": "Fries", "price": 4.50}
            ],
            "subtotalAmountOnBill": 17.49,
            "taxAmountOnBill": 1.50
        })
    }

    #[tokio::test]
    async fn test_full_split_flow() {
        let app = router(Sessions::new(16));
        let bill_id = create_bill(&app).await;

        // Install the extraction result; tax rate auto-derives to 8.58%
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/bills/{}/extraction", bill_id),
                reference_receipt(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["itemsExtracted"], 2);
        assert_eq!(body["summary"]["taxRateBps"], 858);

        // 15% tip
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/bills/{}/tip", bill_id),
                json!({"kind": "percentage", "value": "15"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Person 1 claims the burger
        let response = app
            .clone()
            .oneshot(empty_request(
                "POST",
                &format!("/api/bills/{}/people/1/claims/0", bill_id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["claimed"], true);

        // The whole worked example, through the wire
        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/bills/{}/summary", bill_id),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["subtotalCents"], 1749);
        assert_eq!(body["taxCents"], 150);
        assert_eq!(body["tipCents"], 262);
        assert_eq!(body["grandTotalCents"], 2161);
        assert_eq!(body["formatted"]["grandTotal"], "$21.61");

        let share = &body["people"][0];
        assert_eq!(share["subtotalCents"], 1299);
        assert_eq!(share["taxCents"], 111);
        assert_eq!(share["tipCents"], 195);
        assert_eq!(share["totalCents"], 1605);
    }

    #[tokio::test]
    async fn test_out_of_range_claim_is_rejected() {
        let app = router(Sessions::new(16));
        let bill_id = create_bill(&app).await;

        app.clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/bills/{}/extraction", bill_id),
                reference_receipt(),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(empty_request(
                "POST",
                &format!("/api/bills/{}/people/1/claims/2", bill_id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_ITEM_INDEX");
    }

    #[tokio::test]
    async fn test_unknown_bill_is_404() {
        let app = router(Sessions::new(16));
        let response = app
            .oneshot(empty_request(
                "GET",
                "/api/bills/00000000-0000-0000-0000-000000000000/summary",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_people_lifecycle() {
        let app = router(Sessions::new(16));
        let bill_id = create_bill(&app).await;

        // Add and rename a second person
        let response = app
            .clone()
            .oneshot(empty_request(
                "POST",
                &format!("/api/bills/{}/people", bill_id),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["personId"], 2);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/bills/{}/people/2/name", bill_id),
                json!({"name": "Alice"}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["people"][1]["name"], "Alice");

        // Remove them; removing again is a tolerated no-op
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(empty_request(
                    "DELETE",
                    &format!("/api/bills/{}/people/2", bill_id),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["people"].as_array().unwrap().len(), 1);
        }

        // The last person cannot be removed
        let response = app
            .clone()
            .oneshot(empty_request(
                "DELETE",
                &format!("/api/bills/{}/people/1", bill_id),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["people"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tolerant_tax_input() {
        let app = router(Sessions::new(16));
        let bill_id = create_bill(&app).await;

        app.clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/bills/{}/extraction", bill_id),
                reference_receipt(),
            ))
            .await
            .unwrap();

        // Garbage coerces to 0%, not an error
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/bills/{}/tax", bill_id),
                json!({"rate": "not a number"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["taxRateBps"], 0);
        assert_eq!(body["taxCents"], 0);

        // A manual override works
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/bills/{}/tax", bill_id),
                json!({"rate": "8.58"}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["taxCents"], 150);
    }
}

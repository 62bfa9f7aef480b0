//! Application router configuration.

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState, Error,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, update_category_endpoint,
    },
    endpoints,
    product::{
        create_product_endpoint, delete_product_endpoint, get_product_endpoint,
        list_products_endpoint, update_product_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_welcome_message))
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::PRODUCTS,
            get(list_products_endpoint).post(create_product_endpoint),
        )
        .route(
            endpoints::PRODUCT,
            get(get_product_endpoint)
                .put(update_product_endpoint)
                .delete(delete_product_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' greets the client.
async fn get_welcome_message() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the catalog API" }))
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, build_router};

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not create app state");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn shoes_and_boots_scenario() {
        let server = get_test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({ "name": "Shoes" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({ "id": 1, "name": "Shoes", "image_url": null }));

        let response = server
            .post("/api/products")
            .json(&json!({ "name": "Boot", "precio": 49.99, "stock": 10, "category_id": 1 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({
            "id": 1,
            "name": "Boot",
            "precio": 49.99,
            "stock": 10,
            "category_id": 1,
        }));

        let response = server.delete("/api/categories/1").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<serde_json::Value>()["count"], json!(1));

        server
            .delete("/api/products/1")
            .await
            .assert_status_ok();
        server
            .delete("/api/categories/1")
            .await
            .assert_status_ok();
        server
            .get("/api/categories/1")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn created_category_is_immediately_readable() {
        let server = get_test_server();

        let created = server
            .post("/api/categories")
            .json(&json!({ "name": "Hats", "image_url": "hats.png" }))
            .await
            .json::<serde_json::Value>();

        let response = server
            .get(&format!("/api/categories/{}", created["id"]))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "id": created["id"],
            "name": "Hats",
            "image_url": "hats.png",
            "products": [],
        }));
    }

    #[tokio::test]
    async fn partial_update_keeps_absent_fields() {
        let server = get_test_server();
        server
            .post("/api/categories")
            .json(&json!({ "name": "A", "image_url": "x" }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .put("/api/categories/1")
            .json(&json!({ "name": "B" }))
            .await
            .assert_json(&json!({ "id": 1, "name": "B", "image_url": "x" }));

        server
            .put("/api/categories/1")
            .json(&json!({ "image_url": null }))
            .await
            .assert_json(&json!({ "id": 1, "name": "B", "image_url": null }));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post("/api/products")
            .json(&json!({ "name": "Boot", "precio": "cheap", "stock": 1, "category_id": 1 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<serde_json::Value>();
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|message| message.starts_with("Invalid request body")),
            "got message {}",
            body["message"]
        );
    }

    #[tokio::test]
    async fn non_integer_id_is_json_bad_request() {
        let server = get_test_server();

        let response = server.get("/api/categories/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("content-type"), "application/json");
        let body = response.json::<serde_json::Value>();
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|message| message.starts_with("Invalid ID in request path")),
            "got message {}",
            body["message"]
        );
    }

    #[tokio::test]
    async fn out_of_range_id_is_json_bad_request() {
        let server = get_test_server();

        let response = server.delete("/api/products/99999999999999999999").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("content-type"), "application/json");
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/widgets").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "message": "The requested resource could not be found" }));
    }

    #[tokio::test]
    async fn product_list_shows_category_fields() {
        let server = get_test_server();
        server
            .post("/api/categories")
            .json(&json!({ "name": "Shoes", "image_url": "shoes.png" }))
            .await;
        server
            .post("/api/products")
            .json(&json!({ "name": "Boot", "price": 10, "stock": 0, "category_id": 1 }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/api/products").await;

        response.assert_status_ok();
        response.assert_json(&json!([{
            "id": 1,
            "name": "Boot",
            "precio": 10.0,
            "stock": 0,
            "category_id": 1,
            "category_name": "Shoes",
            "category_image": "shoes.png",
        }]));
    }
}

//! Endpoints for listing categories and viewing a single category.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{Category, CategoryDetail, CategoryId, get_all_categories, get_category},
    product::get_products_in_category,
};

/// The state needed for reading categories.
#[derive(Debug, Clone)]
pub struct CategoryViewState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every category.
pub async fn list_categories_endpoint(State(state): State<CategoryViewState>) -> Response {
    match list_categories(&state) {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_json_response("Could not retrieve categories"),
    }
}

/// Get a category along with the products in it.
pub async fn get_category_endpoint(
    path: Result<Path<CategoryId>, PathRejection>,
    State(state): State<CategoryViewState>,
) -> Response {
    match get_category_detail(path, &state) {
        Ok(detail) => Json(detail).into_response(),
        Err(error) => error.into_json_response("Could not retrieve category"),
    }
}

fn list_categories(state: &CategoryViewState) -> Result<Vec<Category>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_categories(&connection)
}

fn get_category_detail(
    path: Result<Path<CategoryId>, PathRejection>,
    state: &CategoryViewState,
) -> Result<CategoryDetail, Error> {
    let Path(category_id) = path?;
    let connection = lock_connection(&state.db_connection)?;

    let category = get_category(category_id, &connection)?;
    let products = get_products_in_category(category_id, &connection)?;

    Ok(CategoryDetail { category, products })
}

#[cfg(test)]
mod category_view_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        category::{CategoryName, create_category, get_category_endpoint, list_categories_endpoint},
        db::initialize,
        product::{NewProduct, ProductName, create_product},
        test_utils::{assert_content_type, parse_json_body},
    };

    use super::CategoryViewState;

    fn get_view_state() -> CategoryViewState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        CategoryViewState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn list_categories_returns_all_categories() {
        let state = get_view_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_category(CategoryName::new_unchecked("Shoes"), None, &connection).unwrap();
            create_category(
                CategoryName::new_unchecked("Hats"),
                Some("hats.png".to_owned()),
                &connection,
            )
            .unwrap();
        }

        let response = list_categories_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "application/json");
        assert_eq!(
            parse_json_body(response).await,
            json!([
                { "id": 1, "name": "Shoes", "image_url": null },
                { "id": 2, "name": "Hats", "image_url": "hats.png" },
            ])
        );
    }

    #[tokio::test]
    async fn list_categories_with_empty_table_returns_empty_array() {
        let response = list_categories_endpoint(State(get_view_state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(parse_json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn get_category_includes_products() {
        let state = get_view_state();
        let category_id = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(CategoryName::new_unchecked("Shoes"), None, &connection).unwrap();
            create_product(
                NewProduct {
                    name: ProductName::new_unchecked("Boot"),
                    price: 49.5,
                    stock: 10,
                    category_id: category.id,
                },
                &connection,
            )
            .unwrap();
            category.id
        };

        let response = get_category_endpoint(Ok(Path(category_id)), State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            parse_json_body(response).await,
            json!({
                "id": category_id,
                "name": "Shoes",
                "image_url": null,
                "products": [
                    { "id": 1, "name": "Boot", "precio": 49.5, "stock": 10 },
                ],
            })
        );
    }

    #[tokio::test]
    async fn get_missing_category_returns_not_found() {
        let response = get_category_endpoint(Ok(Path(404)), State(get_view_state())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            parse_json_body(response).await,
            json!({ "message": "Category not found" })
        );
    }
}

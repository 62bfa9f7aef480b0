//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{CategoryId, category_exists, db::delete_category},
    product::count_products_in_category,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a category that has no products.
///
/// Responds with 400 and the number of products if any product still belongs
/// to the category.
pub async fn delete_category_endpoint(
    path: Result<Path<CategoryId>, PathRejection>,
    State(state): State<DeleteCategoryState>,
) -> Response {
    match delete(path, &state) {
        Ok(()) => Json(json!({ "message": "Category deleted successfully" })).into_response(),
        Err(error) => error.into_json_response("Could not delete category"),
    }
}

fn delete(
    path: Result<Path<CategoryId>, PathRejection>,
    state: &DeleteCategoryState,
) -> Result<(), Error> {
    let Path(category_id) = path?;

    // The lock is held from the product count until the delete, so no product
    // can be added to the category in between.
    let connection = lock_connection(&state.db_connection)?;

    if !category_exists(category_id, &connection)? {
        return Err(Error::CategoryNotFound);
    }

    let product_count = count_products_in_category(category_id, &connection)?;
    if product_count > 0 {
        return Err(Error::CategoryHasProducts(product_count));
    }

    delete_category(category_id, &connection)
}

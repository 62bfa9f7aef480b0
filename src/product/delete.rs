//! Product deletion endpoint.

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
    product::{ProductId, db::delete_product},
};

/// The state needed for deleting a product.
#[derive(Debug, Clone)]
pub struct DeleteProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a product.
pub async fn delete_product_endpoint(
    path: Result<Path<ProductId>, PathRejection>,
    State(state): State<DeleteProductState>,
) -> Response {
    let result = path.map_err(Error::from).and_then(|Path(product_id)| {
        let connection = lock_connection(&state.db_connection)?;
        delete_product(product_id, &connection)
    });

    match result {
        Ok(()) => Json(json!({ "message": "Product deleted successfully" })).into_response(),
        Err(error) => error.into_json_response("Could not delete product"),
    }
}

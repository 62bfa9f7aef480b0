//! Endpoints for listing products and viewing a single product.

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
    product::{ProductId, ProductListing, get_all_product_listings, get_product_listing},
};

/// The state needed for reading products.
#[derive(Debug, Clone)]
pub struct ProductViewState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProductViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every product with the name and image of its category.
pub async fn list_products_endpoint(State(state): State<ProductViewState>) -> Response {
    match list_products(&state) {
        Ok(products) => Json(products).into_response(),
        Err(error) => error.into_json_response("Could not retrieve products"),
    }
}

/// Get a product with the name and image of its category.
pub async fn get_product_endpoint(
    path: Result<Path<ProductId>, PathRejection>,
    State(state): State<ProductViewState>,
) -> Response {
    let result = path.map_err(Error::from).and_then(|Path(product_id)| {
        let connection = lock_connection(&state.db_connection)?;
        get_product_listing(product_id, &connection)
    });

    match result {
        Ok(product) => Json(product).into_response(),
        Err(error) => error.into_json_response("Could not retrieve product"),
    }
}

fn list_products(state: &ProductViewState) -> Result<Vec<ProductListing>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_product_listings(&connection)
}

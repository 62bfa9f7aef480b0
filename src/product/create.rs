//! Product creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::category_exists,
    endpoints::{self, format_endpoint},
    product::{NewProductData, Product, create_product},
};

/// The state needed for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a product in an existing category.
///
/// All of `name`, `precio`, `stock` and `category_id` are required. Nothing is
/// written if the category does not exist.
pub async fn create_product_endpoint(
    State(state): State<CreateProductState>,
    body: Result<Json<NewProductData>, JsonRejection>,
) -> Response {
    match create(&state, body) {
        Ok(product) => (
            StatusCode::CREATED,
            [(LOCATION, format_endpoint(endpoints::PRODUCT, product.id))],
            Json(product),
        )
            .into_response(),
        Err(error) => error.into_json_response("Could not create product"),
    }
}

fn create(
    state: &CreateProductState,
    body: Result<Json<NewProductData>, JsonRejection>,
) -> Result<Product, Error> {
    let Json(data) = body?;
    let new_product = data.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    if !category_exists(new_product.category_id, &connection)? {
        return Err(Error::InvalidCategory(new_product.category_id));
    }

    create_product(new_product, &connection)
}

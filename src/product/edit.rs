//! Product update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::category_exists,
    product::{Product, ProductId, ProductUpdateData, product_exists, update_product},
};

/// The state needed for updating a product.
#[derive(Debug, Clone)]
pub struct UpdateProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Update any of `name`, `precio`, `stock` and `category_id` of a product.
///
/// Fields missing from the body are left unchanged. A new `category_id` must
/// refer to an existing category.
pub async fn update_product_endpoint(
    path: Result<Path<ProductId>, PathRejection>,
    State(state): State<UpdateProductState>,
    body: Result<Json<ProductUpdateData>, JsonRejection>,
) -> Response {
    match update(path, &state, body) {
        Ok(product) => Json(product).into_response(),
        Err(error) => error.into_json_response("Could not update product"),
    }
}

fn update(
    path: Result<Path<ProductId>, PathRejection>,
    state: &UpdateProductState,
    body: Result<Json<ProductUpdateData>, JsonRejection>,
) -> Result<Product, Error> {
    let Path(product_id) = path?;
    let Json(data) = body?;

    if data.is_empty() {
        return Err(Error::NothingToUpdate);
    }

    let connection = lock_connection(&state.db_connection)?;

    if !product_exists(product_id, &connection)? {
        return Err(Error::ProductNotFound);
    }

    if let Some(category_id) = data.category_id
        && !category_exists(category_id, &connection)?
    {
        return Err(Error::InvalidCategory(category_id));
    }

    update_product(product_id, data, &connection)
}

//! Category update endpoint.

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
    category::{Category, CategoryId, CategoryUpdateData, update_category},
};

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Update the `name` and/or `image_url` of a category.
///
/// Fields missing from the body are left unchanged, `"image_url": null`
/// removes the image.
pub async fn update_category_endpoint(
    path: Result<Path<CategoryId>, PathRejection>,
    State(state): State<UpdateCategoryState>,
    body: Result<Json<CategoryUpdateData>, JsonRejection>,
) -> Response {
    match update(path, &state, body) {
        Ok(category) => Json(category).into_response(),
        Err(error) => error.into_json_response("Could not update category"),
    }
}

fn update(
    path: Result<Path<CategoryId>, PathRejection>,
    state: &UpdateCategoryState,
    body: Result<Json<CategoryUpdateData>, JsonRejection>,
) -> Result<Category, Error> {
    let Path(category_id) = path?;
    let Json(data) = body?;

    if data.name.is_none() && data.image_url.is_none() {
        return Err(Error::NothingToUpdate);
    }

    let connection = lock_connection(&state.db_connection)?;

    update_category(category_id, data, &connection)
}

//! Category creation endpoint.

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
    category::{Category, CategoryName, NewCategoryData, create_category},
    endpoints::{self, format_endpoint},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a category from a JSON body with a `name` and an optional `image_url`.
///
/// Responds with 201 and the stored category, with the `Location` header set
/// to the new category's URI.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    body: Result<Json<NewCategoryData>, JsonRejection>,
) -> Response {
    match create(&state, body) {
        Ok(category) => (
            StatusCode::CREATED,
            [(
                LOCATION,
                format_endpoint(endpoints::CATEGORY, category.id),
            )],
            Json(category),
        )
            .into_response(),
        Err(error) => error.into_json_response("Could not create category"),
    }
}

fn create(
    state: &CreateCategoryState,
    body: Result<Json<NewCategoryData>, JsonRejection>,
) -> Result<Category, Error> {
    let Json(data) = body?;
    let name = data
        .name
        .as_deref()
        .ok_or_else(|| Error::MissingFields(vec!["name"]))
        .and_then(CategoryName::new)?;
    // An empty image URL is stored as no image.
    let image_url = data.image_url.filter(|url| !url.is_empty());

    let connection = lock_connection(&state.db_connection)?;

    create_category(name, image_url, &connection)
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        category::{Category, CategoryName, NewCategoryData, create_category_endpoint, get_category},
        db::initialize,
        test_utils::{get_header, parse_json_body},
    };

    use super::CreateCategoryState;

    fn get_create_state() -> CreateCategoryState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        CreateCategoryState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn can_create_category() {
        let state = get_create_state();
        let data = NewCategoryData {
            name: Some("Shoes".to_owned()),
            image_url: None,
        };

        let response = create_category_endpoint(State(state.clone()), Ok(Json(data))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(get_header(&response, "location"), "/api/categories/1");
        assert_eq!(
            parse_json_body(response).await,
            json!({ "id": 1, "name": "Shoes", "image_url": null })
        );
        assert_eq!(
            get_category(1, &state.db_connection.lock().unwrap()),
            Ok(Category {
                id: 1,
                name: CategoryName::new_unchecked("Shoes"),
                image_url: None,
            })
        );
    }

    #[tokio::test]
    async fn empty_image_url_is_stored_as_null() {
        let state = get_create_state();
        let data = NewCategoryData {
            name: Some("Shoes".to_owned()),
            image_url: Some(String::new()),
        };

        let response = create_category_endpoint(State(state), Ok(Json(data))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(parse_json_body(response).await["image_url"], json!(null));
    }

    #[tokio::test]
    async fn create_category_fails_on_missing_name() {
        let state = get_create_state();

        let response =
            create_category_endpoint(State(state.clone()), Ok(Json(NewCategoryData::default())))
                .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            parse_json_body(response).await,
            json!({ "message": "Missing required fields: name" })
        );
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let state = get_create_state();
        let data = NewCategoryData {
            name: Some("".to_owned()),
            image_url: Some("shoes.png".to_owned()),
        };

        let response = create_category_endpoint(State(state), Ok(Json(data))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            parse_json_body(response).await,
            json!({ "message": "Category name cannot be empty" })
        );
    }
}

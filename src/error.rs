//! Defines the app level error type and its conversion to JSON responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::category::CategoryId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used to create a product name.
    #[error("Product name cannot be empty")]
    EmptyProductName,

    /// The request body did not include fields that are required to create a
    /// resource.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// An update request did not include any of the fields that can be updated.
    #[error("At least one field is required to update")]
    NothingToUpdate,

    /// The category ID given for a product does not refer to a category.
    #[error("The category {0} does not exist")]
    InvalidCategory(CategoryId),

    /// The request body could not be parsed as the expected JSON object.
    #[error("Invalid request body: {0}")]
    InvalidJson(String),

    /// The ID in the request path is not a valid integer ID.
    #[error("Invalid ID in request path: {0}")]
    InvalidPathId(String),

    /// The requested category does not exist.
    #[error("Category not found")]
    CategoryNotFound,

    /// The requested product does not exist.
    #[error("Product not found")]
    ProductNotFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("The requested resource could not be found")]
    NotFound,

    /// Tried to delete a category that products still refer to.
    ///
    /// Holds the number of products in the category.
    #[error("The category cannot be deleted because it has associated products")]
    CategoryHasProducts(i64),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPathId(rejection.body_text())
    }
}

impl Error {
    /// Convert the error into a JSON response with a matching status code.
    ///
    /// `failure_message` describes the operation that failed and is only sent
    /// for infrastructure errors, alongside the underlying error text.
    /// Client errors are described by their own message.
    pub fn into_json_response(self, failure_message: &str) -> Response {
        match self {
            Error::EmptyCategoryName
            | Error::EmptyProductName
            | Error::MissingFields(_)
            | Error::NothingToUpdate
            | Error::InvalidCategory(_)
            | Error::InvalidJson(_)
            | Error::InvalidPathId(_) => message_response(StatusCode::BAD_REQUEST, &self),
            Error::CategoryNotFound | Error::ProductNotFound | Error::NotFound => {
                message_response(StatusCode::NOT_FOUND, &self)
            }
            Error::CategoryHasProducts(count) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": self.to_string(), "count": count })),
            )
                .into_response(),
            Error::SqlError(_) | Error::DatabaseLockError => {
                tracing::error!("{failure_message}: {self}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": failure_message, "error": self.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_json_response("Something went wrong")
    }
}

fn message_response(status: StatusCode, error: &Error) -> Response {
    (status, Json(json!({ "message": error.to_string() }))).into_response()
}

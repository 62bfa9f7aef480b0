//! Core product domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, category::CategoryId};

/// A validated, non-empty product name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductName(String);

impl ProductName {
    /// Create a product name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyProductName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyProductName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a product name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a product.
pub type ProductId = i64;

/// A sellable item that belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i64,
    pub category_id: CategoryId,
}

/// A product joined with the name and image of its category.
///
/// The category fields are `None` if the category no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListing {
    pub id: ProductId,
    pub name: ProductName,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i64,
    pub category_id: CategoryId,
    pub category_name: Option<String>,
    pub category_image: Option<String>,
}

/// The fields of a product shown when listing the products in a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: ProductName,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i64,
}

/// A product that has passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub price: f64,
    pub stock: i64,
    pub category_id: CategoryId,
}

/// Request body for creating a product.
#[derive(Debug, Default, Deserialize)]
pub struct NewProductData {
    pub name: Option<String>,
    #[serde(rename = "precio", alias = "price")]
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category_id: Option<CategoryId>,
}

impl NewProductData {
    /// Check that every field is present and the name is not empty.
    ///
    /// Zero is a valid price and stock level, only absent fields are rejected.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingFields] listing every absent field, or
    /// [Error::EmptyProductName] if the name is blank.
    pub fn validate(self) -> Result<NewProduct, Error> {
        match self {
            NewProductData {
                name: Some(name),
                price: Some(price),
                stock: Some(stock),
                category_id: Some(category_id),
            } => Ok(NewProduct {
                name: ProductName::new(&name)?,
                price,
                stock,
                category_id,
            }),
            data => {
                let missing_fields = [
                    ("name", data.name.is_none()),
                    ("precio", data.price.is_none()),
                    ("stock", data.stock.is_none()),
                    ("category_id", data.category_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, is_missing)| is_missing.then_some(field))
                .collect();

                Err(Error::MissingFields(missing_fields))
            }
        }
    }
}

/// Request body for updating a product. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct ProductUpdateData {
    pub name: Option<String>,
    #[serde(rename = "precio", alias = "price")]
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category_id: Option<CategoryId>,
}

impl ProductUpdateData {
    /// Whether none of the updatable fields are present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category_id.is_none()
    }
}

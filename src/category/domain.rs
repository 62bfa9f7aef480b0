//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, partial_update::deserialize_present, product::ProductSummary};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A grouping of products, e.g. 'Shoes'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub image_url: Option<String>,
}

/// A category along with every product in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<ProductSummary>,
}

/// Request body for creating a category.
#[derive(Debug, Default, Deserialize)]
pub struct NewCategoryData {
    pub name: Option<String>,
    pub image_url: Option<String>,
}

/// Request body for updating a category.
///
/// `image_url` distinguishes an absent field, which leaves the image alone,
/// from an explicit `null`, which clears it.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryUpdateData {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub image_url: Option<Option<String>>,
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, category::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        let name = CategoryName::new("");

        assert_eq!(name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let name = CategoryName::new("\n\t \r");

        assert_eq!(name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_trims_whitespace() {
        let name = CategoryName::new("  Shoes ").unwrap();

        assert_eq!(name.as_ref(), "Shoes");
    }
}

//! Database operations for categories.

use rusqlite::{Connection, OptionalExtension, Row, types::Value};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName, CategoryUpdateData},
    partial_update::PartialUpdate,
};

const CATEGORY_COLUMNS: &str = "id, name, image_url";

/// Create a category and return it with its generated ID.
pub fn create_category(
    name: CategoryName,
    image_url: Option<String>,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(&format!(
            "INSERT INTO category (name, image_url) VALUES (?1, ?2) RETURNING {CATEGORY_COLUMNS};"
        ))?
        .query_row((name.as_ref(), image_url), map_row)
        .map_err(Error::from)
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if there is no category with the ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM category WHERE id = :id;"
        ))?
        .query_row(&[(":id", &category_id)], map_row)
        .optional()?
        .ok_or(Error::CategoryNotFound)
}

/// Retrieve all categories in the order they were created.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM category ORDER BY id ASC;"
        ))?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(Error::from))
        .collect()
}

/// Check whether a category with the given ID exists.
pub fn category_exists(category_id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM category WHERE id = ?1);",
            [category_id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Update the fields of a category that are present in `update` and return
/// the updated category.
///
/// # Errors
/// Returns [Error::NothingToUpdate] if no fields are present,
/// [Error::EmptyCategoryName] if the new name is empty and
/// [Error::CategoryNotFound] if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    update: CategoryUpdateData,
    connection: &Connection,
) -> Result<Category, Error> {
    let name = update
        .name
        .as_deref()
        .map(CategoryName::new)
        .transpose()?
        .map(|name| name.as_ref().to_owned());
    let image_url = update
        .image_url
        .map(|maybe_url| maybe_url.map(Value::Text).unwrap_or(Value::Null));

    PartialUpdate::new("category")
        .set_if_present("name", name)
        .set_if_present("image_url", image_url)
        .execute(category_id, CATEGORY_COLUMNS, connection, map_row)?
        .ok_or(Error::CategoryNotFound)
}

/// Delete a category by ID.
///
/// This does not check for products in the category, callers must do that
/// first.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if the category doesn't exist.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound);
    }

    Ok(())
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            image_url TEXT
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let image_url = row.get(2)?;

    Ok(Category {
        id,
        name,
        image_url,
    })
}

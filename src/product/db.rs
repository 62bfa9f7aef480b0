//! Database operations for products.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::CategoryId,
    partial_update::PartialUpdate,
    product::{
        NewProduct, Product, ProductId, ProductListing, ProductName, ProductSummary,
        ProductUpdateData,
    },
};

const PRODUCT_COLUMNS: &str = "id, name, precio, stock, category_id";

const PRODUCT_LISTING_QUERY: &str = "SELECT product.id, product.name, product.precio, \
    product.stock, product.category_id, category.name, category.image_url \
    FROM product \
    LEFT JOIN category ON product.category_id = category.id";

/// Create a product and return it with its generated ID.
///
/// This does not check that the category exists, callers must do that first.
pub fn create_product(product: NewProduct, connection: &Connection) -> Result<Product, Error> {
    connection
        .prepare(&format!(
            "INSERT INTO product (name, precio, stock, category_id) VALUES (?1, ?2, ?3, ?4) \
            RETURNING {PRODUCT_COLUMNS};"
        ))?
        .query_row(
            (
                product.name.as_ref(),
                product.price,
                product.stock,
                product.category_id,
            ),
            map_product_row,
        )
        .map_err(Error::from)
}

/// Retrieve a single product joined with its category.
///
/// # Errors
/// Returns [Error::ProductNotFound] if there is no product with the ID.
pub fn get_product_listing(
    product_id: ProductId,
    connection: &Connection,
) -> Result<ProductListing, Error> {
    connection
        .prepare(&format!("{PRODUCT_LISTING_QUERY} WHERE product.id = :id;"))?
        .query_row(&[(":id", &product_id)], map_listing_row)
        .optional()?
        .ok_or(Error::ProductNotFound)
}

/// Retrieve all products joined with their categories in the order they were
/// created.
pub fn get_all_product_listings(connection: &Connection) -> Result<Vec<ProductListing>, Error> {
    connection
        .prepare(&format!("{PRODUCT_LISTING_QUERY} ORDER BY product.id ASC;"))?
        .query_map([], map_listing_row)?
        .map(|maybe_product| maybe_product.map_err(Error::from))
        .collect()
}

/// Retrieve the products in a category.
pub fn get_products_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<ProductSummary>, Error> {
    connection
        .prepare(
            "SELECT id, name, precio, stock FROM product \
            WHERE category_id = :category_id ORDER BY id ASC;",
        )?
        .query_map(&[(":category_id", &category_id)], |row| {
            let raw_name: String = row.get(1)?;

            Ok(ProductSummary {
                id: row.get(0)?,
                name: ProductName::new_unchecked(&raw_name),
                price: row.get(2)?,
                stock: row.get(3)?,
            })
        })?
        .map(|maybe_product| maybe_product.map_err(Error::from))
        .collect()
}

/// Count the products that refer to a category.
pub fn count_products_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<i64, Error> {
    connection
        .query_row(
            "SELECT COUNT(*) FROM product WHERE category_id = ?1;",
            [category_id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Check whether a product with the given ID exists.
pub fn product_exists(product_id: ProductId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM product WHERE id = ?1);",
            [product_id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Update the fields of a product that are present in `update` and return the
/// updated product.
///
/// This does not check that a new category exists, callers must do that first.
///
/// # Errors
/// Returns [Error::NothingToUpdate] if no fields are present,
/// [Error::EmptyProductName] if the new name is empty and
/// [Error::ProductNotFound] if the product doesn't exist.
pub fn update_product(
    product_id: ProductId,
    update: ProductUpdateData,
    connection: &Connection,
) -> Result<Product, Error> {
    let name = update
        .name
        .as_deref()
        .map(ProductName::new)
        .transpose()?
        .map(|name| name.as_ref().to_owned());

    PartialUpdate::new("product")
        .set_if_present("name", name)
        .set_if_present("precio", update.price)
        .set_if_present("stock", update.stock)
        .set_if_present("category_id", update.category_id)
        .execute(product_id, PRODUCT_COLUMNS, connection, map_product_row)?
        .ok_or(Error::ProductNotFound)
}

/// Delete a product by ID.
///
/// # Errors
/// Returns [Error::ProductNotFound] if the product doesn't exist.
pub fn delete_product(product_id: ProductId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM product WHERE id = ?1", [product_id])?;

    if rows_affected == 0 {
        return Err(Error::ProductNotFound);
    }

    Ok(())
}

/// Initialize the product table and indexes.
///
/// `category_id` has no foreign key constraint, the handlers check that the
/// category exists before writing a product.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            precio REAL NOT NULL,
            stock INTEGER NOT NULL,
            category_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_product_category_id ON product(category_id);",
    )?;

    Ok(())
}

fn map_product_row(row: &Row) -> Result<Product, rusqlite::Error> {
    let raw_name: String = row.get(1)?;

    Ok(Product {
        id: row.get(0)?,
        name: ProductName::new_unchecked(&raw_name),
        price: row.get(2)?,
        stock: row.get(3)?,
        category_id: row.get(4)?,
    })
}

fn map_listing_row(row: &Row) -> Result<ProductListing, rusqlite::Error> {
    let raw_name: String = row.get(1)?;

    Ok(ProductListing {
        id: row.get(0)?,
        name: ProductName::new_unchecked(&raw_name),
        price: row.get(2)?,
        stock: row.get(3)?,
        category_id: row.get(4)?,
        category_name: row.get(5)?,
        category_image: row.get(6)?,
    })
}

//! Products are the sellable items in a category.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_product_endpoint;
pub use db::{
    count_products_in_category, create_product, create_product_table, get_all_product_listings,
    get_product_listing, get_products_in_category, product_exists, update_product,
};
pub use delete::delete_product_endpoint;
pub use domain::{
    NewProduct, NewProductData, Product, ProductId, ProductListing, ProductName, ProductSummary,
    ProductUpdateData,
};
pub use edit::update_product_endpoint;
pub use list::{get_product_endpoint, list_products_endpoint};

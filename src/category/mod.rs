//! Categories group products, e.g. 'Shoes' or 'Hats'.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_category_endpoint;
pub use db::{
    category_exists, create_category, create_category_table, get_all_categories, get_category,
    update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{
    Category, CategoryDetail, CategoryId, CategoryName, CategoryUpdateData, NewCategoryData,
};
pub use edit::update_category_endpoint;
pub use list::{get_category_endpoint, list_categories_endpoint};

pub mod articles;
pub mod auth;
pub mod categories;
pub mod courses;
pub mod notes;
pub mod reading;
pub mod toc_items;
pub mod users;

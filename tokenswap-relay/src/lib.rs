pub mod middleware;
pub mod validators;
pub mod infrastructure;
pub mod utils;
pub mod app;
pub mod domain;
pub mod api;

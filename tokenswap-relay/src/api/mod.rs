pub mod handlers;

pub use handlers::token_price::{get_supported_tokens, get_token_price, health};

pub mod token_price;

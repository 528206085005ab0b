pub mod token_query;

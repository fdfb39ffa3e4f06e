pub mod query_builder;
pub mod validation;

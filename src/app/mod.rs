pub mod form;
pub mod query;
pub mod resource;
pub mod store;
pub mod use_case;

pub mod api;
pub mod shelf;
pub mod store;

pub mod app;
pub mod error;
pub mod extractors;
pub mod format;
pub mod pagination;
pub mod quiz;
pub mod routes;

pub mod app;
pub mod config;
pub mod convert;
pub mod error;
pub mod grouping;
pub mod message;
pub mod model;
pub mod operators;
pub mod parsing;
pub mod utils;
pub mod views;

pub use error::Error;
pub use model::SeriesTable;

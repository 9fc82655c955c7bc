pub mod table_view;

pub use table_view::{render, render_error};

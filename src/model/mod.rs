pub mod groups;
pub mod header;
pub mod loader;
pub mod series;
pub mod table;

#[cfg(test)]
pub mod fixtures;

pub use groups::{Groups, IGNORED, UNGROUPED};
pub use header::{AttrValue, Attributes, HeaderRecord};
pub use loader::{DicomHeaderReader, HeaderReader};
pub use series::{Series, SeriesNumber};
pub use table::SeriesTable;

pub mod api;
pub mod csv_export;
pub mod fetch;
pub mod file;
pub mod sample;

pub use api::LoadError;
pub use csv_export::export_csv;
pub use fetch::{Fetcher, Source};
pub use file::{save_svg, ExportError};

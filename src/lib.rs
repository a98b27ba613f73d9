pub mod error;
pub mod geometry_type;
pub mod read_features;
pub mod read_kml;
pub mod report;
pub mod summary;
pub mod typst;

pub use error::{Error, Result};

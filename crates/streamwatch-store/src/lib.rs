pub mod error;
pub mod index;
pub mod metadata;
pub mod timeseries;

pub use error::StoreError;
pub use index::append_index;
pub use metadata::{write_metadata, MetadataEvent, MetadataRecord};
pub use timeseries::{read_series, series_path, SeriesWriter};

pub mod csv_output;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{CvRecord, FlatRecord, CSV_COLUMNS};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, Structurer};
pub use crate::utils::error::Result;

mod error;
mod fmi_history;
mod observations;
mod types;

pub use error::FmiHistoryError;
pub use fmi_history::*;

pub use observations::error::ObservationError;
pub use observations::extractor::{extract_time_value_pairs, TimeValuePair};

pub use types::feature::Feature;
pub use types::history_frame::*;
pub use types::month::{Month, ObservationWindow};
pub use types::observations::MonthObservations;

use crate::observations::error::ObservationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FmiHistoryError {
    #[error(transparent)]
    Observation(#[from] ObservationError),

    #[error("Invalid WFS endpoint '{0}'")]
    InvalidEndpoint(String, #[source] url::ParseError),
}

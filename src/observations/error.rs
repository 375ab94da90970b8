use crate::types::feature::Feature;
use crate::types::month::Month;
use chrono::NaiveDateTime;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("Response for place '{place}', feature {feature} is not valid UTF-8")]
    Utf8 {
        place: String,
        feature: Feature,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Malformed XML in response for place '{place}', feature {feature}")]
    XmlRead {
        place: String,
        feature: Feature,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Service exception for place '{place}', feature {feature}: {message}")]
    ServiceException {
        place: String,
        feature: Feature,
        message: String,
    },

    #[error("No measurement time series in response for place '{place}', feature {feature}")]
    MissingTimeseries { place: String, feature: Feature },

    #[error("Unexpected document shape for place '{place}', feature {feature}: {message}")]
    UnexpectedShape {
        place: String,
        feature: Feature,
        message: String,
    },

    #[error("Invalid timestamp '{text}' in response for place '{place}', feature {feature}")]
    TimestampParse {
        place: String,
        feature: Feature,
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid measurement value '{text}' in response for place '{place}', feature {feature}")]
    ValueParse {
        place: String,
        feature: Feature,
        text: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Month {month} does not denote a representable calendar month")]
    InvalidMonth { month: Month },

    #[error("Month {month} has not fully elapsed; query only past, completed months")]
    MonthNotComplete { month: Month },

    #[error("Month range {start} to {end} is empty")]
    EmptyMonthRange { start: Month, end: Month },

    #[error(
        "Expected {expected} hourly values for place '{place}', feature {feature} \
         in the window starting {window_start}, got {found}"
    )]
    SeriesLength {
        place: String,
        feature: Feature,
        window_start: NaiveDateTime,
        expected: usize,
        found: usize,
    },

    #[error("Accumulated {found} values for feature {feature}, expected {expected}")]
    TableLength {
        feature: Feature,
        expected: usize,
        found: usize,
    },

    #[error("Failed building the history table: {0}")]
    DataFrame(#[from] PolarsError),
}

//! Extraction of (timestamp, value) measurement pairs from a WFS
//! time-value-pair document.

use crate::observations::error::ObservationError;
use crate::types::feature::Feature;
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

/// One observation instant paired with its measured value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeValuePair {
    pub time: DateTime<Utc>,
    pub value: f64,
}

/// Extracts the ordered measurement pairs from a time-value-pair document.
///
/// The traversal is keyed on element names (`MeasurementTimeseries`,
/// `MeasurementTVP`, `time`, `value`) rather than nesting positions, so an
/// unexpected document shape fails instead of reading the wrong field. A
/// service `ExceptionReport` delivered in place of the resource body is
/// reported with its exception text; a document without any measurement
/// time series is an error, never an empty result.
///
/// `place` and `feature` identify the originating query and only provide
/// error context.
pub fn extract_time_value_pairs(
    xml: &[u8],
    place: &str,
    feature: Feature,
) -> Result<Vec<TimeValuePair>, ObservationError> {
    let text = std::str::from_utf8(xml).map_err(|source| ObservationError::Utf8 {
        place: place.to_string(),
        feature,
        source,
    })?;

    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut pairs = Vec::new();
    let mut timeseries_seen = 0usize;
    let mut in_pair = false;
    let mut current_time: Option<DateTime<Utc>> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"ExceptionText" => {
                    let message = reader.read_text(e.name()).map_err(|source| {
                        ObservationError::XmlRead {
                            place: place.to_string(),
                            feature,
                            source,
                        }
                    })?;
                    return Err(ObservationError::ServiceException {
                        place: place.to_string(),
                        feature,
                        message: message.trim().to_string(),
                    });
                }
                b"MeasurementTimeseries" => timeseries_seen += 1,
                b"MeasurementTVP" => {
                    in_pair = true;
                    current_time = None;
                }
                b"time" if in_pair => {
                    let text = reader.read_text(e.name()).map_err(|source| {
                        ObservationError::XmlRead {
                            place: place.to_string(),
                            feature,
                            source,
                        }
                    })?;
                    let stamp = DateTime::parse_from_rfc3339(text.trim()).map_err(|source| {
                        ObservationError::TimestampParse {
                            place: place.to_string(),
                            feature,
                            text: text.trim().to_string(),
                            source,
                        }
                    })?;
                    current_time = Some(stamp.with_timezone(&Utc));
                }
                b"value" if in_pair => {
                    let text = reader.read_text(e.name()).map_err(|source| {
                        ObservationError::XmlRead {
                            place: place.to_string(),
                            feature,
                            source,
                        }
                    })?;
                    let trimmed = text.trim();
                    // FMI encodes missing measurements as "NaN"; they parse
                    // to f64::NAN and must keep their hour slot.
                    let value: f64 =
                        trimmed
                            .parse()
                            .map_err(|source| ObservationError::ValueParse {
                                place: place.to_string(),
                                feature,
                                text: trimmed.to_string(),
                                source,
                            })?;
                    match current_time {
                        Some(time) => pairs.push(TimeValuePair { time, value }),
                        None => {
                            return Err(ObservationError::UnexpectedShape {
                                place: place.to_string(),
                                feature,
                                message: "measurement value without a preceding time".to_string(),
                            })
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"MeasurementTVP" {
                    in_pair = false;
                    current_time = None;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(source) => {
                return Err(ObservationError::XmlRead {
                    place: place.to_string(),
                    feature,
                    source,
                })
            }
        }
        buf.clear();
    }

    if timeseries_seen == 0 {
        return Err(ObservationError::MissingTimeseries {
            place: place.to_string(),
            feature,
        });
    }

    Ok(pairs)
}

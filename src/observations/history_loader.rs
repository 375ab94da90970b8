use crate::observations::error::ObservationError;
use crate::observations::extractor::extract_time_value_pairs;
use crate::observations::wfs_client::WfsClient;
use crate::types::feature::Feature;
use crate::types::history_frame::{COL_PLACE, COL_TIME};
use crate::types::month::Month;
use crate::types::observations::MonthObservations;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use url::Url;

/// Loads observation history through the WFS stored query, one
/// week-sized window and one feature at a time, and assembles the
/// accumulated series into a single table.
#[derive(Debug)]
pub(crate) struct HistoryLoader {
    client: WfsClient,
}

impl HistoryLoader {
    pub(crate) fn new(endpoint: Url) -> Self {
        Self {
            client: WfsClient::new(endpoint),
        }
    }

    /// Loads every feature for one fully elapsed month.
    ///
    /// Each returned series has exactly one value per hour of the month;
    /// a response of any other size is a [`ObservationError::SeriesLength`]
    /// error rather than a silent misalignment.
    pub(crate) async fn load_full_month(
        &self,
        month: Month,
        place: &str,
    ) -> Result<MonthObservations, ObservationError> {
        ensure_complete(month, Utc::now().date_naive())?;
        let windows = month
            .week_windows()
            .ok_or(ObservationError::InvalidMonth { month })?;

        info!("Loading observations for {} in {}", place, month);

        let mut observations = MonthObservations::new();
        for window in &windows {
            for feature in Feature::ALL {
                debug!(
                    "Requesting {} for {} from {} to {}",
                    feature, place, window.start, window.end
                );
                let url = self.client.stored_query_url(feature, place, window);
                let body = self.client.fetch(url).await?;
                let pairs = extract_time_value_pairs(&body, place, feature)?;
                if pairs.len() != window.hours() {
                    return Err(ObservationError::SeriesLength {
                        place: place.to_string(),
                        feature,
                        window_start: window.start,
                        expected: window.hours(),
                        found: pairs.len(),
                    });
                }
                // Timestamps are reconstructed arithmetically at assembly;
                // only the values are kept.
                observations.append(feature, pairs.into_iter().map(|pair| pair.value));
            }
        }

        Ok(observations)
    }

    /// Loads the inclusive month range for every place and assembles the
    /// cross product of (hour, place) rows.
    ///
    /// The month count is exact calendar arithmetic over the inclusive
    /// range; an empty range is an error.
    pub(crate) async fn load_history(
        &self,
        start: Month,
        end: Month,
        places: &[String],
    ) -> Result<DataFrame, ObservationError> {
        let n_months = start.span_to(end);
        if n_months < 1 {
            return Err(ObservationError::EmptyMonthRange { start, end });
        }
        let first_day = start
            .first_day()
            .ok_or(ObservationError::InvalidMonth { month: start })?;
        let last_day = end
            .last_day()
            .ok_or(ObservationError::InvalidMonth { month: end })?;
        let total_hours = ((last_day - first_day).num_days() + 1) as usize * 24;

        let mut accumulators: HashMap<Feature, Vec<f64>> =
            Feature::ALL.iter().map(|f| (*f, Vec::new())).collect();

        for place in places {
            let mut month = start;
            for _ in 0..n_months {
                let mut observations = self.load_full_month(month, place).await?;
                for feature in Feature::ALL {
                    let values = observations.take(feature);
                    accumulators.entry(feature).or_default().extend(values);
                }
                month = month.next();
            }
        }

        // Every feature column must line up with the synthesized Time and
        // Place columns before the cross product is assembled.
        let expected = total_hours * places.len();
        for feature in Feature::ALL {
            let found = accumulators.get(&feature).map(Vec::len).unwrap_or(0);
            if found != expected {
                return Err(ObservationError::TableLength {
                    feature,
                    expected,
                    found,
                });
            }
        }

        info!(
            "Assembling history table: {} places x {} hours",
            places.len(),
            total_hours
        );
        let origin = first_day
            .and_hms_opt(0, 0, 0)
            .ok_or(ObservationError::InvalidMonth { month: start })?;
        assemble_frame(origin, total_hours, places, accumulators)
    }
}

/// The month must have fully elapsed before `today`.
fn ensure_complete(month: Month, today: NaiveDate) -> Result<(), ObservationError> {
    let last_day = month
        .last_day()
        .ok_or(ObservationError::InvalidMonth { month })?;
    if last_day >= today {
        return Err(ObservationError::MonthNotComplete { month });
    }
    Ok(())
}

/// Builds the final table from the per-feature accumulators plus the
/// synthesized Time and Place columns, in the canonical column order.
fn assemble_frame(
    origin: NaiveDateTime,
    total_hours: usize,
    places: &[String],
    mut accumulators: HashMap<Feature, Vec<f64>>,
) -> Result<DataFrame, ObservationError> {
    let hour_stamps: Vec<NaiveDateTime> = (0..total_hours as i64)
        .map(|h| origin + Duration::hours(h))
        .collect();

    // The identical hourly sequence repeats once per place; each place
    // label repeats contiguously for the whole sequence.
    let mut time_values = Vec::with_capacity(total_hours * places.len());
    let mut place_values = Vec::with_capacity(total_hours * places.len());
    for place in places {
        time_values.extend_from_slice(&hour_stamps);
        place_values.extend(std::iter::repeat(place.as_str()).take(total_hours));
    }

    let mut columns = Vec::with_capacity(2 + Feature::TABLE_ORDER.len());
    columns.push(
        DatetimeChunked::from_naive_datetime(COL_TIME.into(), time_values, TimeUnit::Milliseconds)
            .into_series()
            .into_column(),
    );
    columns.push(Series::new(COL_PLACE.into(), place_values).into_column());
    for feature in Feature::TABLE_ORDER {
        let values = accumulators.remove(&feature).unwrap_or_default();
        columns.push(Series::new(feature.name().into(), values).into_column());
    }

    Ok(DataFrame::new(columns)?)
}

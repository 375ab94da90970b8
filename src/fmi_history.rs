//! This module provides the main entry point for loading historic weather
//! observations from the FMI open data WFS. Observations are requested per
//! place name over an inclusive range of calendar months and returned as a
//! single table indexed by timestamp and place.

use crate::error::FmiHistoryError;
use crate::observations::history_loader::HistoryLoader;
use crate::types::history_frame::HistoryFrame;
use crate::types::month::Month;
use crate::types::observations::MonthObservations;
use bon::bon;
use url::Url;

/// The public FMI open data WFS endpoint.
pub const DEFAULT_WFS_ENDPOINT: &str = "https://opendata.fmi.fi/wfs";

/// The main client for loading FMI observation history.
///
/// All requests run strictly sequentially: one stored-query round trip per
/// (week-sized window, feature) pair completes before the next begins. The
/// client holds no state between calls, so repeating a call against an
/// unchanged upstream dataset yields an identical result.
///
/// # Examples
///
/// ```rust
/// # use fmi_history::{FmiHistory, FmiHistoryError};
/// # async fn run() -> Result<(), FmiHistoryError> {
/// let client = FmiHistory::new()?;
///
/// let history = client
///     .history()
///     .start((2020, 1))
///     .end((2020, 1))
///     .places(vec!["Turku".to_string(), "Helsinki".to_string()])
///     .call()
///     .await?;
///
/// // 2 places x 31 days x 24 hours
/// assert_eq!(history.frame.height(), 1488);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FmiHistory {
    loader: HistoryLoader,
}

#[bon]
impl FmiHistory {
    /// Creates a client against the public FMI endpoint
    /// ([`DEFAULT_WFS_ENDPOINT`]).
    ///
    /// # Errors
    ///
    /// Does not fail in practice; the signature matches
    /// [`FmiHistory::with_endpoint`] so the two construction paths are
    /// interchangeable.
    pub fn new() -> Result<Self, FmiHistoryError> {
        Self::with_endpoint(DEFAULT_WFS_ENDPOINT)
    }

    /// Creates a client against a custom WFS endpoint.
    ///
    /// Useful for regional mirrors or a local test server; the stored-query
    /// parameter set is the same for any endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FmiHistoryError::InvalidEndpoint`] if `endpoint` is not a
    /// parseable absolute URL.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use fmi_history::{FmiHistory, FmiHistoryError};
    /// # fn run() -> Result<(), FmiHistoryError> {
    /// let client = FmiHistory::with_endpoint("http://localhost:8080/wfs")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_endpoint(endpoint: &str) -> Result<Self, FmiHistoryError> {
        let url = Url::parse(endpoint)
            .map_err(|e| FmiHistoryError::InvalidEndpoint(endpoint.to_string(), e))?;
        Ok(Self {
            loader: HistoryLoader::new(url),
        })
    }

    /// Loads the observation history for an inclusive month range and a
    /// list of places, assembled into a [`HistoryFrame`].
    ///
    /// The result has one row per (hour, place) pair, ordered by place
    /// (outer, in input order) then time (inner, chronological), with the
    /// hourly timestamp sequence starting at 00:00 on the first day of
    /// `start` and ending at 23:00 on the last day of `end`.
    ///
    /// This method uses a builder pattern: call `.start(..)`, `.end(..)`
    /// and `.places(..)`, then `.call().await`.
    ///
    /// # Errors
    ///
    /// * [`ObservationError::EmptyMonthRange`] if `end` lies before `start`.
    /// * [`ObservationError::MonthNotComplete`] if any month in the range
    ///   has not fully elapsed.
    /// * Transport, parse and length-validation errors from the underlying
    ///   round trips; the first failure aborts the whole load and no
    ///   partial table is returned.
    ///
    /// [`ObservationError::EmptyMonthRange`]: crate::ObservationError::EmptyMonthRange
    /// [`ObservationError::MonthNotComplete`]: crate::ObservationError::MonthNotComplete
    #[builder]
    pub async fn history(
        &self,
        #[builder(into)] start: Month,
        #[builder(into)] end: Month,
        places: Vec<String>,
    ) -> Result<HistoryFrame, FmiHistoryError> {
        let frame = self.loader.load_history(start, end, &places).await?;
        Ok(HistoryFrame::new(frame))
    }

    /// Loads every feature for one fully elapsed month and one place.
    ///
    /// Returns the per-feature value sequences before any cross-product
    /// assembly; each sequence holds one value per hour of the month.
    ///
    /// # Errors
    ///
    /// * [`ObservationError::MonthNotComplete`] if the month has not fully
    ///   elapsed before today.
    /// * Transport, parse and length-validation errors from the underlying
    ///   round trips.
    ///
    /// [`ObservationError::MonthNotComplete`]: crate::ObservationError::MonthNotComplete
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use fmi_history::{Feature, FmiHistory, FmiHistoryError};
    /// # async fn run() -> Result<(), FmiHistoryError> {
    /// let client = FmiHistory::new()?;
    ///
    /// let observations = client
    ///     .full_month()
    ///     .month((2020, 2))
    ///     .place("Turku")
    ///     .call()
    ///     .await?;
    ///
    /// // 2020 is a leap year: 29 days x 24 hours.
    /// assert_eq!(observations.hours(), 696);
    /// assert_eq!(observations.series(Feature::Temperature).len(), 696);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn full_month(
        &self,
        #[builder(into)] month: Month,
        #[builder(into)] place: String,
    ) -> Result<MonthObservations, FmiHistoryError> {
        Ok(self.loader.load_full_month(month, &place).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObservationError;

    #[test]
    fn default_endpoint_parses() {
        assert!(FmiHistory::new().is_ok());
    }

    #[test]
    fn custom_endpoint_is_accepted() {
        assert!(FmiHistory::with_endpoint("http://localhost:8080/wfs").is_ok());
    }

    #[test]
    fn garbage_endpoint_is_rejected() {
        let err = FmiHistory::with_endpoint("not a url").expect_err("relative url");
        assert!(matches!(err, FmiHistoryError::InvalidEndpoint(..)));
    }

    // Both validation gates fire before the first request leaves the
    // machine, so these run without a reachable service.

    #[tokio::test]
    async fn future_months_are_rejected_before_any_request() {
        let client = FmiHistory::new().unwrap();
        let err = client
            .full_month()
            .month((2999, 1))
            .place("Turku")
            .call()
            .await
            .expect_err("month lies in the future");
        assert!(matches!(
            err,
            FmiHistoryError::Observation(ObservationError::MonthNotComplete { .. })
        ));
    }

    #[tokio::test]
    async fn reversed_month_range_is_rejected() {
        let client = FmiHistory::new().unwrap();
        let err = client
            .history()
            .start((2020, 2))
            .end((2020, 1))
            .places(vec!["Turku".to_string()])
            .call()
            .await
            .expect_err("end precedes start");
        assert!(matches!(
            err,
            FmiHistoryError::Observation(ObservationError::EmptyMonthRange { .. })
        ));
    }
}

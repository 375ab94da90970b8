use crate::types::feature::Feature;
use std::collections::HashMap;

/// Hourly observation values for one fully loaded month, keyed by feature.
///
/// Holds exactly one entry per [`Feature`]; every sequence has one value per
/// hour of the month, in chronological order. Missing measurements are
/// `f64::NAN` so the hour slots stay aligned across features.
#[derive(Debug, Clone)]
pub struct MonthObservations {
    series: HashMap<Feature, Vec<f64>>,
}

impl MonthObservations {
    pub(crate) fn new() -> Self {
        Self {
            series: Feature::ALL.iter().map(|f| (*f, Vec::new())).collect(),
        }
    }

    /// The hourly values recorded for `feature`, in chronological order.
    pub fn series(&self, feature: Feature) -> &[f64] {
        self.series.get(&feature).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of hour slots loaded; equal across all features.
    pub fn hours(&self) -> usize {
        self.series(Feature::Temperature).len()
    }

    pub(crate) fn append(&mut self, feature: Feature, values: impl IntoIterator<Item = f64>) {
        self.series.entry(feature).or_default().extend(values);
    }

    pub(crate) fn take(&mut self, feature: Feature) -> Vec<f64> {
        self.series.get_mut(&feature).map(std::mem::take).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_feature_empty() {
        let observations = MonthObservations::new();
        assert_eq!(observations.hours(), 0);
        for feature in Feature::ALL {
            assert!(observations.series(feature).is_empty());
        }
    }

    #[test]
    fn append_extends_one_feature_only() {
        let mut observations = MonthObservations::new();
        observations.append(Feature::Temperature, [1.0, 2.0]);
        observations.append(Feature::Temperature, [3.0]);
        assert_eq!(observations.series(Feature::Temperature), &[1.0, 2.0, 3.0]);
        assert!(observations.series(Feature::Humidity).is_empty());
    }

    #[test]
    fn take_drains_the_series() {
        let mut observations = MonthObservations::new();
        observations.append(Feature::WindSpeedMS, [4.5, 5.0]);
        assert_eq!(observations.take(Feature::WindSpeedMS), vec![4.5, 5.0]);
        assert!(observations.series(Feature::WindSpeedMS).is_empty());
    }
}

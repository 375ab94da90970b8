//! Defines the fixed set of meteorological variables the FMI stored query
//! can be asked for, and the order they appear in the output table.

use std::fmt;

/// One meteorological variable observed by the weather stations.
///
/// Each variant maps to a value of the stored query's `parameters` argument;
/// the same name is used as the variable's column in the assembled table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Air temperature, degrees Celsius.
    Temperature,
    /// Relative humidity, percent.
    Humidity,
    /// Wind direction, degrees.
    WindDirection,
    /// Wind speed, metres per second.
    WindSpeedMS,
    /// Total cloud cover, octas.
    TotalCloudCover,
    /// Precipitation over the preceding hour, millimetres.
    Precipitation1h,
}

impl Feature {
    /// Every feature, in the order they are requested and accumulated.
    pub const ALL: [Feature; 6] = [
        Feature::Temperature,
        Feature::Humidity,
        Feature::WindDirection,
        Feature::WindSpeedMS,
        Feature::TotalCloudCover,
        Feature::Precipitation1h,
    ];

    // Column order of the assembled table; differs from the request order.
    pub(crate) const TABLE_ORDER: [Feature; 6] = [
        Feature::Temperature,
        Feature::TotalCloudCover,
        Feature::WindDirection,
        Feature::WindSpeedMS,
        Feature::Humidity,
        Feature::Precipitation1h,
    ];

    /// The stored-query parameter name, which doubles as the column name.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Temperature => "Temperature",
            Feature::Humidity => "Humidity",
            Feature::WindDirection => "WindDirection",
            Feature::WindSpeedMS => "WindSpeedMS",
            Feature::TotalCloudCover => "TotalCloudCover",
            Feature::Precipitation1h => "Precipitation1h",
        }
    }
}

/// Formats a `Feature` using its stored-query parameter name.
///
/// # Examples
///
/// ```
/// use fmi_history::Feature;
///
/// assert_eq!(format!("{}", Feature::Temperature), "Temperature");
/// assert_eq!(Feature::Precipitation1h.to_string(), "Precipitation1h");
/// ```
impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_feature_once() {
        assert_eq!(Feature::ALL.len(), 6);
        for feature in Feature::ALL {
            assert_eq!(
                Feature::ALL.iter().filter(|f| **f == feature).count(),
                1,
                "{} listed more than once",
                feature
            );
        }
    }

    #[test]
    fn table_order_is_a_permutation_of_all() {
        assert_eq!(Feature::TABLE_ORDER.len(), Feature::ALL.len());
        for feature in Feature::ALL {
            assert!(Feature::TABLE_ORDER.contains(&feature));
        }
        // The table leads with temperature and cloud cover.
        assert_eq!(Feature::TABLE_ORDER[0], Feature::Temperature);
        assert_eq!(Feature::TABLE_ORDER[1], Feature::TotalCloudCover);
    }

    #[test]
    fn name_matches_display() {
        for feature in Feature::ALL {
            assert_eq!(feature.name(), feature.to_string());
        }
    }
}

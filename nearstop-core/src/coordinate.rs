//! Geographic coordinates supplied by the user.
//!
//! Coordinates are stored as WGS84 latitude/longitude pairs. Conversions to
//! [`geo`] types follow the `x = longitude`, `y = latitude` convention.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, Point};
use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
///
/// Equality is by value. Two stops may share a coordinate and still be
/// distinct stops.
///
/// # Examples
/// ```
/// use nearstop_core::Coordinate;
///
/// let here = Coordinate::new(51.5, -0.12);
/// assert_eq!(here, Coordinate::new(51.5, -0.12));
/// assert_eq!(here.to_string(), "51.5,-0.12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

/// Reasons a location was rejected before reaching the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// The text was not of the form `lat,lng`.
    #[error("expected a location of the form `lat,lng`, got {input:?}")]
    Malformed {
        /// The rejected input.
        input: String,
    },
    /// A component was NaN or infinite.
    #[error("location components must be finite numbers")]
    NonFinite,
    /// Latitude outside `[-90, 90]`.
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// The rejected latitude, formatted for display.
        value: String,
    },
    /// Longitude outside `[-180, 180]`.
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// The rejected longitude, formatted for display.
        value: String,
    },
    /// Address text that a geocoder could not turn into a location.
    #[error("no location found for {input:?} ({status})")]
    Unresolved {
        /// The rejected address text.
        input: String,
        /// Geocoder status, e.g. `ZERO_RESULTS`.
        status: String,
    },
}

/// Error returned when user-entered location text is rejected.
pub type InvalidInputLocation = CoordinateError;

impl Coordinate {
    /// Construct a coordinate without validation.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Construct a coordinate, rejecting values that cannot be a location.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when either component is non-finite or
    /// out of range.
    ///
    /// # Examples
    /// ```
    /// use nearstop_core::{Coordinate, CoordinateError};
    ///
    /// assert!(Coordinate::validated(45.0, 90.0).is_ok());
    /// assert!(matches!(
    ///     Coordinate::validated(91.0, 0.0),
    ///     Err(CoordinateError::LatitudeOutOfRange { .. })
    /// ));
    /// ```
    pub fn validated(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange {
                value: lat.to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::LongitudeOutOfRange {
                value: lng.to_string(),
            });
        }
        Ok(Self::new(lat, lng))
    }

    /// Parse `"lat,lng"` text, tolerating surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Malformed`] for unparsable text and the
    /// range errors of [`Coordinate::validated`] otherwise.
    pub fn parse(input: &str) -> Result<Self, CoordinateError> {
        let malformed = || CoordinateError::Malformed {
            input: input.to_owned(),
        };
        let (lat_text, lng_text) = input.trim().split_once(',').ok_or_else(malformed)?;
        let lat = lat_text.trim().parse::<f64>().map_err(|_| malformed())?;
        let lng = lng_text.trim().parse::<f64>().map_err(|_| malformed())?;
        Self::validated(lat, lng)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(value: Coordinate) -> Self {
        Self::from(Coord::from(value))
    }
}

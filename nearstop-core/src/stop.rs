use crate::Coordinate;

/// A location to be visited.
///
/// The label and formatted address are display metadata only. The
/// sequencer identifies stops by their position in the input, so two stops
/// with equal coordinates remain distinct.
///
/// # Examples
/// ```
/// use nearstop_core::{Coordinate, Stop};
///
/// let stop = Stop::new(Coordinate::new(51.5, -0.12)).with_label("Office");
/// assert_eq!(stop.label.as_deref(), Some("Office"));
/// assert!(stop.address.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Where the stop is.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub coordinate: Coordinate,
    /// Short user-facing name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<String>,
    /// Formatted address, typically from a geocoder.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub address: Option<String>,
}

impl Stop {
    /// Construct a stop without metadata.
    #[must_use]
    pub const fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            label: None,
            address: None,
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a formatted address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Human-readable name: the address, then the label, then the raw
    /// coordinate.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.address
            .as_ref()
            .or(self.label.as_ref())
            .cloned()
            .unwrap_or_else(|| self.coordinate.to_string())
    }
}

impl From<Coordinate> for Stop {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate)
    }
}

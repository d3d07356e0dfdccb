//! Plain-text rendering of the legs between consecutive stops.

use std::fmt;
use std::time::Duration;

/// Travel between two consecutive stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Where the leg begins.
    pub start_address: String,
    /// Where the leg ends.
    pub end_address: String,
    /// Travel distance in metres.
    pub distance_metres: f64,
    /// Expected travel time.
    pub duration: Duration,
}

/// Tabulated legs with columns `Step`, `From`, `To`, `Distance` and
/// `Duration`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use nearstop_core::{Leg, StepsTable};
///
/// let table = StepsTable::new(vec![Leg {
///     start_address: "Depot".into(),
///     end_address: "Shop".into(),
///     distance_metres: 1_250.0,
///     duration: Duration::from_secs(300),
/// }]);
/// let text = table.to_string();
/// assert!(text.contains("1.3 km"));
/// assert!(text.contains("5 mins"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepsTable {
    legs: Vec<Leg>,
}

const HEADERS: [&str; 5] = ["Step", "From", "To", "Distance", "Duration"];

impl StepsTable {
    /// Tabulate `legs` in travel order.
    #[must_use]
    pub const fn new(legs: Vec<Leg>) -> Self {
        Self { legs }
    }

    /// The legs being rendered.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    fn rows(&self) -> Vec<[String; 5]> {
        self.legs
            .iter()
            .enumerate()
            .map(|(index, leg)| {
                [
                    index.saturating_add(1).to_string(),
                    leg.start_address.clone(),
                    leg.end_address.clone(),
                    format_distance(leg.distance_metres),
                    format_duration(leg.duration),
                ]
            })
            .collect()
    }
}

impl fmt::Display for StepsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let mut widths = HEADERS.map(|header| header.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(f, &HEADERS.map(str::to_owned), &widths)?;
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String; 5], widths: &[usize; 5]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}

/// Render metres as `"850 m"` below one kilometre, else `"12.3 km"`.
#[expect(
    clippy::float_arithmetic,
    reason = "unit conversion for display requires float maths"
)]
#[must_use]
pub fn format_distance(metres: f64) -> String {
    if !metres.is_finite() {
        return "unreachable".to_owned();
    }
    let rounded = metres.round();
    if rounded < 1_000.0 {
        format!("{rounded:.0} m")
    } else {
        format!("{:.1} km", metres / 1_000.0)
    }
}

/// Render a duration as whole minutes and hours, e.g. `"1 hour 5 mins"`.
///
/// Durations are rounded to the nearest minute; anything shorter than a
/// minute but non-zero shows as `"1 min"`.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "splitting minutes into hours needs integer division"
)]
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    let mut minutes = seconds.saturating_add(30) / 60;
    if minutes == 0 && !duration.is_zero() {
        minutes = 1;
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, mins) => plural(mins, "min"),
        (hrs, 0) => plural(hrs, "hour"),
        (hrs, mins) => format!("{} {}", plural(hrs, "hour"), plural(mins, "min")),
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0 m")]
    #[case(849.6, "850 m")]
    #[case(999.6, "1.0 km")]
    #[case(1_000.0, "1.0 km")]
    #[case(12_345.0, "12.3 km")]
    #[case(f64::INFINITY, "unreachable")]
    fn formats_distances(#[case] metres: f64, #[case] expected: &str) {
        assert_eq!(format_distance(metres), expected);
    }

    #[rstest]
    #[case(0, "0 mins")]
    #[case(10, "1 min")]
    #[case(89, "1 min")]
    #[case(300, "5 mins")]
    #[case(3_600, "1 hour")]
    #[case(3_900, "1 hour 5 mins")]
    #[case(7_260, "2 hours 1 min")]
    fn formats_durations(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_duration(Duration::from_secs(seconds)), expected);
    }

    #[rstest]
    fn renders_numbered_rows_under_headers() {
        let table = StepsTable::new(vec![
            Leg {
                start_address: "Depot".to_owned(),
                end_address: "Bakery".to_owned(),
                distance_metres: 500.0,
                duration: Duration::from_secs(120),
            },
            Leg {
                start_address: "Bakery".to_owned(),
                end_address: "Market Square".to_owned(),
                distance_metres: 2_500.0,
                duration: Duration::from_secs(420),
            },
        ]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Step | From   | To            | Distance | Duration"
        );
        assert!(lines[1].starts_with("-----+-"));
        assert_eq!(
            lines[2],
            "1    | Depot  | Bakery        | 500 m    | 2 mins"
        );
        assert_eq!(
            lines[3],
            "2    | Bakery | Market Square | 2.5 km   | 7 mins"
        );
    }

    #[rstest]
    fn empty_table_renders_headers_only() {
        let rendered = StepsTable::default().to_string();
        assert_eq!(rendered.lines().count(), 2);
    }
}

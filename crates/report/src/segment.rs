use serde::{Deserialize, Serialize};

use crate::series::SeriesPoint;

/// How the line between two adjacent cumulative points is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStyle {
    Solid,
    /// No new data over this span.
    Dashed,
}

/// Solid only when both ends have data and sit exactly one month apart.
pub fn segment_style(from: &SeriesPoint, to: &SeriesPoint) -> SegmentStyle {
    if from.has_data && to.has_data && from.index.abs_diff(to.index) == 1 {
        SegmentStyle::Solid
    } else {
        SegmentStyle::Dashed
    }
}

/// Styles for every segment of `series`; one shorter than the series.
pub fn segment_styles(series: &[SeriesPoint]) -> Vec<SegmentStyle> {
    series
        .windows(2)
        .map(|pair| segment_style(&pair[0], &pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Money, Month};

    fn point(index: usize, has_data: bool) -> SeriesPoint {
        SeriesPoint {
            index,
            month: Month { year: 2024, month: index as u32 + 1 },
            cumulative: Money::zero(),
            has_data,
        }
    }

    #[test]
    fn adjacent_points_with_data_are_solid() {
        assert_eq!(segment_style(&point(2, true), &point(3, true)), SegmentStyle::Solid);
    }

    #[test]
    fn missing_data_on_either_end_is_dashed() {
        assert_eq!(segment_style(&point(2, false), &point(3, true)), SegmentStyle::Dashed);
        assert_eq!(segment_style(&point(2, true), &point(3, false)), SegmentStyle::Dashed);
        assert_eq!(segment_style(&point(2, false), &point(3, false)), SegmentStyle::Dashed);
    }

    #[test]
    fn skipped_months_are_dashed() {
        assert_eq!(segment_style(&point(2, true), &point(4, true)), SegmentStyle::Dashed);
    }

    #[test]
    fn styles_for_whole_series() {
        let series = vec![point(0, false), point(1, true), point(2, true), point(3, false)];
        assert_eq!(
            segment_styles(&series),
            vec![SegmentStyle::Dashed, SegmentStyle::Solid, SegmentStyle::Dashed]
        );
        assert!(segment_styles(&series[..1]).is_empty());
    }
}

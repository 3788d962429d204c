use crate::models::{ChartKind, ChartSeries, Features, TeamMember};

pub const CHART_TITLE: &str = "Delays in the team";
pub const DATASET_LABEL: &str = "Delays";
pub const BAR_COLOR: &str = "#4299E1";
pub const BAR_HOVER_COLOR: &str = "#2C5282";

/// Slice colors, assigned by position and reused cyclically.
pub const PIE_PALETTE: [&str; 10] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#C9CBCF", "#8DD17E",
    "#E56B6F", "#6A4C93",
];

pub fn build_series(features: Features, members: &[TeamMember], late_limit: i64) -> ChartSeries {
    let labels = members.iter().map(|member| member.name.clone()).collect();

    let values = members
        .iter()
        .map(|member| {
            let points = i64::from(member.points);
            if features.has_limit {
                points.min(late_limit)
            } else {
                points
            }
        })
        .collect();

    let (colors, hover_color) = match features.chart {
        ChartKind::Bar => (
            vec![BAR_COLOR.to_string(); members.len()],
            Some(BAR_HOVER_COLOR.to_string()),
        ),
        ChartKind::Pie => (
            (0..members.len())
                .map(|index| PIE_PALETTE[index % PIE_PALETTE.len()].to_string())
                .collect(),
            None,
        ),
    };

    let max = match features.chart {
        ChartKind::Bar if features.has_limit => Some(late_limit),
        _ => None,
    };

    ChartSeries {
        kind: features.chart,
        title: CHART_TITLE.to_string(),
        dataset_label: DATASET_LABEL.to_string(),
        labels,
        values,
        colors,
        hover_color,
        max,
    }
}

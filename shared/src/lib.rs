use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed year axis shared by every trend chart. Series data is positional:
/// index 0 is 2020, index 4 is 2024.
pub const YEARS: [i32; 5] = [2020, 2021, 2022, 2023, 2024];

/// Classic 10-color categorical palette for trend lines. Colors are assigned
/// by category position and cycle when a chart has more than ten series.
pub const SERIES_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Whether meeting a goal requires the value to go up or down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Higher,
    Lower,
}

/// Scaling policy for goal charts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Fixed 0-100 axis, values are percentages
    #[default]
    #[serde(alias = "percent")]
    Percentage,
    /// Open-ended axis with 20% headroom above the largest value
    Rate,
}

/// Goal for a goal chart: one shared target, or one target per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoalSpec {
    Shared(f64),
    PerRow(Vec<f64>),
}

impl GoalSpec {
    /// All goal values, for axis sizing
    pub fn values(&self) -> Vec<f64> {
        match self {
            GoalSpec::Shared(g) => vec![*g],
            GoalSpec::PerRow(goals) => goals.clone(),
        }
    }

    fn for_row(&self, index: usize) -> f64 {
        match self {
            GoalSpec::Shared(g) => *g,
            GoalSpec::PerRow(goals) => goals.get(index).copied().unwrap_or_default(),
        }
    }
}

/// Input for the bullet-style goal chart: one row per label, each comparing a
/// current value against its goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalChartData {
    pub labels: Vec<String>,
    /// Current values, parallel to `labels`
    pub current: Vec<f64>,
    pub goal: GoalSpec,
    pub direction: Direction,
    #[serde(default)]
    pub data_type: DataType,
    /// Unit suffix for rate data, e.g. "/100,000"
    #[serde(default)]
    pub rate_unit: Option<String>,
}

impl GoalChartData {
    /// Check the shape contract before rendering
    pub fn validate(&self) -> Result<(), ChartDataError> {
        if self.labels.is_empty() {
            return Err(ChartDataError::EmptyLabels);
        }
        if self.labels.len() != self.current.len() {
            return Err(ChartDataError::LengthMismatch {
                labels: self.labels.len(),
                current: self.current.len(),
            });
        }
        if let GoalSpec::PerRow(goals) = &self.goal {
            if goals.len() != self.labels.len() {
                return Err(ChartDataError::GoalLengthMismatch {
                    labels: self.labels.len(),
                    goals: goals.len(),
                });
            }
        }
        for &value in self.current.iter().chain(self.goal.values().iter()) {
            if !value.is_finite() {
                return Err(ChartDataError::NonFiniteValue(format!("{}", value)));
            }
        }
        Ok(())
    }

    /// Upper axis bound: percentages always span 0-100, rates get 20%
    /// headroom above the largest current or goal value
    pub fn axis_max(&self) -> f64 {
        match self.data_type {
            DataType::Percentage => 100.0,
            DataType::Rate => {
                let max = self
                    .current
                    .iter()
                    .chain(self.goal.values().iter())
                    .fold(0.0f64, |acc, &v| acc.max(v));
                max * 1.2
            }
        }
    }

    /// Rows in display order, pairing each label with its value and goal
    pub fn rows(&self) -> Vec<GoalRow<'_>> {
        self.labels
            .iter()
            .zip(self.current.iter())
            .enumerate()
            .map(|(index, (label, &current))| GoalRow {
                label,
                current,
                goal: self.goal.for_row(index),
            })
            .collect()
    }
}

/// One resolved goal-chart row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalRow<'a> {
    pub label: &'a str,
    pub current: f64,
    pub goal: f64,
}

/// Input for the five-year trend chart. Every key that is not one of the
/// metadata fields is a category mapped to exactly one value per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChartData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Free-form scope note, e.g. the disease the data covers
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub series: BTreeMap<String, Vec<f64>>,
}

impl TrendChartData {
    pub fn validate(&self) -> Result<(), ChartDataError> {
        if self.series.is_empty() {
            return Err(ChartDataError::EmptySeries);
        }
        for (category, values) in &self.series {
            if values.len() != YEARS.len() {
                return Err(ChartDataError::WrongSeriesLength {
                    category: category.clone(),
                    len: values.len(),
                });
            }
            for &value in values {
                if !value.is_finite() {
                    return Err(ChartDataError::NonFiniteValue(format!(
                        "{} in series '{}'",
                        value, category
                    )));
                }
            }
        }
        Ok(())
    }

    /// Category names in iteration (and palette) order
    pub fn categories(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    /// Upper y-axis bound: the largest value across all categories and years
    pub fn y_max(&self) -> f64 {
        self.series
            .values()
            .flatten()
            .fold(0.0f64, |acc, &v| acc.max(v))
    }
}

/// Input for the page title header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleData {
    pub title: String,
    /// Secondary fragment rendered after the title
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub direction: Direction,
    pub goal: f64,
    #[serde(default)]
    pub rate_unit: Option<String>,
}

impl TitleData {
    /// Goal to one decimal place with the optional unit suffix
    pub fn formatted_goal(&self) -> String {
        format!("{:.1}{}", self.goal, self.rate_unit.as_deref().unwrap_or(""))
    }
}

/// Shape violations rejected before any rendering happens
#[derive(Debug, Clone, PartialEq)]
pub enum ChartDataError {
    EmptyLabels,
    LengthMismatch { labels: usize, current: usize },
    GoalLengthMismatch { labels: usize, goals: usize },
    EmptySeries,
    WrongSeriesLength { category: String, len: usize },
    NonFiniteValue(String),
}

impl fmt::Display for ChartDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartDataError::EmptyLabels => write!(f, "Goal chart has no labels"),
            ChartDataError::LengthMismatch { labels, current } => write!(
                f,
                "Goal chart has {} labels but {} current values",
                labels, current
            ),
            ChartDataError::GoalLengthMismatch { labels, goals } => write!(
                f,
                "Goal chart has {} labels but {} per-row goals",
                labels, goals
            ),
            ChartDataError::EmptySeries => write!(f, "Trend chart has no series"),
            ChartDataError::WrongSeriesLength { category, len } => write!(
                f,
                "Series '{}' has {} values, expected one per year ({})",
                category,
                len,
                YEARS.len()
            ),
            ChartDataError::NonFiniteValue(what) => {
                write!(f, "Non-finite value in chart data: {}", what)
            }
        }
    }
}

impl std::error::Error for ChartDataError {}

/// Linear mapping from a data domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }
}

/// Categorical axis placing a fixed number of points evenly across a range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    count: usize,
    range: (f64, f64),
}

impl PointScale {
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        Self { count, range }
    }

    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        if self.count < 2 {
            return r0;
        }
        let step = (r1 - r0) / (self.count - 1) as f64;
        r0 + index as f64 * step
    }
}

/// Met predicate: a higher-is-better goal is met at or above the target, a
/// lower-is-better goal at or below it
pub fn is_met(current: f64, goal: f64, direction: Direction) -> bool {
    match direction {
        Direction::Higher => current >= goal,
        Direction::Lower => current <= goal,
    }
}

/// An observed value of exactly zero is flagged as statistically unreliable
/// rather than treated as a true zero
pub fn is_unstable(current: f64) -> bool {
    current == 0.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFill {
    /// Dark text, used outside the bar
    Dark,
    /// Light text, used inside the bar
    Light,
}

impl LabelFill {
    pub fn color(&self) -> &'static str {
        match self {
            LabelFill::Dark => "#333",
            LabelFill::Light => "#fff",
        }
    }
}

/// Where and how the current-value label is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub x: f64,
    pub anchor: TextAnchor,
    pub fill: LabelFill,
}

/// Pick the current-value label position so it never collides with the bar:
/// zero/negative values sit just after the bar start, values short of the
/// goal sit inside the bar end in light text, and values at or past the goal
/// (equality included) sit just past the bar end in dark text.
pub fn value_label_placement(current: f64, goal: f64, max_value: f64, width: f64) -> LabelPlacement {
    let scaled = current / max_value * width;
    if current <= 0.0 {
        LabelPlacement {
            x: 6.0,
            anchor: TextAnchor::Start,
            fill: LabelFill::Dark,
        }
    } else if current < goal {
        LabelPlacement {
            x: (scaled - 8.0).max(8.0),
            anchor: TextAnchor::End,
            fill: LabelFill::Light,
        }
    } else {
        LabelPlacement {
            x: scaled + 8.0,
            anchor: TextAnchor::Start,
            fill: LabelFill::Dark,
        }
    }
}

/// Color for the series at `index`, cycling through the palette
pub fn series_color(index: usize) -> &'static str {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Ascending tick values from zero up to `max` (never past it), using a
/// 1/2/5-decade step sized for roughly `count` ticks
pub fn tick_values(max: f64, count: usize) -> Vec<f64> {
    if max <= 0.0 || count == 0 {
        return vec![0.0];
    }
    let raw_step = max / count as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let step = if normalized <= 1.0 {
        magnitude
    } else if normalized <= 2.0 {
        2.0 * magnitude
    } else if normalized <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };
    let last = (max / step).floor() as usize;
    (0..=last).map(|i| i as f64 * step).collect()
}

/// Legend display name: first letter uppercased
pub fn display_name(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// A run of title text, either plain or emphasized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSpan {
    Plain(String),
    Italic(String),
}

/// Minimal `*text*` emphasis pass for titles. Only non-empty starred runs
/// become italic; unbalanced or doubled stars stay literal. This is not a
/// markup parser.
pub fn parse_italic(text: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;
    while let Some(start) = rest.find('*') {
        match rest[start + 1..].find('*') {
            Some(0) => {
                // doubled star, the first one is literal
                plain.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
            Some(len) => {
                plain.push_str(&rest[..start]);
                if !plain.is_empty() {
                    spans.push(TextSpan::Plain(std::mem::take(&mut plain)));
                }
                spans.push(TextSpan::Italic(rest[start + 1..start + 1 + len].to_string()));
                rest = &rest[start + 1 + len + 1..];
            }
            None => break,
        }
    }
    plain.push_str(rest);
    if !plain.is_empty() {
        spans.push(TextSpan::Plain(plain));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentage_data(current: Vec<f64>, goal: f64) -> GoalChartData {
        GoalChartData {
            labels: current.iter().map(|v| format!("Group {}", v)).collect(),
            current,
            goal: GoalSpec::Shared(goal),
            direction: Direction::Higher,
            data_type: DataType::Percentage,
            rate_unit: None,
        }
    }

    #[test]
    fn test_met_predicate_higher() {
        assert!(is_met(80.0, 70.0, Direction::Higher));
        assert!(is_met(70.0, 70.0, Direction::Higher));
        assert!(!is_met(45.0, 70.0, Direction::Higher));
    }

    #[test]
    fn test_met_predicate_lower() {
        assert!(is_met(3.0, 5.0, Direction::Lower));
        assert!(is_met(5.0, 5.0, Direction::Lower));
        assert!(!is_met(8.0, 5.0, Direction::Lower));
    }

    #[test]
    fn test_percentage_axis_max_is_fixed() {
        // Values above 100 do not stretch a percentage axis
        let data = percentage_data(vec![0.0, 45.0, 180.0], 70.0);
        assert_eq!(data.axis_max(), 100.0);
    }

    #[test]
    fn test_rate_axis_max_has_headroom() {
        let mut data = percentage_data(vec![10.0, 50.0], 30.0);
        data.data_type = DataType::Rate;
        assert!((data.axis_max() - 60.0).abs() < 1e-9);

        // The goal can be the largest value
        data.goal = GoalSpec::Shared(100.0);
        assert!((data.axis_max() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_axis_max_with_per_row_goals() {
        let mut data = percentage_data(vec![10.0, 20.0], 0.0);
        data.data_type = DataType::Rate;
        data.goal = GoalSpec::PerRow(vec![5.0, 50.0]);
        assert!((data.axis_max() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_placement_below_goal_sits_inside_bar() {
        let placement = value_label_placement(45.0, 70.0, 100.0, 465.0);
        assert_eq!(placement.anchor, TextAnchor::End);
        assert_eq!(placement.fill, LabelFill::Light);
        assert!((placement.x - (45.0 / 100.0 * 465.0 - 8.0)).abs() < 1e-9);
    }

    #[test]
    fn test_label_placement_at_goal_sits_past_bar_end() {
        // Equality is the "past bar end" branch, not "inside bar"
        let placement = value_label_placement(70.0, 70.0, 100.0, 465.0);
        assert_eq!(placement.anchor, TextAnchor::Start);
        assert_eq!(placement.fill, LabelFill::Dark);
        assert!((placement.x - (70.0 / 100.0 * 465.0 + 8.0)).abs() < 1e-9);
    }

    #[test]
    fn test_label_placement_zero_and_negative() {
        for current in [0.0, -3.0] {
            let placement = value_label_placement(current, 70.0, 100.0, 465.0);
            assert_eq!(placement.x, 6.0);
            assert_eq!(placement.anchor, TextAnchor::Start);
            assert_eq!(placement.fill, LabelFill::Dark);
        }
    }

    #[test]
    fn test_label_placement_never_leaves_the_bar_start() {
        // Tiny positive values clamp to x = 8 instead of going negative
        let placement = value_label_placement(0.5, 70.0, 100.0, 465.0);
        assert_eq!(placement.x, 8.0);
    }

    #[test]
    fn test_unstable_estimate_only_at_exact_zero() {
        assert!(is_unstable(0.0));
        assert!(!is_unstable(0.1));
        assert!(!is_unstable(-1.0));
    }

    #[test]
    fn test_worked_percentage_example() {
        // current=[0,45,80], goal=70, direction=higher
        let data = percentage_data(vec![0.0, 45.0, 80.0], 70.0);
        let met: Vec<bool> = data
            .rows()
            .iter()
            .map(|row| is_met(row.current, row.goal, data.direction))
            .collect();
        assert_eq!(met, vec![false, false, true]);
        assert!(is_unstable(data.rows()[0].current));
        assert!(!is_unstable(data.rows()[1].current));
    }

    #[test]
    fn test_goal_validation_rejects_length_mismatch() {
        let mut data = percentage_data(vec![10.0, 20.0], 50.0);
        data.labels.pop();
        assert_eq!(
            data.validate(),
            Err(ChartDataError::LengthMismatch {
                labels: 1,
                current: 2
            })
        );
    }

    #[test]
    fn test_goal_validation_rejects_per_row_goal_mismatch() {
        let mut data = percentage_data(vec![10.0, 20.0], 50.0);
        data.goal = GoalSpec::PerRow(vec![50.0]);
        assert_eq!(
            data.validate(),
            Err(ChartDataError::GoalLengthMismatch {
                labels: 2,
                goals: 1
            })
        );
    }

    #[test]
    fn test_goal_validation_rejects_empty_and_non_finite() {
        let data = percentage_data(vec![], 50.0);
        assert_eq!(data.validate(), Err(ChartDataError::EmptyLabels));

        let data = percentage_data(vec![10.0, f64::NAN], 50.0);
        assert!(matches!(
            data.validate(),
            Err(ChartDataError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn test_goal_spec_deserializes_untagged() {
        let shared: GoalSpec = serde_json::from_str("70.0").unwrap();
        assert_eq!(shared, GoalSpec::Shared(70.0));
        let per_row: GoalSpec = serde_json::from_str("[60.0, 70.0]").unwrap();
        assert_eq!(per_row, GoalSpec::PerRow(vec![60.0, 70.0]));
    }

    #[test]
    fn test_data_type_accepts_percent_alias() {
        let ty: DataType = serde_json::from_str("\"percent\"").unwrap();
        assert_eq!(ty, DataType::Percentage);
        let ty: DataType = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(ty, DataType::Percentage);
        let ty: DataType = serde_json::from_str("\"rate\"").unwrap();
        assert_eq!(ty, DataType::Rate);
    }

    #[test]
    fn test_trend_flatten_excludes_metadata_keys() {
        let json = r#"{
            "title": "Cases by Race/Ethnicity",
            "scope": "gonorrhea",
            "asian": [1.0, 2.0, 3.0, 4.0, 5.0],
            "black": [5.0, 4.0, 3.0, 2.0, 1.0]
        }"#;
        let data: TrendChartData = serde_json::from_str(json).unwrap();
        assert_eq!(data.title.as_deref(), Some("Cases by Race/Ethnicity"));
        assert_eq!(data.scope.as_deref(), Some("gonorrhea"));
        assert_eq!(data.categories(), vec!["asian", "black"]);
        assert_eq!(data.y_max(), 5.0);
    }

    #[test]
    fn test_trend_validation_rejects_wrong_series_length() {
        let mut series = BTreeMap::new();
        series.insert("asian".to_string(), vec![1.0, 2.0, 3.0]);
        let data = TrendChartData {
            title: None,
            subtitle: None,
            scope: None,
            series,
        };
        assert_eq!(
            data.validate(),
            Err(ChartDataError::WrongSeriesLength {
                category: "asian".to_string(),
                len: 3
            })
        );
    }

    #[test]
    fn test_trend_validation_rejects_empty_series() {
        let data = TrendChartData {
            title: None,
            subtitle: None,
            scope: None,
            series: BTreeMap::new(),
        };
        assert_eq!(data.validate(), Err(ChartDataError::EmptySeries));
    }

    #[test]
    fn test_linear_scale_maps_endpoints_and_midpoint() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 465.0));
        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(100.0), 465.0);
        assert!((scale.scale(50.0) - 232.5).abs() < 1e-9);

        // Inverted pixel ranges work for y axes
        let y = LinearScale::new((0.0, 5.0), (250.0, 0.0));
        assert_eq!(y.scale(0.0), 250.0);
        assert_eq!(y.scale(5.0), 0.0);
    }

    #[test]
    fn test_linear_scale_degenerate_domain() {
        let scale = LinearScale::new((3.0, 3.0), (0.0, 465.0));
        assert_eq!(scale.scale(3.0), 0.0);
    }

    #[test]
    fn test_point_scale_spaces_years_evenly() {
        let scale = PointScale::new(YEARS.len(), (0.0, 600.0));
        let positions: Vec<f64> = (0..YEARS.len()).map(|i| scale.position(i)).collect();
        assert_eq!(positions, vec![0.0, 150.0, 300.0, 450.0, 600.0]);
    }

    #[test]
    fn test_point_scale_single_point() {
        let scale = PointScale::new(1, (10.0, 600.0));
        assert_eq!(scale.position(0), 10.0);
    }

    #[test]
    fn test_series_color_is_stable_and_cycles() {
        assert_eq!(series_color(0), SERIES_PALETTE[0]);
        assert_eq!(series_color(3), SERIES_PALETTE[3]);
        assert_eq!(series_color(10), SERIES_PALETTE[0]);
        assert_eq!(series_color(0), series_color(0));
    }

    #[test]
    fn test_tick_values_use_nice_steps() {
        assert_eq!(
            tick_values(100.0, 5),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
        );
        assert_eq!(tick_values(5.0, 5), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        // Ticks never pass the axis max
        assert_eq!(tick_values(9.6, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_tick_values_degenerate_max() {
        assert_eq!(tick_values(0.0, 5), vec![0.0]);
        assert_eq!(tick_values(-4.0, 5), vec![0.0]);
    }

    #[test]
    fn test_display_name_uppercases_first_letter() {
        assert_eq!(display_name("asian"), "Asian");
        assert_eq!(display_name("Black"), "Black");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_parse_italic_basic() {
        assert_eq!(
            parse_italic("Reduce *gonorrhea* incidence"),
            vec![
                TextSpan::Plain("Reduce ".to_string()),
                TextSpan::Italic("gonorrhea".to_string()),
                TextSpan::Plain(" incidence".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_italic_leaves_unbalanced_stars_literal() {
        assert_eq!(
            parse_italic("a * b"),
            vec![TextSpan::Plain("a * b".to_string())]
        );
        assert_eq!(
            parse_italic("a ** b"),
            vec![TextSpan::Plain("a ** b".to_string())]
        );
    }

    #[test]
    fn test_parse_italic_multiple_runs() {
        assert_eq!(
            parse_italic("*a* and *b*"),
            vec![
                TextSpan::Italic("a".to_string()),
                TextSpan::Plain(" and ".to_string()),
                TextSpan::Italic("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_formatted_goal_with_unit() {
        let with_unit = TitleData {
            title: "Gonorrhea".to_string(),
            details: None,
            subtitle: None,
            direction: Direction::Lower,
            goal: 257.0,
            rate_unit: Some("/100,000".to_string()),
        };
        assert_eq!(with_unit.formatted_goal(), "257.0/100,000");

        let without_unit = TitleData {
            rate_unit: None,
            goal: 74.3,
            ..with_unit
        };
        assert_eq!(without_unit.formatted_goal(), "74.3");
    }

    #[test]
    fn test_goal_chart_roundtrip_from_json() {
        let json = r#"{
            "labels": ["Asian", "Black", "White"],
            "current": [0.0, 45.0, 80.0],
            "goal": 70.0,
            "direction": "higher",
            "data_type": "percent"
        }"#;
        let data: GoalChartData = serde_json::from_str(json).unwrap();
        assert!(data.validate().is_ok());
        assert_eq!(data.axis_max(), 100.0);
        assert_eq!(data.rows().len(), 3);
        assert_eq!(data.rows()[2].goal, 70.0);
    }
}

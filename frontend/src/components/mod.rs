pub mod goal_chart;
pub mod title_section;
pub mod trend_chart;

pub use goal_chart::GoalChart;
pub use title_section::TitleSection;
pub use trend_chart::{TrendChart, TrendVariant};

/// Pixel coordinates rendered into SVG attributes, one decimal place
pub(crate) fn fmt_px(value: f64) -> String {
    format!("{:.1}", value)
}

/// Axis tick and table formatting: whole numbers lose the trailing ".0"
pub(crate) fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

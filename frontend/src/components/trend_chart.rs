use gloo::timers::future::TimeoutFuture;
use shared::{
    display_name, series_color, tick_values, LinearScale, PointScale, TrendChartData, YEARS,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{fmt_px, format_value};
use crate::services::Logger;

const TOOLTIP_FADE_IN_MS: u32 = 200;
const TOOLTIP_FADE_OUT_MS: u32 = 500;
const Y_TICK_COUNT: usize = 5;

/// Layout flavors of the trend chart. Scales, lines, dots and tooltip
/// behavior are identical; only geometry and the surrounding markup differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendVariant {
    /// 600px plot with gridlines, a legend column on the right, and a
    /// title header plus data table around the chart
    SideLegendWithTable,
    /// Wide 880px plot with the legend boxed below the x axis
    InlineLegend,
}

struct Layout {
    plot_width: f64,
    plot_height: f64,
    margin_top: f64,
    margin_right: f64,
    margin_bottom: f64,
    margin_left: f64,
    gridlines: bool,
}

impl TrendVariant {
    fn layout(&self) -> Layout {
        match self {
            TrendVariant::SideLegendWithTable => Layout {
                plot_width: 600.0,
                plot_height: 250.0,
                margin_top: 40.0,
                margin_right: 200.0,
                margin_bottom: 60.0,
                margin_left: 60.0,
                gridlines: true,
            },
            TrendVariant::InlineLegend => Layout {
                plot_width: 880.0,
                plot_height: 260.0,
                margin_top: 40.0,
                margin_right: 60.0,
                margin_bottom: 100.0,
                margin_left: 60.0,
                gridlines: false,
            },
        }
    }
}

#[derive(Clone, PartialEq)]
struct Tooltip {
    lines: Vec<String>,
    left: i32,
    top: i32,
    visible: bool,
}

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub data: TrendChartData,
    #[prop_or(TrendVariant::SideLegendWithTable)]
    pub variant: TrendVariant,
    #[prop_or(AttrValue::Static("Cases"))]
    pub y_axis_label: AttrValue,
}

/// Multi-series line chart over the fixed 2020-2024 axis, with a legend and
/// a hover tooltip per data point.
#[function_component(TrendChart)]
pub fn trend_chart(props: &TrendChartProps) -> Html {
    let tooltip = use_state(|| None::<Tooltip>);
    // Bumped on every hover transition; a pending removal only fires if no
    // newer transition happened during the fade
    let hover_generation = use_mut_ref(|| 0u64);

    if let Err(error) = props.data.validate() {
        Logger::error_with_component("trend-chart", &error.to_string());
        return html! {
            <div class="chart-error">
                {format!("Unable to render trend chart: {}", error)}
            </div>
        };
    }

    let layout = props.variant.layout();
    let categories = props.data.categories();
    let y_max = props.data.y_max();
    let x = PointScale::new(YEARS.len(), (0.0, layout.plot_width));
    let y = LinearScale::new((0.0, y_max), (layout.plot_height, 0.0));
    let with_category = props.variant == TrendVariant::SideLegendWithTable;

    let lines = categories.iter().enumerate().map(|(index, category)| {
        let points: Vec<(f64, f64)> = props.data.series[*category]
            .iter()
            .enumerate()
            .map(|(year_index, &value)| (x.position(year_index), y.scale(value)))
            .collect();
        html! {
            <path class="line" d={path_d(&points)} fill="none"
                stroke={series_color(index)} stroke-width="3" opacity="0.8" />
        }
    });

    let dots = categories.iter().enumerate().flat_map(|(index, category)| {
        let category = category.to_string();
        let tooltip = tooltip.clone();
        let hover_generation = hover_generation.clone();
        let y_axis_label = props.y_axis_label.clone();
        props.data.series[category.as_str()]
            .iter()
            .enumerate()
            .map(move |(year_index, &value)| {
                let lines = tooltip_lines(&category, value, with_category, &y_axis_label);
                let onmouseover = {
                    let tooltip = tooltip.clone();
                    let hover_generation = hover_generation.clone();
                    Callback::from(move |event: MouseEvent| {
                        *hover_generation.borrow_mut() += 1;
                        tooltip.set(Some(Tooltip {
                            lines: lines.clone(),
                            left: event.page_x() + 10,
                            top: event.page_y() - 10,
                            visible: true,
                        }));
                    })
                };
                let onmouseout = {
                    let tooltip = tooltip.clone();
                    let hover_generation = hover_generation.clone();
                    Callback::from(move |_: MouseEvent| {
                        *hover_generation.borrow_mut() += 1;
                        let generation = *hover_generation.borrow();
                        if let Some(current) = (*tooltip).clone() {
                            tooltip.set(Some(Tooltip {
                                visible: false,
                                ..current
                            }));
                        }
                        let tooltip = tooltip.clone();
                        let hover_generation = hover_generation.clone();
                        spawn_local(async move {
                            TimeoutFuture::new(TOOLTIP_FADE_OUT_MS).await;
                            if *hover_generation.borrow() == generation {
                                tooltip.set(None);
                            }
                        });
                    })
                };
                html! {
                    <circle class="dot" cx={fmt_px(x.position(year_index))}
                        cy={fmt_px(y.scale(value))} r="4" fill={series_color(index)}
                        stroke="white" stroke-width="2"
                        {onmouseover} {onmouseout} />
                }
            })
            .collect::<Vec<Html>>()
    });

    let legend = match props.variant {
        TrendVariant::SideLegendWithTable => side_legend(&categories, &layout),
        TrendVariant::InlineLegend => inline_legend(&categories, &layout),
    };

    let chart_svg = html! {
        <svg width={fmt_px(layout.plot_width + layout.margin_left + layout.margin_right)}
            height={fmt_px(layout.plot_height + layout.margin_top + layout.margin_bottom)}>
            <g transform={format!("translate({}, {})", layout.margin_left, layout.margin_top)}>
                {if layout.gridlines { gridlines(&layout, y_max, &x, &y) } else { html! {} }}
                {y_axis(&layout, y_max, &y, &props.y_axis_label)}
                {x_axis(&layout, &x)}
                {for lines}
                {for dots}
                {legend}
            </g>
        </svg>
    };

    let tooltip_style = {
        let (left, top, visible) = match &*tooltip {
            Some(tip) => (tip.left, tip.top, tip.visible),
            None => (0, 0, false),
        };
        format!(
            "position: absolute; background: rgba(0, 0, 0, 0.8); color: white; \
             padding: 8px; border-radius: 4px; font-size: 12px; pointer-events: none; \
             left: {}px; top: {}px; opacity: {}; transition: opacity {}ms;",
            left,
            top,
            if visible { "0.9" } else { "0" },
            if visible { TOOLTIP_FADE_IN_MS } else { TOOLTIP_FADE_OUT_MS },
        )
    };
    let tooltip_html = html! {
        <div class="tooltip" style={tooltip_style}>
            {for tooltip
                .as_ref()
                .map(|tip| tip.lines.clone())
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(index, line)| {
                    html! {
                        <>
                            {if index > 0 { html! { <br /> } } else { html! {} }}
                            {line}
                        </>
                    }
                })}
        </div>
    };

    match props.variant {
        TrendVariant::SideLegendWithTable => html! {
            <div class="trend-chart">
                {title_block(&props.data)}
                <div class="chart-and-table-container">
                    <div class="chart-section">
                        <div class="line-chart">{chart_svg}</div>
                        {data_table(&props.data, &categories)}
                    </div>
                </div>
                {tooltip_html}
            </div>
        },
        TrendVariant::InlineLegend => html! {
            <div class="trend-chart">
                <div class="line-chart">{chart_svg}</div>
                {tooltip_html}
            </div>
        },
    }
}

/// SVG path for a polyline through `points`
fn path_d(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (index, (x, y)) in points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{:.1},{:.1}", command, x, y));
    }
    d
}

fn tooltip_lines(
    category: &str,
    value: f64,
    with_category: bool,
    y_axis_label: &str,
) -> Vec<String> {
    let value_line = format!("{}: {}", y_axis_label, format_value(value));
    if with_category {
        vec![category.to_string(), value_line]
    } else {
        vec![value_line]
    }
}

fn gridlines(layout: &Layout, y_max: f64, x: &PointScale, y: &LinearScale) -> Html {
    html! {
        <g class="grid">
            {for tick_values(y_max, Y_TICK_COUNT).iter().map(|&tick| {
                let tick_y = y.scale(tick);
                html! {
                    <line x1="0" x2={fmt_px(layout.plot_width)}
                        y1={fmt_px(tick_y)} y2={fmt_px(tick_y)}
                        stroke="#e0e0e0" stroke-width="1" />
                }
            })}
            {for (0..YEARS.len()).map(|year_index| {
                let tick_x = x.position(year_index);
                html! {
                    <line x1={fmt_px(tick_x)} x2={fmt_px(tick_x)}
                        y1="0" y2={fmt_px(layout.plot_height)}
                        stroke="#e0e0e0" stroke-width="1" />
                }
            })}
        </g>
    }
}

fn y_axis(layout: &Layout, y_max: f64, y: &LinearScale, label: &str) -> Html {
    html! {
        <g class="y-axis">
            <line x1="0" x2="0" y1="0" y2={fmt_px(layout.plot_height)} stroke="#333" />
            {for tick_values(y_max, Y_TICK_COUNT).iter().map(|&tick| {
                let tick_y = y.scale(tick);
                html! {
                    <g>
                        <line x1="-6" x2="0" y1={fmt_px(tick_y)} y2={fmt_px(tick_y)} stroke="#333" />
                        <text x="-9" y={fmt_px(tick_y + 3.0)} text-anchor="end"
                            font-size="10px" fill="#333">
                            {format_value(tick)}
                        </text>
                    </g>
                }
            })}
            <text transform="rotate(-90)" y="-40" x={fmt_px(-layout.plot_height / 2.0)}
                text-anchor="middle" font-size="12px">
                {label}
            </text>
        </g>
    }
}

fn x_axis(layout: &Layout, x: &PointScale) -> Html {
    html! {
        <g class="x-axis" transform={format!("translate(0, {})", layout.plot_height)}>
            <line x1="0" x2={fmt_px(layout.plot_width)} y1="0" y2="0" stroke="#333" />
            {for YEARS.iter().enumerate().map(|(year_index, year)| {
                let tick_x = x.position(year_index);
                html! {
                    <g>
                        <line x1={fmt_px(tick_x)} x2={fmt_px(tick_x)} y1="0" y2="6" stroke="#333" />
                        <text x={fmt_px(tick_x)} y="20" text-anchor="middle"
                            font-size="10px" fill="#333">
                            {*year}
                        </text>
                    </g>
                }
            })}
        </g>
    }
}

fn side_legend(categories: &[&str], layout: &Layout) -> Html {
    const ITEM_HEIGHT: f64 = 25.0;
    const PADDING: f64 = 10.0;
    let box_height = categories.len() as f64 * ITEM_HEIGHT + PADDING * 2.0;

    html! {
        <g class="legend"
            transform={format!("translate({}, {})", layout.plot_width + 20.0, ITEM_HEIGHT)}>
            <rect x={fmt_px(-PADDING)} y={fmt_px(-PADDING)} width="120" height={fmt_px(box_height)}
                fill="none" stroke="#e0e0e0" stroke-width="1" rx="6" />
            {for categories.iter().enumerate().map(|(index, category)| {
                html! {
                    <g class="legend-item"
                        transform={format!("translate(0, {})",
                            index as f64 * ITEM_HEIGHT + ITEM_HEIGHT / 2.0)}>
                        <rect x="0" y="-6" width="12" height="12" fill={series_color(index)}
                            stroke="white" stroke-width="1.5" rx="2" />
                        <text x="20" y="4" font-size="13px" font-weight="500" text-anchor="start">
                            {display_name(category)}
                        </text>
                    </g>
                }
            })}
        </g>
    }
}

fn inline_legend(categories: &[&str], layout: &Layout) -> Html {
    let legend_width = categories.len().saturating_sub(1) as f64 * 120.0;
    let legend_x = (layout.plot_width - legend_width) / 2.0;

    html! {
        <g class="legend"
            transform={format!("translate({}, {})", legend_x, layout.plot_height + 60.0)}>
            <rect x="-15" y="-15" width={fmt_px(legend_width + 30.0)} height="30"
                fill="none" stroke="#e0e0e0" stroke-width="1" rx="6" />
            {for categories.iter().enumerate().map(|(index, category)| {
                html! {
                    <g class="legend-item" transform={format!("translate({}, 0)", index * 100)}>
                        <rect x="-8" y="-8" width="16" height="16" fill={series_color(index)}
                            stroke="white" stroke-width="1.5" rx="2" />
                        <text x="15" y="5" font-size="13px" font-weight="500">
                            {display_name(category)}
                        </text>
                    </g>
                }
            })}
        </g>
    }
}

fn title_block(data: &TrendChartData) -> Html {
    match (&data.title, &data.subtitle) {
        (Some(title), Some(subtitle)) => html! {
            <div class="title-container">
                <div class="main-title">{title}</div>
                <div class="subtitle">{subtitle}</div>
            </div>
        },
        (Some(title), None) => html! {
            <div class="title-container">
                <div class="main-title">{title}</div>
            </div>
        },
        (None, _) => html! {},
    }
}

/// Same values as the chart, year per row, category per column
fn data_table(data: &TrendChartData, categories: &[&str]) -> Html {
    html! {
        <div class="data-table-container">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Year"}</th>
                        {for categories.iter().map(|category| html! { <th>{*category}</th> })}
                    </tr>
                </thead>
                <tbody>
                    {for YEARS.iter().enumerate().map(|(year_index, year)| {
                        html! {
                            <tr>
                                <td>{*year}</td>
                                {for categories.iter().map(|category| {
                                    let value = data.series[*category][year_index];
                                    html! { <td>{format_value(value)}</td> }
                                })}
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_d_moves_then_draws() {
        let d = path_d(&[(0.0, 250.0), (150.0, 125.0), (300.0, 0.0)]);
        assert_eq!(d, "M0.0,250.0L150.0,125.0L300.0,0.0");
    }

    #[test]
    fn test_path_d_empty() {
        assert_eq!(path_d(&[]), "");
    }

    #[test]
    fn test_tooltip_lines_with_and_without_category() {
        assert_eq!(
            tooltip_lines("black", 150.0, true, "Cases"),
            vec!["black".to_string(), "Cases: 150".to_string()]
        );
        assert_eq!(
            tooltip_lines("black", 150.0, false, "Cases"),
            vec!["Cases: 150".to_string()]
        );
    }

    #[test]
    fn test_variant_layouts() {
        let side = TrendVariant::SideLegendWithTable.layout();
        assert_eq!(side.plot_width, 600.0);
        assert_eq!(side.plot_height, 250.0);
        assert!(side.gridlines);

        let inline = TrendVariant::InlineLegend.layout();
        assert_eq!(inline.plot_width, 880.0);
        assert_eq!(inline.plot_height, 260.0);
        assert!(!inline.gridlines);
    }
}

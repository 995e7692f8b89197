use shared::{
    is_met, is_unstable, value_label_placement, ChartDataError, Direction, GoalChartData, GoalRow,
    LinearScale,
};
use web_sys::Element;
use yew::prelude::*;

use super::fmt_px;
use crate::services::Logger;

const CHART_HEIGHT: f64 = 80.0;
const MARGIN_TOP: f64 = 15.0;
const MARGIN_LEFT: f64 = 140.0;
const MARGIN_RIGHT: f64 = 20.0;
// Plot width used until the mounted container has been measured
const DEFAULT_PLOT_WIDTH: f64 = 465.0;
const MIN_PLOT_WIDTH: f64 = 120.0;

#[derive(Properties, PartialEq)]
pub struct GoalChartProps {
    pub data: GoalChartData,
    /// Fixed plot width in px; when set the container is never measured
    #[prop_or_default]
    pub row_width: Option<f64>,
    /// Height of each row's SVG in px
    #[prop_or(CHART_HEIGHT)]
    pub chart_height: f64,
}

pub enum Msg {
    ContainerMeasured(f64),
}

/// Bullet-style goal chart: one horizontal bar per label, a dashed marker at
/// the goal position, and a met/unmet badge beside each row.
///
/// The first paint uses the default plot width; `rendered` then measures the
/// real container and redraws once, so width-dependent scaling runs only
/// after layout has settled.
pub struct GoalChart {
    container_ref: NodeRef,
    plot_width: f64,
    error: Option<ChartDataError>,
}

impl Component for GoalChart {
    type Message = Msg;
    type Properties = GoalChartProps;

    fn create(ctx: &Context<Self>) -> Self {
        let error = ctx.props().data.validate().err();
        if let Some(error) = &error {
            Logger::error_with_component("goal-chart", &error.to_string());
        }
        Self {
            container_ref: NodeRef::default(),
            plot_width: ctx.props().row_width.unwrap_or(DEFAULT_PLOT_WIDTH),
            error,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.error = ctx.props().data.validate().err();
        if let Some(error) = &self.error {
            Logger::error_with_component("goal-chart", &error.to_string());
        }
        if let Some(width) = ctx.props().row_width {
            self.plot_width = width;
        }
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContainerMeasured(width) => {
                if (width - self.plot_width).abs() < 1.0 {
                    false
                } else {
                    self.plot_width = width;
                    true
                }
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render || ctx.props().row_width.is_some() {
            return;
        }
        match self.container_ref.cast::<Element>() {
            Some(container) => {
                let width = container.client_width() as f64 - MARGIN_LEFT - MARGIN_RIGHT;
                if width >= MIN_PLOT_WIDTH {
                    ctx.link().send_message(Msg::ContainerMeasured(width));
                } else {
                    Logger::debug_with_component(
                        "goal-chart",
                        "container not measurable yet, keeping default width",
                    );
                }
            }
            None => {
                Logger::warn_with_component("goal-chart", "chart container missing from document");
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let data = &ctx.props().data;

        if let Some(error) = &self.error {
            return html! {
                <div class="chart-error">
                    {format!("Unable to render goal chart: {}", error)}
                </div>
            };
        }

        let max_value = data.axis_max();
        let chart_height = ctx.props().chart_height;

        html! {
            <div class="charts-container" ref={self.container_ref.clone()}>
                {for data
                    .rows()
                    .iter()
                    .map(|row| self.view_row(row, max_value, data.direction, chart_height))}
            </div>
        }
    }
}

impl GoalChart {
    fn view_row(
        &self,
        row: &GoalRow<'_>,
        max_value: f64,
        direction: Direction,
        chart_height: f64,
    ) -> Html {
        let met = is_met(row.current, row.goal, direction);
        let status_class = if met {
            "status-indicator status-met"
        } else {
            "status-indicator status-not-met"
        };

        html! {
            <div class="chart-row">
                <div class="chart-layout">
                    <div class="chart-container">
                        {self.view_bullet(row, max_value, met, chart_height)}
                    </div>
                    <div class={status_class}>
                        {if met { "Met ✓" } else { "Unmet ✗" }}
                    </div>
                </div>
            </div>
        }
    }

    fn view_bullet(&self, row: &GoalRow<'_>, max_value: f64, met: bool, chart_height: f64) -> Html {
        let width = self.plot_width;
        let scale = LinearScale::new((0.0, max_value), (0.0, width));
        // Negative values collapse to an empty bar rather than an invalid rect
        let bar_width = scale.scale(row.current).clamp(0.0, width);
        let goal_x = scale.scale(row.goal);
        let placement = value_label_placement(row.current, row.goal, max_value, width);
        let bar_fill = if met { "#4CAF50" } else { "#FF9800" };

        html! {
            <svg width={fmt_px(width + MARGIN_LEFT + MARGIN_RIGHT)} height={fmt_px(chart_height)}>
                <g transform={format!("translate({}, {})", MARGIN_LEFT, MARGIN_TOP)}>
                    <rect x="0" y="15" width={fmt_px(width)} height="30" fill="#f0f0f0" rx="3" />
                    <rect class="current-bar" x="0" y="20" width={fmt_px(bar_width)} height="20"
                        fill={bar_fill} rx="2" />
                    <line class="goal-marker" x1={fmt_px(goal_x)} x2={fmt_px(goal_x)} y1="10" y2="50"
                        stroke="#333" stroke-width="2" stroke-dasharray="3,3" />
                    <text class="label" x="-10" y="35" text-anchor="end"
                        font-size="14px" font-weight="bold">
                        {row.label}
                    </text>
                    <text class="current-value" x={fmt_px(placement.x)} y="35"
                        font-size="12px" font-weight="bold"
                        text-anchor={placement.anchor.as_str()} fill={placement.fill.color()}>
                        {format!("{:.1}", row.current)}
                    </text>
                    {if is_unstable(row.current) {
                        html! {
                            <text class="unstable-note" x="30" y="35" font-size="12px"
                                fill="#666" font-style="italic">
                                {"* Unstable Estimate"}
                            </text>
                        }
                    } else {
                        html! {}
                    }}
                    <text class="goal-text" x={fmt_px(goal_x + 8.0)} y="12" font-size="11px"
                        fill="#666" font-weight="bold">
                        {format!("{:.1}", row.goal)}
                    </text>
                </g>
            </svg>
        }
    }
}

// Integration tests that require wasm-bindgen-test
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use shared::{DataType, GoalSpec};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_data() -> GoalChartData {
        GoalChartData {
            labels: vec!["Asian".into(), "Black".into(), "White".into()],
            current: vec![0.0, 45.0, 80.0],
            goal: GoalSpec::Shared(70.0),
            direction: Direction::Higher,
            data_type: DataType::Percentage,
            rate_unit: None,
        }
    }

    fn mount(props: GoalChartProps) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        yew::Renderer::<GoalChart>::with_root_and_props(root.clone(), props).render();
        root
    }

    #[wasm_bindgen_test]
    async fn test_redraw_after_measure_leaves_dom_stable() {
        let root = mount(GoalChartProps {
            data: sample_data(),
            row_width: None,
            chart_height: CHART_HEIGHT,
        });
        // First paint plus the measured redraw have both happened by now
        TimeoutFuture::new(50).await;

        assert_eq!(root.query_selector_all(".chart-row").unwrap().length(), 3);
        assert_eq!(root.query_selector_all(".current-bar").unwrap().length(), 3);
        assert_eq!(root.query_selector_all(".goal-marker").unwrap().length(), 3);

        let settled = root.inner_html();
        TimeoutFuture::new(50).await;
        assert_eq!(root.inner_html(), settled);
    }

    #[wasm_bindgen_test]
    async fn test_invalid_data_renders_error_message() {
        let mut data = sample_data();
        data.current.pop();
        let root = mount(GoalChartProps {
            data,
            row_width: None,
            chart_height: CHART_HEIGHT,
        });
        TimeoutFuture::new(50).await;

        assert!(root.query_selector(".chart-error").unwrap().is_some());
        assert!(root.query_selector(".chart-row").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    async fn test_row_width_override_skips_measurement() {
        let root = mount(GoalChartProps {
            data: sample_data(),
            row_width: Some(300.0),
            chart_height: CHART_HEIGHT,
        });
        TimeoutFuture::new(50).await;

        let svg = root.query_selector("svg").unwrap().unwrap();
        // 300px plot plus the 140/20 left and right margins
        assert_eq!(svg.get_attribute("width").unwrap(), "460.0");
    }
}

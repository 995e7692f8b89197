use anyhow::Context as _;
use serde::Deserialize;
use yew::prelude::*;

mod components;
mod services;

use components::{GoalChart, TitleSection, TrendChart, TrendVariant};
use services::Logger;
use shared::{GoalChartData, TitleData, TrendChartData};

/// Everything one dashboard page renders, in the shape the data team
/// publishes it
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct DashboardData {
    title: TitleData,
    screening: GoalChartData,
    trends: TrendChartData,
}

// Gonorrhea surveillance snapshot used until a host page supplies its own
// data object
const SAMPLE_DATA: &str = r#"{
    "title": {
        "title": "Reduce the rate of *gonorrhea* in adults",
        "details": "(per 100,000 population)",
        "subtitle": "Adults aged 15 and over, statewide",
        "direction": "lower",
        "goal": 257.0,
        "rate_unit": "/100,000"
    },
    "screening": {
        "labels": ["Asian/Pacific Islander", "Black", "Hispanic/Latino", "White"],
        "current": [0.0, 45.0, 62.5, 80.0],
        "goal": 70.0,
        "direction": "higher",
        "data_type": "percentage"
    },
    "trends": {
        "title": "Gonorrhea Cases by Race/Ethnicity",
        "subtitle": "Reported cases, 2020-2024",
        "scope": "gonorrhea",
        "asian": [12.0, 15.0, 11.0, 18.0, 14.0],
        "black": [160.0, 172.0, 181.0, 169.0, 150.0],
        "hispanic": [88.0, 95.0, 102.0, 97.0, 91.0],
        "white": [120.0, 117.0, 131.0, 126.0, 110.0]
    }
}"#;

fn load_dashboard() -> anyhow::Result<DashboardData> {
    serde_json::from_str(SAMPLE_DATA).context("dashboard data is not valid JSON")
}

#[function_component(App)]
fn app() -> Html {
    let dashboard = use_memo((), |_| load_dashboard());

    match &*dashboard {
        Ok(data) => html! {
            <>
                <header class="header">
                    <div class="container">
                        <TitleSection data={data.title.clone()} />
                    </div>
                </header>

                <main class="main">
                    <div class="container">
                        <section class="goal-section">
                            <h2>{"Screening Coverage by Race/Ethnicity"}</h2>
                            <GoalChart data={data.screening.clone()} />
                        </section>

                        <section class="trend-section">
                            <TrendChart data={data.trends.clone()}
                                variant={TrendVariant::SideLegendWithTable} />
                        </section>

                        <section class="trend-section-wide">
                            <h2>{"Five-Year Trend"}</h2>
                            <TrendChart data={data.trends.clone()}
                                variant={TrendVariant::InlineLegend} />
                        </section>
                    </div>
                </main>
            </>
        },
        Err(error) => {
            Logger::error_with_component("app", &format!("{:#}", error));
            html! {
                <div class="chart-error">{"Dashboard data failed to load"}</div>
            }
        }
    }
}

fn main() {
    Logger::info_with_component("app", "mounting dashboard");
    yew::Renderer::<App>::new().render();
}

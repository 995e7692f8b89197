use shared::{parse_italic, Direction, TextSpan, TitleData};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TitleSectionProps {
    pub data: TitleData,
}

/// Render a title through the minimal `*text*` emphasis pass
fn title_spans(text: &str) -> Html {
    html! {
        <>
            {for parse_italic(text).into_iter().map(|span| match span {
                TextSpan::Plain(text) => html! { {text} },
                TextSpan::Italic(text) => html! { <i>{text}</i> },
            })}
        </>
    }
}

/// Page header: direction icon and label, composed title block, and the
/// formatted goal value.
#[function_component(TitleSection)]
pub fn title_section(props: &TitleSectionProps) -> Html {
    let data = &props.data;
    let (icon_class, direction_text) = match data.direction {
        Direction::Higher => ("fa-solid fa-circle-arrow-up fa-xl", "Increase"),
        Direction::Lower => ("fa-solid fa-circle-arrow-down fa-xl", "Reduce"),
    };

    html! {
        <div class="title-section">
            <div class="direction-indicator">
                <span class="direction-icon"><i class={icon_class}></i></span>
                <span class="direction-text">{direction_text}</span>
            </div>
            <h1 class="main-title">
                <span class="title-main">{title_spans(&data.title)}</span>
                {if let Some(details) = &data.details {
                    html! { <span class="title-details">{details}</span> }
                } else {
                    html! {}
                }}
                {if let Some(subtitle) = &data.subtitle {
                    html! { <span class="subtitle">{subtitle}</span> }
                } else {
                    html! {}
                }}
            </h1>
            <div class="goal-value">{data.formatted_goal()}</div>
        </div>
    }
}

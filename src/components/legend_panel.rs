use yew::prelude::*;

use super::grid_view::{ANCHOR_COLOR, BLOCKED_COLOR, PATH_COLOR, VISITED_COLOR, WEIGHT_COLORS};

#[derive(Properties, PartialEq, Clone)]
struct LegendRowProps {
    pub color: &'static str,
    pub label: &'static str,
}

#[function_component(LegendRow)]
fn legend_row(props: &LegendRowProps) -> Html {
    html! {
        <div style="display:flex; align-items:center; gap:8px; margin:3px 0;">
            <span style={format!("display:inline-block; width:12px; height:12px; background:{}; border:1px solid #30363d; border-radius:2px;", props.color)}></span>
            <span>{ props.label }</span>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    pub weighting_enabled: bool,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    html! {
        <div style="border:1px solid #d0d7de; border-radius:8px; padding:10px; font-size:13px; min-width:160px;">
            <div style="font-weight:600; margin-bottom:6px;">{"Legend"}</div>
            <LegendRow color={ANCHOR_COLOR} label="Start / Goal" />
            <LegendRow color={BLOCKED_COLOR} label="Wall" />
            <LegendRow color={VISITED_COLOR} label="Explored" />
            <LegendRow color={PATH_COLOR} label="Path" />
            { if props.weighting_enabled { html! {
                <div style="display:flex; align-items:center; gap:8px; margin:3px 0;">
                    <span style="display:flex;">
                        { for WEIGHT_COLORS.iter().map(|c| html! {
                            <span style={format!("display:inline-block; width:8px; height:12px; background:{c};")}></span>
                        }) }
                    </span>
                    <span>{"Weight 1-9"}</span>
                </div>
            } } else { html! {} } }
        </div>
    }
}

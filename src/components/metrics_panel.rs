use yew::prelude::*;

use crate::state::MetricsView;
use crate::util::fmt2;

#[derive(Properties, PartialEq, Clone)]
pub struct MetricsPanelProps {
    /// `None` until a solve completes with a path.
    pub metrics: Option<MetricsView>,
}

#[function_component]
pub fn MetricsPanel(props: &MetricsPanelProps) -> Html {
    let Some(m) = &props.metrics else {
        return html! {};
    };
    let card_style = "background:#f6f8fa; border:1px solid #d0d7de; border-radius:8px; padding:10px; min-width:130px;";
    let name_style = "font-size:12px; font-weight:600; opacity:0.7;";
    let value_style = "font-size:20px; font-weight:700; font-variant-numeric:tabular-nums;";
    let card = |name: &str, value: String| {
        html! {
            <div style={card_style}>
                <div style={name_style}>{ name.to_string() }</div>
                <div style={value_style}>{ value }</div>
            </div>
        }
    };
    html! {
        <div style="border:1px solid #d0d7de; border-radius:8px; padding:12px; max-width:800px;">
            <h3 style="margin:0 0 8px 0;">{"Algorithm Performance Metrics"}</h3>
            <div style="display:flex; flex-wrap:wrap; gap:8px;">
                { card("Explored Cells", m.explored_size.to_string()) }
                { card("Frontier Size", m.frontier_size.to_string()) }
                { card("Time Taken (ms)", fmt2(m.time_taken_ms)) }
                { card("Path Length", m.path_length.to_string()) }
                { card("Total Cost", fmt2(m.total_cost)) }
                { card("Exploration Efficiency", fmt2(m.exploration_efficiency)) }
                { card("Time Efficiency", fmt2(m.time_efficiency)) }
                { card("Memory Usage", m.memory_usage.to_string()) }
            </div>
            <div style="margin-top:8px; font-size:11px; opacity:0.6; font-style:italic;">
                {"Lower exploration and time efficiency values indicate better performance."}
            </div>
        </div>
    }
}

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::model::{EditMode, MAX_SIZE, MAX_WEIGHT, MIN_SIZE, MIN_WEIGHT};
use crate::solver::{algorithm, SolveOptions, ALGORITHMS, HEURISTICS};

const MODES: [EditMode; 4] = [
    EditMode::PaintObstacle,
    EditMode::PlaceStart,
    EditMode::PlaceGoal,
    EditMode::PaintWeight,
];

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub mode: EditMode,
    pub on_mode_change: Callback<EditMode>,
    pub options: SolveOptions,
    pub on_options_change: Callback<SolveOptions>,
    pub weighting_enabled: bool,
    pub on_weighting_toggle: Callback<bool>,
    pub brush: u8,
    pub on_brush_change: Callback<u8>,
    pub on_randomize_weights: Callback<()>,
    pub grid_size: usize,
    pub on_resize: Callback<usize>,
    /// Local validation failure shown inline; blocks submission upstream.
    pub validation: Option<String>,
    pub on_solve: Callback<()>,
}

const LABEL_STYLE: &str = "font-size:12px; font-weight:600; opacity:0.8;";
const ROW_STYLE: &str = "display:flex; flex-direction:column; gap:4px;";

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let size_field = use_state(|| props.grid_size.to_string());
    let algo = algorithm(&props.options.algorithm);
    let needs_heuristic = algo.map(|a| a.needs_heuristic).unwrap_or(false);
    let needs_beam = algo.map(|a| a.needs_beam_width).unwrap_or(false);
    let beam_max = props.grid_size.saturating_sub(1);

    let on_mode = {
        let cb = props.on_mode_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                if let Some(mode) = EditMode::from_value(&select.value()) {
                    cb.emit(mode);
                }
            }
        })
    };
    let on_algorithm = {
        let cb = props.on_options_change.clone();
        let options = props.options.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                cb.emit(SolveOptions {
                    algorithm: select.value(),
                    ..options.clone()
                });
            }
        })
    };
    let on_directions = {
        let cb = props.on_options_change.clone();
        let options = props.options.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                let directions = if select.value() == "8" { 8 } else { 4 };
                cb.emit(SolveOptions {
                    directions,
                    ..options.clone()
                });
            }
        })
    };
    let on_heuristic = {
        let cb = props.on_options_change.clone();
        let options = props.options.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(heuristic_type) = select.value().parse::<u8>() {
                    cb.emit(SolveOptions {
                        heuristic_type,
                        ..options.clone()
                    });
                }
            }
        })
    };
    let on_beam_width = {
        let cb = props.on_options_change.clone();
        let options = props.options.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                if let Ok(beam_width) = input.value().parse::<usize>() {
                    cb.emit(SolveOptions {
                        beam_width,
                        ..options.clone()
                    });
                }
            }
        })
    };
    let on_weighted = {
        let cb = props.on_weighting_toggle.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                cb.emit(input.checked());
            }
        })
    };
    let on_brush = {
        let cb = props.on_brush_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                if let Ok(value) = input.value().parse::<u8>() {
                    cb.emit(value.clamp(MIN_WEIGHT, MAX_WEIGHT));
                }
            }
        })
    };
    let on_size_input = {
        let size_field = size_field.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                size_field.set(input.value());
            }
        })
    };
    let on_apply_size = {
        let size_field = size_field.clone();
        let cb = props.on_resize.clone();
        Callback::from(move |_: MouseEvent| {
            if let Ok(size) = size_field.parse::<usize>() {
                if (MIN_SIZE..=MAX_SIZE).contains(&size) {
                    cb.emit(size);
                }
            }
        })
    };
    let on_randomize = {
        let cb = props.on_randomize_weights.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_solve = {
        let cb = props.on_solve.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div style="display:flex; flex-direction:column; gap:12px; background:rgba(22,27,34,0.04); border:1px solid #d0d7de; border-radius:8px; padding:12px; min-width:220px;">
            <h1 style="margin:0; font-size:18px;">{"Maze Explorer"}</h1>

            <div style={ROW_STYLE}>
                <span style={LABEL_STYLE}>{"Edit mode (keys 1-4)"}</span>
                <select onchange={on_mode}>
                    { for MODES.iter().map(|m| html! {
                        <option value={m.value()} selected={*m == props.mode}>{ m.label() }</option>
                    }) }
                </select>
            </div>

            <div style={ROW_STYLE}>
                <span style={LABEL_STYLE}>{"Algorithm"}</span>
                <select onchange={on_algorithm}>
                    { for ALGORITHMS.iter().map(|a| html! {
                        <option value={a.id} selected={a.id == props.options.algorithm}>{ a.name }</option>
                    }) }
                </select>
            </div>

            <div style={ROW_STYLE}>
                <span style={LABEL_STYLE}>{"Directions"}</span>
                <select onchange={on_directions}>
                    <option value="4" selected={props.options.directions != 8}>{"4 (orthogonal)"}</option>
                    <option value="8" selected={props.options.directions == 8}>{"8 (diagonals)"}</option>
                </select>
            </div>

            { if needs_heuristic { html! {
                <div style={ROW_STYLE}>
                    <span style={LABEL_STYLE}>{"Heuristic"}</span>
                    <select onchange={on_heuristic}>
                        { for HEURISTICS.iter().enumerate().map(|(i, name)| html! {
                            <option value={i.to_string()} selected={i as u8 == props.options.heuristic_type}>{ *name }</option>
                        }) }
                    </select>
                </div>
            } } else { html! {} } }

            { if needs_beam { html! {
                <div style={ROW_STYLE}>
                    <span style={LABEL_STYLE}>{ format!("Beam width (1-{beam_max})") }</span>
                    <input type="number" min="1" max={beam_max.to_string()}
                        value={props.options.beam_width.to_string()} oninput={on_beam_width} />
                </div>
            } } else { html! {} } }

            <label style="display:flex; align-items:center; gap:8px;">
                <input type="checkbox" checked={props.weighting_enabled} onchange={on_weighted} />
                <span>{"Enable weighted maze"}</span>
            </label>

            { if props.weighting_enabled { html! {
                <div style="display:flex; align-items:center; gap:8px;">
                    <button onclick={on_randomize}>{"Random weights"}</button>
                    <label style="display:flex; align-items:center; gap:4px;">
                        <span style={LABEL_STYLE}>{"Brush"}</span>
                        <input type="number" min={MIN_WEIGHT.to_string()} max={MAX_WEIGHT.to_string()}
                            value={props.brush.to_string()} oninput={on_brush}
                            style="width:48px;" />
                    </label>
                </div>
            } } else { html! {} } }

            <div style={ROW_STYLE}>
                <span style={LABEL_STYLE}>{ format!("Grid size ({MIN_SIZE}-{MAX_SIZE})") }</span>
                <div style="display:flex; gap:6px;">
                    <input type="number" min={MIN_SIZE.to_string()} max={MAX_SIZE.to_string()}
                        value={(*size_field).clone()} oninput={on_size_input} style="width:64px;" />
                    <button onclick={on_apply_size}>{"Resize"}</button>
                </div>
            </div>

            { if let Some(message) = &props.validation { html! {
                <div style="color:#d1242f; font-size:12px; border:1px solid #d1242f; border-radius:6px; padding:6px;">
                    { message.clone() }
                </div>
            } } else { html! {} } }

            <button onclick={on_solve} style="font-weight:600; padding:6px;">{"Solve"}</button>
        </div>
    }
}

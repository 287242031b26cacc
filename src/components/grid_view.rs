use yew::prelude::*;

use crate::model::{GridState, Pos};
use crate::state::{CellVisual, Overlay};

pub const ANCHOR_COLOR: &str = "#2196F3";
pub const BLOCKED_COLOR: &str = "#2f3641";
pub const PATH_COLOR: &str = "#4CAF50";
pub const VISITED_COLOR: &str = "#FFC107";

/// Brown scale for weights 1..=9, light to dark.
pub const WEIGHT_COLORS: [&str; 9] = [
    "#F5E6D3", "#E6D5B8", "#D4C4A3", "#C2B38E", "#B0A279", "#9E9164", "#8C804F", "#7A6F3A",
    "#685E25",
];

#[derive(Properties, PartialEq, Clone)]
pub struct GridViewProps {
    pub grid: GridState,
    pub overlay: Overlay,
    pub on_pointer_down: Callback<Pos>,
    pub on_pointer_enter: Callback<Pos>,
    pub on_pointer_up: Callback<()>,
}

fn cell_background(grid: &GridState, overlay: &Overlay, pos: Pos) -> &'static str {
    if grid.is_anchor(pos) {
        return ANCHOR_COLOR;
    }
    if grid.is_blocked(pos) {
        return BLOCKED_COLOR;
    }
    match overlay.get(pos) {
        Some(CellVisual::Path) => PATH_COLOR,
        Some(CellVisual::Explored) => VISITED_COLOR,
        None => {
            if grid.weighting_enabled {
                WEIGHT_COLORS[(grid.weight_at(pos) - 1) as usize]
            } else {
                "#ffffff"
            }
        }
    }
}

fn cell_label(grid: &GridState, pos: Pos) -> String {
    if pos == grid.start {
        "A".to_string()
    } else if pos == grid.goal {
        "B".to_string()
    } else if grid.weighting_enabled && !grid.is_blocked(pos) {
        grid.weight_at(pos).to_string()
    } else {
        String::new()
    }
}

#[function_component]
pub fn GridView(props: &GridViewProps) -> Html {
    let size = props.grid.size;
    let container_style = format!(
        "display:grid; grid-template-columns:repeat({size}, 1fr); gap:1px; background:#d0d7de; \
         border:1px solid #d0d7de; width:100%; max-width:800px; aspect-ratio:1/1; \
         user-select:none;"
    );

    let cells = (0..size).flat_map(|row| (0..size).map(move |col| Pos::new(row, col)));
    html! {
        <div style={container_style}
            onmouseup={ {
                let cb = props.on_pointer_up.clone();
                Callback::from(move |_: MouseEvent| cb.emit(()))
            } }
            onmouseleave={ {
                let cb = props.on_pointer_up.clone();
                Callback::from(move |_: MouseEvent| cb.emit(()))
            } }>
            { for cells.map(|pos| {
                let background = cell_background(&props.grid, &props.overlay, pos);
                let label = cell_label(&props.grid, pos);
                let onmousedown = {
                    let cb = props.on_pointer_down.clone();
                    Callback::from(move |e: MouseEvent| {
                        // keep the browser from starting a text/image drag
                        e.prevent_default();
                        cb.emit(pos);
                    })
                };
                let onmouseover = {
                    let cb = props.on_pointer_enter.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(pos))
                };
                html! {
                    <button
                        key={format!("c-{}-{}", pos.row, pos.col)}
                        style={format!(
                            "background:{background}; border:none; aspect-ratio:1/1; \
                             font-size:11px; font-weight:600; color:#1f2328; padding:0; \
                             cursor:pointer;"
                        )}
                        {onmousedown}
                        {onmouseover}
                    >{ label }</button>
                }
            }) }
        </div>
    }
}

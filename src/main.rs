use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;
use yew::prelude::*;

mod components;
mod model;
mod solver;
mod state;
mod util;

use components::{Alert, ControlsPanel, GridView, LegendPanel, MetricsPanel};
use model::{DEFAULT_SIZE, EditMode, GridAction, GridState, Pos};
use solver::SolveOptions;
use state::interaction::shortcut_mode;
use state::playback::{self, OverlayAction};
use state::{CancelHandle, Frame, Generation, Interaction, MetricsView, Outcome, Overlay, Phase};

#[function_component(App)]
fn app() -> Html {
    let grid = use_reducer(|| GridState::new(DEFAULT_SIZE));
    let overlay = use_reducer(|| Overlay::new(DEFAULT_SIZE));
    let interaction = use_mut_ref(Interaction::default);
    // mirrors of interaction-internal values the panels render
    let mode = use_state(|| EditMode::PaintObstacle);
    let brush = use_state(|| 1u8);
    let options = use_state(SolveOptions::default);
    let metrics = use_state(|| None::<MetricsView>);
    let alert = use_state(|| None::<String>);
    let validation = use_state(|| None::<String>);
    // cancel handle for the single active playback session, if any
    let active_cancel = use_mut_ref(|| None::<CancelHandle>);
    // submission generation; a solve task whose token has gone stale drops
    // its response instead of animating
    let generation = use_memo((), |_| Generation::default());

    // Edits and new submissions invalidate any stale visualization before
    // they apply: move the generation on so in-flight responses get dropped,
    // cancel the running playback at its next step boundary, and wipe the
    // overlay.
    let invalidate = {
        let overlay = overlay.clone();
        let active_cancel = active_cancel.clone();
        let generation = generation.clone();
        move |size: usize| {
            generation.bump();
            if let Some(handle) = active_cancel.borrow_mut().take() {
                handle.cancel();
            }
            overlay.dispatch(OverlayAction::Reset(size));
        }
    };

    let on_cell_down = {
        let grid = grid.clone();
        let interaction = interaction.clone();
        let invalidate = invalidate.clone();
        Callback::from(move |pos: Pos| {
            let action = interaction.borrow_mut().pointer_down(pos, &grid);
            if let Some(action) = action {
                invalidate(grid.size);
                grid.dispatch(action);
            }
        })
    };
    let on_cell_enter = {
        let grid = grid.clone();
        let interaction = interaction.clone();
        let invalidate = invalidate.clone();
        Callback::from(move |pos: Pos| {
            let action = interaction.borrow_mut().pointer_enter(pos, &grid);
            if let Some(action) = action {
                invalidate(grid.size);
                grid.dispatch(action);
            }
        })
    };
    let on_pointer_up = {
        let interaction = interaction.clone();
        Callback::from(move |_: ()| interaction.borrow_mut().pointer_up())
    };

    let on_mode_change = {
        let mode = mode.clone();
        let interaction = interaction.clone();
        Callback::from(move |next: EditMode| {
            interaction.borrow_mut().set_mode(next);
            mode.set(next);
        })
    };
    let on_brush_change = {
        let brush = brush.clone();
        let interaction = interaction.clone();
        Callback::from(move |value: u8| {
            interaction.borrow_mut().brush = value;
            brush.set(value);
        })
    };
    let on_options_change = {
        let options = options.clone();
        Callback::from(move |next: SolveOptions| options.set(next))
    };
    let on_weighting_toggle = {
        let grid = grid.clone();
        let invalidate = invalidate.clone();
        Callback::from(move |enabled: bool| {
            invalidate(grid.size);
            grid.dispatch(GridAction::SetWeightingEnabled(enabled));
        })
    };
    let on_randomize_weights = {
        let grid = grid.clone();
        let invalidate = invalidate.clone();
        Callback::from(move |_: ()| {
            invalidate(grid.size);
            grid.dispatch(GridAction::RandomizeWeights);
        })
    };
    let on_resize = {
        let grid = grid.clone();
        let metrics = metrics.clone();
        let invalidate = invalidate.clone();
        Callback::from(move |size: usize| {
            invalidate(size);
            metrics.set(None);
            grid.dispatch(GridAction::Resize(size));
        })
    };

    // Submission: validate locally, send one best-effort request, then hand
    // the response to playback. A new submission supersedes any in-flight
    // playback before the request leaves.
    let on_solve = {
        let grid = grid.clone();
        let options = options.clone();
        let overlay = overlay.clone();
        let metrics = metrics.clone();
        let alert = alert.clone();
        let validation = validation.clone();
        let active_cancel = active_cancel.clone();
        let generation = generation.clone();
        let invalidate = invalidate.clone();
        Callback::from(move |_: ()| {
            let request = match solver::build_request(&grid, &options) {
                Ok(request) => request,
                Err(err) => {
                    validation.set(Some(err.to_string()));
                    return;
                }
            };
            validation.set(None);
            invalidate(grid.size);
            metrics.set(None);
            alert.set(None);
            let submission = generation.current();

            let algorithm = options.algorithm.clone();
            let start = grid.start;
            let goal = grid.goal;
            let overlay = overlay.clone();
            let metrics = metrics.clone();
            let alert = alert.clone();
            let active_cancel = active_cancel.clone();
            let generation = generation.clone();
            spawn_local(async move {
                let response = solver::solve(&request).await;
                // a newer submission or edit superseded this one while the
                // request was in flight; its result belongs to nobody
                if !generation.is_current(submission) {
                    return;
                }
                let response = match response {
                    Ok(response) => response,
                    Err(err) => {
                        // transport problems get logged; the user sees the
                        // same kind of alert as a solver-reported failure
                        console::error!(format!("solver request failed: {err}"));
                        alert.set(Some(format!(
                            "{err}: couldn't reach the solver while running {}.",
                            solver::display_name(&algorithm)
                        )));
                        return;
                    }
                };
                match playback::evaluate(&response, start, goal, &algorithm) {
                    Outcome::Failure(message) => alert.set(Some(message)),
                    Outcome::Animate {
                        session,
                        metrics: view,
                    } => {
                        *active_cancel.borrow_mut() = Some(session.cancel_handle());
                        let render = {
                            let overlay = overlay.clone();
                            Callback::from(move |frame: Frame| {
                                overlay.dispatch(OverlayAction::Paint(frame));
                            })
                        };
                        let done = playback::run(session, render).await == Phase::Done;
                        // only release the cancel slot while it still holds
                        // this task's own handle
                        if done && generation.is_current(submission) {
                            *active_cancel.borrow_mut() = None;
                            metrics.set(Some(view));
                        }
                    }
                }
            });
        })
    };

    {
        // Global listeners: digit keys switch modes, and a mouseup anywhere
        // ends the current paint gesture even if it left the grid.
        let on_mode_change = on_mode_change.clone();
        let interaction = interaction.clone();
        use_effect_with((), move |_| {
            let document = gloo::utils::document();
            let keydown = EventListener::new(&document, "keydown", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    let typing = event
                        .target()
                        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                        .is_some_and(|element| {
                            matches!(element.tag_name().as_str(), "INPUT" | "SELECT" | "TEXTAREA")
                        });
                    if let Some(next) = shortcut_mode(&event.code(), typing) {
                        on_mode_change.emit(next);
                    }
                }
            });
            let mouseup = EventListener::new(&document, "mouseup", move |_| {
                interaction.borrow_mut().pointer_up();
            });
            move || {
                drop(keydown);
                drop(mouseup);
            }
        });
    }

    let on_dismiss_alert = {
        let alert = alert.clone();
        Callback::from(move |_: ()| alert.set(None))
    };

    html! {
        <div style="display:flex; flex-direction:column; gap:16px; padding:16px; font-family:sans-serif; max-width:1100px; margin:0 auto;">
            <div style="display:flex; gap:16px; align-items:flex-start;">
                <div style="display:flex; flex-direction:column; gap:12px;">
                    <ControlsPanel
                        mode={*mode}
                        on_mode_change={on_mode_change.clone()}
                        options={(*options).clone()}
                        on_options_change={on_options_change}
                        weighting_enabled={grid.weighting_enabled}
                        on_weighting_toggle={on_weighting_toggle}
                        brush={*brush}
                        on_brush_change={on_brush_change}
                        on_randomize_weights={on_randomize_weights}
                        grid_size={grid.size}
                        on_resize={on_resize}
                        validation={(*validation).clone()}
                        on_solve={on_solve}
                    />
                    <LegendPanel weighting_enabled={grid.weighting_enabled} />
                </div>
                <GridView
                    grid={(*grid).clone()}
                    overlay={(*overlay).clone()}
                    on_pointer_down={on_cell_down}
                    on_pointer_enter={on_cell_enter}
                    on_pointer_up={on_pointer_up}
                />
            </div>
            <MetricsPanel metrics={(*metrics).clone()} />
            { if let Some(message) = &*alert {
                html! { <Alert message={message.clone()} on_dismiss={on_dismiss_alert} /> }
            } else {
                html! {}
            } }
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

pub mod interaction;
pub mod playback;

pub use interaction::Interaction;
pub use playback::{
    CancelHandle, CellVisual, Frame, Generation, MetricsView, Outcome, Overlay, OverlayAction,
    Phase,
};

pub mod alert;
pub mod controls_panel;
pub mod grid_view;
pub mod legend_panel;
pub mod metrics_panel;

pub use alert::Alert;
pub use controls_panel::ControlsPanel;
pub use grid_view::GridView;
pub use legend_panel::LegendPanel;
pub use metrics_panel::MetricsPanel;

// Small formatting helpers shared by the panels.

pub fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}

/// The scrollable surface a listing is rendered into.
pub trait ViewportPort: Send + Sync {
    fn scroll_y(&self) -> f64;

    fn scroll_to(&self, y: f64);
}

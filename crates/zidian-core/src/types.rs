use crate::render::View;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Fresh snapshot for the UI to draw
    Render(View),
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    SetQuery(String),
    Submit,
    Close,
}

use crate::dispatch::ActionId;

/// UI-level intents produced by key handling and consumed by `App::dispatch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Event was consumed, nothing further to do
    None,
    Quit,
    Tick,

    FocusNext,
    FocusPrev,

    NextTab,
    PrevTab,
    SelectTab(usize),

    /// Trigger a content-generation action for the visible platform
    Generate(ActionId),

    ScrollUp(u16),
    ScrollDown(u16),

    CopyOutput,
    ClearOutput,
}

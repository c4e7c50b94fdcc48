use linccora_core::SearchOutcome;

/// Which rotating element a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Landing,
    Slideshow,
}

/// Everything the event loop reacts to, funnelled through one channel
#[derive(Debug)]
pub enum AppEvent {
    Input(crossterm::event::Event),
    SearchFinished(SearchOutcome),
    Tick(TimerKind),
}

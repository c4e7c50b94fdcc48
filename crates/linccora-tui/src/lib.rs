// Terminal storefront: landing, catalog with filters, wishlist

pub mod app;
pub mod event;
pub mod runner;
pub mod ui;

pub use app::{App, FilterRow, InputMode, View};
pub use event::{AppEvent, TimerKind};
pub use runner::run_tui;

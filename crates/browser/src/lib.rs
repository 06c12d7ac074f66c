//! Browser crate for the recipe browser.
//!
//! Maps user intents onto aggregator queries and hands the results to a
//! `Presenter`. `TerminalPresenter` is the one shipped surface.

pub mod intent;
pub mod presenter;
pub mod session;
pub mod terminal;

pub use intent::{Intent, IntentParseError};
pub use presenter::Presenter;
pub use session::{BrowserSession, Rendered};
pub use terminal::{DEFAULT_SPOTLIGHT, TerminalPresenter};

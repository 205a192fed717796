//! Terminal interaction
//!
//! Line prompts in cooked mode, a raw-mode selection menu, and the spinner
//! shown while waiting on the suggestion service. At most one of them holds
//! the terminal at any time.

pub mod line;
mod prompter;
pub mod raw;
pub mod select;
pub mod spinner;

pub use line::{ask, parse_yes_no};
pub use prompter::{Prompter, TerminalPrompter};
pub use select::{Resolution, SelectionState, TerminalSize, run_selection, select};
pub use spinner::{SpinnerState, run_with_spinner};

pub mod keypad;
pub mod navigation;
pub mod screen;
pub mod summary;

pub use keypad::{KEYPAD_ROWS, KeypadError, StrokeCounter};
pub use navigation::HoleNavigator;
pub use screen::{HolePanel, ScorecardScreen, ScreenEffect, ScreenEvent, ScreenView};
pub use summary::{HoleSummary, RoundSummary};

//! Application state module

mod app_state;
mod countdown;
mod counters;
pub mod forms;
mod splash_state;

pub use app_state::*;
pub use countdown::*;
pub use counters::*;
pub use forms::*;
pub use splash_state::*;

//! Access levels and the changes that can be applied to them

mod change;
mod level;

pub use change::AccessChange;
pub use level::{AccessLevel, UnknownAccessLevel};

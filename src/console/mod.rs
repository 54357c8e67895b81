//! Terminal presentation layer over the step controller.

pub mod intent;
pub mod render;
pub mod repl;

pub use intent::{Intent, IntentParser};
pub use render::{help, render};
pub use repl::{Console, Reply};

pub mod keyboard;
pub mod keys;

pub use keyboard::{wire_global_keydown, KeyboardWiring};

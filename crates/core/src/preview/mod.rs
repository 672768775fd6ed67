//! Safe preview rendering: whitelisting, escaping, unsafe-content
//! detection, and the built-in HTML/JSON renderers.

pub mod external;
pub mod renderer;
pub mod sanitize;

pub use renderer::{render, Preview, PreviewBody};

//! A scroll-driven 3D reveal animation for macOS using Metal
//!
//! Five flat panels slide up from below the viewport into a fixed layout
//! as the user scrolls or drags. A bounded scroll accumulator feeds a
//! windowed position mapper; each frame the panels ease toward their
//! mapped targets and the scene is rendered through Metal.
//!
//! # Example
//! ```no_run
//! use scroll_reveal::app::App;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     App::run()
//! }
//! ```

#[cfg(target_os = "macos")]
pub mod app;
pub mod core;
pub mod input;
pub mod math;
#[cfg(target_os = "macos")]
pub mod renderer;
pub mod scene;

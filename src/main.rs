mod core;
mod input;
mod math;
mod scene;

#[cfg(target_os = "macos")]
mod app;
#[cfg(target_os = "macos")]
mod renderer;

#[cfg(target_os = "macos")]
use app::App;

#[cfg(target_os = "macos")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    crate::log!("Starting scroll reveal");
    App::run()
}

#[cfg(not(target_os = "macos"))]
fn main() {
    crate::warn!("scroll-reveal requires macOS; no renderer is available on this platform");
}

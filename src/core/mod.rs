mod panels;
mod reveal;
mod scroll;

pub use panels::{panel_layout, AnimatedPanel, PanelDescriptor, PANEL_COUNT, START_OFFSET};
pub use reveal::{local_progress, window_width, Reveal, EASING_FACTOR};
pub use scroll::{ScrollState, MAX_SCROLL};

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        println!("[LOG] {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!("[WARN] {}", format!($($arg)*));
    };
}

//! Display sharing and high-level display operations

pub mod scroll;
pub mod shared;
pub mod splash;

pub use scroll::{blank_row, scroll_text_suspending, Frame, Frames, ScrollSession};
pub use shared::SharedDisplay;
pub use splash::{
    animate_connecting, connect_with_progress, greet, show_for, show_status, ConnectingDots,
    CONNECTED, CONNECTING, GREETING,
};

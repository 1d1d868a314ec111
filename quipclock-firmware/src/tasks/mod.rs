//! Embassy async tasks

pub mod display;
pub mod network;

pub use display::display_task;
pub use network::{net_task, wifi_task};

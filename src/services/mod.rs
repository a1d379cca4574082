pub mod browser;
pub mod menu;
pub mod poll;
pub mod process;
pub mod selection;
pub mod tracking;
pub mod window_tools;

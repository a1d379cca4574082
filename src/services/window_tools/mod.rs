//! Window tools: thin adapters over external X11 utilities.
//!
//! This module only runs wmctrl/xdotool/xdpyinfo and parses their output.
//! It MUST NOT decide which windows are tracked; identity, detection and
//! reconciliation live in `services::tracking`.

mod dry_run;
mod r#trait;
mod wmctrl;
mod x11;
mod xdotool;
mod xdpyinfo;

pub use self::dry_run::DryRunDesktop;
pub use self::r#trait::{create_desktop, Desktop, DisplayInfo, WindowControl, WindowLister};

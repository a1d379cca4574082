//! Selection capture: ordered fallback over X11 selection buffers.
//!
//! Readers only fetch raw buffer contents; trimming, timeouts and the
//! PRIMARY-then-CLIPBOARD policy live in `SelectionResolver`.

mod dry_run;
mod resolver;
mod r#trait;
mod xsel;

pub use self::r#trait::{
    create_selection_reader, SelectionCandidate, SelectionKind, SelectionPolicy, SelectionReader,
    SelectionSource,
};
pub use self::dry_run::DryRunSelection;
pub use self::resolver::SelectionResolver;

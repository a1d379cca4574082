use super::{SelectionKind, SelectionReader};
use crate::error::Result;
use crate::services::process::run_tool;

pub struct XselReader;

impl XselReader {
    pub fn new() -> Self {
        Self
    }

    fn args(kind: SelectionKind) -> [&'static str; 2] {
        match kind {
            SelectionKind::Primary => ["--output", "--primary"],
            SelectionKind::Clipboard => ["--output", "--clipboard"],
        }
    }
}

#[async_trait::async_trait]
impl SelectionReader for XselReader {
    async fn read(&self, kind: SelectionKind) -> Result<String> {
        run_tool("xsel", &Self::args(kind)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_passes_clear_flag() {
        for kind in [SelectionKind::Primary, SelectionKind::Clipboard] {
            let args = XselReader::args(kind);
            assert!(args.contains(&"--output"));
            assert!(!args.iter().any(|arg| *arg == "-c" || *arg == "--clear"));
        }
    }
}

use crate::{animation::ease::Ease, foundation::core::Rgb8};

/// Visual parameters of a run. Copied into the run and never mutated mid-run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleParameters {
    /// Color of the glow line.
    pub line_color: Rgb8,
    /// Easing applied to every phase's progress.
    pub easing: Ease,
}

impl StyleParameters {
    /// Style with the given line color and easing.
    pub fn new(line_color: Rgb8, easing: Ease) -> Self {
        Self { line_color, easing }
    }
}

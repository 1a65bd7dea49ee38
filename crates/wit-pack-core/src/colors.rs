//! Terminal styling for CLI status lines.

/// Escape sequences keyed by role rather than hue.
///
/// With styling off every field is empty, so format strings can interpolate
/// them unconditionally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Colors {
    /// Error headlines (bold red).
    pub error: &'static str,
    /// Success summaries (green).
    pub success: &'static str,
    /// Paths and names worth picking out (bold).
    pub emphasis: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub const STYLED: Self = Self {
        error: "\x1b[1;31m",
        success: "\x1b[32m",
        emphasis: "\x1b[1m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Self = Self {
        error: "",
        success: "",
        emphasis: "",
        reset: "",
    };

    pub const fn new(styled: bool) -> Self {
        if styled { Self::STYLED } else { Self::PLAIN }
    }

    pub fn is_styled(&self) -> bool {
        *self != Self::PLAIN
    }
}

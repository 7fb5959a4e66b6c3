//! Highlight color palette
//!
//! A fixed table of swatches. Each swatch has a stable id used by pickers and
//! the CLI, a solid display color for the swatch itself, and the translucent
//! overlay that is actually painted behind highlighted text.

/// One entry of the highlight palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    /// Stable identifier (e.g. "yellow")
    pub name: &'static str,
    /// Solid color shown in the picker
    pub display: &'static str,
    /// Semi-transparent overlay used as the highlight background
    pub overlay: &'static str,
}

pub const SWATCHES: [Swatch; 4] = [
    Swatch {
        name: "yellow",
        display: "#FFF9B1",
        overlay: "rgba(255, 249, 177, 0.5)",
    },
    Swatch {
        name: "red",
        display: "#FFCEE0",
        overlay: "rgba(253, 164, 175, 0.5)",
    },
    Swatch {
        name: "blue",
        display: "#A6CCF5",
        overlay: "rgba(147, 197, 253, 0.5)",
    },
    Swatch {
        name: "green",
        display: "#D5F692",
        overlay: "rgba(163, 230, 53, 0.5)",
    },
];

/// The swatch used when markup carries no usable color
pub fn default_swatch() -> &'static Swatch {
    &SWATCHES[0]
}

/// Look up a swatch by id or by its display color (case-insensitive)
pub fn find_swatch(key: &str) -> Option<&'static Swatch> {
    let key = key.trim();
    SWATCHES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(key) || s.display.eq_ignore_ascii_case(key))
}

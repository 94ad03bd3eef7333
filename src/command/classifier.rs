//! Classify free-text commands into workflow intents
//!
//! Classification is plain case-insensitive substring matching over a fixed,
//! ordered pattern table. The table order is part of the contract: when a
//! command mentions several workflows, the earliest-declared intent wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Commands shorter than this (after trimming) are never classified
pub const MIN_COMMAND_LEN: usize = 3;

/// Workflow category for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Array duplication along X, or driven by an empty
    SmartArray,
    /// Bevel + subdivision + smooth shading
    HardSurface,
    /// Mirror on X with the positive half removed
    Symmetrize,
    /// Deform a mesh along a curve
    CurveDeform,
    /// Add shell thickness
    Solidify,
    /// Conform one mesh onto another
    Shrinkwrap,
    /// Could not determine intent
    Unknown,
}

impl Intent {
    /// Every workflow intent, in classification priority order
    pub const WORKFLOWS: [Intent; 6] = [
        Intent::SmartArray,
        Intent::HardSurface,
        Intent::Symmetrize,
        Intent::CurveDeform,
        Intent::Solidify,
        Intent::Shrinkwrap,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Intent::SmartArray => "Smart Array",
            Intent::HardSurface => "Hard-Surface",
            Intent::Symmetrize => "Symmetrize",
            Intent::CurveDeform => "Curve Deform",
            Intent::Solidify => "Solidify",
            Intent::Shrinkwrap => "Shrinkwrap",
            Intent::Unknown => "Unknown",
        }
    }

    /// Lowercase label used in "Failed to apply ..." messages
    pub fn workflow_label(self) -> &'static str {
        match self {
            Intent::SmartArray => "smart array",
            Intent::HardSurface => "hard-surface setup",
            Intent::Symmetrize => "symmetrize",
            Intent::CurveDeform => "curve deform",
            Intent::Solidify => "solidify",
            Intent::Shrinkwrap => "shrinkwrap",
            Intent::Unknown => "unknown workflow",
        }
    }

    pub fn is_known(self) -> bool {
        self != Intent::Unknown
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Ordered mapping from intent to lowercase trigger substrings
///
/// Built at compile time; classification never rebuilds or allocates tables.
#[derive(Debug, Clone, Copy)]
pub struct CommandPatternTable {
    entries: &'static [(Intent, &'static [&'static str])],
}

/// The built-in pattern table
pub static COMMAND_PATTERNS: CommandPatternTable = CommandPatternTable::new(&[
    (
        Intent::SmartArray,
        &["array", "duplicate", "copies", "make 5", "create array"],
    ),
    (
        Intent::HardSurface,
        &["hard-surface", "hard surface", "subdivision", "subd", "bevel"],
    ),
    (
        Intent::Symmetrize,
        &["mirror", "symmetrize", "symmetric", "sym"],
    ),
    (
        Intent::CurveDeform,
        &["curve deform", "deform", "follow", "path", "bend"],
    ),
    (
        Intent::Solidify,
        &["solidify", "thickness", "thicken", "solid"],
    ),
    (Intent::Shrinkwrap, &["shrinkwrap", "wrap", "conform"]),
]);

impl CommandPatternTable {
    /// Patterns must already be lowercase; they are matched against
    /// lowercased input.
    pub const fn new(entries: &'static [(Intent, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [(Intent, &'static [&'static str])] {
        self.entries
    }

    pub fn patterns_for(&self, intent: Intent) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == intent)
            .map_or(&[], |(_, patterns)| *patterns)
    }

    /// Classify a command against this table
    pub fn classify(&self, text: &str) -> Intent {
        let normalized = text.trim().to_lowercase();

        if is_too_short(&normalized) {
            return Intent::Unknown;
        }

        for (intent, patterns) in self.entries {
            if patterns.iter().any(|pattern| normalized.contains(pattern)) {
                return *intent;
            }
        }

        Intent::Unknown
    }
}

/// True when fewer than `MIN_COMMAND_LEN` characters remain after trimming
pub fn is_too_short(text: &str) -> bool {
    text.trim().chars().nth(MIN_COMMAND_LEN - 1).is_none()
}

/// Classify a command with the built-in pattern table
pub fn classify(text: &str) -> Intent {
    COMMAND_PATTERNS.classify(text)
}

//! Named style presets offered for restyling an active puzzle

use std::fmt;
use std::str::FromStr;

use crate::io::error::{PuzzleError, invalid_parameter};

/// One-click restyle presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePreset {
    /// Warm vintage tone
    Sepia,
    /// High-contrast black and white
    Noir,
    /// Textured painterly look
    OilPainting,
    /// Neon glow
    Cyberpunk,
}

impl StylePreset {
    /// Every preset, in display order
    pub const ALL: [Self; 4] = [Self::Sepia, Self::Noir, Self::OilPainting, Self::Cyberpunk];

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sepia => "Sepia",
            Self::Noir => "Noir",
            Self::OilPainting => "Oil Painting",
            Self::Cyberpunk => "Cyberpunk",
        }
    }

    /// Instruction text sent to the edit collaborator
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Sepia => "Apply a sepia tone filter to give it a vintage classic feel",
            Self::Noir => "Convert to high-contrast black and white noir style",
            Self::OilPainting => "Transform into a textured oil painting",
            Self::Cyberpunk => "Add neon glows and cyberpunk aesthetic",
        }
    }

    /// Recognise a preset from free-form instruction text
    ///
    /// Matches either the exact preset instruction or a mention of its name.
    pub fn detect(instruction: &str) -> Option<Self> {
        let lowered = instruction.to_lowercase();
        Self::ALL.into_iter().find(|preset| {
            instruction == preset.instruction()
                || lowered.contains(&preset.name().to_lowercase())
                || (*preset == Self::OilPainting && lowered.contains("oil"))
        })
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StylePreset {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "sepia" => Ok(Self::Sepia),
            "noir" => Ok(Self::Noir),
            "oilpainting" | "oil" => Ok(Self::OilPainting),
            "cyberpunk" => Ok(Self::Cyberpunk),
            _ => Err(invalid_parameter(
                "style",
                &s,
                &"expected sepia, noir, oil-painting or cyberpunk",
            )),
        }
    }
}

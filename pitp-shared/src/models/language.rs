// SPDX-License-Identifier: GPL-3.0-only
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumCount, EnumIter, VariantArray, VariantNames};

/// Language of the console chrome and labels.
///
/// English is the primary language, Arabic the secondary one.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    AsRefStr,
    EnumCount,
    EnumIter,
    VariantArray,
    VariantNames,
)]
pub enum UiLanguage {
    #[default]
    #[value(name = "en")]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    #[value(name = "ar")]
    #[serde(rename = "ar")]
    #[strum(serialize = "ar")]
    Arabic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl std::fmt::Display for UiLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::fmt::Display for TextDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextDirection::Ltr => write!(f, "ltr"),
            TextDirection::Rtl => write!(f, "rtl"),
        }
    }
}

impl UiLanguage {
    /// Two-letter language code
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            UiLanguage::English => "en",
            UiLanguage::Arabic => "ar",
        }
    }

    #[must_use]
    pub fn direction(self) -> TextDirection {
        match self {
            UiLanguage::English => TextDirection::Ltr,
            UiLanguage::Arabic => TextDirection::Rtl,
        }
    }

    /// The other console language
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            UiLanguage::English => UiLanguage::Arabic,
            UiLanguage::Arabic => UiLanguage::English,
        }
    }
}

impl TextDirection {
    /// Unicode directional mark to prefix a line rendered in this direction
    #[must_use]
    pub fn mark(self) -> char {
        match self {
            TextDirection::Ltr => '\u{200E}',
            TextDirection::Rtl => '\u{200F}',
        }
    }
}

impl std::str::FromStr for UiLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(UiLanguage::English),
            "ar" | "arabic" | "عربي" => Ok(UiLanguage::Arabic),
            other => Err(format!("Unsupported language: {other}")),
        }
    }
}

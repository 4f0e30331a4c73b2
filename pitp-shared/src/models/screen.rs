// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter};

/// The page the console is showing
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
    #[default]
    Readiness,
    Live,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

// SPDX-License-Identifier: GPL-3.0-only
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumCount, EnumIter, VariantNames};

use crate::i18n::TextKey;

/// Institutional setting the console is deployed in
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
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FacilityMode {
    #[default]
    Prison,
    Hospital,
}

impl std::fmt::Display for FacilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl FacilityMode {
    /// Label for the person on the subject lane
    #[must_use]
    pub fn subject_role_key(self) -> TextKey {
        match self {
            FacilityMode::Prison => TextKey::RoleInmate,
            FacilityMode::Hospital => TextKey::RolePatient,
        }
    }

    /// Badge shown next to the officer's role
    #[must_use]
    pub fn badge_key(self) -> TextKey {
        match self {
            FacilityMode::Prison => TextKey::ModePrison,
            FacilityMode::Hospital => TextKey::ModeHospital,
        }
    }
}

// SPDX-License-Identifier: GPL-3.0-only
pub mod error;
pub mod i18n;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::SessionError;
pub use i18n::{Localized, TextKey, localize};
pub use models::*;
pub use services::*;
pub use utils::logger;

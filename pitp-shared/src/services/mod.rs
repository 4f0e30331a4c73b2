// SPDX-License-Identifier: GPL-3.0-only
pub mod observers;

pub use observers::{ObserverBus, Subscriber};

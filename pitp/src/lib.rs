// SPDX-License-Identifier: GPL-3.0-only
pub mod cli;
pub mod config;
pub mod render;
pub mod runtime;
pub mod session;

// Re-export the main run function
pub use runtime_main::run;

mod runtime_main;

// SPDX-License-Identifier: GPL-3.0-only
pub mod event_loop;
pub mod script;
pub mod tokio_timers;
pub mod virtual_clock;


pub use event_loop::{SessionHandle, SessionRuntime};
pub use tokio_timers::TokioScheduler;
pub use virtual_clock::VirtualScheduler;

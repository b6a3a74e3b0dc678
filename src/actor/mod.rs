//! Actor Model: threads at the edges, one UI thread in the middle.
//!
//! - **Input Actor**: polls terminal events and forwards them over a channel
//! - **Timer Actor**: tracks deadlines and reports which timers fired
//! - **UI thread**: owns the [`crate::ViewTree`] and is the only mutator
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │   UI Loop    │
//!                                      │  (ViewTree)  │
//! ┌──────────────┐    TimerHandle      │              │
//! │ Timer Thread │ ─────────────────▶  │              │
//! └──────────────┘                     └──────────────┘
//! ```
//!
//! Callbacks never cross threads: only plain messages do.

mod input;
mod messages;
mod scheduler;
mod timer;

pub use input::{InputActor, convert_event};
pub use messages::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseFlags};
pub use scheduler::{ManualScheduler, Scheduler, TimerCallback, TimerHandle};
pub use timer::TimerActor;

//! # Trellis
//!
//! A retained-mode view tree for terminal user interfaces.
//!
//! Trellis arranges views with relative geometry, repaints only the regions
//! that changed, and routes keys and mouse events along a focus chain.
//!
//! ## Core Concepts
//!
//! - **Relative layout**: [`Pos`] and [`Dim`] expressions resolved against
//!   the container and earlier siblings
//! - **Dirty regions**: invalidated rectangles repainted through clipped
//!   [`Painter`]s, untouched views are never visited
//! - **Focus chain**: one path from the root to a focused leaf, with cold,
//!   normal and hot key passes
//! - **Actor model**: input and timers on their own threads, the tree on
//!   the UI thread
//!
//! ## Example
//!
//! ```rust,ignore
//! use trellis::{Checkbox, CrosstermDriver, Dim, Driver, DriverConfig, Pos, ViewTree};
//!
//! let mut driver = CrosstermDriver::stdout(DriverConfig::default())?;
//! let (width, height) = driver.size();
//! let mut tree = ViewTree::new(width, height);
//!
//! let check = tree.create(Checkbox::new("_Enable"));
//! tree.set_x(check, Pos::center());
//! tree.set_y(check, Pos::percent(50.0));
//! tree.set_width(check, Dim::sized(12));
//! tree.set_height(check, Dim::sized(1));
//! tree.add_subview(tree.root(), check);
//!
//! tree.present(&mut driver)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod layout;
pub mod painter;
pub mod terminal;
pub mod view;
pub mod widget;

// Re-exports for convenience
pub use actor::{
    InputActor, InputEvent, KeyCode, KeyEvent, KeyModifiers, ManualScheduler, MouseEvent,
    MouseFlags, Scheduler, TimerActor, TimerCallback, TimerHandle,
};
pub use buffer::{Attr, Buffer, Cell, Modifiers, Rgb};
pub use layout::{Dim, FrameLookup, Geometry, LayoutError, Pos, Rect};
pub use painter::Painter;
pub use terminal::{CrosstermDriver, Driver, DriverConfig};
pub use view::{ColorScheme, EventContext, RedrawReport, TreeConfig, ViewId, ViewState, ViewTree};
pub use widget::{Checkbox, HOT_MARKER, HotLabel, Label, RadioGroup, Widget};

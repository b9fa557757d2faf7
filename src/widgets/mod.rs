//! Widget state machines
//!
//! DOM-free state for the interactive widgets. The browser binding owns the
//! listeners and mirrors this state onto classes and text.
//!
//! - **tabs**: one active tab per `[data-tabs]` scope
//! - **accordion**: at most one open header per `.accordion`
//! - **counter**: one-shot eased count-up for `[data-target]`

pub mod accordion;
pub mod counter;
pub mod tabs;

pub use accordion::Accordion;
pub use counter::{ease_out_cubic, format_grouped, parse_target, CounterAnimation, CounterFrame};
pub use tabs::TabGroup;

/// Class marking the active tab button and panel
pub const ACTIVE_CLASS: &str = "active";

/// Class marking an open accordion header and body
pub const OPEN_CLASS: &str = "open";

/// Attribute holding a counter's target number
pub const COUNTER_ATTRIBUTE: &str = "data-target";

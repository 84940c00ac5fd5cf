//! Core library for vmkcal.
//!
//! Turns the MyVMK events calendar page into an iCalendar feed:
//! - `render` fetches the page HTML, running its JavaScript when needed
//! - `header`, `extract` and `time_range` read the month, the day cells and
//!   the event times out of the page
//! - `ics` writes the feed

pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod extract;
pub mod header;
pub mod ics;
pub mod render;
pub mod scrape;
pub mod time_range;

pub use error::{VmkCalError, VmkCalResult};
pub use event::{MonthContext, RawEvent, ResolvedEvent};

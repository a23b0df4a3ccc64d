//! Domain types for the TfL dashboard.
//!
//! These are the validated records the rest of the crate works with. The
//! `tfl` module converts upstream DTOs into them; everything downstream
//! can rely on their invariants.

mod journey;
mod station;
mod status;
mod time;

pub use journey::{Journey, JourneyLeg, Mode};
pub use station::{InvalidNaptanId, NaptanId, Station};
pub use status::{BusRouteStatus, LineStatus, Severity};
pub use time::Timestamp;

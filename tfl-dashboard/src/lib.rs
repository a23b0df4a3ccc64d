//! TfL network dashboard.
//!
//! A web application showing live London transport status: line and bus
//! route disruptions, a station map coloured by the worst status of each
//! station's lines, and a point-to-point journey planner.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod domain;
pub mod planner;
pub mod tfl;
pub mod web;

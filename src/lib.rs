//! hos-planner: Hours-of-Service trip planning.
//!
//! Estimates a truck route through pickup and dropoff, then lays out a
//! day-by-day duty schedule with the breaks, fuel and rest stops that keep
//! the driver inside daily and cycle limits.

pub mod config;
pub mod duty;
pub mod eld;
pub mod error;
pub mod geocode;
pub mod haversine;
pub mod ors;
pub mod plan;
pub mod polyline;
pub mod route;
pub mod rules;
pub mod schedule;
pub mod stops;
pub mod traits;
pub mod trip;

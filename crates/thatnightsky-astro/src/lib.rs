//! ThatNightSky Astro - Sky position computation and chart projection
//!
//! This crate turns an observer (position + instant) and a star catalogue into
//! a [`SkyData`](thatnightsky_core::models::SkyData) snapshot: equatorial
//! coordinates are precessed to the date, transformed to the local horizon and
//! stereographically projected onto a zenith-centred chart.

pub mod compute;
pub mod constellations;
pub mod precession;
pub mod projection;
pub mod time;
pub mod transform;
pub mod validation;

pub use compute::{compute_sky, SkyComputer, SkySettings};

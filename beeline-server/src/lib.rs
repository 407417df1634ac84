//! Bike share station finder.
//!
//! Answers: "Where can I pick up a bike near here, and where can I leave it
//! near where I'm going?"

pub mod config;
pub mod domain;
pub mod finder;
pub mod gbfs;
pub mod geocode;
pub mod web;

//! # Tour Geo
//!
//! Greedy closed tours over 2d or 3d cities: a morton seeded nearest
//! neighbor, a nearest neighbor that refuses crossing edges, and a driver
//! that builds one sub-tour per group of cities.

pub mod city;
pub mod config;
pub mod data;
pub mod geo;
pub mod render;
pub mod tsp;

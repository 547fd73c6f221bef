//! Air Quality Index computation and the HTTP service around it.
//!
//! [`domain::aqi::calculate_aqi`] maps pollutant concentrations (CO, NO2,
//! C6H6) to an index through per-pollutant breakpoint tables and reports
//! the worst sub-index with its category and color.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

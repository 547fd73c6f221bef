// Domain layer - AQI computation, advisories and series assessment
pub mod advisory;
pub mod aqi;
pub mod breakpoint;
pub mod pollutant;
pub mod series;

//! Time and rate units.

pub use fugit::{HertzU32 as Hertz, RateExtU32};

//! Reservation calendar layout: turns raw stays into per-facility lanes and
//! per-week bar segments for a month or week grid.

pub mod calc;
pub mod data;

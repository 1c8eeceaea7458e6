//! Shaking countdown timer.

pub mod shake_timer;

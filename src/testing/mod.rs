//! Test support: the headless [`Pilot`](pilot::Pilot).

pub mod pilot;

pub use pilot::Pilot;

pub mod cycle;
pub mod ease;
pub mod ops;
pub mod state;
pub mod tween;

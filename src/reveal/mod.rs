pub mod phase;
pub mod scheduler;

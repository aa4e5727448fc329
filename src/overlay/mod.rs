pub mod engine;
pub mod hotspot;
pub mod viewfinder;

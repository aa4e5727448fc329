pub mod model;
pub mod preset;
pub mod showcase;

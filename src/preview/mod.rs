pub mod bounds;
pub mod render;
pub mod preview;

pub mod attribute;
pub mod bit_coder;
pub mod geometry;
pub mod mesh;
pub mod shared;

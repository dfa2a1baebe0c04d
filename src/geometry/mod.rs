pub mod bound_rect;
pub mod path;
pub mod point;

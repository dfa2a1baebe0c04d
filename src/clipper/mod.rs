// Clipper module - boolean clipping and offsetting of integer polygons
// The sweep state lives in index arenas, 0 marks an empty link

pub mod clipper;
pub mod clipper_offset;
pub mod constants;
pub mod enums;
pub mod error;
pub mod intersect_node;
pub mod join;
pub mod local_minima;
pub mod out_rec;
pub mod ring_resolver;
pub mod scanbeam;
pub mod t_edge;

#[cfg(test)]
pub mod tests;

// Re-export commonly used items for convenience
pub use constants::*;
pub use enums::*;
pub use error::ClipperError;

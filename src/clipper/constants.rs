pub const UNASSIGNED: usize = 0;

/// Inverse slope stored for horizontal edges.
pub const HORIZONTAL: f64 = -9007199254740992.0;

/// Largest coordinate magnitude accepted by the sweep.
pub const HI_RANGE: i64 = 0x3FFF_FFFF_FFFF_FFFF;

pub const TOLERANCE: f64 = 1.0e-20;

pub const TWO_PI: f64 = std::f64::consts::PI * 2.0;

pub const DEFAULT_ARC_TOLERANCE: f64 = 0.25;

pub const DEFAULT_MITER_LIMIT: f64 = 2.0;

/// Margin around the frame added for negative offsets.
pub const OFFSET_FRAME_MARGIN: i64 = 10;

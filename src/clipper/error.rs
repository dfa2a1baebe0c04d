use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipperError {
    #[error("unknown clip type {0}")]
    InvalidClipType(u8),
    #[error("unknown poly type {0}")]
    InvalidPolyType(u8),
    #[error("unknown fill type {0}")]
    InvalidFillType(u8),
    #[error("unknown join type {0}")]
    InvalidJoinType(u8),
    #[error("unknown end type {0}")]
    InvalidEndType(u8),
    #[error("coordinate {0} is outside the supported range")]
    CoordinateOutOfRange(i64),
    #[error("path buffer is malformed at offset {0}")]
    MalformedBuffer(usize),
    #[error("intersections could not be ordered between adjacent edges")]
    IntersectionOrder,
    #[error("edge {0} has no maxima pair")]
    MaximaPair(usize),
    #[error("edge {0} has no next edge in its bound")]
    BoundExhausted(usize),
    #[error("local minima were left behind by the sweep")]
    MinimaPending,
}

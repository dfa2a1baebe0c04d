use crate::clipper::constants::{DEFAULT_ARC_TOLERANCE, DEFAULT_MITER_LIMIT};
use crate::clipper::error::ClipperError;

/// Corner and arc settings of an offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetConfig {
    pub miter_limit: f64,
    pub arc_tolerance: f64,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            miter_limit: DEFAULT_MITER_LIMIT,
            arc_tolerance: DEFAULT_ARC_TOLERANCE,
        }
    }
}

impl OffsetConfig {
    pub fn new(miter_limit: f64, arc_tolerance: f64) -> Self {
        let mut result = Self::default();

        result.set_miter_limit(miter_limit);
        result.set_arc_tolerance(arc_tolerance);

        result
    }

    /// Limits below 2 can never extend past a square corner and are clamped.
    pub fn set_miter_limit(&mut self, value: f64) {
        self.miter_limit = if value.is_nan() {
            DEFAULT_MITER_LIMIT
        } else {
            value.max(DEFAULT_MITER_LIMIT)
        };
    }

    /// Non positive tolerances select the default.
    pub fn set_arc_tolerance(&mut self, value: f64) {
        self.arc_tolerance = if value > 0.0 { value } else { DEFAULT_ARC_TOLERANCE };
    }

    /// Reads `[miter_limit, arc_tolerance]`; an empty buffer gives the defaults.
    pub fn from_buffer(buffer: &[f64]) -> Result<Self, ClipperError> {
        match buffer {
            [] => Ok(Self::default()),
            [miter_limit, arc_tolerance] => Ok(Self::new(*miter_limit, *arc_tolerance)),
            _ => Err(ClipperError::MalformedBuffer(buffer.len())),
        }
    }

    pub fn to_buffer(&self) -> [f64; 2] {
        [self.miter_limit, self.arc_tolerance]
    }

    /// Squared-cosine threshold below which a miter falls back to a square.
    pub fn miter_threshold(&self) -> f64 {
        2.0 / (self.miter_limit * self.miter_limit)
    }

    /// Arc tolerance used for an offset of `delta`.
    pub fn arc_tolerance_for(&self, delta: f64) -> f64 {
        self.arc_tolerance.min(delta.abs() * DEFAULT_ARC_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_constants() {
        let config = OffsetConfig::default();

        assert_eq!(config.to_buffer(), [2.0, 0.25]);
        assert_eq!(config.miter_threshold(), 0.5);
    }

    #[test]
    fn small_miter_limits_are_clamped() {
        let config = OffsetConfig::new(1.0, 0.1);

        assert_eq!(config.miter_limit, 2.0);
        assert_eq!(config.arc_tolerance, 0.1);
        assert_eq!(OffsetConfig::new(4.0, 0.0).miter_threshold(), 0.125);
    }

    #[test]
    fn non_positive_tolerance_selects_default() {
        assert_eq!(OffsetConfig::new(3.0, -1.0).arc_tolerance, 0.25);
        assert_eq!(OffsetConfig::default().arc_tolerance_for(0.4), 0.1);
        assert_eq!(OffsetConfig::default().arc_tolerance_for(-10.0), 0.25);
    }

    #[test]
    fn buffer_parsing() {
        assert_eq!(OffsetConfig::from_buffer(&[]), Ok(OffsetConfig::default()));
        assert_eq!(
            OffsetConfig::from_buffer(&[5.0, 0.5]),
            Ok(OffsetConfig::new(5.0, 0.5))
        );
        assert_eq!(
            OffsetConfig::from_buffer(&[5.0]),
            Err(ClipperError::MalformedBuffer(1))
        );
    }
}

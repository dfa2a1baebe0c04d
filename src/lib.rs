use wasm_bindgen::prelude::*;
use web_sys::js_sys::Float64Array;

pub mod clipper;
pub mod geometry;
pub mod offset_config;
pub mod utils;
pub mod wasm_packer;

pub use crate::clipper::clipper::Clipper;
pub use crate::clipper::clipper_offset::ClipperOffset;
pub use crate::clipper::enums::{ClipType, EndType, JoinType, PolyFillType, PolyType};
pub use crate::clipper::error::ClipperError;
pub use crate::geometry::path::{Path, Paths};
pub use crate::geometry::point::IntPoint;
pub use crate::offset_config::OffsetConfig;

use crate::utils::number::Number;
use crate::wasm_packer::{pack_paths, unpack_paths};

/// Corner treatment of `offset`, carrying its own parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetJoin {
    Miter { limit: f64 },
    Round { tolerance: f64 },
    Square,
}

impl OffsetJoin {
    pub fn split(self) -> (JoinType, OffsetConfig) {
        let defaults = OffsetConfig::default();

        match self {
            OffsetJoin::Miter { limit } => (JoinType::Miter, OffsetConfig::new(limit, defaults.arc_tolerance)),
            OffsetJoin::Round { tolerance } => (JoinType::Round, OffsetConfig::new(defaults.miter_limit, tolerance)),
            OffsetJoin::Square => (JoinType::Square, defaults),
        }
    }
}

/// Boolean operation between two path sets, with one fill rule for both.
pub fn execute(
    clip_type: ClipType,
    subject: &Paths,
    clip: &Paths,
    fill_type: PolyFillType,
) -> Result<Paths, ClipperError> {
    let mut clipper = Clipper::new();

    clipper.add_paths(subject, PolyType::Subject)?;
    clipper.add_paths(clip, PolyType::Clip)?;

    Ok(clipper.execute(clip_type, fill_type, fill_type))
}

pub fn intersection(subject: &Paths, clip: &Paths) -> Result<Paths, ClipperError> {
    execute(ClipType::Intersection, subject, clip, PolyFillType::EvenOdd)
}

pub fn union(subject: &Paths, clip: &Paths) -> Result<Paths, ClipperError> {
    execute(ClipType::Union, subject, clip, PolyFillType::EvenOdd)
}

pub fn difference(subject: &Paths, clip: &Paths) -> Result<Paths, ClipperError> {
    execute(ClipType::Difference, subject, clip, PolyFillType::EvenOdd)
}

pub fn xor(subject: &Paths, clip: &Paths) -> Result<Paths, ClipperError> {
    execute(ClipType::Xor, subject, clip, PolyFillType::EvenOdd)
}

/// Offsets closed polygons by `delta`.
pub fn offset(paths: &Paths, join: OffsetJoin, delta: f64) -> Result<Paths, ClipperError> {
    let (join_type, config) = join.split();
    let mut clipper_offset = ClipperOffset::new(config);

    clipper_offset.add_paths(paths, join_type, EndType::ClosedPolygon)?;

    Ok(clipper_offset.execute(delta))
}

/// Boolean and offset operations callable directly on a path or path set.
pub trait PathsExt {
    fn to_paths(&self) -> Paths;

    fn execute(&self, clip_type: ClipType, clip: &Paths, fill_type: PolyFillType) -> Result<Paths, ClipperError> {
        execute(clip_type, &self.to_paths(), clip, fill_type)
    }

    fn intersection(&self, clip: &Paths) -> Result<Paths, ClipperError> {
        intersection(&self.to_paths(), clip)
    }

    fn union(&self, clip: &Paths) -> Result<Paths, ClipperError> {
        union(&self.to_paths(), clip)
    }

    fn difference(&self, clip: &Paths) -> Result<Paths, ClipperError> {
        difference(&self.to_paths(), clip)
    }

    fn xor(&self, clip: &Paths) -> Result<Paths, ClipperError> {
        xor(&self.to_paths(), clip)
    }

    fn offset(&self, join: OffsetJoin, delta: f64) -> Result<Paths, ClipperError> {
        offset(&self.to_paths(), join, delta)
    }
}

impl PathsExt for Paths {
    fn to_paths(&self) -> Paths {
        self.clone()
    }
}

impl PathsExt for Path {
    fn to_paths(&self) -> Paths {
        Paths::from(self.clone())
    }
}

pub fn clip_paths_inner(subject: &[f64], clip: &[f64], clip_type: u8, fill_type: u8) -> Result<Vec<f64>, ClipperError> {
    let clip_type = ClipType::try_from(clip_type)?;
    let fill_type = PolyFillType::try_from(fill_type)?;
    let subject = unpack_paths(subject)?;
    let clip = unpack_paths(clip)?;
    let solution = execute(clip_type, &subject, &clip, fill_type)?;

    Ok(pack_paths(&solution))
}

pub fn offset_paths_inner(
    paths: &[f64],
    delta: f64,
    join_type: u8,
    end_type: u8,
    config: &[f64],
) -> Result<Vec<f64>, ClipperError> {
    let join_type = JoinType::try_from(join_type)?;
    let end_type = EndType::try_from(end_type)?;
    let config = OffsetConfig::from_buffer(config)?;
    let paths = unpack_paths(paths)?;
    let mut clipper_offset = ClipperOffset::new(config);

    clipper_offset.add_paths(&paths, join_type, end_type)?;

    Ok(pack_paths(&clipper_offset.execute(delta)))
}

fn to_float64_array(values: &[f64]) -> Float64Array {
    let out = Float64Array::new_with_length(values.len() as u32);
    out.copy_from(values);
    out
}

#[wasm_bindgen]
pub fn polygon_area(points: &[f64]) -> f64 {
    f64::polygon_area(points)
}

#[wasm_bindgen]
pub fn clip_paths(subject: &[f64], clip: &[f64], clip_type: u8, fill_type: u8) -> Result<Float64Array, JsValue> {
    clip_paths_inner(subject, clip, clip_type, fill_type)
        .map(|result| to_float64_array(&result))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn offset_paths(
    paths: &[f64],
    delta: f64,
    join_type: u8,
    end_type: u8,
    config: &[f64],
) -> Result<Float64Array, JsValue> {
    offset_paths_inner(paths, delta, join_type, end_type, config)
        .map(|result| to_float64_array(&result))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

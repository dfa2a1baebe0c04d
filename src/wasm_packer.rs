use crate::clipper::error::ClipperError;
use crate::geometry::path::{Path, Paths};
use crate::geometry::point::IntPoint;
use crate::utils::round::round_to_i64;

/// Reads a header value that must be a non negative whole number.
fn read_count(buffer: &[f64], offset: usize) -> Result<usize, ClipperError> {
    match buffer.get(offset) {
        Some(&value) if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 => Ok(value as usize),
        _ => Err(ClipperError::MalformedBuffer(offset)),
    }
}

/// Decodes `[count, size_0, .., size_n-1, x, y, x, y, ..]` where sizes are
/// point counts. Coordinates are rounded half away from zero.
pub fn unpack_paths(buffer: &[f64]) -> Result<Paths, ClipperError> {
    if buffer.is_empty() {
        return Ok(Paths::new());
    }

    let count = read_count(buffer, 0)?;
    let header_len = 1 + count;

    if buffer.len() < header_len {
        return Err(ClipperError::MalformedBuffer(buffer.len()));
    }

    let mut result = Paths::with_capacity(count);
    let mut offset = header_len;

    for i in 0..count {
        let size = read_count(buffer, 1 + i)?;
        let end = offset + (size << 1);
        let data = buffer
            .get(offset..end)
            .ok_or(ClipperError::MalformedBuffer(offset))?;

        let path: Path = data
            .chunks_exact(2)
            .map(|chunk| IntPoint::new(round_to_i64(chunk[0]), round_to_i64(chunk[1])))
            .collect();

        result.add_path(path);
        offset = end;
    }

    if offset != buffer.len() {
        return Err(ClipperError::MalformedBuffer(offset));
    }

    Ok(result)
}

pub fn pack_paths(paths: &Paths) -> Vec<f64> {
    let total_points: usize = paths.iter().map(|path| path.len()).sum();
    let header_len = 1 + paths.len();
    let mut out = Vec::with_capacity(header_len + (total_points << 1));

    out.push(paths.len() as f64);
    out.extend(paths.iter().map(|path| path.len() as f64));

    for path in paths.iter() {
        for (x, y) in path.iter() {
            out.push(x as f64);
            out.push(y as f64);
        }
    }

    out
}

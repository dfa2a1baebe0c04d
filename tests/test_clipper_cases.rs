use clipper_engine::wasm_packer::{pack_paths, unpack_paths};
use clipper_engine::{clip_paths_inner, offset_paths_inner, Path, Paths};
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
struct PointData {
    x: i64,
    y: i64,
}

#[derive(Debug, Deserialize)]
struct ClipInput {
    #[serde(rename = "subjectPolygons")]
    subject_polygons: Vec<Vec<PointData>>,
    #[serde(rename = "clipPolygons")]
    clip_polygons: Vec<Vec<PointData>>,
    #[serde(rename = "clipType")]
    clip_type: u8,
    #[serde(rename = "fillType")]
    fill_type: u8,
}

#[derive(Debug, Deserialize)]
struct OffsetInput {
    polygons: Vec<Vec<PointData>>,
    delta: f64,
    #[serde(rename = "joinType")]
    join_type: u8,
    #[serde(rename = "endType")]
    end_type: u8,
}

#[derive(Debug, Deserialize)]
struct TestCase<T> {
    id: String,
    input: T,
    output: Vec<Vec<PointData>>,
}

#[derive(Debug, Deserialize)]
struct TestData {
    clip: Vec<TestCase<ClipInput>>,
    offset: Vec<TestCase<OffsetInput>>,
}

fn load_cases() -> TestData {
    let json = include_str!("data/clipper_cases.json");

    serde_json::from_str(json).expect("Failed to parse test cases")
}

fn create_paths(polygons: &[Vec<PointData>]) -> Paths {
    polygons
        .iter()
        .map(|polygon| polygon.iter().map(|point| (point.x, point.y)).collect::<Path>())
        .collect()
}

fn point_set(paths: &Paths) -> BTreeSet<(i64, i64)> {
    paths.iter().flat_map(|path| path.iter()).collect()
}

fn unsigned_area(paths: &Paths) -> f64 {
    paths.iter().map(|path| path.area().abs()).sum()
}

fn assert_matches(id: &str, result: &Paths, expected: &Paths) {
    assert_eq!(point_set(result), point_set(expected), "vertices differ for {}", id);
    assert_eq!(unsigned_area(result), unsigned_area(expected), "area differs for {}", id);
    assert!(
        result.iter().all(|path| path.area() > 0.0),
        "outer with negative orientation in {}",
        id
    );
}

#[test]
fn test_clip_cases() {
    for case in load_cases().clip {
        let subject = pack_paths(&create_paths(&case.input.subject_polygons));
        let clip = pack_paths(&create_paths(&case.input.clip_polygons));

        let buffer = clip_paths_inner(&subject, &clip, case.input.clip_type, case.input.fill_type)
            .unwrap_or_else(|error| panic!("{} failed: {}", case.id, error));
        let result = unpack_paths(&buffer).unwrap();

        assert_matches(&case.id, &result, &create_paths(&case.output));
    }
}

#[test]
fn test_offset_cases() {
    for case in load_cases().offset {
        let paths = pack_paths(&create_paths(&case.input.polygons));

        let buffer = offset_paths_inner(
            &paths,
            case.input.delta,
            case.input.join_type,
            case.input.end_type,
            &[],
        )
        .unwrap_or_else(|error| panic!("{} failed: {}", case.id, error));
        let result = unpack_paths(&buffer).unwrap();

        assert_matches(&case.id, &result, &create_paths(&case.output));
    }
}

#[test]
fn test_malformed_buffers_are_reported() {
    let subject = pack_paths(&create_paths(&load_cases().clip[0].input.subject_polygons));

    assert!(clip_paths_inner(&subject, &[1.0, 4.0, 0.0], 1, 0).is_err());
    assert!(offset_paths_inner(&subject, 1.0, 3, 0, &[]).is_err());
}

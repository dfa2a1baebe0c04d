use super::{expected_set, is_simple, path, point_set, square};
use crate::clipper::clipper::Clipper;
use crate::clipper::constants::HI_RANGE;
use crate::clipper::enums::{ClipType, PolyFillType, PolyType};
use crate::clipper::error::ClipperError;
use crate::geometry::path::{Path, Paths};

fn run(clip_type: ClipType, subject: &[Path], clip: &[Path], fill_type: PolyFillType) -> Paths {
    let mut clipper = Clipper::new();

    for path in subject {
        clipper.add_path(path, PolyType::Subject).unwrap();
    }
    for path in clip {
        clipper.add_path(path, PolyType::Clip).unwrap();
    }

    clipper.execute(clip_type, fill_type, fill_type)
}

fn area_of(clip_type: ClipType, subject: &Path, clip: &Path) -> f64 {
    run(clip_type, &[subject.clone()], &[clip.clone()], PolyFillType::EvenOdd).area()
}

#[test]
fn overlapping_squares() {
    let a = square(0, 0, 1000);
    let b = square(500, 500, 1000);

    let intersection = run(ClipType::Intersection, &[a.clone()], &[b.clone()], PolyFillType::NonZero);
    assert_eq!(intersection.len(), 1);
    assert_eq!(intersection.area(), 250000.0);
    assert_eq!(
        point_set(&intersection),
        expected_set(&[(500, 500), (1000, 500), (1000, 1000), (500, 1000)])
    );

    let union = run(ClipType::Union, &[a.clone()], &[b.clone()], PolyFillType::NonZero);
    assert_eq!(union.len(), 1);
    assert_eq!(union.area(), 1750000.0);

    let xor = run(ClipType::Xor, &[a.clone()], &[b.clone()], PolyFillType::NonZero);
    assert_eq!(xor.area(), 1500000.0);

    let difference = run(ClipType::Difference, &[a], &[b], PolyFillType::NonZero);
    assert_eq!(difference.len(), 1);
    assert_eq!(difference.area(), 750000.0);
}

#[test]
fn unit_squares_sharing_an_edge() {
    let a = path(&[(0, 0), (0, 1), (1, 1), (1, 0)]);
    let b = path(&[(0, 1), (0, 2), (1, 2), (1, 1)]);
    let result = run(ClipType::Union, &[a], &[b], PolyFillType::EvenOdd);

    assert_eq!(result.len(), 1);
    assert_eq!(point_set(&result), expected_set(&[(0, 0), (0, 2), (1, 2), (1, 0)]));
}

#[test]
fn difference_removes_the_upper_half() {
    let a = path(&[(0, 0), (0, 2), (1, 2), (1, 0)]);
    let b = path(&[(0, 1), (0, 2), (1, 2), (1, 1)]);
    let result = run(ClipType::Difference, &[a], &[b], PolyFillType::EvenOdd);

    assert_eq!(point_set(&result), expected_set(&[(0, 0), (0, 1), (1, 1), (1, 0)]));
}

#[test]
fn xor_and_intersection_of_crossing_rectangles() {
    let a = path(&[(0, 0), (0, 2), (1, 2), (1, 0)]);
    let b = path(&[(0, 1), (0, 2), (2, 2), (2, 1)]);

    let xor = run(ClipType::Xor, &[a.clone()], &[b.clone()], PolyFillType::EvenOdd);
    assert_eq!(
        point_set(&xor),
        expected_set(&[(0, 0), (0, 1), (1, 1), (1, 0), (1, 2), (2, 2), (2, 1)])
    );
    assert_eq!(xor.area().abs(), 2.0);

    let intersection = run(ClipType::Intersection, &[a], &[b], PolyFillType::EvenOdd);
    assert_eq!(point_set(&intersection), expected_set(&[(0, 1), (0, 2), (1, 2), (1, 1)]));
}

#[test]
fn empty_input_gives_empty_output() {
    let b = square(0, 0, 10);

    for clip_type in [ClipType::Intersection, ClipType::Union, ClipType::Difference, ClipType::Xor] {
        assert!(run(clip_type, &[], &[], PolyFillType::EvenOdd).is_empty());
    }

    assert!(run(ClipType::Intersection, &[], &[b.clone()], PolyFillType::EvenOdd).is_empty());
    assert!(run(ClipType::Difference, &[], &[b.clone()], PolyFillType::EvenOdd).is_empty());
    assert_eq!(run(ClipType::Union, &[], &[b.clone()], PolyFillType::EvenOdd).area(), 100.0);
    assert_eq!(run(ClipType::Xor, &[], &[b], PolyFillType::EvenOdd).area(), 100.0);
}

#[test]
fn inclusion_exclusion_holds() {
    let a = square(0, 0, 40);
    let b = path(&[(20, 10), (70, 10), (70, 30), (20, 30)]);

    let union = area_of(ClipType::Union, &a, &b);
    let intersection = area_of(ClipType::Intersection, &a, &b);
    let xor = area_of(ClipType::Xor, &a, &b);

    assert_eq!(union + intersection, a.area() + b.area());
    assert_eq!(xor, union - intersection);
}

#[test]
fn operations_with_itself() {
    let a = square(3, 7, 25);

    assert_eq!(area_of(ClipType::Union, &a, &a), a.area());
    assert_eq!(area_of(ClipType::Intersection, &a, &a), a.area());
    assert!(run(ClipType::Xor, &[a.clone()], &[a.clone()], PolyFillType::EvenOdd).is_empty());
    assert!(run(ClipType::Difference, &[a.clone()], &[a], PolyFillType::EvenOdd).is_empty());
}

#[test]
fn symmetric_operations_commute() {
    let a = path(&[(0, 0), (30, 0), (30, 30), (0, 30)]);
    let b = path(&[(10, -10), (50, -10), (50, 20), (10, 20)]);

    assert_eq!(area_of(ClipType::Union, &a, &b), area_of(ClipType::Union, &b, &a));
    assert_eq!(
        area_of(ClipType::Intersection, &a, &b),
        area_of(ClipType::Intersection, &b, &a)
    );

    let ab = run(ClipType::Xor, &[a.clone()], &[b.clone()], PolyFillType::EvenOdd);
    let ba = run(ClipType::Xor, &[b], &[a], PolyFillType::EvenOdd);

    assert_eq!(ab.area(), 1300.0);
    assert_eq!(ba.area(), 1300.0);
    assert_eq!(point_set(&ab), point_set(&ba));
}

#[test]
fn xor_with_coincident_edges_keeps_every_region() {
    let subject = [
        path(&[(10, 8), (18, 8), (18, 0), (10, 0)]),
        path(&[(8, 7), (16, 7), (16, 2), (8, 2)]),
    ];
    let clip = [
        path(&[(10, 4), (16, 4), (16, 12), (10, 12)]),
        path(&[(11, 12), (12, 12), (12, 8), (11, 8)]),
    ];
    let expected = expected_set(&[
        (10, 0),
        (18, 0),
        (18, 8),
        (16, 8),
        (16, 7),
        (8, 7),
        (8, 2),
        (10, 2),
        (10, 4),
        (16, 4),
        (16, 2),
        (16, 12),
        (12, 12),
        (12, 8),
        (11, 8),
        (11, 12),
        (10, 12),
        (10, 8),
    ]);

    for result in [
        run(ClipType::Xor, &subject, &clip, PolyFillType::EvenOdd),
        run(ClipType::Xor, &clip, &subject, PolyFillType::EvenOdd),
    ] {
        assert_eq!(result.len(), 4);
        assert_eq!(result.area(), 76.0);
        assert_eq!(point_set(&result), expected);
        assert!(result.iter().all(is_simple));
        assert_eq!(result.iter().filter(|path| path.area() < 0.0).count(), 1);
    }
}

#[test]
fn squares_touching_at_a_corner_stay_apart() {
    let result = run(
        ClipType::Union,
        &[square(0, 0, 10)],
        &[square(10, 10, 10)],
        PolyFillType::NonZero,
    );

    assert_eq!(result.len(), 2);
    assert_eq!(result.area(), 200.0);
    assert!(result.iter().all(|path| is_simple(path) && path.area() == 100.0));
}

#[test]
fn squares_touching_along_part_of_an_edge_merge() {
    let result = run(
        ClipType::Union,
        &[square(0, 0, 10)],
        &[square(10, 5, 10)],
        PolyFillType::NonZero,
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result.area(), 200.0);
    assert!(is_simple(&result[0]));
    assert_eq!(
        point_set(&result),
        expected_set(&[(0, 0), (10, 0), (10, 5), (20, 5), (20, 15), (10, 15), (10, 10), (0, 10)])
    );

    let xor = run(
        ClipType::Xor,
        &[square(0, 0, 10)],
        &[square(10, 0, 10)],
        PolyFillType::NonZero,
    );
    assert_eq!(xor.len(), 1);
    assert_eq!(point_set(&xor), expected_set(&[(0, 0), (20, 0), (20, 10), (0, 10)]));
}

#[test]
fn hole_touching_its_outer_at_a_vertex() {
    let notch = path(&[(0, 10), (10, 5), (10, 15)]);

    let result = run(ClipType::Difference, &[square(0, 0, 30)], &[notch.clone()], PolyFillType::NonZero);
    assert_eq!(result.len(), 2);
    assert_eq!(result.area(), 850.0);
    assert!(result.iter().all(is_simple));
    assert_eq!(result.iter().filter(|path| path.area() == -50.0).count(), 1);
    assert_eq!(result.iter().find(|path| path.area() > 0.0).unwrap().len(), 4);

    let mut clipper = Clipper::with_options(false, true);
    clipper.add_path(&square(0, 0, 30), PolyType::Subject).unwrap();
    clipper.add_path(&notch, PolyType::Clip).unwrap();

    let strict = clipper.execute(ClipType::Difference, PolyFillType::NonZero, PolyFillType::NonZero);
    let outer = strict.iter().find(|path| path.area() > 0.0).unwrap();

    assert_eq!(strict.area(), 850.0);
    assert_eq!(outer.len(), 5);
    assert!(outer.iter().any(|point| point == (0, 10)));
}

#[test]
fn holes_touching_at_a_corner_stay_apart() {
    let result = run(
        ClipType::Difference,
        &[square(0, 0, 30)],
        &[square(10, 10, 5), square(15, 15, 5)],
        PolyFillType::NonZero,
    );

    assert_eq!(result.len(), 3);
    assert_eq!(result.area(), 850.0);
    assert!(result.iter().all(is_simple));
    assert_eq!(result.iter().filter(|path| path.area() == -25.0).count(), 2);
}

#[test]
fn input_orientation_does_not_matter() {
    let a = square(0, 0, 100);
    let b = square(50, 20, 100);
    let mut reversed = b.clone();
    reversed.reverse();

    for clip_type in [ClipType::Intersection, ClipType::Union, ClipType::Difference, ClipType::Xor] {
        assert_eq!(area_of(clip_type, &a, &b), area_of(clip_type, &a, &reversed));
    }
}

#[test]
fn outers_are_positive_and_holes_negative() {
    let outer = square(0, 0, 30);
    let inner = square(10, 10, 10);
    let result = run(ClipType::Difference, &[outer], &[inner], PolyFillType::EvenOdd);

    assert_eq!(result.len(), 2);
    assert_eq!(result.iter().filter(|path| path.area() > 0.0).count(), 1);
    assert_eq!(result.iter().filter(|path| path.area() < 0.0).count(), 1);
    assert_eq!(result.area(), 800.0);
}

#[test]
fn reverse_solution_flips_orientation() {
    let mut clipper = Clipper::with_options(true, false);
    clipper.add_path(&square(0, 0, 10), PolyType::Subject).unwrap();

    let result = clipper.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].area(), -100.0);
}

#[test]
fn bowtie_lobes_follow_the_fill_rule() {
    let bowtie = path(&[(0, 0), (10, 10), (10, 0), (0, 10)]);

    let even_odd = run(ClipType::Union, &[bowtie.clone()], &[], PolyFillType::EvenOdd);
    assert_eq!(even_odd.len(), 2);
    assert_eq!(even_odd.area(), 50.0);

    let non_zero = run(ClipType::Union, &[bowtie.clone()], &[], PolyFillType::NonZero);
    assert_eq!(non_zero.len(), 2);
    assert_eq!(non_zero.area(), 50.0);
    assert!(non_zero.iter().all(|path| is_simple(path) && path.area() == 25.0));
    assert_eq!(
        point_set(&non_zero),
        expected_set(&[(0, 0), (10, 0), (10, 10), (0, 10), (5, 5)])
    );

    let positive = run(ClipType::Union, &[bowtie.clone()], &[], PolyFillType::Positive);
    assert_eq!(positive.len(), 1);
    assert_eq!(positive.area(), 25.0);

    let negative = run(ClipType::Union, &[bowtie], &[], PolyFillType::Negative);
    assert_eq!(negative.len(), 1);
    assert_eq!(negative.area(), 25.0);
}

#[test]
fn doubly_covered_region_depends_on_fill_rule() {
    let subject = [square(0, 0, 10), square(5, 5, 10)];

    let even_odd = run(ClipType::Union, &subject, &[], PolyFillType::EvenOdd);
    assert_eq!(even_odd.area(), 150.0);

    let non_zero = run(ClipType::Union, &subject, &[], PolyFillType::NonZero);
    assert_eq!(non_zero.len(), 1);
    assert_eq!(non_zero.area(), 175.0);
}

#[test]
fn strictly_simple_splits_corner_touching_squares() {
    let mut clipper = Clipper::with_options(false, true);
    clipper.add_path(&square(0, 0, 10), PolyType::Subject).unwrap();
    clipper.add_path(&square(10, 10, 10), PolyType::Clip).unwrap();

    let result = clipper.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero);

    assert_eq!(result.len(), 2);
    assert_eq!(result.area(), 200.0);
}

#[test]
fn execute_can_be_repeated() {
    let mut clipper = Clipper::new();
    clipper.add_path(&square(0, 0, 20), PolyType::Subject).unwrap();
    clipper.add_path(&square(10, 10, 20), PolyType::Clip).unwrap();

    let first = clipper.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero);
    let second = clipper.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero);
    let intersection = clipper.execute(ClipType::Intersection, PolyFillType::NonZero, PolyFillType::NonZero);

    assert_eq!(first, second);
    assert_eq!(intersection.area(), 100.0);

    clipper.clear();
    assert!(clipper
        .execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero)
        .is_empty());
}

#[test]
fn large_coordinates_stay_exact() {
    let base = 1i64 << 40;
    let a = square(base, base, 1000);
    let b = square(base + 500, base + 500, 1000);

    assert_eq!(area_of(ClipType::Intersection, &a, &b), 250000.0);
    assert_eq!(area_of(ClipType::Union, &a, &b), 1750000.0);
}

#[test]
fn degenerate_paths_are_skipped() {
    let mut clipper = Clipper::new();

    assert_eq!(clipper.add_path(&path(&[(0, 0), (5, 5)]), PolyType::Subject), Ok(false));
    assert_eq!(
        clipper.add_path(&path(&[(0, 0), (5, 0), (9, 0)]), PolyType::Subject),
        Ok(false)
    );
    assert_eq!(clipper.add_path(&square(0, 0, 5), PolyType::Subject), Ok(true));
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let mut clipper = Clipper::new();
    let too_far = path(&[(0, 0), (HI_RANGE + 1, 0), (0, 10)]);

    assert_eq!(
        clipper.add_path(&too_far, PolyType::Subject),
        Err(ClipperError::CoordinateOutOfRange(HI_RANGE + 1))
    );

    let edge = path(&[(0, 0), (HI_RANGE, 0), (0, 10)]);
    assert_eq!(clipper.add_path(&edge, PolyType::Subject), Ok(true));
}

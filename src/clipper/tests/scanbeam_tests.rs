use crate::clipper::scanbeam::Scanbeam;

#[test]
fn pops_rows_from_the_largest_y() {
    let mut scanbeam = Scanbeam::new();

    for y in [5, 1, 5, 3, -2] {
        scanbeam.insert(y);
    }

    assert_eq!(scanbeam.len(), 4);
    assert_eq!(scanbeam.pop(), Some(5));
    assert_eq!(scanbeam.pop(), Some(3));
    assert_eq!(scanbeam.pop(), Some(1));
    assert_eq!(scanbeam.pop(), Some(-2));
    assert_eq!(scanbeam.pop(), None);
    assert!(scanbeam.is_empty());
}

#[test]
fn rows_inserted_while_popping_are_ordered() {
    let mut scanbeam = Scanbeam::new();

    scanbeam.insert(10);
    scanbeam.insert(0);
    assert_eq!(scanbeam.pop(), Some(10));

    scanbeam.insert(4);
    scanbeam.insert(0);
    assert_eq!(scanbeam.pop(), Some(4));
    assert_eq!(scanbeam.pop(), Some(0));
    assert_eq!(scanbeam.pop(), None);
}

#[test]
fn clean_drops_everything() {
    let mut scanbeam = Scanbeam::new();

    scanbeam.insert(1);
    scanbeam.insert(2);
    scanbeam.clean();

    assert!(scanbeam.is_empty());
    assert_eq!(scanbeam.pop(), None);
}

use crate::clipper::local_minima::LocalMinima;

#[test]
fn insert_returns_one_based_indices() {
    let mut minima = LocalMinima::new();

    assert_eq!(minima.insert(10, 1, 2), 1);
    assert_eq!(minima.insert(30, 3, 4), 2);
    assert_eq!(minima.len(), 2);
    assert_eq!(minima.get_y(2), 30);
    assert_eq!(minima.get_left_bound(1), 1);
    assert_eq!(minima.get_right_bound(2), 4);
}

#[test]
fn reset_orders_by_descending_y() {
    let mut minima = LocalMinima::new();

    minima.insert(10, 1, 2);
    minima.insert(30, 3, 4);
    minima.insert(20, 5, 6);
    minima.reset();

    let ys: Vec<i64> = minima.iter().map(|item| item.y).collect();
    assert_eq!(ys, vec![30, 20, 10]);
}

#[test]
fn equal_rows_keep_insertion_order() {
    let mut minima = LocalMinima::new();

    minima.insert(5, 1, 2);
    minima.insert(9, 3, 4);
    minima.insert(5, 5, 6);
    minima.reset();

    assert_eq!(minima.pop(9), Some((3, 4)));
    assert_eq!(minima.pop(5), Some((1, 2)));
    assert_eq!(minima.pop(5), Some((5, 6)));
    assert!(!minima.has_pending());
}

#[test]
fn pop_waits_for_its_row() {
    let mut minima = LocalMinima::new();

    minima.insert(7, 1, 2);
    minima.reset();

    assert!(minima.has_pending());
    assert_eq!(minima.pop(8), None);
    assert_eq!(minima.pop(7), Some((1, 2)));
    assert_eq!(minima.pop(7), None);
}

#[test]
fn clear_rewinds() {
    let mut minima = LocalMinima::new();

    minima.insert(1, 1, 2);
    minima.clear();

    assert!(minima.is_empty());
    assert!(!minima.has_pending());
}

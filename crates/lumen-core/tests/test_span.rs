//! Integration tests for source spans.

use lumen_core::{Location, Span};
use miette::SourceSpan;

#[test]
fn spans_convert_to_miette_source_spans() {
    let span = Span::new(Location::new(1, 5, 4), Location::new(1, 9, 8));
    let source: SourceSpan = span.into();
    assert_eq!(source.offset(), 4);
    assert_eq!(source.len(), 4);
}

#[test]
fn merge_is_commutative() {
    let a = Span::new(Location::new(1, 1, 0), Location::new(1, 4, 3));
    let b = Span::new(Location::new(2, 1, 10), Location::new(2, 6, 15));
    assert_eq!(a.merge(b), b.merge(a));
    assert_eq!(a.merge(b).len(), 15);
}

#[test]
fn point_spans_sit_between_neighbours() {
    let point = Span::point(Location::new(1, 3, 2));
    assert!(point.is_empty());
    let wide = Span::new(Location::new(1, 1, 0), Location::new(1, 8, 7));
    assert_eq!(wide.merge(point), wide);
}

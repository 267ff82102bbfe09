//! Conversion of kurbo paths into a flat list of drawing commands for
//! targets that only understand lines and cubic curves.

use kurbo::{BezPath, PathEl};
use quire_types::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    Close,
}

fn pt(p: kurbo::Point) -> Point {
    Point::new(p.x as f32, p.y as f32)
}

/// Flattens `path` to move/line/cubic/close commands. Quadratic segments are
/// raised to cubics.
pub fn to_segments(path: &BezPath) -> Vec<PathSegment> {
    let mut out = Vec::new();
    let mut current = kurbo::Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.push(PathSegment::MoveTo(pt(p)));
                current = p;
            }
            PathEl::LineTo(p) => {
                out.push(PathSegment::LineTo(pt(p)));
                current = p;
            }
            PathEl::QuadTo(c, p) => {
                let c1 = current + (c - current) * (2.0 / 3.0);
                let c2 = p + (c - p) * (2.0 / 3.0);
                out.push(PathSegment::CurveTo(pt(c1), pt(c2), pt(p)));
                current = p;
            }
            PathEl::CurveTo(c1, c2, p) => {
                out.push(PathSegment::CurveTo(pt(c1), pt(c2), pt(p)));
                current = p;
            }
            PathEl::ClosePath => out.push(PathSegment::Close),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_raised_to_cubic() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((3.0, 3.0), (6.0, 0.0));
        path.close_path();
        let segs = to_segments(&path);
        assert_eq!(segs.len(), 3);
        match segs[1] {
            PathSegment::CurveTo(c1, c2, end) => {
                assert_eq!(c1, Point::new(2.0, 2.0));
                assert_eq!(c2, Point::new(4.0, 2.0));
                assert_eq!(end, Point::new(6.0, 0.0));
            }
            other => panic!("unexpected segment {other:?}"),
        }
        assert_eq!(segs[2], PathSegment::Close);
    }
}

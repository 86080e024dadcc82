/// Four-wide half-plane coverage test for one micropolygon
/// Each lane of the coefficient vectors holds one outline edge
use crate::geometry::Quad;
use glam::{BVec4A, Vec2, Vec4};

/// Edge equations of a micropolygon in `A*x + B*y = C` form, one lane per
/// edge in [`Quad::EDGE_ORDER`]. Note that `C` is negated relative to the
/// canonical `A*x + B*y + C = 0` form.
///
/// A sample is inside when `A*x + B*y > C` holds on all four lanes. Samples
/// exactly on an edge belong to the cell that owns that edge, so two cells
/// sharing an edge never both claim the same sample.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct EdgeEquations {
    pub a: Vec4,
    pub b: Vec4,
    pub c: Vec4,
}

impl EdgeEquations {
    /// Build from corners in lattice order (`v0, v1, v2, v3`).
    #[inline]
    pub fn from_corners(corners: &[Vec2; 4]) -> Self {
        Self::from_corners_scaled(corners, 1.0)
    }

    /// Build from corners scaled by `scale` first, used to lift
    /// pixel-space positions into sub-sample space.
    #[inline]
    pub fn from_corners_scaled(corners: &[Vec2; 4], scale: f32) -> Self {
        let mut a = [0.0f32; 4];
        let mut b = [0.0f32; 4];
        let mut c = [0.0f32; 4];

        for (lane, (from, to)) in Quad::edges().into_iter().enumerate() {
            let p0 = corners[from] * scale;
            let p1 = corners[to] * scale;

            a[lane] = p1.y - p0.y;
            b[lane] = p0.x - p1.x;
            // Anchor on the same endpoint whichever way the edge is walked,
            // so the neighbouring cell gets exactly `-c`.
            let anchor = if (p0.x, p0.y) <= (p1.x, p1.y) { p0 } else { p1 };
            c[lane] = a[lane] * anchor.x + b[lane] * anchor.y;
        }

        Self {
            a: Vec4::from_array(a),
            b: Vec4::from_array(b),
            c: Vec4::from_array(c),
        }
    }

    /// Per-lane tie-break for samples lying exactly on an edge.
    ///
    /// The neighbouring cell sees the same edge with every coefficient
    /// negated bit for bit, so exactly one of the two owns it.
    #[inline(always)]
    fn owned_edges(a: Vec4, b: Vec4) -> BVec4A {
        a.cmpgt(Vec4::ZERO) | (a.cmpeq(Vec4::ZERO) & b.cmpgt(Vec4::ZERO))
    }

    #[inline(always)]
    fn test(a: Vec4, b: Vec4, c: Vec4, x: f32, y: f32) -> bool {
        let lhs = a * x + b * y;
        let inside = lhs.cmpgt(c);
        if inside.all() {
            return true;
        }
        (inside | (lhs.cmpeq(c) & Self::owned_edges(a, b))).all()
    }

    /// Coverage of sample `(x, y)` against all four edges.
    #[inline(always)]
    pub fn covers(&self, x: f32, y: f32) -> bool {
        Self::test(self.a, self.b, self.c, x, y)
    }

    /// Interpolate every coefficient towards `other` by `t`.
    /// `t == 0` reproduces `self` exactly.
    #[inline(always)]
    pub fn lerp(&self, other: &EdgeEquations, t: f32) -> EdgeEquations {
        EdgeEquations {
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
            c: self.c + (other.c - self.c) * t,
        }
    }

    /// Coverage of sample `(x, y)` at time `t` in [0, 1) between the
    /// equations at the start (`t0`) and end (`t1`) of the frame interval.
    #[inline(always)]
    pub fn covers_at_time(t0: &EdgeEquations, t1: &EdgeEquations, x: f32, y: f32, t: f32) -> bool {
        let eq = t0.lerp(t1, t);
        Self::test(eq.a, eq.b, eq.c, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Axis-aligned square in lattice order, wound so that it produces
    /// coverage.
    fn square(x0: f32, y0: f32, size: f32) -> [Vec2; 4] {
        // Lattice rows go up in NDC, i.e. towards smaller pixel y.
        [
            Vec2::new(x0, y0 + size),
            Vec2::new(x0 + size, y0 + size),
            Vec2::new(x0, y0),
            Vec2::new(x0 + size, y0),
        ]
    }

    #[test]
    fn interior_and_exterior_samples() {
        let eq = EdgeEquations::from_corners(&square(2.0, 2.0, 4.0));

        assert!(eq.covers(4.0, 4.0));
        assert!(eq.covers(2.1, 5.9));
        assert!(!eq.covers(1.9, 4.0));
        assert!(!eq.covers(4.0, 6.1));
        assert!(!eq.covers(-10.0, -10.0));
    }

    #[test]
    fn reversed_winding_is_back_facing() {
        let mut corners = square(2.0, 2.0, 4.0);
        corners.swap(0, 2);
        corners.swap(1, 3);
        let eq = EdgeEquations::from_corners(&corners);

        assert!(!eq.covers(4.0, 4.0));
    }

    #[test]
    fn shared_edge_samples_are_claimed_once() {
        let left = EdgeEquations::from_corners(&square(0.0, 0.0, 2.0));
        let right = EdgeEquations::from_corners(&square(2.0, 0.0, 2.0));

        for i in 1..8 {
            let y = i as f32 * 0.25;
            let claims = left.covers(2.0, y) as u32 + right.covers(2.0, y) as u32;
            assert_eq!(claims, 1, "sample (2, {}) claimed {} times", y, claims);
        }
    }

    #[test]
    fn scaled_equations_match_scaled_samples() {
        let corners = square(1.0, 1.0, 1.0);
        let unit = EdgeEquations::from_corners(&corners);
        let scaled = EdgeEquations::from_corners_scaled(&corners, 4.0);

        assert_eq!(unit.covers(1.5, 1.5), scaled.covers(6.0, 6.0));
        assert_eq!(unit.covers(0.5, 1.5), scaled.covers(2.0, 6.0));
    }

    #[test]
    fn time_interpolation_moves_the_half_planes() {
        let start = EdgeEquations::from_corners(&square(0.0, 0.0, 2.0));
        let end = EdgeEquations::from_corners(&square(8.0, 0.0, 2.0));

        assert!(EdgeEquations::covers_at_time(&start, &end, 1.0, 1.0, 0.0));
        assert!(!EdgeEquations::covers_at_time(&start, &end, 1.0, 1.0, 0.99));
        assert!(EdgeEquations::covers_at_time(&start, &end, 9.0, 1.0, 0.99));
        assert!(EdgeEquations::covers_at_time(&start, &end, 5.0, 1.0, 0.5));
    }

    /// Two cells sharing the edge `top -> bottom`, left and right of it.
    fn cells_around(top: Vec2, bottom: Vec2, width: f32) -> (EdgeEquations, EdgeEquations) {
        let w = Vec2::new(width, 0.0);
        let left = EdgeEquations::from_corners(&[bottom - w, bottom, top - w, top]);
        let right = EdgeEquations::from_corners(&[bottom, bottom + w, top, top + w]);
        (left, right)
    }

    #[test]
    fn shared_edge_coefficients_are_exact_negatives() {
        // Left cell walks the edge as lane 1 (v1 -> v3), the right one as
        // lane 3 (v2 -> v0).
        let (left, right) = cells_around(Vec2::new(10.3, 2.7), Vec2::new(13.9, 17.1), 4.0);
        assert_eq!(left.a[1], -right.a[3]);
        assert_eq!(left.b[1], -right.b[3]);
        assert_eq!(left.c[1], -right.c[3]);

        // Interpolation keeps the negation.
        let (left_end, right_end) = cells_around(Vec2::new(21.7, 5.1), Vec2::new(19.3, 30.9), 4.0);
        for t in [0.1, 0.37, 0.5, 0.93] {
            let l = left.lerp(&left_end, t);
            let r = right.lerp(&right_end, t);
            assert_eq!(l.a[1], -r.a[3]);
            assert_eq!(l.b[1], -r.b[3]);
            assert_eq!(l.c[1], -r.c[3]);
        }
    }

    #[test]
    fn lerp_with_identical_equations_is_exact() {
        let eq = EdgeEquations::from_corners(&square(0.3, 0.7, 1.3));
        for t in [0.0, 0.1, 0.5, 0.999] {
            assert_eq!(eq.lerp(&eq, t), eq);
        }
    }
}

//! Edge-equation coverage checked against an independent point-in-polygon
//! oracle, plus the shared-edge ownership rule.
use glam::Vec2;
use micropolygon_engine::EdgeEquations;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const OUTLINE: [usize; 4] = [0, 1, 3, 2];

/// Crossing-number test over the outline. Slow, but shares nothing with the
/// half-plane formulation.
fn inside_oracle(corners: &[Vec2; 4], p: Vec2) -> bool {
    let mut inside = false;
    for i in 0..4 {
        let a = corners[OUTLINE[i]];
        let b = corners[OUTLINE[(i + 1) % 4]];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn distance_to_outline(corners: &[Vec2; 4], p: Vec2) -> f32 {
    (0..4)
        .map(|i| distance_to_segment(p, corners[OUTLINE[i]], corners[OUTLINE[(i + 1) % 4]]))
        .fold(f32::INFINITY, f32::min)
}

/// A convex quad in lattice order around `centre`, wound so that it
/// produces coverage in a y-down frame.
fn random_convex_quad(rng: &mut ChaCha8Rng) -> [Vec2; 4] {
    let centre = Vec2::new(rng.gen_range(10.0..50.0), rng.gen_range(10.0..50.0));
    let h = rng.gen_range(2.0..8.0);
    let mut wobble = || Vec2::new(rng.gen_range(-0.3..0.3), rng.gen_range(-0.3..0.3)) * h;
    [
        centre + Vec2::new(-h, h) + wobble(),
        centre + Vec2::new(h, h) + wobble(),
        centre + Vec2::new(-h, -h) + wobble(),
        centre + Vec2::new(h, -h) + wobble(),
    ]
}

#[test]
fn test_coverage_matches_oracle() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut checked = 0;

    for _ in 0..200 {
        let corners = random_convex_quad(&mut rng);
        let edges = EdgeEquations::from_corners(&corners);

        for _ in 0..200 {
            let p = Vec2::new(rng.gen_range(0.0..64.0), rng.gen_range(0.0..64.0));
            if distance_to_outline(&corners, p) < 1e-3 {
                continue;
            }
            assert_eq!(
                edges.covers(p.x, p.y),
                inside_oracle(&corners, p),
                "quad {:?} sample {:?}",
                corners,
                p
            );
            checked += 1;
        }
    }

    assert!(checked > 30_000);
}

#[test]
fn test_opposite_winding_covers_nothing() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..50 {
        let [v0, v1, v2, v3] = random_convex_quad(&mut rng);
        // Swapping the rows mirrors the outline direction.
        let edges = EdgeEquations::from_corners(&[v2, v3, v0, v1]);
        for _ in 0..100 {
            let p = Vec2::new(rng.gen_range(0.0..64.0), rng.gen_range(0.0..64.0));
            assert!(!edges.covers(p.x, p.y));
        }
    }
}

#[test]
fn test_shared_edges_claimed_exactly_once() {
    // A sheared lattice with integer vertices keeps every coefficient and
    // every sample below exact.
    const CELLS: usize = 4;
    const SIDE: f32 = 4.0;
    let vertex = |i: usize, j: usize| Vec2::new(SIDE * i as f32 + j as f32, SIDE * j as f32);

    let cells: Vec<EdgeEquations> = (0..CELLS)
        .flat_map(|j| (0..CELLS).map(move |i| (i, j)))
        .map(|(i, j)| {
            EdgeEquations::from_corners(&[
                vertex(i, j + 1),
                vertex(i + 1, j + 1),
                vertex(i, j),
                vertex(i + 1, j),
            ])
        })
        .collect();

    let extent = SIDE * CELLS as f32;
    let mut interior_samples = 0;
    for yi in 0..=(extent as usize) {
        let y = yi as f32;
        for xi in 0..=((extent + CELLS as f32) as usize * 4) {
            let x = xi as f32 * 0.25;

            // Lattice coordinates of the sample.
            let j = y / SIDE;
            let i = (x - j) / SIDE;
            let claims = cells.iter().filter(|e| e.covers(x, y)).count();

            let strictly_inside = i > 0.0 && i < CELLS as f32 && j > 0.0 && j < CELLS as f32;
            if strictly_inside {
                assert_eq!(claims, 1, "sample ({}, {}) claimed {} times", x, y, claims);
                interior_samples += 1;
            } else {
                assert!(claims <= 1, "boundary sample ({}, {}) claimed {} times", x, y, claims);
            }
        }
    }

    assert!(interior_samples > 500);
}

#[test]
fn test_vertices_shared_by_four_cells() {
    // Axis-aligned unit cells around the origin.
    let cell = |x0: f32, y0: f32| {
        EdgeEquations::from_corners(&[
            Vec2::new(x0, y0 + 1.0),
            Vec2::new(x0 + 1.0, y0 + 1.0),
            Vec2::new(x0, y0),
            Vec2::new(x0 + 1.0, y0),
        ])
    };
    let cells = [cell(-1.0, -1.0), cell(0.0, -1.0), cell(-1.0, 0.0), cell(0.0, 0.0)];

    let owners: Vec<usize> = (0..4).filter(|&k| cells[k].covers(0.0, 0.0)).collect();
    // Cells own their left and top edges, so the shared corner belongs to
    // the cell extending right and down from it.
    assert_eq!(owners, vec![3]);
}

#[test]
fn test_time_interpolated_coverage_follows_translation() {
    let square = |x0: f32| {
        EdgeEquations::from_corners(&[
            Vec2::new(x0, 4.0),
            Vec2::new(x0 + 4.0, 4.0),
            Vec2::new(x0, 0.0),
            Vec2::new(x0 + 4.0, 0.0),
        ])
    };
    let start = square(0.0);
    let end = square(8.0);

    // At t the square spans [8t, 8t + 4).
    for &(t, x, expected) in &[
        (0.0, 2.0, true),
        (0.0, 6.0, false),
        (0.5, 6.0, true),
        (0.5, 2.0, false),
        (0.75, 9.0, true),
        (0.75, 5.0, false),
    ] {
        assert_eq!(
            EdgeEquations::covers_at_time(&start, &end, x, 2.0, t),
            expected,
            "t = {}, x = {}",
            t,
            x
        );
    }
}

#[test]
fn test_arbitrary_shared_edges_claimed_exactly_once() {
    // Shared edges with arbitrary float endpoints. Samples are taken on and
    // a few ulps either side of the edge, where rounding decides.
    const WIDTH: f32 = 4.0;
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let shift = Vec2::new(WIDTH, 0.0);
    let mut tested = 0;

    for _ in 0..500 {
        let top = Vec2::new(rng.gen_range(40.0..200.0), rng.gen_range(10.0..100.0));
        let bottom = top + Vec2::new(rng.gen_range(-30.0..30.0), rng.gen_range(5.0..60.0));

        let left = EdgeEquations::from_corners(&[bottom - shift, bottom, top - shift, top]);
        let right = EdgeEquations::from_corners(&[bottom, bottom + shift, top, top + shift]);

        for k in 1..50 {
            let on_edge = top.lerp(bottom, k as f32 / 50.0);
            for ulps in -8i32..=8 {
                let x = f32::from_bits((on_edge.x.to_bits() as i32 + ulps) as u32);
                let claims = left.covers(x, on_edge.y) as u32 + right.covers(x, on_edge.y) as u32;
                assert_eq!(
                    claims, 1,
                    "edge {:?} -> {:?}, sample ({}, {}) claimed {} times",
                    top, bottom, x, on_edge.y, claims
                );
                tested += 1;
            }
        }
    }

    assert_eq!(tested, 500 * 49 * 17);
}

//! Polygon triangulation for glyph caps.
//!
//! Ear clipping over a simple polygon, with holes merged into the outer
//! contour through bridge edges (the classic rightmost-vertex visibility
//! construction). Glyph outlines are small (tens of vertices), so the
//! O(n²) ear search is fine.

use glam::Vec2;

/// Signed area of a closed contour. Positive for counter-clockwise.
#[must_use]
pub fn signed_area(points: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Whether `p` lies inside the closed contour (even-odd rule).
#[must_use]
pub fn contains_point(contour: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = contour.len() - 1;
    for i in 0..contour.len() {
        let a = contour[i];
        let b = contour[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Triangulate a polygon with holes.
///
/// `points` is the flat vertex pool; `outer` and each entry of `holes`
/// are index rings into it. The outer ring must be counter-clockwise and
/// holes clockwise (callers normalize orientation first). Returns
/// triangles as index triples into `points`, counter-clockwise.
#[must_use]
pub fn triangulate(
    points: &[Vec2],
    outer: &[u32],
    holes: &[Vec<u32>],
) -> Vec<[u32; 3]> {
    if outer.len() < 3 {
        return Vec::new();
    }

    let mut ring: Vec<u32> = outer.to_vec();

    // Merge holes right-to-left so earlier bridges never occlude later
    // ones.
    let mut ordered: Vec<&Vec<u32>> =
        holes.iter().filter(|h| h.len() >= 3).collect();
    ordered.sort_by(|a, b| {
        let ax = a
            .iter()
            .map(|&i| points[i as usize].x)
            .fold(f32::NEG_INFINITY, f32::max);
        let bx = b
            .iter()
            .map(|&i| points[i as usize].x)
            .fold(f32::NEG_INFINITY, f32::max);
        bx.partial_cmp(&ax).unwrap_or(std::cmp::Ordering::Equal)
    });
    for hole in ordered {
        merge_hole(points, &mut ring, hole);
    }

    ear_clip(points, ring)
}

/// Splice a hole ring into the outer ring via a bridge at the hole's
/// rightmost vertex.
fn merge_hole(points: &[Vec2], ring: &mut Vec<u32>, hole: &[u32]) {
    // Rightmost hole vertex.
    let (m_pos, _) = hole
        .iter()
        .enumerate()
        .map(|(k, &i)| (k, points[i as usize].x))
        .fold((0, f32::NEG_INFINITY), |acc, cur| {
            if cur.1 > acc.1 {
                cur
            } else {
                acc
            }
        });
    let m = points[hole[m_pos] as usize];

    // Cast a ray toward +x and find the nearest crossing edge of the ring.
    let mut best: Option<(usize, f32)> = None;
    for j in 0..ring.len() {
        let a = points[ring[j] as usize];
        let b = points[ring[(j + 1) % ring.len()] as usize];
        if (a.y > m.y) == (b.y > m.y) {
            continue;
        }
        let x = a.x + (b.x - a.x) * (m.y - a.y) / (b.y - a.y);
        if x >= m.x && best.is_none_or(|(_, bx)| x < bx) {
            best = Some((j, x));
        }
    }
    let Some((edge, hit_x)) = best else {
        // Hole is outside the outer ring; drop it rather than corrupt the
        // mesh.
        log::warn!("glyph hole outside outer contour, skipped");
        return;
    };

    // Candidate bridge endpoint: the crossing edge's endpoint with the
    // larger x. Prefer any reflex ring vertex inside the triangle
    // (m, hit, candidate) that is closer in angle, so the bridge cannot
    // cross other edges.
    let a_idx = edge;
    let b_idx = (edge + 1) % ring.len();
    let mut bridge = if points[ring[a_idx] as usize].x
        >= points[ring[b_idx] as usize].x
    {
        a_idx
    } else {
        b_idx
    };
    let hit = Vec2::new(hit_x, m.y);
    let mut best_metric = f32::INFINITY;
    for (k, &ri) in ring.iter().enumerate() {
        let p = points[ri as usize];
        if p.x < m.x || k == bridge {
            continue;
        }
        if point_in_triangle(p, m, hit, points[ring[bridge] as usize]) {
            // Smallest angle from the ray, then nearest.
            let d = p - m;
            let metric = (d.y / d.x.max(1e-6)).abs() + d.length() * 1e-3;
            if metric < best_metric {
                best_metric = metric;
                bridge = k;
            }
        }
    }

    // Splice: ...bridge, m, hole..., m, bridge, ...
    let mut spliced = Vec::with_capacity(ring.len() + hole.len() + 2);
    spliced.extend_from_slice(&ring[..=bridge]);
    for k in 0..=hole.len() {
        spliced.push(hole[(m_pos + k) % hole.len()]);
    }
    spliced.push(ring[bridge]);
    spliced.extend_from_slice(&ring[bridge + 1..]);
    *ring = spliced;
}

/// Ear-clip a simple (counter-clockwise) polygon given as an index ring.
fn ear_clip(points: &[Vec2], mut ring: Vec<u32>) -> Vec<[u32; 3]> {
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));

    let mut guard = ring.len() * ring.len() + 16;
    while ring.len() > 3 && guard > 0 {
        guard -= 1;
        let n = ring.len();
        let mut clipped = false;

        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let curr = ring[i];
            let next = ring[(i + 1) % n];
            let a = points[prev as usize];
            let b = points[curr as usize];
            let c = points[next as usize];

            // Convex corner for a CCW ring.
            if cross(a, b, c) <= 0.0 {
                continue;
            }

            let mut contains_other = false;
            for &other in &ring {
                if other == prev || other == curr || other == next {
                    continue;
                }
                let p = points[other as usize];
                if point_in_triangle(p, a, b, c) {
                    contains_other = true;
                    break;
                }
            }
            if contains_other {
                continue;
            }

            triangles.push([prev, curr, next]);
            let _ = ring.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            // Degenerate remainder (collinear runs, duplicated bridge
            // vertices). Drop the flattest corner and keep going.
            let mut flattest = 0;
            let mut flattest_cross = f32::INFINITY;
            for i in 0..ring.len() {
                let a = points[ring[(i + ring.len() - 1) % ring.len()] as usize];
                let b = points[ring[i] as usize];
                let c = points[ring[(i + 1) % ring.len()] as usize];
                let cr = cross(a, b, c).abs();
                if cr < flattest_cross {
                    flattest_cross = cr;
                    flattest = i;
                }
            }
            let _ = ring.remove(flattest);
        }
    }

    if ring.len() == 3 {
        triangles.push([ring[0], ring[1], ring[2]]);
    }
    triangles
}

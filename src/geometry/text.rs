//! Extruded 3D text mesh generation.
//!
//! Lays out a string with a [`Typeface`], flattens each glyph outline
//! into contours, triangulates the caps, and extrudes along +Z with an
//! optional bevel. The finished mesh is centered on its bounding box so
//! the text orbits the origin.

use glam::{Vec2, Vec3};

use super::triangulate::{contains_point, signed_area, triangulate};
use super::{MeshData, Vertex};
use crate::font::{flatten_outline, parse_outline, Typeface};

/// Text extrusion parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph height in world units.
    pub size: f32,
    /// Extrusion depth along Z.
    pub depth: f32,
    /// Straight segments per outline curve.
    pub curve_segments: u32,
    /// Whether the bevel rings are generated.
    pub bevel_enabled: bool,
    /// How far the bevel extends along Z beyond each cap.
    pub bevel_thickness: f32,
    /// How far the bevel pushes the outline outward.
    pub bevel_size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 0.5,
            depth: 0.3,
            curve_segments: 5,
            bevel_enabled: true,
            bevel_thickness: 0.02,
            bevel_size: 0.02,
        }
    }
}

/// One glyph's contours, classified into outer rings and their holes.
struct GlyphRegion {
    outer: Vec<Vec2>,
    holes: Vec<Vec<Vec2>>,
}

/// Build a centered, extruded mesh for `text`.
///
/// Characters without a glyph (and blank glyphs like the space) only
/// advance the pen. Returns an empty mesh for a string with no
/// renderable glyphs.
#[must_use]
pub fn build_text_mesh(
    font: &Typeface,
    text: &str,
    style: &TextStyle,
) -> MeshData {
    let scale = style.size / font.resolution;
    let mut mesh = MeshData::default();
    let mut pen_x = 0.0f32;

    for c in text.chars() {
        let Some(glyph) = font.glyph(c) else {
            continue;
        };
        if let Some(outline) = glyph.o.as_deref() {
            match parse_outline(outline) {
                Ok(commands) => {
                    let contours: Vec<Vec<Vec2>> =
                        flatten_outline(&commands, style.curve_segments)
                            .into_iter()
                            .map(|c| {
                                c.into_iter()
                                    .map(|p| p * scale + Vec2::new(pen_x, 0.0))
                                    .collect()
                            })
                            .collect();
                    for region in classify_contours(contours) {
                        extrude_region(&mut mesh, &region, style);
                    }
                }
                Err(e) => {
                    log::warn!("skipping glyph {c:?}: {e}");
                }
            }
        }
        pen_x += glyph.ha * scale;
    }

    mesh.center();
    mesh
}

/// Group contours into outer rings with their holes.
///
/// A contour contained by an odd number of others is a hole; it belongs
/// to its smallest containing outer ring. Orientation is normalized
/// afterwards (outer counter-clockwise, holes clockwise).
fn classify_contours(contours: Vec<Vec<Vec2>>) -> Vec<GlyphRegion> {
    let n = contours.len();
    let mut depth = vec![0usize; n];
    let mut parent = vec![usize::MAX; n];

    for i in 0..n {
        let probe = contours[i][0];
        let mut smallest_area = f32::INFINITY;
        for j in 0..n {
            if i == j || !contains_point(&contours[j], probe) {
                continue;
            }
            depth[i] += 1;
            let area = signed_area(&contours[j]).abs();
            if area < smallest_area {
                smallest_area = area;
                parent[i] = j;
            }
        }
    }

    let mut regions: Vec<(usize, GlyphRegion)> = Vec::new();
    for (i, contour) in contours.iter().enumerate() {
        if depth[i] % 2 != 0 {
            continue;
        }
        let mut outer = contour.clone();
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }
        regions.push((
            i,
            GlyphRegion {
                outer,
                holes: Vec::new(),
            },
        ));
    }
    for (i, contour) in contours.iter().enumerate() {
        if depth[i] % 2 == 0 {
            continue;
        }
        let mut hole = contour.clone();
        if signed_area(&hole) > 0.0 {
            hole.reverse();
        }
        if let Some(region) =
            regions.iter_mut().find(|(idx, _)| *idx == parent[i])
        {
            region.1.holes.push(hole);
        }
    }

    regions.into_iter().map(|(_, r)| r).collect()
}

/// Outward offset direction at each contour vertex (miter of the two
/// adjacent edge normals). Assumes outer rings are counter-clockwise and
/// holes clockwise, which makes the right-hand edge normal point out of
/// the solid in both cases.
fn outward_normals(contour: &[Vec2]) -> Vec<Vec2> {
    let n = contour.len();
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let prev = contour[(i + n - 1) % n];
        let curr = contour[i];
        let next = contour[(i + 1) % n];
        let d0 = (curr - prev).normalize_or_zero();
        let d1 = (next - curr).normalize_or_zero();
        let n0 = Vec2::new(d0.y, -d0.x);
        let n1 = Vec2::new(d1.y, -d1.x);
        let miter = (n0 + n1).normalize_or(n1);
        normals.push(miter);
    }
    normals
}

/// Extrude one outer-ring-plus-holes region into the mesh.
fn extrude_region(mesh: &mut MeshData, region: &GlyphRegion, style: &TextStyle) {
    let bevel_t = if style.bevel_enabled {
        style.bevel_thickness
    } else {
        0.0
    };
    let bevel_s = if style.bevel_enabled {
        style.bevel_size
    } else {
        0.0
    };
    let back_z = -bevel_t;
    let front_z = style.depth + bevel_t;

    // Flat vertex pool: outer ring then each hole, matching the index
    // rings handed to the triangulator.
    let mut points: Vec<Vec2> = region.outer.clone();
    let outer_ring: Vec<u32> = (0..region.outer.len() as u32).collect();
    let mut hole_rings: Vec<Vec<u32>> = Vec::with_capacity(region.holes.len());
    for hole in &region.holes {
        let base = points.len() as u32;
        points.extend_from_slice(hole);
        hole_rings.push((base..base + hole.len() as u32).collect());
    }

    let triangles = triangulate(&points, &outer_ring, &hole_rings);
    if triangles.is_empty() {
        return;
    }

    // Front cap (+Z) keeps the CCW winding; back cap reverses it.
    let front_base = mesh.vertices.len() as u32;
    for p in &points {
        mesh.vertices
            .push(Vertex::new(Vec3::new(p.x, p.y, front_z), Vec3::Z));
    }
    for t in &triangles {
        mesh.indices.extend_from_slice(&[
            front_base + t[0],
            front_base + t[1],
            front_base + t[2],
        ]);
    }
    let back_base = mesh.vertices.len() as u32;
    for p in &points {
        mesh.vertices
            .push(Vertex::new(Vec3::new(p.x, p.y, back_z), Vec3::NEG_Z));
    }
    for t in &triangles {
        mesh.indices.extend_from_slice(&[
            back_base + t[2],
            back_base + t[1],
            back_base + t[0],
        ]);
    }

    // Walls and bevel rings, per contour.
    let mut side_contours: Vec<&[Vec2]> = vec![&region.outer];
    side_contours.extend(region.holes.iter().map(Vec::as_slice));
    for contour in side_contours {
        let normals = outward_normals(contour);
        let offset: Vec<Vec2> = contour
            .iter()
            .zip(&normals)
            .map(|(p, n)| *p + *n * bevel_s)
            .collect();

        // Ring stack from back cap to front cap.
        let rings: [(&[Vec2], f32); 4] = [
            (contour, back_z),
            (&offset, 0.0),
            (&offset, style.depth),
            (contour, front_z),
        ];
        for w in rings.windows(2) {
            let (ra, za) = (w[0].0, w[0].1);
            let (rb, zb) = (w[1].0, w[1].1);
            if za == zb {
                continue; // degenerate band when the bevel is disabled
            }
            emit_band(mesh, ra, za, rb, zb);
        }
    }
}

/// Emit a quad band between two rings of equal length, with flat
/// per-quad normals.
fn emit_band(mesh: &mut MeshData, ra: &[Vec2], za: f32, rb: &[Vec2], zb: f32) {
    let n = ra.len();
    for i in 0..n {
        let j = (i + 1) % n;
        let a = Vec3::new(ra[i].x, ra[i].y, za);
        let b = Vec3::new(ra[j].x, ra[j].y, za);
        let c = Vec3::new(rb[j].x, rb[j].y, zb);
        let d = Vec3::new(rb[i].x, rb[i].y, zb);

        let normal = (b - a).cross(d - a).normalize_or_zero();
        if normal == Vec3::ZERO {
            continue;
        }

        let base = mesh.vertices.len() as u32;
        for p in [a, b, c, d] {
            mesh.vertices.push(Vertex::new(p, normal));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Typeface;

    fn test_font() -> Typeface {
        Typeface::from_json(
            r#"{
                "glyphs": {
                    "I": { "ha": 300, "o": "m 100 0 l 200 0 l 200 700 l 100 700" },
                    "O": { "ha": 600, "o": "m 0 0 l 500 0 l 500 700 l 0 700 m 100 100 l 100 600 l 400 600 l 400 100" },
                    " ": { "ha": 250 }
                },
                "resolution": 1000
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_text_is_empty_mesh() {
        let font = test_font();
        let mesh = build_text_mesh(&font, "", &TextStyle::default());
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn spaces_produce_no_geometry() {
        let font = test_font();
        let mesh = build_text_mesh(&font, "   ", &TextStyle::default());
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn mesh_is_centered() {
        let font = test_font();
        let mesh = build_text_mesh(&font, "II", &TextStyle::default());
        assert!(!mesh.vertices.is_empty());
        let (min, max) = mesh.bounding_box();
        assert!((min + max).length() < 1e-4);
    }

    #[test]
    fn depth_matches_style_with_bevel() {
        let font = test_font();
        let style = TextStyle::default();
        let mesh = build_text_mesh(&font, "I", &style);
        let (min, max) = mesh.bounding_box();
        let depth = max.z - min.z;
        let expected = style.depth + 2.0 * style.bevel_thickness;
        assert!((depth - expected).abs() < 1e-4, "depth was {depth}");
    }

    #[test]
    fn hole_glyph_triangulates() {
        let font = test_font();
        let mesh = build_text_mesh(&font, "O", &TextStyle::default());
        // Caps alone need 8 vertices * 2; walls and bevels add more.
        assert!(mesh.triangle_count() > 16);
    }

    #[test]
    fn glyph_size_tracks_style() {
        let font = test_font();
        let style = TextStyle {
            bevel_enabled: false,
            ..TextStyle::default()
        };
        let mesh = build_text_mesh(&font, "I", &style);
        let (min, max) = mesh.bounding_box();
        // Glyph spans 700/1000 of the em at size 0.5.
        assert!((max.y - min.y - 0.35).abs() < 1e-4);
        assert!((max.z - min.z - style.depth).abs() < 1e-4);
    }

    #[test]
    fn unknown_chars_are_skipped() {
        let font = test_font();
        let a = build_text_mesh(&font, "I", &TextStyle::default());
        let b = build_text_mesh(&font, "\u{263a}I\u{263a}", &TextStyle::default());
        assert_eq!(a.triangle_count(), b.triangle_count());
    }
}

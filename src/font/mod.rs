//! Typeface font loading.
//!
//! Parses the JSON typeface format (the converted-font format used by web
//! 3D text demos): a glyph table keyed by character, each glyph carrying
//! an advance width and an outline string of `m`/`l`/`q`/`b` path
//! commands in font units.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::error::MarqueeError;

/// One glyph: advance width plus an optional outline.
#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units.
    #[serde(default)]
    pub ha: f32,
    /// Outline path commands, whitespace-separated. Absent for blank
    /// glyphs such as the space.
    #[serde(default)]
    pub o: Option<String>,
}

/// A parsed typeface font.
#[derive(Debug, Clone, Deserialize)]
pub struct Typeface {
    /// Glyph table keyed by the character it renders.
    pub glyphs: HashMap<String, Glyph>,
    /// Font units per em; outline coordinates divide by this.
    #[serde(default = "default_resolution")]
    pub resolution: f32,
}

fn default_resolution() -> f32 {
    1000.0
}

impl Typeface {
    /// Load a typeface JSON file from disk.
    pub fn load(path: &Path) -> Result<Self, MarqueeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a typeface from its JSON source.
    pub fn from_json(json: &str) -> Result<Self, MarqueeError> {
        serde_json::from_str(json)
            .map_err(|e| MarqueeError::FontParse(e.to_string()))
    }

    /// Look up the glyph for a character.
    #[must_use]
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        let mut buf = [0u8; 4];
        self.glyphs.get(&*c.encode_utf8(&mut buf))
    }
}

/// A single glyph outline command, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new contour.
    MoveTo(Vec2),
    /// Straight segment.
    LineTo(Vec2),
    /// Quadratic Bézier segment.
    QuadTo {
        /// Control point.
        ctrl: Vec2,
        /// End point.
        end: Vec2,
    },
    /// Cubic Bézier segment.
    CubicTo {
        /// First control point.
        ctrl1: Vec2,
        /// Second control point.
        ctrl2: Vec2,
        /// End point.
        end: Vec2,
    },
}

/// Parse a glyph outline string into path commands.
///
/// The typeface format writes the segment *end point first*, then the
/// control point(s): `q x y cx cy`, `b x y c1x c1y c2x c2y`.
pub fn parse_outline(o: &str) -> Result<Vec<PathCommand>, MarqueeError> {
    let mut commands = Vec::new();
    let mut tokens = o.split_whitespace();

    let next_f32 = |tokens: &mut std::str::SplitWhitespace<'_>| {
        tokens
            .next()
            .ok_or_else(|| {
                MarqueeError::FontParse("truncated outline".into())
            })?
            .parse::<f32>()
            .map_err(|e| MarqueeError::FontParse(e.to_string()))
    };

    while let Some(op) = tokens.next() {
        match op {
            "m" => {
                let x = next_f32(&mut tokens)?;
                let y = next_f32(&mut tokens)?;
                commands.push(PathCommand::MoveTo(Vec2::new(x, y)));
            }
            "l" => {
                let x = next_f32(&mut tokens)?;
                let y = next_f32(&mut tokens)?;
                commands.push(PathCommand::LineTo(Vec2::new(x, y)));
            }
            "q" => {
                let x = next_f32(&mut tokens)?;
                let y = next_f32(&mut tokens)?;
                let cx = next_f32(&mut tokens)?;
                let cy = next_f32(&mut tokens)?;
                commands.push(PathCommand::QuadTo {
                    ctrl: Vec2::new(cx, cy),
                    end: Vec2::new(x, y),
                });
            }
            "b" => {
                let x = next_f32(&mut tokens)?;
                let y = next_f32(&mut tokens)?;
                let c1x = next_f32(&mut tokens)?;
                let c1y = next_f32(&mut tokens)?;
                let c2x = next_f32(&mut tokens)?;
                let c2y = next_f32(&mut tokens)?;
                commands.push(PathCommand::CubicTo {
                    ctrl1: Vec2::new(c1x, c1y),
                    ctrl2: Vec2::new(c2x, c2y),
                    end: Vec2::new(x, y),
                });
            }
            "z" => {} // contour close is implicit
            other => {
                return Err(MarqueeError::FontParse(format!(
                    "unknown outline op: {other}"
                )));
            }
        }
    }

    Ok(commands)
}

/// Flatten parsed commands into closed contours, subdividing curves into
/// `curve_segments` straight pieces.
#[must_use]
pub fn flatten_outline(
    commands: &[PathCommand],
    curve_segments: u32,
) -> Vec<Vec<Vec2>> {
    let segments = curve_segments.max(1);
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    let mut close = |current: &mut Vec<Vec2>, contours: &mut Vec<Vec<Vec2>>| {
        if current.len() >= 3 {
            // Drop an explicit closing point that repeats the start.
            if current
                .first()
                .zip(current.last())
                .is_some_and(|(a, b)| a.distance_squared(*b) < 1e-10)
            {
                let _ = current.pop();
            }
            if current.len() >= 3 {
                contours.push(std::mem::take(current));
                return;
            }
        }
        current.clear();
    };

    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo(p) => {
                close(&mut current, &mut contours);
                current.push(p);
            }
            PathCommand::LineTo(p) => current.push(p),
            PathCommand::QuadTo { ctrl, end } => {
                let start = current.last().copied().unwrap_or(end);
                for s in 1..=segments {
                    let t = s as f32 / segments as f32;
                    let omt = 1.0 - t;
                    current.push(
                        start * (omt * omt)
                            + ctrl * (2.0 * omt * t)
                            + end * (t * t),
                    );
                }
            }
            PathCommand::CubicTo { ctrl1, ctrl2, end } => {
                let start = current.last().copied().unwrap_or(end);
                for s in 1..=segments {
                    let t = s as f32 / segments as f32;
                    let omt = 1.0 - t;
                    current.push(
                        start * (omt * omt * omt)
                            + ctrl1 * (3.0 * omt * omt * t)
                            + ctrl2 * (3.0 * omt * t * t)
                            + end * (t * t * t),
                    );
                }
            }
        }
    }
    close(&mut current, &mut contours);

    contours
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT_JSON: &str = r#"{
        "glyphs": {
            "I": { "ha": 300, "o": "m 100 0 l 200 0 l 200 700 l 100 700 z" },
            " ": { "ha": 250 }
        },
        "familyName": "Test Sans",
        "resolution": 1000
    }"#;

    #[test]
    fn parses_typeface_json() {
        let font = Typeface::from_json(FONT_JSON).unwrap();
        assert_eq!(font.resolution, 1000.0);
        assert_eq!(font.glyph('I').unwrap().ha, 300.0);
        assert!(font.glyph(' ').unwrap().o.is_none());
        assert!(font.glyph('X').is_none());
    }

    #[test]
    fn rejects_bad_json() {
        assert!(Typeface::from_json("not json").is_err());
    }

    #[test]
    fn parses_outline_commands() {
        let cmds = parse_outline("m 0 0 l 10 0 q 10 10 12 2 b 0 10 8 9 2 11")
            .unwrap();
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[0], PathCommand::MoveTo(Vec2::ZERO));
        assert_eq!(cmds[1], PathCommand::LineTo(Vec2::new(10.0, 0.0)));
        // End point comes before the control point in the source.
        assert_eq!(
            cmds[2],
            PathCommand::QuadTo {
                ctrl: Vec2::new(12.0, 2.0),
                end: Vec2::new(10.0, 10.0),
            }
        );
        assert_eq!(
            cmds[3],
            PathCommand::CubicTo {
                ctrl1: Vec2::new(8.0, 9.0),
                ctrl2: Vec2::new(2.0, 11.0),
                end: Vec2::new(0.0, 10.0),
            }
        );
    }

    #[test]
    fn truncated_outline_is_an_error() {
        assert!(parse_outline("m 0").is_err());
        assert!(parse_outline("q 1 2 3").is_err());
    }

    #[test]
    fn unknown_op_is_an_error() {
        assert!(parse_outline("w 1 2").is_err());
    }

    #[test]
    fn flatten_splits_curves() {
        let cmds = parse_outline("m 0 0 l 10 0 q 10 10 12 2 l 0 10").unwrap();
        let contours = flatten_outline(&cmds, 5);
        assert_eq!(contours.len(), 1);
        // start + line + 5 curve pieces + line
        assert_eq!(contours[0].len(), 8);
    }

    #[test]
    fn flatten_drops_duplicate_closing_point() {
        let cmds =
            parse_outline("m 0 0 l 10 0 l 10 10 l 0 0").unwrap();
        let contours = flatten_outline(&cmds, 5);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 3);
    }
}

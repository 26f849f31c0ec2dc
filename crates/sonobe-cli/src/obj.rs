//! Minimal OBJ vertex/face reader.
//!
//! Reads only `v` (position) and `f` (face) lines; everything else — normals,
//! texture coordinates, materials, groups — is ignored. Face entries may be
//! plain indices or `v/vt/vn` triplets; only the vertex index is used, and
//! OBJ's 1-based indexing is converted to 0-based here.

use anyhow::{bail, Context, Result};
use sonobe_math::Point3;

/// Parse OBJ text into a vertex list and 0-based face loops.
pub fn parse(text: &str) -> Result<(Vec<Point3>, Vec<Vec<usize>>)> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("v ") {
            let coords: Vec<f64> = rest
                .split_whitespace()
                .map(|t| t.parse::<f64>().with_context(|| format!("line {}: bad vertex coordinate {t:?}", lineno + 1)))
                .collect::<Result<_>>()?;
            if coords.len() < 3 {
                bail!("line {}: vertex needs 3 coordinates", lineno + 1);
            }
            vertices.push(Point3::new(coords[0], coords[1], coords[2]));
        } else if let Some(rest) = line.strip_prefix("f ") {
            let mut loop_ = Vec::new();
            for token in rest.split_whitespace() {
                let index_part = token.split('/').next().unwrap_or(token);
                let idx: isize = index_part
                    .parse()
                    .with_context(|| format!("line {}: bad face index {token:?}", lineno + 1))?;
                if idx < 1 {
                    bail!("line {}: face index {idx} out of range (negative indices unsupported)", lineno + 1);
                }
                loop_.push((idx - 1) as usize);
            }
            if loop_.len() < 3 {
                bail!("line {}: face needs at least 3 vertices", lineno + 1);
            }
            faces.push(loop_);
        }
    }

    Ok((vertices, faces))
}

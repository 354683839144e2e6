//! Wavefront `.obj` reader.
//!
//! # Supported format
//! - ASCII `.obj`.
//! - `v x y z [w]` vertices (`w` and trailing vertex colors are ignored).
//! - `vn x y z` normals.
//! - `f` polygons with `a`, `a/b`, `a//c` or `a/b/c` corners; indices are
//!   1-based, negative indices count back from the last vertex read.
//!
//! # Limitations
//! - Texture coordinates, groups, smoothing and materials are ignored.
//! - Lines, points and free-form geometry are ignored.
//! - Geometry is not validated beyond index ranges.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::catalog_error::MeshDecodeError;
use crate::mesh::{MeshAsset, MeshDecoder};

/// Wavefront `.obj` decoder.
#[derive(Debug, Default, Clone)]
pub struct ObjDecoder;

impl ObjDecoder {
    fn parse_coord(raw: &str) -> Result<f64, String> {
        raw.parse::<f64>()
            .map_err(|_| format!("invalid coordinate: {raw}"))
    }

    fn parse_triple<'a, I>(parts: &mut I, what: &str) -> Result<[f64; 3], String>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut xyz = [0.0; 3];
        for (axis, slot) in ["x", "y", "z"].iter().zip(xyz.iter_mut()) {
            let raw = parts
                .next()
                .ok_or_else(|| format!("missing {axis} component of {what}"))?;
            *slot = Self::parse_coord(raw)?;
        }
        Ok(xyz)
    }

    /// Resolves one face corner to a zero-based vertex index. Positive
    /// indices are range-checked once the whole file has been read.
    fn parse_corner(raw: &str, vertices_so_far: usize) -> Result<usize, String> {
        let vertex = raw.split('/').next().unwrap_or(raw);
        let index = vertex
            .parse::<i64>()
            .map_err(|_| format!("invalid face index: {raw}"))?;
        match index {
            0 => Err("face index 0 is not valid (indices are 1-based)".into()),
            i if i > 0 => Ok((i - 1) as usize),
            i => {
                let back = i.unsigned_abs() as usize;
                vertices_so_far
                    .checked_sub(back)
                    .ok_or_else(|| format!("relative face index {i} precedes the first vertex"))
            }
        }
    }

    /// Parse an `.obj` stream. `origin` is only used in error reports.
    pub fn read<R: Read>(&self, mut reader: R, origin: &Path) -> Result<MeshAsset, MeshDecodeError> {
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|source| MeshDecodeError::Io {
                path: origin.to_path_buf(),
                source,
            })?;

        let parse_error = |line: usize, message: String| MeshDecodeError::Parse {
            path: origin.to_path_buf(),
            line,
            message,
        };

        let mut mesh = MeshAsset::default();
        let mut face_lines = Vec::new();

        for (idx, raw_line) in contents.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.split('#').next().unwrap_or_default().trim();
            let mut parts = line.split_whitespace();
            let Some(keyword) = parts.next() else {
                continue;
            };
            match keyword {
                "v" => {
                    let xyz = Self::parse_triple(&mut parts, "vertex")
                        .map_err(|m| parse_error(line_no, m))?;
                    mesh.vertices.push(xyz);
                }
                "vn" => {
                    let xyz = Self::parse_triple(&mut parts, "normal")
                        .map_err(|m| parse_error(line_no, m))?;
                    mesh.normals.push(xyz);
                }
                "f" => {
                    let face = parts
                        .map(|corner| Self::parse_corner(corner, mesh.vertices.len()))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|m| parse_error(line_no, m))?;
                    if face.len() < 3 {
                        return Err(parse_error(
                            line_no,
                            format!("face has {} corners, expected at least 3", face.len()),
                        ));
                    }
                    mesh.faces.push(face);
                    face_lines.push(line_no);
                }
                _ => {
                    // vt, g, o, s, usemtl, mtllib, l, p, ...
                }
            }
        }

        let vertex_count = mesh.vertices.len();
        for (face, &line_no) in mesh.faces.iter().zip(&face_lines) {
            if let Some(&bad) = face.iter().find(|&&v| v >= vertex_count) {
                return Err(parse_error(
                    line_no,
                    format!(
                        "face index {} out of range ({vertex_count} vertices)",
                        bad + 1
                    ),
                ));
            }
        }

        Ok(mesh)
    }
}

impl MeshDecoder for ObjDecoder {
    fn decode(&self, path: &Path) -> Result<MeshAsset, MeshDecodeError> {
        let is_obj = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
        if !is_obj {
            return Err(MeshDecodeError::UnsupportedFormat(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| MeshDecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mesh = self.read(BufReader::new(file), path)?;
        log::debug!(
            "decoded {}: {} vertices, {} faces",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }
}

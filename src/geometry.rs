//! Triangle-list geometry loaded from disk or generated procedurally.
//!
//! [`MeshData`] is the CPU-side mesh the viewer works with: three parallel
//! sequences (`points`, `colors`, `normals`), one entry per triangle corner, no
//! index buffer. It is uploaded to the GPU by [`GpuMesh`](crate::mesh::GpuMesh).
//!
//! # Supported Formats
//!
//! | Format | Extensions | Notes |
//! |--------|------------|-------|
//! | OFF    | `.off`     | Polygons are fan-triangulated, smooth normals, normal-derived colours |
//! | STL    | `.stl`     | Binary and ASCII, face normals, flat grey |
//!
//! # Example
//!
//! ```no_run
//! use umbra::MeshData;
//!
//! let mut mesh = MeshData::load("assets/sphere.off")?;
//!
//! // A failed reload leaves `mesh` exactly as it was.
//! if let Err(e) = mesh.reload("assets/missing.off") {
//!     eprintln!("{e}");
//! }
//! # Ok::<(), umbra::GeometryError>(())
//! ```

use glam::Vec3;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// File format could not be determined from extension.
    #[error("Unknown geometry format: '{0}'")]
    UnknownFormat(String),
    /// The OFF data was invalid or corrupt.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    /// The STL reader rejected the data.
    #[error("STL parse error: {0}")]
    Stl(String),
    /// The file parsed but contained no triangles.
    #[error("Geometry contains no triangles")]
    Empty,
}

/// Colour given to every vertex of STL geometry, which carries none.
const STL_COLOR: Vec3 = Vec3::splat(0.7);

/// Triangle-list geometry: three equally long, per-corner sequences.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub points: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl MeshData {
    /// Loads geometry from a file, detecting format from extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let mesh = match ext.as_str() {
            "off" => Self::parse_off(&std::fs::read_to_string(path)?)?,
            "stl" => {
                let file = std::fs::File::open(path)?;
                Self::parse_stl(&mut std::io::BufReader::new(file))?
            }
            _ => return Err(GeometryError::UnknownFormat(ext)),
        };

        if mesh.is_empty() {
            return Err(GeometryError::Empty);
        }
        Ok(mesh)
    }

    /// Replaces all three sequences with the contents of `path`.
    ///
    /// Either everything is replaced or, on error, nothing is.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<(), GeometryError> {
        *self = Self::load(path)?;
        Ok(())
    }

    /// Number of vertices (three per triangle).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn push(&mut self, point: Vec3, color: Vec3, normal: Vec3) {
        self.points.push(point);
        self.colors.push(color);
        self.normals.push(normal);
    }

    /// Parses OFF text.
    ///
    /// Vertex normals are the normalized sum of the normals of every face that
    /// touches the vertex; colours map the normal from `[-1, 1]` to `[0, 1]`.
    pub fn parse_off(source: &str) -> Result<Self, GeometryError> {
        // Comments and blank lines carry no data.
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
            .filter(|(_, line)| !line.is_empty());

        let (line, header) = lines.next().ok_or(GeometryError::Empty)?;
        let mut counts_line = match header.strip_prefix("OFF") {
            Some(rest) if rest.trim().is_empty() => None,
            // Some writers put the counts on the header line.
            Some(rest) => Some((line, rest.trim())),
            None => {
                return Err(GeometryError::Parse {
                    line,
                    message: format!("expected 'OFF' header, found '{header}'"),
                });
            }
        };
        if counts_line.is_none() {
            counts_line = lines.next();
        }
        let (line, counts) = counts_line.ok_or_else(|| GeometryError::Parse {
            line,
            message: "missing element counts".into(),
        })?;
        let counts = parse_numbers::<usize>(line, counts)?;
        let [vertex_count, face_count] = match counts.as_slice() {
            [v, f, ..] => [*v, *f],
            _ => {
                return Err(GeometryError::Parse {
                    line,
                    message: "expected vertex and face counts".into(),
                });
            }
        };

        // Header counts are untrusted; the loops below stop at the first missing line.
        let mut vertices = Vec::new();
        for _ in 0..vertex_count {
            let (line, text) = lines.next().ok_or_else(|| GeometryError::Parse {
                line,
                message: format!("expected {vertex_count} vertices"),
            })?;
            match parse_numbers::<f32>(line, text)?.as_slice() {
                [x, y, z, ..] => vertices.push(Vec3::new(*x, *y, *z)),
                _ => {
                    return Err(GeometryError::Parse {
                        line,
                        message: "vertex needs three coordinates".into(),
                    });
                }
            }
        }

        let mut triangles = Vec::new();
        for _ in 0..face_count {
            let (line, text) = lines.next().ok_or_else(|| GeometryError::Parse {
                line,
                message: format!("expected {face_count} faces"),
            })?;
            let fields = parse_numbers::<usize>(line, text)?;
            let (&n, rest) = fields.split_first().ok_or_else(|| GeometryError::Parse {
                line,
                message: "empty face".into(),
            })?;
            if n < 3 || rest.len() < n {
                return Err(GeometryError::Parse {
                    line,
                    message: format!("face declares {n} vertices but lists {}", rest.len()),
                });
            }
            let polygon = &rest[..n];
            if let Some(&bad) = polygon.iter().find(|&&i| i >= vertex_count) {
                return Err(GeometryError::Parse {
                    line,
                    message: format!("vertex index {bad} out of range"),
                });
            }
            for k in 1..n - 1 {
                triangles.push([polygon[0], polygon[k], polygon[k + 1]]);
            }
        }

        let mut vertex_normals = vec![Vec3::ZERO; vertices.len()];
        for &[a, b, c] in &triangles {
            let face_normal = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);
            for i in [a, b, c] {
                vertex_normals[i] += face_normal;
            }
        }
        for n in &mut vertex_normals {
            *n = n.normalize_or_zero();
        }

        let mut mesh = Self::default();
        for triangle in &triangles {
            for &i in triangle {
                let normal = vertex_normals[i];
                mesh.push(vertices[i], normal * 0.5 + 0.5, normal);
            }
        }
        Ok(mesh)
    }

    /// Parses STL data (binary or ASCII).
    pub fn parse_stl<R: std::io::Read + std::io::Seek>(
        reader: &mut R,
    ) -> Result<Self, GeometryError> {
        let stl = stl_io::read_stl(reader).map_err(|e| GeometryError::Stl(e.to_string()))?;

        let mut mesh = Self::default();
        // stl_io returns an IndexedMesh with a vertex list and indexed triangles
        for face in &stl.faces {
            let normal = Vec3::from(<[f32; 3]>::from(face.normal));
            for &vertex_idx in &face.vertices {
                let position = Vec3::from(<[f32; 3]>::from(stl.vertices[vertex_idx]));
                mesh.push(position, STL_COLOR, normal);
            }
        }
        Ok(mesh)
    }

    /// A unit square in the XY plane, centred at the origin, facing +Z.
    pub fn square(color: Vec3) -> Self {
        let corners = [
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ];
        let mut mesh = Self::default();
        for i in [0, 1, 2, 2, 3, 0] {
            mesh.push(corners[i], color, Vec3::Z);
        }
        mesh
    }

    /// A unit cube centred at the origin with flat per-face normals.
    pub fn cube() -> Self {
        let mut mesh = Self::default();
        for axis in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
            // Two in-face directions such that u × v = axis.
            let u = axis.any_orthonormal_vector();
            let v = axis.cross(u);
            let corner = |su: f32, sv: f32| 0.5 * (axis + su * u + sv * v);
            let quad = [
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            ];
            let color = axis.abs();
            for i in [0, 1, 2, 2, 3, 0] {
                mesh.push(quad[i], color, axis);
            }
        }
        mesh
    }

    /// A UV sphere of radius 0.5 centred at the origin.
    ///
    /// `segments` divides the equator, `rings` divides pole to pole.
    pub fn uv_sphere(segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let point = |ring: u32, seg: u32| {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            let theta = 2.0 * std::f32::consts::PI * seg as f32 / segments as f32;
            Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
        };

        let mut mesh = Self::default();
        for ring in 0..rings {
            for seg in 0..segments {
                let current = point(ring, seg);
                let next = point(ring + 1, seg);
                let current_side = point(ring, seg + 1);
                let next_side = point(ring + 1, seg + 1);

                // Triangles touching a pole collapse to zero area; skip them.
                let quad: &[Vec3] = if ring == 0 {
                    &[next, current, next_side]
                } else if ring == rings - 1 {
                    &[current, current_side, next]
                } else {
                    &[current, current_side, next, next, current_side, next_side]
                };
                for &n in quad {
                    mesh.push(n * 0.5, n * 0.5 + 0.5, n);
                }
            }
        }
        mesh
    }
}

fn parse_numbers<T: std::str::FromStr>(line: usize, text: &str) -> Result<Vec<T>, GeometryError> {
    text.split_whitespace()
        .map(|field| {
            field.parse::<T>().map_err(|_| GeometryError::Parse {
                line,
                message: format!("invalid number '{field}'"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TETRAHEDRON: &str = "\
OFF
# a tetrahedron
4 4 6
0 0 0
1 0 0
0 1 0
0 0 1
3 0 2 1
3 0 1 3
3 0 3 2
3 1 2 3
";

    fn fixture(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("umbra-geometry-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn assert_parallel(mesh: &MeshData) {
        assert_eq!(mesh.points.len(), mesh.colors.len());
        assert_eq!(mesh.points.len(), mesh.normals.len());
        assert_eq!(mesh.points.len() % 3, 0);
    }

    #[test]
    fn parses_off_into_triangle_list() {
        let mesh = MeshData::parse_off(TETRAHEDRON).unwrap();
        assert_parallel(&mesh);
        assert_eq!(mesh.len(), 12);
        assert_eq!(mesh.points[0], Vec3::ZERO);
        assert_eq!(mesh.points[1], Vec3::Y);

        for (normal, color) in mesh.normals.iter().zip(&mesh.colors) {
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!(color.abs_diff_eq(*normal * 0.5 + 0.5, 1e-6));
        }
    }

    #[test]
    fn off_normals_point_outwards() {
        let mesh = MeshData::parse_off(TETRAHEDRON).unwrap();
        let centroid = Vec3::splat(0.25);
        for (p, n) in mesh.points.iter().zip(&mesh.normals) {
            assert!((*p - centroid).dot(*n) > 0.0, "{p} {n}");
        }
    }

    #[test]
    fn quads_are_fan_triangulated() {
        let source = "OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        let mesh = MeshData::parse_off(source).unwrap();
        assert_eq!(mesh.len(), 6);
        assert!(mesh.normals.iter().all(|n| n.abs_diff_eq(Vec3::Z, 1e-6)));
    }

    #[test]
    fn malformed_off_reports_line() {
        let source = "OFF\n3 1 0\n0 0 0\n1 zero 0\n0 1 0\n3 0 1 2\n";
        match MeshData::parse_off(source) {
            Err(GeometryError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let source = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 7\n";
        assert!(matches!(
            MeshData::parse_off(source),
            Err(GeometryError::Parse { line: 6, .. })
        ));
    }

    #[test]
    fn oversized_counts_are_parse_errors() {
        assert!(matches!(
            MeshData::parse_off("OFF\n18446744073709551615 1 0\n0 0 0\n"),
            Err(GeometryError::Parse { .. })
        ));
        let faces = "OFF\n3 18446744073709551615 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
        assert!(matches!(
            MeshData::parse_off(faces),
            Err(GeometryError::Parse { .. })
        ));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(matches!(
            MeshData::parse_off("3 1 0\n"),
            Err(GeometryError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn reload_is_deterministic() {
        let path = fixture("tetra.off", TETRAHEDRON);
        let mut mesh = MeshData::load(&path).unwrap();
        let first = mesh.clone();

        mesh.reload(&path).unwrap();
        assert_eq!(mesh, first);
    }

    #[test]
    fn failed_reload_keeps_current_geometry() {
        let path = fixture("keep.off", TETRAHEDRON);
        let mut mesh = MeshData::load(&path).unwrap();
        let before = mesh.clone();

        let broken = fixture("broken.off", "OFF\n3 1 0\n0 0 0\n");
        assert!(mesh.reload(&broken).is_err());
        assert!(matches!(
            mesh.reload(path.with_file_name("does-not-exist.off")),
            Err(GeometryError::Io(_))
        ));
        assert_eq!(mesh, before);
    }

    #[test]
    fn empty_geometry_is_an_error() {
        let path = fixture("empty.off", "OFF\n0 0 0\n");
        assert!(matches!(MeshData::load(&path), Err(GeometryError::Empty)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = fixture("model.obj", "v 0 0 0\n");
        assert!(matches!(
            MeshData::load(&path),
            Err(GeometryError::UnknownFormat(ext)) if ext == "obj"
        ));
    }

    #[test]
    fn square_faces_positive_z() {
        let mesh = MeshData::square(Vec3::splat(0.6));
        assert_parallel(&mesh);
        assert_eq!(mesh.len(), 6);
        assert!(mesh.normals.iter().all(|n| *n == Vec3::Z));
        assert!(mesh.colors.iter().all(|c| *c == Vec3::splat(0.6)));
    }

    #[test]
    fn cube_winding_matches_normals() {
        let mesh = MeshData::cube();
        assert_eq!(mesh.len(), 36);
        for tri in 0..12 {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.points[tri * 3 + k]);
            let face = (b - a).cross(c - a).normalize();
            assert!(face.abs_diff_eq(mesh.normals[tri * 3], 1e-5));
        }
    }

    #[test]
    fn uv_sphere_has_radius_half() {
        let mesh = MeshData::uv_sphere(16, 8);
        assert_parallel(&mesh);
        assert!(mesh.points.iter().all(|p| (p.length() - 0.5).abs() < 1e-5));
    }
}

use derive_more::Display;
use nalgebra::Point3;
use serde::Deserialize;
use std::{cmp, convert::TryFrom, fmt};

/// Errors that can occur while building a [Mesh]. These are returned wrapped
/// in [anyhow::Error].
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum MeshError {
    /// A capture-mode count is bigger than the arrays it counts
    #[display(fmt = "{} count {} exceeds array length {}", kind, count, len)]
    CountTooLarge {
        kind: &'static str,
        count: usize,
        len: usize,
    },
    /// A face points at a vertex that doesn't exist
    #[display(
        fmt = "face {} references vertex {}, but there are only {} vertices",
        face,
        vertex,
        num_vertices
    )]
    FaceIndexOutOfRange {
        face: usize,
        vertex: u16,
        num_vertices: usize,
    },
}

impl std::error::Error for MeshError {}

/// A triangulated 3D model, in model space (relative to wherever the model is
/// anchored in the world). Vertices are stored as three parallel arrays, and
/// faces as three parallel arrays of vertex indices: face `i` is the triangle
/// `(face_a[i], face_b[i], face_c[i])`.
///
/// Meshes are immutable once built. Construction guarantees that every face
/// references a real vertex, so none of the accessors can panic.
///
/// ## Capture Mode
///
/// Normally the vertex and face counts are derived from the array lengths
/// (the shortest of the three wins). Some sources hand over reused, oversized
/// buffers along with the real counts. Use [Mesh::with_counts] for those, and
/// anything past the counts is ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "RawMesh")]
pub struct Mesh {
    xs: Vec<i32>,
    /// Height. Up is positive.
    ys: Vec<i32>,
    zs: Vec<i32>,
    face_a: Vec<u16>,
    face_b: Vec<u16>,
    face_c: Vec<u16>,
    num_vertices: usize,
    num_faces: usize,
}

impl Mesh {
    /// Build a mesh, deriving the vertex and face counts from the array
    /// lengths. Returns an error if any face references a vertex that doesn't
    /// exist.
    pub fn new(
        xs: Vec<i32>,
        ys: Vec<i32>,
        zs: Vec<i32>,
        face_a: Vec<u16>,
        face_b: Vec<u16>,
        face_c: Vec<u16>,
    ) -> anyhow::Result<Self> {
        let num_vertices = cmp::min(xs.len(), cmp::min(ys.len(), zs.len()));
        let num_faces =
            cmp::min(face_a.len(), cmp::min(face_b.len(), face_c.len()));
        Self::with_counts(
            xs,
            ys,
            zs,
            face_a,
            face_b,
            face_c,
            num_vertices,
            num_faces,
        )
    }

    /// Build a mesh with authoritative vertex and face counts (capture mode).
    /// The arrays can be longer than the counts, but not shorter.
    #[allow(clippy::too_many_arguments)]
    pub fn with_counts(
        xs: Vec<i32>,
        ys: Vec<i32>,
        zs: Vec<i32>,
        face_a: Vec<u16>,
        face_b: Vec<u16>,
        face_c: Vec<u16>,
        num_vertices: usize,
        num_faces: usize,
    ) -> anyhow::Result<Self> {
        for (kind, count, arrays) in [
            ("vertex", num_vertices, [xs.len(), ys.len(), zs.len()]),
            ("face", num_faces, [face_a.len(), face_b.len(), face_c.len()]),
        ] {
            if let Some(&len) = arrays.iter().find(|&&len| len < count) {
                return Err(MeshError::CountTooLarge { kind, count, len }.into());
            }
        }

        let mesh = Self {
            xs,
            ys,
            zs,
            face_a,
            face_b,
            face_c,
            num_vertices,
            num_faces,
        };
        for face in 0..mesh.num_faces {
            for vertex in mesh.face_indices(face) {
                if vertex as usize >= mesh.num_vertices {
                    return Err(MeshError::FaceIndexOutOfRange {
                        face,
                        vertex,
                        num_vertices: mesh.num_vertices,
                    }
                    .into());
                }
            }
        }
        Ok(mesh)
    }

    /// Deserialize a mesh from JSON. The JSON object has the fields `xs`,
    /// `ys`, `zs`, `face_a`, `face_b`, and `face_c`, plus optional
    /// `num_vertices` and `num_faces` to enable capture mode.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        serde_json::from_str(json).context("error deserializing mesh")
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_faces(&self) -> usize {
        self.num_faces
    }

    /// Get a vertex in model space. Panics if the index is out of range.
    pub fn vertex(&self, index: usize) -> Point3<i32> {
        Point3::new(self.xs[index], self.ys[index], self.zs[index])
    }

    /// Get the three vertex indices for a face. Panics if the index is out of
    /// range.
    pub fn face_indices(&self, face: usize) -> [u16; 3] {
        [self.face_a[face], self.face_b[face], self.face_c[face]]
    }

    /// Get the center of a face in model space. Panics if the index is out of
    /// range.
    ///
    /// Each axis is averaged on its own with integer division, which rounds
    /// towards zero. So this is **not** quite the true centroid, and code that
    /// sums these up will drift from the true average of all vertices. The sum
    /// is taken in `i64`, and the average of three `i32`s always fits back.
    pub fn face_centroid(&self, face: usize) -> Point3<i32> {
        let [a, b, c] = self.face_indices(face);
        let (a, b, c) = (
            self.vertex(a as usize),
            self.vertex(b as usize),
            self.vertex(c as usize),
        );
        let average = |a: i32, b: i32, c: i32| {
            ((a as i64 + b as i64 + c as i64) / 3) as i32
        };
        Point3::new(
            average(a.x, b.x, c.x),
            average(a.y, b.y, c.y),
            average(a.z, b.z, c.z),
        )
    }
}

/// Two meshes are equal if their vertex arrays and **first** face index array
/// match. `face_b` and `face_c` are not compared, so two meshes with the same
/// vertices and different triangulations can compare equal.
impl PartialEq for Mesh {
    fn eq(&self, other: &Self) -> bool {
        self.face_a == other.face_a
            && self.xs == other.xs
            && self.ys == other.ys
            && self.zs == other.zs
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[faces={} vertices={}] {:?}",
            self.num_faces, self.num_vertices, self.face_a
        )
    }
}

/// Unchecked mesh data, straight off the wire
#[derive(Deserialize)]
struct RawMesh {
    xs: Vec<i32>,
    ys: Vec<i32>,
    zs: Vec<i32>,
    face_a: Vec<u16>,
    face_b: Vec<u16>,
    face_c: Vec<u16>,
    #[serde(default)]
    num_vertices: Option<usize>,
    #[serde(default)]
    num_faces: Option<usize>,
}

impl TryFrom<RawMesh> for Mesh {
    type Error = anyhow::Error;

    fn try_from(raw: RawMesh) -> Result<Self, Self::Error> {
        match (raw.num_vertices, raw.num_faces) {
            (Some(num_vertices), Some(num_faces)) => Self::with_counts(
                raw.xs,
                raw.ys,
                raw.zs,
                raw.face_a,
                raw.face_b,
                raw.face_c,
                num_vertices,
                num_faces,
            ),
            (None, None) => Self::new(
                raw.xs,
                raw.ys,
                raw.zs,
                raw.face_a,
                raw.face_b,
                raw.face_c,
            ),
            _ => Err(anyhow::anyhow!(
                "num_vertices and num_faces must be given together"
            )),
        }
    }
}

//! Indexed triangle meshes

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    IndexCount(usize),
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Immutable vertex buffer plus triangle index buffer.
///
/// Every index is below the vertex count and the index count is a multiple
/// of 3; construction enforces both.
#[derive(Debug, Clone)]
pub struct Mesh<V> {
    vertices: Vec<V>,
    indices: Vec<usize>,
}

impl<V> Mesh<V> {
    /// Build from flat arrays. Panics if the indices are malformed.
    pub fn new(vertices: Vec<V>, indices: Vec<usize>) -> Self {
        match Self::try_new(vertices, indices) {
            Ok(mesh) => mesh,
            Err(e) => panic!("invalid mesh: {e}"),
        }
    }

    /// Build from flat arrays, reporting malformed indices
    pub fn try_new(vertices: Vec<V>, indices: Vec<usize>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(indices.len()));
        }
        if let Some((position, &index)) = indices.iter().enumerate().find(|&(_, &i)| i >= vertices.len()) {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triples in mesh order
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

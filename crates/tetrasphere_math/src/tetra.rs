//! Tetrahedron mesh layout
//!
//! The renderable tetrahedron is a non-indexed triangle list: 4 faces × 3
//! positions = 12 positions. Each of the 4 logical vertices therefore appears
//! at 3 buffer positions (its *slots*), and every slot must hold the same
//! coordinates for the surface to stay closed.

use crate::Vec3;

/// Number of logical vertices
pub const TETRA_VERTEX_COUNT: usize = 4;

/// Number of buffer positions in the non-indexed mesh
pub const TETRA_POSITION_COUNT: usize = 12;

/// Faces as logical vertex indices, in buffer order
///
/// Position `face * 3 + k` of the mesh holds vertex `TETRA_FACES[face][k]`.
pub const TETRA_FACES: [[usize; 3]; 4] = [
    [0, 1, 2],
    [3, 2, 1],
    [3, 1, 0],
    [3, 0, 2],
];

/// The 6 edges as logical vertex pairs
pub const TETRA_EDGES: [[usize; 2]; 6] = [
    [0, 1],
    [0, 2],
    [0, 3],
    [1, 2],
    [1, 3],
    [2, 3],
];

/// Buffer positions holding each logical vertex, derived from [`TETRA_FACES`]
///
/// For the face order above this is `[[0, 8, 10], [1, 5, 7], [2, 4, 11], [3, 6, 9]]`.
pub fn tetra_vertex_slots() -> [[usize; 3]; TETRA_VERTEX_COUNT] {
    let mut slots = [[0usize; 3]; TETRA_VERTEX_COUNT];
    let mut filled = [0usize; TETRA_VERTEX_COUNT];

    for (face_index, face) in TETRA_FACES.iter().enumerate() {
        for (k, &vertex) in face.iter().enumerate() {
            slots[vertex][filled[vertex]] = face_index * 3 + k;
            filled[vertex] += 1;
        }
    }

    slots
}

/// Buffer positions to draw the 6 edges as a line list over the 12-position mesh
///
/// Uses the first slot of each vertex.
pub fn tetra_edge_indices() -> [u16; 12] {
    let slots = tetra_vertex_slots();
    let mut indices = [0u16; 12];
    for (i, [a, b]) in TETRA_EDGES.iter().enumerate() {
        indices[i * 2] = slots[*a][0] as u16;
        indices[i * 2 + 1] = slots[*b][0] as u16;
    }
    indices
}

/// Vertices of a regular tetrahedron inscribed in the unit sphere
pub fn unit_tetrahedron_vertices() -> [Vec3; TETRA_VERTEX_COUNT] {
    [
        Vec3::new(-1.0, -1.0, 1.0).normalized(),
        Vec3::new(1.0, 1.0, 1.0).normalized(),
        Vec3::new(-1.0, 1.0, -1.0).normalized(),
        Vec3::new(1.0, -1.0, -1.0).normalized(),
    ]
}

/// Expand 4 logical vertices into the 12 mesh positions
pub fn expand_to_positions(vertices: &[Vec3; TETRA_VERTEX_COUNT]) -> [Vec3; TETRA_POSITION_COUNT] {
    let mut positions = [Vec3::ZERO; TETRA_POSITION_COUNT];
    for (face_index, face) in TETRA_FACES.iter().enumerate() {
        for (k, &vertex) in face.iter().enumerate() {
            positions[face_index * 3 + k] = vertices[vertex];
        }
    }
    positions
}

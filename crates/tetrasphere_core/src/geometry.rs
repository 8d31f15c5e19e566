//! Tetrahedron position buffer and the in-place updater
//!
//! The renderable mesh stores each logical vertex three times (once per face
//! it belongs to). [`TetrahedronGeometryUpdater`] writes the 4 animated
//! directions into all of their slots without touching anything else in the
//! buffer, then raises the dirty flag once so the renderer re-uploads the
//! buffer a single time per frame.

use std::fmt;
use bitflags::bitflags;
use tetrasphere_math::{
    tetra_vertex_slots, Vec3, TETRA_POSITION_COUNT, TETRA_VERTEX_COUNT,
    tetra::expand_to_positions, unit_tetrahedron_vertices,
};

/// Floats per position
pub const COMPONENTS: usize = 3;

bitflags! {
    /// Flags indicating which parts of a tetrahedron need re-uploading
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Vertex positions changed
        const POSITIONS = 1 << 0;
        /// Colour, opacity or highlight changed
        const COLOR = 1 << 1;
        /// Everything
        const ALL = Self::POSITIONS.bits() | Self::COLOR.bits();
    }
}

/// A host-owned position array with a change signal
pub trait PositionBuffer {
    /// Flat `[x, y, z, x, y, z, ...]` storage
    fn positions_mut(&mut self) -> &mut [f32];

    /// Record that positions changed and must be re-synced
    fn mark_positions_dirty(&mut self);
}

/// CPU copy of one tetrahedron's 12-position mesh
#[derive(Clone, Debug)]
pub struct TetraGeometry {
    positions: Vec<f32>,
    dirty: DirtyFlags,
}

impl TetraGeometry {
    /// Mesh of a regular tetrahedron inscribed in the unit sphere
    ///
    /// Starts fully dirty so the first frame uploads everything.
    pub fn new() -> Self {
        let positions = expand_to_positions(&unit_tetrahedron_vertices())
            .iter()
            .flat_map(|p| p.to_array())
            .collect();
        Self {
            positions,
            dirty: DirtyFlags::ALL,
        }
    }

    /// Flat position data
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Position at buffer slot `slot`
    pub fn position(&self, slot: usize) -> Vec3 {
        let i = slot * COMPONENTS;
        Vec3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
    }

    /// Number of positions in the mesh
    #[inline]
    pub fn position_count(&self) -> usize {
        self.positions.len() / COMPONENTS
    }

    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Raise additional dirty flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Return and clear the dirty flags
    ///
    /// Called by the renderer once it has consumed the changes.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for TetraGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuffer for TetraGeometry {
    fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }

    fn mark_positions_dirty(&mut self) {
        self.dirty |= DirtyFlags::POSITIONS;
    }
}

/// Invalid vertex-slot table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The table does not have exactly one entry per vertex
    WrongVertexCount { expected: usize, found: usize },
    /// A vertex has no slot to write to
    EmptySlots { vertex: usize },
    /// A slot lies past the end of the buffer
    SlotOutOfRange { vertex: usize, slot: usize, buffer_len: usize },
    /// Two vertices claim the same slot
    DuplicateSlot { slot: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::WrongVertexCount { expected, found } => {
                write!(f, "Expected slots for {} vertices, found {}", expected, found)
            }
            GeometryError::EmptySlots { vertex } => {
                write!(f, "Vertex {} has no buffer slots", vertex)
            }
            GeometryError::SlotOutOfRange { vertex, slot, buffer_len } => write!(
                f,
                "Slot {} of vertex {} is outside a buffer of {} floats",
                slot, vertex, buffer_len
            ),
            GeometryError::DuplicateSlot { slot } => {
                write!(f, "Slot {} is claimed by more than one vertex", slot)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Writes animated directions into a tetrahedron's duplicated vertex slots
///
/// The slot table is validated once at construction and never changes.
#[derive(Clone, Debug)]
pub struct TetrahedronGeometryUpdater {
    slots: [Vec<usize>; TETRA_VERTEX_COUNT],
    buffer_len: usize,
}

impl TetrahedronGeometryUpdater {
    /// Build an updater for the given slot table and buffer length (in floats)
    pub fn new<S: AsRef<[usize]>>(slots: &[S], buffer_len: usize) -> Result<Self, GeometryError> {
        if slots.len() != TETRA_VERTEX_COUNT {
            return Err(GeometryError::WrongVertexCount {
                expected: TETRA_VERTEX_COUNT,
                found: slots.len(),
            });
        }

        let mut claimed = vec![false; buffer_len / COMPONENTS];
        for (vertex, list) in slots.iter().enumerate() {
            let list = list.as_ref();
            if list.is_empty() {
                return Err(GeometryError::EmptySlots { vertex });
            }
            for &slot in list {
                if slot * COMPONENTS + COMPONENTS > buffer_len {
                    return Err(GeometryError::SlotOutOfRange { vertex, slot, buffer_len });
                }
                if claimed[slot] {
                    return Err(GeometryError::DuplicateSlot { slot });
                }
                claimed[slot] = true;
            }
        }

        Ok(Self {
            slots: std::array::from_fn(|i| slots[i].as_ref().to_vec()),
            buffer_len,
        })
    }

    /// Updater for the standard 12-position tetrahedron mesh
    pub fn for_tetrahedron() -> Self {
        let slots = tetra_vertex_slots();
        Self {
            slots: std::array::from_fn(|i| slots[i].to_vec()),
            buffer_len: TETRA_POSITION_COUNT * COMPONENTS,
        }
    }

    /// Slots written for vertex `vertex`
    #[inline]
    pub fn slots(&self, vertex: usize) -> &[usize] {
        &self.slots[vertex]
    }

    /// Buffer length (in floats) the table was validated against
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    /// Write the 4 directions into their slots and mark the buffer dirty once
    ///
    /// Only the mapped coordinates change; the rest of the buffer is left as is.
    pub fn apply<B: PositionBuffer + ?Sized>(
        &self,
        directions: &[Vec3; TETRA_VERTEX_COUNT],
        buffer: &mut B,
    ) {
        let positions = buffer.positions_mut();
        debug_assert_eq!(
            positions.len(),
            self.buffer_len,
            "position buffer layout changed after the updater was built"
        );

        for (direction, slots) in directions.iter().zip(self.slots.iter()) {
            let xyz = direction.to_array();
            for &slot in slots {
                let start = slot * COMPONENTS;
                positions[start..start + COMPONENTS].copy_from_slice(&xyz);
            }
        }

        buffer.mark_positions_dirty();
    }
}

impl Default for TetrahedronGeometryUpdater {
    fn default() -> Self {
        Self::for_tetrahedron()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer that counts dirty signals
    struct CountingBuffer {
        data: Vec<f32>,
        dirty_calls: usize,
    }

    impl PositionBuffer for CountingBuffer {
        fn positions_mut(&mut self) -> &mut [f32] {
            &mut self.data
        }

        fn mark_positions_dirty(&mut self) {
            self.dirty_calls += 1;
        }
    }

    fn directions() -> [Vec3; 4] {
        [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::new(0.0, 0.6, -0.8),
        ]
    }

    #[test]
    fn test_writes_every_duplicate() {
        let updater = TetrahedronGeometryUpdater::for_tetrahedron();
        let mut geometry = TetraGeometry::new();
        geometry.take_dirty();

        updater.apply(&directions(), &mut geometry);

        let expected = directions();
        for (vertex, slots) in tetra_vertex_slots().iter().enumerate() {
            for &slot in slots {
                assert_eq!(geometry.position(slot), expected[vertex]);
            }
        }
        assert_eq!(geometry.dirty(), DirtyFlags::POSITIONS);
    }

    #[test]
    fn test_leaves_unmapped_values_untouched() {
        // Buffer with 2 spare positions at the end
        let slots: [&[usize]; 4] = [&[0], &[1], &[2], &[3]];
        let updater = TetrahedronGeometryUpdater::new(&slots, 6 * COMPONENTS).unwrap();
        let mut buffer = CountingBuffer {
            data: vec![7.0; 6 * COMPONENTS],
            dirty_calls: 0,
        };

        updater.apply(&directions(), &mut buffer);

        assert_eq!(&buffer.data[12..], &[7.0; 6]);
        assert_eq!(&buffer.data[0..3], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_one_dirty_signal_per_apply() {
        let updater = TetrahedronGeometryUpdater::for_tetrahedron();
        let mut buffer = CountingBuffer {
            data: vec![0.0; 36],
            dirty_calls: 0,
        };

        updater.apply(&directions(), &mut buffer);
        assert_eq!(buffer.dirty_calls, 1);

        let after_first = buffer.data.clone();
        updater.apply(&directions(), &mut buffer);
        assert_eq!(buffer.dirty_calls, 2);
        assert_eq!(buffer.data, after_first);
    }

    #[test]
    fn test_buffer_is_not_reallocated() {
        let updater = TetrahedronGeometryUpdater::for_tetrahedron();
        let mut geometry = TetraGeometry::new();
        let before = geometry.positions().as_ptr();
        updater.apply(&directions(), &mut geometry);
        assert_eq!(geometry.positions().as_ptr(), before);
        assert_eq!(geometry.position_count(), 12);
    }

    #[test]
    fn test_wrong_vertex_count_rejected() {
        let slots: [&[usize]; 3] = [&[0], &[1], &[2]];
        let err = TetrahedronGeometryUpdater::new(&slots, 36).unwrap_err();
        assert_eq!(err, GeometryError::WrongVertexCount { expected: 4, found: 3 });
    }

    #[test]
    fn test_empty_slots_rejected() {
        let slots: [&[usize]; 4] = [&[0], &[], &[2], &[3]];
        let err = TetrahedronGeometryUpdater::new(&slots, 36).unwrap_err();
        assert_eq!(err, GeometryError::EmptySlots { vertex: 1 });
    }

    #[test]
    fn test_out_of_range_rejected() {
        let slots: [&[usize]; 4] = [&[0], &[1], &[2], &[12]];
        let err = TetrahedronGeometryUpdater::new(&slots, 36).unwrap_err();
        assert_eq!(err, GeometryError::SlotOutOfRange { vertex: 3, slot: 12, buffer_len: 36 });
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let slots: [&[usize]; 4] = [&[0, 4], &[1], &[4], &[3]];
        let err = TetrahedronGeometryUpdater::new(&slots, 36).unwrap_err();
        assert_eq!(err, GeometryError::DuplicateSlot { slot: 4 });
    }

    #[test]
    fn test_standard_table_validates() {
        let slots = tetra_vertex_slots();
        let updater = TetrahedronGeometryUpdater::new(&slots, 36).unwrap();
        assert_eq!(updater.slots(0), &[0, 8, 10]);
    }

    #[test]
    fn test_take_dirty_clears() {
        let mut geometry = TetraGeometry::new();
        assert_eq!(geometry.take_dirty(), DirtyFlags::ALL);
        assert_eq!(geometry.dirty(), DirtyFlags::NONE);
        geometry.mark_dirty(DirtyFlags::COLOR);
        assert_eq!(geometry.take_dirty(), DirtyFlags::COLOR);
    }

    #[test]
    fn test_error_display() {
        let err = GeometryError::SlotOutOfRange { vertex: 2, slot: 40, buffer_len: 36 };
        let msg = format!("{}", err);
        assert!(msg.contains("Slot 40"));
        assert!(msg.contains("36"));
    }
}

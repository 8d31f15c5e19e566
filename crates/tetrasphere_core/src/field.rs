//! The collection of tetrahedra on screen

use slotmap::{new_key_type, SlotMap};
use tetrasphere_math::Ray;

use crate::{DriftConfig, ShiftingTetrahedron};

new_key_type! {
    /// Key to a tetrahedron in the field
    pub struct TetraKey;
}

/// Every tetrahedron in the scene plus the one under the pointer
pub struct TetraField {
    tetrahedra: SlotMap<TetraKey, ShiftingTetrahedron>,
    /// Insertion order, used for deterministic iteration
    order: Vec<TetraKey>,
    created: u64,
    hovered: Option<TetraKey>,
    radius: f32,
    drift: DriftConfig,
}

impl TetraField {
    /// Create an empty field
    pub fn new(radius: f32, drift: DriftConfig) -> Self {
        Self {
            tetrahedra: SlotMap::with_key(),
            order: Vec::new(),
            created: 0,
            hovered: None,
            radius,
            drift,
        }
    }

    /// Create a field holding `count` tetrahedra seeded `0..count`
    pub fn with_count(count: usize, radius: f32, drift: DriftConfig) -> Self {
        let mut field = Self::new(radius, drift);
        for _ in 0..count {
            field.add();
        }
        field
    }

    /// Add a tetrahedron seeded with the number of tetrahedra created so far
    pub fn add(&mut self) -> TetraKey {
        let seed = self.created;
        self.created += 1;
        let key = self.tetrahedra.insert(ShiftingTetrahedron::new(seed, self.radius, self.drift));
        self.order.push(key);
        log::info!("Added tetrahedron {} (seed {})", self.order.len(), seed);
        key
    }

    /// Advance every tetrahedron by `dt` seconds
    pub fn frame(&mut self, dt: f32) {
        for (_key, tetra) in &mut self.tetrahedra {
            tetra.frame(dt);
        }
    }

    /// Nearest tetrahedron hit by `ray`
    pub fn pick(&self, ray: &Ray) -> Option<(TetraKey, f32)> {
        self.order
            .iter()
            .filter_map(|&key| {
                let tetra = self.tetrahedra.get(key)?;
                tetra.hit(ray).map(|t| (key, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Make `key` the only highlighted tetrahedron (or none)
    pub fn set_hovered(&mut self, key: Option<TetraKey>) {
        let key = key.filter(|k| self.tetrahedra.contains_key(*k));
        if key == self.hovered {
            return;
        }

        if let Some(previous) = self.hovered.and_then(|k| self.tetrahedra.get_mut(k)) {
            previous.set_highlighted(false);
            log::debug!("Pointer left tetrahedron (seed {})", previous.seed().0);
        }
        if let Some(next) = key.and_then(|k| self.tetrahedra.get_mut(k)) {
            next.set_highlighted(true);
            log::debug!("Pointer entered tetrahedron (seed {})", next.seed().0);
        }
        self.hovered = key;
    }

    /// Pick with `ray` and hover the result; returns the hovered key
    pub fn hover(&mut self, ray: Option<&Ray>) -> Option<TetraKey> {
        let key = ray.and_then(|ray| self.pick(ray)).map(|(key, _)| key);
        self.set_hovered(key);
        key
    }

    #[inline]
    pub fn hovered(&self) -> Option<TetraKey> {
        self.hovered
    }

    pub fn get(&self, key: TetraKey) -> Option<&ShiftingTetrahedron> {
        self.tetrahedra.get(key)
    }

    pub fn get_mut(&mut self, key: TetraKey) -> Option<&mut ShiftingTetrahedron> {
        self.tetrahedra.get_mut(key)
    }

    /// Tetrahedra in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = (TetraKey, &ShiftingTetrahedron)> + '_ {
        self.order
            .iter()
            .filter_map(|&key| self.tetrahedra.get(key).map(|t| (key, t)))
    }

    /// Mutable access to every tetrahedron (arbitrary order)
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TetraKey, &mut ShiftingTetrahedron)> + '_ {
        self.tetrahedra.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tetrahedra.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tetrahedra.is_empty()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

//! A single shifting tetrahedron
//!
//! Owns its seeded generator (shared by its colour and its vertex drift), the
//! drift animator, the CPU geometry and its highlight state. The renderer
//! reads the geometry and material and clears the dirty flags after upload.

use rand::Rng;
use tetrasphere_math::{hsl_to_rgb, Quat, Ray, Vec3, TETRA_FACES, TETRA_VERTEX_COUNT};

use crate::{
    DirtyFlags, DriftConfig, Seed, TetraGeometry, TetrahedronGeometryUpdater,
    VertexDriftAnimator,
};

/// Opacity of a highlighted tetrahedron
pub const HIGHLIGHT_OPACITY: f32 = 1.0;
/// Opacity of a tetrahedron at rest
pub const REST_OPACITY: f32 = 0.6;

/// Base colour of a tetrahedron in HSL (degrees, percent, percent)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl BaseColor {
    /// Draw a saturated, medium-light colour
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hue = rng.gen_range(0..255u32) as f32;
        let saturation = rng.gen_range(90..100u32) as f32;
        let lightness = rng.gen_range(50..75u32) as f32;
        Self { hue, saturation, lightness }
    }

    /// sRGB components in `[0, 1]`
    pub fn rgb(&self) -> [f32; 3] {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }
}

/// A tetrahedron whose vertices drift over a sphere of radius `radius`
pub struct ShiftingTetrahedron {
    seed: Seed,
    radius: f32,
    color: BaseColor,
    animator: VertexDriftAnimator,
    updater: TetrahedronGeometryUpdater,
    geometry: TetraGeometry,
    highlighted: bool,
}

impl ShiftingTetrahedron {
    /// Build a tetrahedron from its seed
    ///
    /// The base colour is drawn first, then the first vertex targets, all from
    /// the same generator.
    pub fn new(seed: impl Into<Seed>, radius: f32, config: DriftConfig) -> Self {
        let seed = seed.into();
        let mut rng = seed.rng();
        let color = BaseColor::random(&mut rng);
        let animator = VertexDriftAnimator::from_rng(rng, config);

        let updater = TetrahedronGeometryUpdater::for_tetrahedron();
        let mut geometry = TetraGeometry::new();
        updater.apply(&animator.directions(), &mut geometry);

        Self {
            seed,
            radius,
            color,
            animator,
            updater,
            geometry,
            highlighted: false,
        }
    }

    /// Advance the drift and write the new directions into the geometry
    pub fn frame(&mut self, dt: f32) {
        self.animator.advance(dt);
        self.updater.apply(&self.animator.directions(), &mut self.geometry);
    }

    /// Highlight or un-highlight; only an actual change marks the material dirty
    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.highlighted != highlighted {
            self.highlighted = highlighted;
            self.geometry.mark_dirty(DirtyFlags::COLOR);
        }
    }

    #[inline]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Surface opacity for the current highlight state
    #[inline]
    pub fn opacity(&self) -> f32 {
        if self.highlighted {
            HIGHLIGHT_OPACITY
        } else {
            REST_OPACITY
        }
    }

    /// Whether the wireframe overlay should be drawn
    #[inline]
    pub fn shows_wireframe(&self) -> bool {
        self.highlighted
    }

    /// Vertex positions in world space
    pub fn world_vertices(&self) -> [Vec3; TETRA_VERTEX_COUNT] {
        self.animator.directions().map(|d| d * self.radius)
    }

    /// Vertex rotations (reference direction to vertex)
    pub fn rotations(&self) -> [Quat; TETRA_VERTEX_COUNT] {
        self.animator.rotations()
    }

    /// Distance along `ray` to the nearest face, from either side
    pub fn hit(&self, ray: &Ray) -> Option<f32> {
        let vertices = self.world_vertices();
        TETRA_FACES
            .iter()
            .filter_map(|[a, b, c]| ray.intersect_triangle(vertices[*a], vertices[*b], vertices[*c]))
            .min_by(|a, b| a.total_cmp(b))
    }

    #[inline]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn color(&self) -> BaseColor {
        self.color
    }

    #[inline]
    pub fn animator(&self) -> &VertexDriftAnimator {
        &self.animator
    }

    #[inline]
    pub fn geometry(&self) -> &TetraGeometry {
        &self.geometry
    }

    /// Mutable geometry, for the renderer to clear dirty flags after upload
    #[inline]
    pub fn geometry_mut(&mut self) -> &mut TetraGeometry {
        &mut self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Easing;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn linear() -> DriftConfig {
        DriftConfig { duration: 1.0, easing: Easing::Linear }
    }

    #[test]
    fn test_color_in_range() {
        for seed in 0..50u64 {
            let tetra = ShiftingTetrahedron::new(seed, 1.0, DriftConfig::default());
            let color = tetra.color();
            assert!((0.0..255.0).contains(&color.hue));
            assert!((90.0..100.0).contains(&color.saturation));
            assert!((50.0..75.0).contains(&color.lightness));
            for channel in color.rgb() {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn test_color_drawn_before_targets() {
        let mut rng = StdRng::seed_from_u64(4);
        let color = BaseColor::random(&mut rng);
        let expected = VertexDriftAnimator::from_rng(rng, linear());

        let tetra = ShiftingTetrahedron::new(4u64, 1.0, linear());
        assert_eq!(tetra.color(), color);
        for i in 0..4 {
            assert_eq!(tetra.animator().drift(i).tween().end(), expected.drift(i).tween().end());
        }
    }

    #[test]
    fn test_frame_updates_geometry() {
        let mut tetra = ShiftingTetrahedron::new(2u64, 1.0, linear());
        tetra.geometry_mut().take_dirty();

        tetra.frame(0.4);

        assert!(tetra.geometry().dirty().contains(DirtyFlags::POSITIONS));
        let directions = tetra.animator().directions();
        assert_eq!(tetra.geometry().position(0), directions[0]);
        assert_eq!(tetra.geometry().position(6), directions[3]);
    }

    #[test]
    fn test_highlight_toggles_color_flag() {
        let mut tetra = ShiftingTetrahedron::new(1u64, 1.0, linear());
        tetra.geometry_mut().take_dirty();

        tetra.set_highlighted(false);
        assert_eq!(tetra.geometry().dirty(), DirtyFlags::NONE);
        assert_eq!(tetra.opacity(), REST_OPACITY);

        tetra.set_highlighted(true);
        assert_eq!(tetra.geometry().dirty(), DirtyFlags::COLOR);
        assert_eq!(tetra.opacity(), HIGHLIGHT_OPACITY);
        assert!(tetra.shows_wireframe());
    }

    #[test]
    fn test_world_vertices_scaled() {
        let mut tetra = ShiftingTetrahedron::new(6u64, 0.5, linear());
        tetra.frame(0.7);
        for vertex in tetra.world_vertices() {
            assert!((vertex.length() - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hit_through_centre() {
        let mut tetra = ShiftingTetrahedron::new(0u64, 1.0, linear());
        // Targets reached: a non-degenerate tetrahedron almost surely
        tetra.frame(1.0);
        let vertices = tetra.world_vertices();
        let centroid = (vertices[0] + vertices[1] + vertices[2]) / 3.0;
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let ray = Ray::new(origin, centroid - origin);
        assert!(tetra.hit(&ray).is_some());
    }

    #[test]
    fn test_miss_far_away() {
        let mut tetra = ShiftingTetrahedron::new(0u64, 1.0, linear());
        tetra.frame(1.0);
        let ray = Ray::new(Vec3::new(10.0, 10.0, 10.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(tetra.hit(&ray).is_none());
    }
}

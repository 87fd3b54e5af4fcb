//! Output buffers shared with the renderer

use glam::Vec3;

use crate::common::{Color4, Transform};

/// Parallel position/size/color arrays consumed by a point-sprite renderer
///
/// Capacity is the length of the position array, which mirrors the vertex
/// count of the mesh the renderer draws. The size and color arrays are
/// optional: an empty array means the renderer falls back to defaults.
/// Only the first [`OutputTarget::live_count`] entries are meaningful.
#[derive(Debug, Clone, Default)]
pub struct OutputTarget {
    pub positions: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub colors: Vec<Color4>,
    live_count: usize,
    base_size: f32,
    world_transform: Transform,
}

impl OutputTarget {
    /// Target with room for `capacity` particles and no size/color arrays
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; capacity],
            base_size: 1.0,
            ..Default::default()
        }
    }

    /// Add a per-particle size array
    pub fn with_sizes(mut self) -> Self {
        self.sizes = vec![1.0; self.positions.len()];
        self
    }

    /// Add a per-particle color array
    pub fn with_colors(mut self) -> Self {
        self.colors = vec![Color4::WHITE; self.positions.len()];
        self
    }

    pub fn with_world_transform(mut self, transform: Transform) -> Self {
        self.world_transform = transform;
        self
    }

    /// Maximum number of particles the target can show
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn world_transform(&self) -> &Transform {
        &self.world_transform
    }

    pub fn set_world_transform(&mut self, transform: Transform) {
        self.world_transform = transform;
    }

    /// Change capacity, as when the backing mesh is rebuilt
    ///
    /// Optional arrays keep their presence: a present array is resized to
    /// match, an absent one stays absent.
    pub fn resize(&mut self, capacity: usize) {
        self.positions.resize(capacity, Vec3::ZERO);
        if !self.sizes.is_empty() {
            self.sizes.resize(capacity, 1.0);
        }
        if !self.colors.is_empty() {
            self.colors.resize(capacity, Color4::WHITE);
        }
        self.live_count = self.live_count.min(capacity);
    }

    pub(crate) fn publish(&mut self, live_count: usize, base_size: f32) {
        self.live_count = live_count.min(self.capacity());
        self.base_size = base_size;
    }

    /// Positions of live particles
    pub fn live_positions(&self) -> &[Vec3] {
        &self.positions[..self.live_count]
    }

    /// Axis-aligned bounds of live particles, `None` when nothing is live
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.live_positions().iter();
        let first = *positions.next()?;
        Some(positions.fold((first, first), |(min, max), &p| (min.min(p), max.max(p))))
    }

    /// Midpoint of [`OutputTarget::bounds`]
    pub fn center(&self) -> Option<Vec3> {
        self.bounds().map(|(min, max)| (min + max) * 0.5)
    }

    /// Drawn sprite extent for the particle in `slot`
    pub fn sprite_size(&self, slot: usize) -> f32 {
        let scale = self.sizes.get(slot).copied().unwrap_or(1.0);
        scale * self.base_size * self.world_transform.scale
    }
}

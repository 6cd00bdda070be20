// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual object storage.
//!
//! A *visual object* is one renderable surface: a slide icon or a navigation
//! arrow. Objects are created once during initialization and live for the
//! carousel's lifetime — resize repositions them, it never recreates them —
//! so handles are plain indices with no generation counter.
//!
//! Properties are stored struct-of-arrays. Mutations mark dirty channels
//! (see [`dirty`](crate::dirty)); [`VisualStore::evaluate_into`] drains the
//! channels into [`SceneChanges`] index lists that presenters consume to
//! apply incremental updates to their native scene.
//!
//! The `base_*` fields are *anchors*, not visual properties: the idle
//! animation and tweens write positions relative to them every frame, so
//! changing an anchor is not itself a visible change and marks nothing.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::color::Tint;
use crate::dirty;

/// A handle to a visual object in a [`VisualStore`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VisualId(pub(crate) u32);

impl VisualId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// An opaque reference to a decoded texture.
///
/// Textures are created and owned by the backend's asset loader; the store
/// only carries the binding. An object with `None` content renders as an
/// untextured tinted surface (the degraded mode for failed loads).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

impl core::fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}

/// Navigation direction for arrow controls.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NavDir {
    /// Steps to the previous slide.
    Previous,
    /// Steps to the next slide.
    Next,
}

impl NavDir {
    /// Index delta: `-1` for previous, `+1` for next.
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }

    /// Horizontal sign: arrows sit at `sign * arrow_offset_x`.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Previous => -1.0,
            Self::Next => 1.0,
        }
    }
}

/// What a visual object represents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum VisualKind {
    /// The icon for slide `slide`.
    Icon {
        /// Slide index this icon belongs to.
        slide: u32,
    },
    /// A navigation arrow.
    Arrow {
        /// Which way this arrow navigates.
        dir: NavDir,
    },
}

/// The set of changes produced by a single [`VisualStore::evaluate_into`]
/// call.
///
/// Each field contains the raw slot indices of objects that changed in the
/// corresponding category since the previous evaluate.
#[derive(Clone, Debug, Default)]
pub struct SceneChanges {
    /// Objects whose position, scale, or rotation changed.
    pub transforms: Vec<u32>,
    /// Objects whose material inputs (tint, opacity, glitch) changed.
    pub materials: Vec<u32>,
    /// Objects whose visibility flag flipped.
    pub visibility: Vec<u32>,
    /// Objects whose texture binding changed.
    pub content: Vec<u32>,
}

impl SceneChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.materials.clear();
        self.visibility.clear();
        self.content.clear();
    }

    /// Returns `true` when no object changed in any category.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.materials.is_empty()
            && self.visibility.is_empty()
            && self.content.is_empty()
    }
}

/// Struct-of-arrays storage for all visual objects.
#[derive(Debug)]
pub struct VisualStore {
    kind: Vec<VisualKind>,

    // -- Transform --
    position: Vec<[f32; 3]>,
    scale: Vec<[f32; 3]>,
    /// `(rot_x, rot_y)` in radians.
    rotation: Vec<[f32; 2]>,

    // -- Material --
    tint: Vec<Tint>,
    opacity: Vec<f32>,
    glitch: Vec<f32>,

    // -- Content & visibility --
    content: Vec<Option<SurfaceId>>,
    visible: Vec<bool>,

    // -- Animation anchors (not visual properties) --
    base_y: Vec<f32>,
    base_x: Vec<f32>,
    base_scale: Vec<f32>,

    dirty: DirtyTracker<u32>,
}

impl Default for VisualStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: Vec::new(),
            position: Vec::new(),
            scale: Vec::new(),
            rotation: Vec::new(),
            tint: Vec::new(),
            opacity: Vec::new(),
            glitch: Vec::new(),
            content: Vec::new(),
            visible: Vec::new(),
            base_y: Vec::new(),
            base_x: Vec::new(),
            base_scale: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    fn push(&mut self, kind: VisualKind, tint: Tint, opacity: f32, visible: bool) -> VisualId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a carousel holds a handful of objects; u32 is ample"
        )]
        let idx = self.kind.len() as u32;
        self.kind.push(kind);
        self.position.push([0.0; 3]);
        self.scale.push([1.0; 3]);
        self.rotation.push([0.0; 2]);
        self.tint.push(tint);
        self.opacity.push(opacity);
        self.glitch.push(0.0);
        self.content.push(None);
        self.visible.push(visible);
        self.base_y.push(0.0);
        self.base_x.push(0.0);
        self.base_scale.push(1.0);

        self.dirty.mark(idx, dirty::TRANSFORM);
        self.dirty.mark(idx, dirty::MATERIAL);
        self.dirty.mark(idx, dirty::VISIBILITY);
        VisualId(idx)
    }

    /// Creates the icon object for a slide. Icons start hidden and fully
    /// transparent; the first activation reveals them.
    pub fn add_icon(&mut self, slide: u32, tint: Tint, content: Option<SurfaceId>) -> VisualId {
        let id = self.push(VisualKind::Icon { slide }, tint, 0.0, false);
        if content.is_some() {
            self.set_content(id, content);
        }
        id
    }

    /// Creates a navigation arrow. Arrows are always visible and idle at
    /// half opacity.
    pub fn add_arrow(&mut self, dir: NavDir, tint: Tint) -> VisualId {
        self.push(VisualKind::Arrow { dir }, tint, 0.5, true)
    }

    /// Number of objects in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kind.len()
    }

    /// Returns `true` if the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    // -- Property reads ----------------------------------------------------

    /// What this object represents.
    #[must_use]
    pub fn kind(&self, id: VisualId) -> VisualKind {
        self.kind[id.0 as usize]
    }

    /// World position.
    #[must_use]
    pub fn position(&self, id: VisualId) -> [f32; 3] {
        self.position[id.0 as usize]
    }

    /// Scale.
    #[must_use]
    pub fn scale(&self, id: VisualId) -> [f32; 3] {
        self.scale[id.0 as usize]
    }

    /// Rotation `(rot_x, rot_y)` in radians.
    #[must_use]
    pub fn rotation(&self, id: VisualId) -> [f32; 2] {
        self.rotation[id.0 as usize]
    }

    /// Material tint.
    #[must_use]
    pub fn tint(&self, id: VisualId) -> Tint {
        self.tint[id.0 as usize]
    }

    /// Material opacity.
    #[must_use]
    pub fn opacity(&self, id: VisualId) -> f32 {
        self.opacity[id.0 as usize]
    }

    /// Material glitch strength.
    #[must_use]
    pub fn glitch(&self, id: VisualId) -> f32 {
        self.glitch[id.0 as usize]
    }

    /// Texture binding, if any.
    #[must_use]
    pub fn content(&self, id: VisualId) -> Option<SurfaceId> {
        self.content[id.0 as usize]
    }

    /// Visibility flag.
    #[must_use]
    pub fn visible(&self, id: VisualId) -> bool {
        self.visible[id.0 as usize]
    }

    /// Vertical bob anchor.
    #[must_use]
    pub fn base_y(&self, id: VisualId) -> f32 {
        self.base_y[id.0 as usize]
    }

    /// Horizontal breathing anchor (arrows).
    #[must_use]
    pub fn base_x(&self, id: VisualId) -> f32 {
        self.base_x[id.0 as usize]
    }

    /// Resting scale the hover feedback relaxes toward (arrows).
    #[must_use]
    pub fn base_scale(&self, id: VisualId) -> f32 {
        self.base_scale[id.0 as usize]
    }

    // -- Raw-index reads for presenters ------------------------------------

    /// Like [`kind`](Self::kind), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn kind_at(&self, idx: u32) -> VisualKind {
        self.kind[idx as usize]
    }

    /// Like [`position`](Self::position), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn position_at(&self, idx: u32) -> [f32; 3] {
        self.position[idx as usize]
    }

    /// Like [`scale`](Self::scale), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn scale_at(&self, idx: u32) -> [f32; 3] {
        self.scale[idx as usize]
    }

    /// Like [`rotation`](Self::rotation), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn rotation_at(&self, idx: u32) -> [f32; 2] {
        self.rotation[idx as usize]
    }

    /// Like [`tint`](Self::tint), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn tint_at(&self, idx: u32) -> Tint {
        self.tint[idx as usize]
    }

    /// Like [`opacity`](Self::opacity), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn opacity_at(&self, idx: u32) -> f32 {
        self.opacity[idx as usize]
    }

    /// Like [`glitch`](Self::glitch), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn glitch_at(&self, idx: u32) -> f32 {
        self.glitch[idx as usize]
    }

    /// Like [`content`](Self::content), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn content_at(&self, idx: u32) -> Option<SurfaceId> {
        self.content[idx as usize]
    }

    /// Like [`visible`](Self::visible), indexed by a [`SceneChanges`] slot.
    #[must_use]
    pub fn visible_at(&self, idx: u32) -> bool {
        self.visible[idx as usize]
    }

    // -- Property writes ---------------------------------------------------

    /// Sets the world position.
    pub fn set_position(&mut self, id: VisualId, position: [f32; 3]) {
        self.position[id.0 as usize] = position;
        self.dirty.mark(id.0, dirty::TRANSFORM);
    }

    /// Sets only the vertical position component.
    pub fn set_position_y(&mut self, id: VisualId, y: f32) {
        self.position[id.0 as usize][1] = y;
        self.dirty.mark(id.0, dirty::TRANSFORM);
    }

    /// Sets a non-uniform scale.
    pub fn set_scale(&mut self, id: VisualId, scale: [f32; 3]) {
        self.scale[id.0 as usize] = scale;
        self.dirty.mark(id.0, dirty::TRANSFORM);
    }

    /// Sets x and y scale, leaving z untouched (the flattened reveal).
    pub fn set_scale_xy(&mut self, id: VisualId, s: f32) {
        let slot = &mut self.scale[id.0 as usize];
        slot[0] = s;
        slot[1] = s;
        self.dirty.mark(id.0, dirty::TRANSFORM);
    }

    /// Sets a uniform scale on all three axes.
    pub fn set_scale_xyz(&mut self, id: VisualId, s: f32) {
        self.scale[id.0 as usize] = [s, s, s];
        self.dirty.mark(id.0, dirty::TRANSFORM);
    }

    /// Sets the rotation `(rot_x, rot_y)` in radians.
    pub fn set_rotation(&mut self, id: VisualId, rot_x: f32, rot_y: f32) {
        self.rotation[id.0 as usize] = [rot_x, rot_y];
        self.dirty.mark(id.0, dirty::TRANSFORM);
    }

    /// Sets the material tint.
    pub fn set_tint(&mut self, id: VisualId, tint: Tint) {
        self.tint[id.0 as usize] = tint;
        self.dirty.mark(id.0, dirty::MATERIAL);
    }

    /// Sets the material opacity.
    pub fn set_opacity(&mut self, id: VisualId, opacity: f32) {
        self.opacity[id.0 as usize] = opacity;
        self.dirty.mark(id.0, dirty::MATERIAL);
    }

    /// Sets the material glitch strength.
    pub fn set_glitch(&mut self, id: VisualId, glitch: f32) {
        self.glitch[id.0 as usize] = glitch;
        self.dirty.mark(id.0, dirty::MATERIAL);
    }

    /// Sets the texture binding.
    pub fn set_content(&mut self, id: VisualId, content: Option<SurfaceId>) {
        self.content[id.0 as usize] = content;
        self.dirty.mark(id.0, dirty::CONTENT);
    }

    /// Sets the visibility flag. Marks the VISIBILITY channel only when the
    /// flag actually flips.
    pub fn set_visible(&mut self, id: VisualId, visible: bool) {
        let slot = &mut self.visible[id.0 as usize];
        if *slot != visible {
            *slot = visible;
            self.dirty.mark(id.0, dirty::VISIBILITY);
        }
    }

    /// Sets the vertical bob anchor. Anchors feed future position writes and
    /// are not themselves visible changes.
    pub fn set_base_y(&mut self, id: VisualId, y: f32) {
        self.base_y[id.0 as usize] = y;
    }

    /// Sets the horizontal breathing anchor.
    pub fn set_base_x(&mut self, id: VisualId, x: f32) {
        self.base_x[id.0 as usize] = x;
    }

    /// Sets the resting arrow scale.
    pub fn set_base_scale(&mut self, id: VisualId, s: f32) {
        self.base_scale[id.0 as usize] = s;
    }

    // -- Evaluation --------------------------------------------------------

    /// Drains all dirty channels into `changes`, clearing it first.
    ///
    /// Drain order within each channel is deterministic, so identical
    /// mutation sequences always produce identical change lists.
    pub fn evaluate_into(&mut self, changes: &mut SceneChanges) {
        changes.clear();
        changes.transforms = self
            .dirty
            .drain(dirty::TRANSFORM)
            .deterministic()
            .run()
            .collect();
        changes.materials = self
            .dirty
            .drain(dirty::MATERIAL)
            .deterministic()
            .run()
            .collect();
        changes.visibility = self
            .dirty
            .drain(dirty::VISIBILITY)
            .deterministic()
            .run()
            .collect();
        changes.content = self
            .dirty
            .drain(dirty::CONTENT)
            .deterministic()
            .run()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_icon() -> (VisualStore, VisualId) {
        let mut store = VisualStore::new();
        let id = store.add_icon(0, Tint::new(1.0, 0.5, 0.0), None);
        (store, id)
    }

    #[test]
    fn creation_marks_all_channels() {
        let (mut store, id) = store_with_icon();
        let mut changes = SceneChanges::default();
        store.evaluate_into(&mut changes);
        assert!(changes.transforms.contains(&id.index()));
        assert!(changes.materials.contains(&id.index()));
        assert!(changes.visibility.contains(&id.index()));
    }

    #[test]
    fn no_mutation_yields_empty_changes() {
        let (mut store, _) = store_with_icon();
        let mut changes = SceneChanges::default();
        store.evaluate_into(&mut changes);
        store.evaluate_into(&mut changes);
        assert!(changes.is_empty(), "second evaluate must be empty");
    }

    #[test]
    fn channels_are_independent() {
        let (mut store, id) = store_with_icon();
        let mut changes = SceneChanges::default();
        store.evaluate_into(&mut changes);

        store.set_glitch(id, 3.0);
        store.evaluate_into(&mut changes);
        assert_eq!(changes.materials, [id.index()]);
        assert!(changes.transforms.is_empty());
        assert!(changes.visibility.is_empty());
        assert!(changes.content.is_empty());
    }

    #[test]
    fn redundant_visibility_write_marks_nothing() {
        let (mut store, id) = store_with_icon();
        let mut changes = SceneChanges::default();
        store.evaluate_into(&mut changes);

        store.set_visible(id, false); // already hidden
        store.evaluate_into(&mut changes);
        assert!(changes.visibility.is_empty());

        store.set_visible(id, true);
        store.set_visible(id, true);
        store.evaluate_into(&mut changes);
        assert_eq!(changes.visibility, [id.index()], "flip marks exactly once");
    }

    #[test]
    fn anchors_are_not_visible_changes() {
        let (mut store, id) = store_with_icon();
        let mut changes = SceneChanges::default();
        store.evaluate_into(&mut changes);

        store.set_base_y(id, 1.3);
        store.set_base_scale(id, 0.65);
        store.evaluate_into(&mut changes);
        assert!(changes.is_empty());
        assert_eq!(store.base_y(id), 1.3);
    }

    #[test]
    fn scale_xy_preserves_z() {
        let (mut store, id) = store_with_icon();
        store.set_scale(id, [2.0, 2.0, 2.0]);
        store.set_scale_xy(id, 0.2);
        assert_eq!(store.scale(id), [0.2, 0.2, 2.0]);
    }

    #[test]
    fn arrow_defaults() {
        let mut store = VisualStore::new();
        let id = store.add_arrow(NavDir::Next, Tint::new(0.0, 0.8, 1.0));
        assert!(store.visible(id));
        assert_eq!(store.opacity(id), 0.5);
        assert_eq!(store.kind(id), VisualKind::Arrow { dir: NavDir::Next });
    }

    #[test]
    fn nav_dir_arithmetic() {
        assert_eq!(NavDir::Previous.delta(), -1);
        assert_eq!(NavDir::Next.delta(), 1);
        assert_eq!(NavDir::Previous.sign(), -1.0);
    }
}

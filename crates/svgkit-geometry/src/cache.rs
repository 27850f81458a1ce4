//! Per-tree geometry cache.
//!
//! Path length measurement is linear in path complexity, so it runs once per
//! element when the cache is built and never per frame. Entries are keyed by
//! element address, and the cache borrows the tree it was built from: a new
//! tree needs a new cache.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use svgkit_path::PathCommand;
use svgkit_scene::{AnimateTarget, SvgDocument, SvgElement};
use tracing::{debug, trace};

use crate::measure::PathMeasure;
use crate::outline::Outline;

/// Reference compared and hashed by address.
#[derive(Debug)]
pub struct ByAddress<'t, T: ?Sized>(pub &'t T);

impl<T: ?Sized> Clone for ByAddress<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ByAddress<'_, T> {}

impl<T: ?Sized> PartialEq for ByAddress<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl<T: ?Sized> Eq for ByAddress<'_, T> {}

impl<T: ?Sized> Hash for ByAddress<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.0, state)
    }
}

/// Drawable geometry of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawGeometry {
    pub outline: Outline,
    pub measure: PathMeasure,
}

impl DrawGeometry {
    pub fn new(outline: Outline) -> Self {
        let measure = PathMeasure::from_commands(&outline.to_commands());
        Self { outline, measure }
    }

    pub fn from_element(element: &SvgElement) -> Option<Self> {
        Outline::from_element(element).map(Self::new)
    }

    /// Total path length.
    pub fn length(&self) -> f32 {
        self.measure.length()
    }
}

/// Geometry of every shape in one scene tree.
#[derive(Debug)]
pub struct GeometryCache<'t> {
    root: &'t SvgElement,
    elements: HashMap<ByAddress<'t, SvgElement>, DrawGeometry>,
    motion: HashMap<ByAddress<'t, [PathCommand]>, PathMeasure>,
}

impl<'t> GeometryCache<'t> {
    /// Measure every shape and motion path under `root`.
    pub fn build(root: &'t SvgElement) -> Self {
        let mut cache = Self {
            root,
            elements: HashMap::new(),
            motion: HashMap::new(),
        };
        root.walk(&mut |element| {
            if let Some(geometry) = DrawGeometry::from_element(element) {
                trace!(tag = element.tag_name(), length = geometry.length(), "Measured");
                cache.elements.insert(ByAddress(element), geometry);
            }
            for animation in element.animations() {
                if let AnimateTarget::Motion { path, .. } = &animation.target {
                    cache
                        .motion
                        .entry(ByAddress(path.as_slice()))
                        .or_insert_with(|| PathMeasure::from_commands(path));
                }
            }
        });
        debug!(
            shapes = cache.elements.len(),
            motion_paths = cache.motion.len(),
            "Built geometry cache"
        );
        cache
    }

    pub fn from_document(document: &'t SvgDocument) -> Self {
        Self::build(&document.root)
    }

    /// Cached geometry of an element of this tree.
    pub fn geometry(&self, element: &'t SvgElement) -> Option<&DrawGeometry> {
        self.elements.get(&ByAddress(element))
    }

    /// Cached geometry, measuring elements the build pass did not see.
    pub fn get_or_insert(&mut self, element: &'t SvgElement) -> Option<&DrawGeometry> {
        let key = ByAddress(element);
        if !self.elements.contains_key(&key) {
            let geometry = DrawGeometry::from_element(element)?;
            self.elements.insert(key, geometry);
        }
        self.elements.get(&key)
    }

    /// Total path length of an element, 0 for elements without an outline.
    pub fn length(&self, element: &'t SvgElement) -> f32 {
        self.geometry(element).map_or(0.0, DrawGeometry::length)
    }

    /// Measure of a motion path stored in this tree.
    pub fn motion_measure(&self, path: &'t [PathCommand]) -> Option<&PathMeasure> {
        self.motion.get(&ByAddress(path))
    }

    /// Whether this cache was built for the tree at `root`.
    pub fn is_built_for(&self, root: &SvgElement) -> bool {
        std::ptr::eq(self.root, root)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

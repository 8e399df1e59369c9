//! # Map: Sparse Hex Storage with World Space Conversion
//!
//! `Map<T>` stores one value per axial coordinate and never fabricates a value on
//! a lookup miss. `Layout` converts between hexes and 2D world space for a
//! pointy-top grid whose odd rows are shifted right, which is the same shape the
//! odd-r `Offset` raster describes.
//!
//! ## Example
//!
//! ```rust
//! use axial::{Convert, Hex, Layout, Map};
//! use glam::Vec2;
//!
//! let mut map: Map<u8> = Map::new();
//! map.try_insert(Hex::new(1, 2), 42).unwrap();
//! assert_eq!(map.get(Hex::new(1, 2)), Some(&42));
//! assert!(map.try_insert(Hex::new(1, 2), 7).is_err());
//!
//! let layout = Layout::new(1.0);
//! let world: Vec2 = layout.convert(Hex::new(1, 2));
//! let back: Hex = layout.convert(world);
//! assert_eq!(back, Hex::new(1, 2));
//! ```

use std::collections::{btree_map, BTreeMap};

use derive_more::*;
use glam::Vec2;
use thiserror::Error;

use crate::hex::{self, Hex};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Affine transformation matrix for pointy-top hex orientation
/// Format: (forward matrix, inverse matrix) for Hex ↔ Vec2 conversions
const ORIENTATION: ([f64; 4], [f64; 4]) = (
    [SQRT_3, SQRT_3/2., 0., 3./2.],
    [SQRT_3/3., -1./3., 0., 2./3.],
);

/// Trait for bidirectional coordinate conversion
pub trait Convert<T,U> {
    /// Convert from type T to type U
    fn convert(&self, it: T) -> U;
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("hex {0:?} is already occupied")]
pub struct Occupied(pub Hex);

/// Sparse hex storage, ordered by coordinate so iteration is deterministic.
#[derive(Clone, Debug, IntoIterator)]
pub struct Map<T> {
    #[into_iterator(owned, ref)]
    tree: BTreeMap<Hex, T>,
}

impl<T> Default for Map<T> {
    fn default() -> Self {
        Self { tree: BTreeMap::new() }
    }
}

impl<T> Map<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `obj` unless something is already stored at `hex`.
    pub fn try_insert(&mut self, hex: Hex, obj: T) -> Result<&mut T, Occupied> {
        match self.tree.entry(hex) {
            btree_map::Entry::Occupied(_) => Err(Occupied(hex)),
            btree_map::Entry::Vacant(slot) => Ok(slot.insert(obj)),
        }
    }

    pub fn get(&self, hex: Hex) -> Option<&T> {
        self.tree.get(&hex)
    }

    pub fn get_mut(&mut self, hex: Hex) -> Option<&mut T> {
        self.tree.get_mut(&hex)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.tree.contains_key(&hex)
    }

    pub fn remove(&mut self, hex: Hex) -> Option<T> {
        self.tree.remove(&hex)
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Hex, T> {
        self.tree.iter()
    }

    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, Hex, T> {
        self.tree.values_mut()
    }

    /// Dense `width * height` raster indexed by `offset.y * width + offset.x`.
    /// Hexes whose offset falls outside the rectangle are dropped.
    pub fn rasterize<U>(&self, width: u32, height: u32, f: impl Fn(&T) -> U) -> Vec<Option<U>> {
        let (w, h) = (width as i64, height as i64);
        let mut raster: Vec<Option<U>> = (0..w * h).map(|_| None).collect();
        for (hex, obj) in &self.tree {
            let offset = hex.to_offset();
            let (x, y) = (offset.x as i64, offset.y as i64);
            if x < 0 || x >= w || y < 0 || y >= h { continue; }
            raster[(y * w + x) as usize] = Some(f(obj));
        }
        raster
    }
}

/// Pointy-top layout; `size` is the centre-to-corner radius of one hex in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    size: f32,
}

impl Layout {
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> f32 { self.size }

    /// Six corners of a hex followed by its centre.
    pub fn vertices(&self, hex: Hex) -> [Vec2; 7] {
        let center: Vec2 = self.convert(hex);
        let w = (self.size as f64 * SQRT_3 / 2.) as f32;
        let h = self.size / 2.;
        [
            center + Vec2::new(0., -self.size),
            center + Vec2::new(w, -h),
            center + Vec2::new(w, h),
            center + Vec2::new(0., self.size),
            center + Vec2::new(-w, h),
            center + Vec2::new(-w, -h),
            center,
        ]
    }
}

impl Convert<Vec2,Hex> for Layout {
    fn convert(&self, other: Vec2) -> Hex {
        let q = (ORIENTATION.1[0] * other.x as f64 + ORIENTATION.1[1] * other.y as f64) / self.size as f64;
        let r = (ORIENTATION.1[2] * other.x as f64 + ORIENTATION.1[3] * other.y as f64) / self.size as f64;
        hex::round(q, r)
    }
}

impl Convert<Hex,Vec2> for Layout {
    fn convert(&self, other: Hex) -> Vec2 {
        let x = (ORIENTATION.0[0] * other.q as f64 + ORIENTATION.0[1] * other.r as f64) * self.size as f64;
        let y = (ORIENTATION.0[2] * other.q as f64 + ORIENTATION.0[3] * other.r as f64) * self.size as f64;
        Vec2 { x: x as f32, y: y as f32 }
    }
}

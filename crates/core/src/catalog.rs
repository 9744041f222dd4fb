//! Shape catalog - the fixed set of shape/color pairs pieces are drawn from
//!
//! Catalog entries are immutable. Rotation only ever touches the copy held by
//! the active piece.

use crate::rng::SimpleRng;
use crate::shape::Shape;
use crate::types::{PieceKind, Rgb};

/// A catalog entry: one shape paired with its render color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Rgb,
}

/// Canonical spawn orientation for a piece kind
pub fn canonical_rows(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::T => &[&[1, 1, 1], &[0, 1, 0]],
        PieceKind::O => &[&[1, 1], &[1, 1]],
        PieceKind::S => &[&[1, 1, 0], &[0, 1, 1]],
        PieceKind::Z => &[&[0, 1, 1], &[1, 1, 0]],
        PieceKind::L => &[&[1, 0, 0], &[1, 1, 1]],
        PieceKind::J => &[&[0, 0, 1], &[1, 1, 1]],
        PieceKind::I => &[&[1, 1, 1, 1]],
    }
}

/// Render color for a piece kind
pub fn canonical_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::T => Rgb::new(0xff, 0x63, 0x47),
        PieceKind::O => Rgb::new(0xf3, 0x9c, 0x12),
        PieceKind::S => Rgb::new(0x2e, 0xcc, 0x71),
        PieceKind::Z => Rgb::new(0xe7, 0x4c, 0x3c),
        PieceKind::L => Rgb::new(0x34, 0x98, 0xdb),
        PieceKind::J => Rgb::new(0x9b, 0x59, 0xb6),
        PieceKind::I => Rgb::new(0x1a, 0xbc, 0x9c),
    }
}

impl CatalogEntry {
    /// Catalog entry for a kind in its canonical orientation
    pub fn canonical(kind: PieceKind) -> Self {
        let shape = Shape::from_rows(canonical_rows(kind))
            .unwrap_or_else(|| unreachable!("canonical shape for {:?} is well-formed", kind));
        Self {
            kind,
            shape,
            color: canonical_color(kind),
        }
    }
}

/// Non-empty, immutable set of catalog entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    entries: Vec<CatalogEntry>,
}

impl ShapeCatalog {
    /// All seven canonical pieces
    pub fn standard() -> Self {
        Self {
            entries: PieceKind::ALL.iter().map(|&k| CatalogEntry::canonical(k)).collect(),
        }
    }

    /// A reduced catalog; returns `None` when `kinds` is empty.
    ///
    /// Duplicate kinds are kept, which weights the draw towards them.
    pub fn from_kinds(kinds: &[PieceKind]) -> Option<Self> {
        if kinds.is_empty() {
            return None;
        }
        Some(Self {
            entries: kinds.iter().map(|&k| CatalogEntry::canonical(k)).collect(),
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniformly random entry
    pub fn random_shape(&self, rng: &mut SimpleRng) -> CatalogEntry {
        let idx = rng.next_range(self.entries.len() as u32) as usize;
        self.entries[idx]
    }

    /// Widest and tallest extent of any entry in any orientation
    pub fn max_extent(&self) -> u8 {
        self.entries
            .iter()
            .map(|e| e.shape.width().max(e.shape.height()))
            .max()
            .unwrap_or(0)
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

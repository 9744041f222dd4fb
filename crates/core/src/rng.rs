//! RNG module - deterministic piece generation with optional lookahead
//!
//! Pieces are drawn uniformly at random from the shape catalog. When lookahead
//! is enabled the following piece is drawn at the moment the current one is,
//! so it is always known before the current piece locks.
//!
//! Also provides a simple LCG so a seed fully determines the piece sequence.

use crate::catalog::{CatalogEntry, ShapeCatalog};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0, "next_range requires a non-empty range");
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// Piece generator over a shape catalog
#[derive(Debug, Clone)]
pub struct PieceQueue {
    catalog: ShapeCatalog,
    rng: SimpleRng,
    lookahead: bool,
    /// Pre-drawn next piece (only when lookahead is enabled)
    pending: Option<CatalogEntry>,
}

impl PieceQueue {
    pub fn new(catalog: ShapeCatalog, seed: u32, lookahead: bool) -> Self {
        Self {
            catalog,
            rng: SimpleRng::new(seed),
            lookahead,
            pending: None,
        }
    }

    /// Draw the piece to spawn now.
    ///
    /// With lookahead, the following piece is drawn before returning.
    pub fn draw(&mut self) -> CatalogEntry {
        let current = match self.pending.take() {
            Some(entry) => entry,
            None => self.catalog.random_shape(&mut self.rng),
        };
        if self.lookahead {
            self.pending = Some(self.catalog.random_shape(&mut self.rng));
        }
        current
    }

    /// The next piece, if lookahead is enabled and a piece has been drawn
    pub fn peek(&self) -> Option<&CatalogEntry> {
        self.pending.as_ref()
    }

    /// Forget the pending piece; the RNG stream continues
    pub fn reset(&mut self) {
        self.pending = None;
    }

}

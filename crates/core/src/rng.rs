//! RNG module - seedable random piece source
//!
//! [`ShapeBag`] draws uniformly from a shape catalogue using `ChaCha8Rng`, so a
//! seed fully determines the piece sequence on every platform. The next shape is
//! always staged ahead of time, which is what the preview reads.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::shapes::tetrominoes;
use crate::spawn::{PieceSource, ShapeDescriptor};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct ShapeBag {
    catalogue: Vec<ShapeDescriptor>,
    /// Index of the staged next shape.
    staged: usize,
    rng: ChaCha8Rng,
}

impl ShapeBag {
    /// Bag over the seven tetrominoes.
    pub fn new(seed: u64) -> Self {
        Self::with_catalogue(tetrominoes(), seed)
    }

    /// # Panics
    ///
    /// Panics if `catalogue` is empty.
    pub fn with_catalogue(catalogue: Vec<ShapeDescriptor>, seed: u64) -> Self {
        assert!(!catalogue.is_empty(), "shape catalogue must not be empty");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let staged = rng.gen_range(0..catalogue.len());
        Self {
            catalogue,
            staged,
            rng,
        }
    }

    pub fn catalogue(&self) -> &[ShapeDescriptor] {
        &self.catalogue
    }

    /// Index into the catalogue of the staged shape.
    pub fn staged_index(&self) -> usize {
        self.staged
    }
}

impl Default for ShapeBag {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl PieceSource for ShapeBag {
    fn next_shape(&mut self) -> ShapeDescriptor {
        let shape = self.catalogue[self.staged].clone();
        self.staged = self.rng.gen_range(0..self.catalogue.len());
        shape
    }

    fn peek_shape(&self) -> Option<&ShapeDescriptor> {
        self.catalogue.get(self.staged)
    }
}

//! Random dataset generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ValueRange;
use crate::model::{Dataset, Row};

/// Generate `row_count` rows of uniformly random values in `range`
///
/// Rows are not deduplicated. Equal rows share a primary key, so the store
/// keeps only one of them.
pub fn generate(row_count: usize, range: ValueRange, seed: Option<u64>) -> Dataset {
    match seed {
        Some(seed) => generate_with(&mut StdRng::seed_from_u64(seed), row_count, range),
        None => generate_with(&mut rand::rng(), row_count, range),
    }
}

/// Generate with a caller-supplied RNG
pub fn generate_with<R: Rng>(rng: &mut R, row_count: usize, range: ValueRange) -> Dataset {
    let rows = (0..row_count)
        .map(|_| Row(std::array::from_fn(|_| rng.random_range(range.min..=range.max))))
        .collect();
    Dataset::new(rows)
}

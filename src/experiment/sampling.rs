//! Latin hypercube base designs.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MorrisError, Result};
use crate::types::Sample;

/// Draw a randomized Latin hypercube of `size` points in `[0, 1]^dimension`.
///
/// Each axis is cut into `size` equal strata and every stratum holds exactly
/// one point. Axes are filled one at a time: shuffle the strata, then jitter
/// uniformly inside each.
///
/// # Errors
///
/// `EmptySample` if `size` or `dimension` is zero.
pub fn latin_hypercube<R: Rng + ?Sized>(
    size: usize,
    dimension: usize,
    rng: &mut R,
) -> Result<Sample> {
    if size == 0 || dimension == 0 {
        return Err(MorrisError::EmptySample);
    }

    let width = 1.0 / size as f64;
    let mut strata: Vec<usize> = (0..size).collect();
    let mut design = Sample::zeros(size, dimension);

    for mut column in design.column_iter_mut() {
        strata.shuffle(rng);
        for (value, &stratum) in column.iter_mut().zip(&strata) {
            let jitter: f64 = rng.random();
            *value = (stratum as f64 + jitter) * width;
        }
    }

    Ok(design)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_point_per_stratum() {
        let mut rng = StdRng::seed_from_u64(42);
        let design = latin_hypercube(16, 3, &mut rng).unwrap();
        assert_eq!(design.shape(), (16, 3));

        for column in design.column_iter() {
            let mut strata: Vec<usize> = column.iter().map(|&v| (v * 16.0) as usize).collect();
            strata.sort_unstable();
            assert_eq!(strata, (0..16).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let design = latin_hypercube(50, 4, &mut rng).unwrap();
        assert!(design.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_empty_request() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            latin_hypercube(0, 4, &mut rng),
            Err(MorrisError::EmptySample)
        ));
    }
}

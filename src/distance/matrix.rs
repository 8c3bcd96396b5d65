//! Packed symmetric distance matrix.

use crate::models::Poi;

/// Symmetric distances between `n` locations, zero on the diagonal.
///
/// Only the strict lower triangle is stored: `n·(n−1)/2` entries, row by
/// row. Travel time equals distance.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::Poi;
/// use u_orienteering::distance::DistanceMatrix;
///
/// let pois = vec![
///     Poi::new(0, 0.0, 0.0, 0.0, 0.0),
///     Poi::new(1, 3.0, 4.0, 10.0, 5.0),
///     Poi::new(2, 6.0, 8.0, 20.0, 5.0),
/// ];
/// let dm = DistanceMatrix::from_pois(&pois);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.get(2, 0), dm.get(0, 2));
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    lower: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Euclidean distances between POI coordinates, in POI order.
    pub fn from_pois(pois: &[Poi]) -> Self {
        let mut lower = Vec::with_capacity(pois.len() * pois.len().saturating_sub(1) / 2);
        for (i, a) in pois.iter().enumerate() {
            lower.extend(pois[..i].iter().map(|b| a.distance_to(b)));
        }
        Self {
            lower,
            size: pois.len(),
        }
    }

    fn offset(from: usize, to: usize) -> usize {
        let (hi, lo) = if from > to { (from, to) } else { (to, from) };
        hi * (hi - 1) / 2 + lo
    }

    /// Distance between `from` and `to`, in either direction.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        assert!(
            from < self.size && to < self.size,
            "location ({from}, {to}) outside a matrix of size {}",
            self.size
        );
        if from == to {
            0.0
        } else {
            self.lower[Self::offset(from, to)]
        }
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest distance between any two locations, zero when there are
    /// fewer than two.
    pub fn max_distance(&self) -> f64 {
        self.lower.iter().copied().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pois() -> Vec<Poi> {
        vec![
            Poi::new(0, 0.0, 0.0, 0.0, 0.0),
            Poi::new(1, 3.0, 4.0, 10.0, 5.0),
            Poi::new(2, 0.0, 8.0, 20.0, 5.0),
        ]
    }

    #[test]
    fn test_from_pois() {
        let dm = DistanceMatrix::from_pois(&sample_pois());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(1, 2) - 5.0).abs() < 1e-10);
        assert!((dm.max_distance() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_diagonal_and_symmetry() {
        let dm = DistanceMatrix::from_pois(&sample_pois());
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0.0);
            for j in 0..dm.size() {
                assert_eq!(dm.get(i, j), dm.get(j, i));
            }
        }
    }

    #[test]
    fn test_tiny_matrices() {
        assert_eq!(DistanceMatrix::from_pois(&[]).size(), 0);
        let single = DistanceMatrix::from_pois(&sample_pois()[..1]);
        assert_eq!(single.get(0, 0), 0.0);
        assert_eq!(single.max_distance(), 0.0);
    }

    #[test]
    #[should_panic(expected = "outside a matrix")]
    fn test_out_of_bounds() {
        DistanceMatrix::from_pois(&sample_pois()[..2]).get(0, 2);
    }
}

use thiserror::Error;

use crate::linalg::Vector;

/// Box constraints `lower ≤ x ≤ upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const N: usize> {
    lower: Vector<N>,
    upper: Vector<N>,
}

/// Errors that can occur when constructing [`Bounds`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    #[error("bound {index} is NaN")]
    NotANumber { index: usize },

    #[error("lower bound {lower} exceeds upper bound {upper} at index {index}")]
    Crossed { index: usize, lower: f64, upper: f64 },
}

impl<const N: usize> Bounds<N> {
    /// Creates validated bounds.
    ///
    /// Infinite bounds are allowed and leave that side unconstrained.
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is NaN or if `lower > upper` anywhere.
    pub fn new(lower: Vector<N>, upper: Vector<N>) -> Result<Self, BoundsError> {
        for (index, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(BoundsError::NotANumber { index });
            }
            if lo > hi {
                return Err(BoundsError::Crossed {
                    index,
                    lower: *lo,
                    upper: *hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Returns the lower bounds.
    #[must_use]
    pub fn lower(&self) -> &Vector<N> {
        &self.lower
    }

    /// Returns the upper bounds.
    #[must_use]
    pub fn upper(&self) -> &Vector<N> {
        &self.upper
    }

    /// Projects `x` onto the box.
    #[must_use]
    pub fn project(&self, x: &Vector<N>) -> Vector<N> {
        std::array::from_fn(|i| x[i].clamp(self.lower[i], self.upper[i]))
    }

    /// Returns true if `x` lies inside the box.
    #[must_use]
    pub fn contains(&self, x: &Vector<N>) -> bool {
        x.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_onto_box() {
        let bounds = Bounds::new([0.0, -1.0], [1.0, f64::INFINITY]).unwrap();

        assert_eq!(bounds.project(&[2.0, -3.0]), [1.0, -1.0]);
        assert_eq!(bounds.project(&[0.5, 100.0]), [0.5, 100.0]);
        assert!(bounds.contains(&[0.5, 100.0]));
        assert!(!bounds.contains(&[1.5, 0.0]));
    }

    #[test]
    fn rejects_crossed_bounds() {
        let err = Bounds::new([0.0, 2.0], [1.0, 1.0]).unwrap_err();
        assert!(matches!(err, BoundsError::Crossed { index: 1, .. }));
    }

    #[test]
    fn rejects_nan() {
        let err = Bounds::new([f64::NAN], [1.0]).unwrap_err();
        assert_eq!(err, BoundsError::NotANumber { index: 0 });
    }
}

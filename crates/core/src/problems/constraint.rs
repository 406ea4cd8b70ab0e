use std::{convert::Infallible, fmt};

use crate::{differentiate, linalg::Vector};

type ValueFn<'a, const N: usize> = Box<dyn Fn(&Vector<N>) -> f64 + 'a>;
type GradientFn<'a, const N: usize> = Box<dyn Fn(&Vector<N>) -> Vector<N> + 'a>;

/// A single scalar constraint function with an optional analytic gradient.
///
/// Whether the constraint means `c(x) = 0` or `c(x) ≤ 0` is decided by the
/// [`ConstraintSet`] it is added to.
pub struct Constraint<'a, const N: usize> {
    value: ValueFn<'a, N>,
    gradient: Option<GradientFn<'a, N>>,
}

impl<'a, const N: usize> Constraint<'a, N> {
    /// Creates a constraint whose gradient is approximated numerically.
    pub fn new(value: impl Fn(&Vector<N>) -> f64 + 'a) -> Self {
        Self {
            value: Box::new(value),
            gradient: None,
        }
    }

    /// Creates a constraint with an analytic gradient.
    pub fn with_gradient(
        value: impl Fn(&Vector<N>) -> f64 + 'a,
        gradient: impl Fn(&Vector<N>) -> Vector<N> + 'a,
    ) -> Self {
        Self {
            value: Box::new(value),
            gradient: Some(Box::new(gradient)),
        }
    }

    /// Evaluates the constraint function.
    #[must_use]
    pub fn value(&self, x: &Vector<N>) -> f64 {
        (self.value)(x)
    }

    /// Evaluates the constraint gradient, by central differences if no
    /// analytic gradient was supplied.
    #[must_use]
    pub fn gradient(&self, x: &Vector<N>) -> Vector<N> {
        if let Some(gradient) = &self.gradient {
            return gradient(x);
        }
        let Ok(grad) = differentiate::gradient(|p| Ok::<_, Infallible>(self.value(p)), x);
        grad
    }
}

impl<const N: usize> fmt::Debug for Constraint<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("analytic_gradient", &self.gradient.is_some())
            .finish_non_exhaustive()
    }
}

/// An ordered set of equality constraints `h_i(x) = 0` and inequality
/// constraints `g_i(x) ≤ 0`.
///
/// ```
/// use descent_core::ConstraintSet;
///
/// let constraints = ConstraintSet::new()
///     .equality(|x: &[f64; 2]| x[0] + x[1] - 1.0)
///     .inequality(|x: &[f64; 2]| -x[0]);
///
/// assert_eq!(constraints.equalities().len(), 1);
/// assert_eq!(constraints.max_violation(&[0.5, 0.5]), 0.0);
/// ```
#[derive(Debug, Default)]
pub struct ConstraintSet<'a, const N: usize> {
    equalities: Vec<Constraint<'a, N>>,
    inequalities: Vec<Constraint<'a, N>>,
}

impl<'a, const N: usize> ConstraintSet<'a, N> {
    /// Creates an empty constraint set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            equalities: Vec::new(),
            inequalities: Vec::new(),
        }
    }

    /// Adds an equality constraint `h(x) = 0` with a numerical gradient.
    #[must_use]
    pub fn equality(mut self, h: impl Fn(&Vector<N>) -> f64 + 'a) -> Self {
        self.equalities.push(Constraint::new(h));
        self
    }

    /// Adds an inequality constraint `g(x) ≤ 0` with a numerical gradient.
    #[must_use]
    pub fn inequality(mut self, g: impl Fn(&Vector<N>) -> f64 + 'a) -> Self {
        self.inequalities.push(Constraint::new(g));
        self
    }

    /// Adds a prebuilt equality constraint.
    #[must_use]
    pub fn with_equality(mut self, constraint: Constraint<'a, N>) -> Self {
        self.equalities.push(constraint);
        self
    }

    /// Adds a prebuilt inequality constraint.
    #[must_use]
    pub fn with_inequality(mut self, constraint: Constraint<'a, N>) -> Self {
        self.inequalities.push(constraint);
        self
    }

    /// Returns the equality constraints in insertion order.
    #[must_use]
    pub fn equalities(&self) -> &[Constraint<'a, N>] {
        &self.equalities
    }

    /// Returns the inequality constraints in insertion order.
    #[must_use]
    pub fn inequalities(&self) -> &[Constraint<'a, N>] {
        &self.inequalities
    }

    /// Returns true if the set holds no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equalities.is_empty() && self.inequalities.is_empty()
    }

    /// Returns the largest violation: `max(|h_i(x)|, max(0, g_i(x)))`.
    ///
    /// Returns zero for an empty set.
    #[must_use]
    pub fn max_violation(&self, x: &Vector<N>) -> f64 {
        let eq = self.equalities.iter().map(|h| h.value(x).abs());
        let ineq = self.inequalities.iter().map(|g| g.value(x).max(0.0));
        eq.chain(ineq).fold(0.0, f64::max)
    }

    /// Returns the first inequality that is not strictly satisfied at `x`,
    /// as `(index, g_i(x))`.
    #[must_use]
    pub fn first_not_strictly_feasible(&self, x: &Vector<N>) -> Option<(usize, f64)> {
        self.inequalities
            .iter()
            .map(|g| g.value(x))
            .enumerate()
            .find(|(_, value)| value.is_nan() || *value >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn numeric_and_analytic_gradients_agree() {
        let numeric = Constraint::new(|x: &[f64; 2]| x[0] * x[1]);
        let analytic = Constraint::with_gradient(|x: &[f64; 2]| x[0] * x[1], |x| [x[1], x[0]]);

        let x = [2.0, -3.0];
        let (gn, ga) = (numeric.gradient(&x), analytic.gradient(&x));

        assert_relative_eq!(gn[0], ga[0], epsilon = 1e-6);
        assert_relative_eq!(gn[1], ga[1], epsilon = 1e-6);
    }

    #[test]
    fn max_violation_combines_both_kinds() {
        let constraints = ConstraintSet::new()
            .equality(|x: &[f64; 2]| x[0] - 1.0)
            .inequality(|x: &[f64; 2]| x[1] - 2.0);

        assert_relative_eq!(constraints.max_violation(&[1.0, 0.0]), 0.0);
        assert_relative_eq!(constraints.max_violation(&[0.5, 0.0]), 0.5);
        assert_relative_eq!(constraints.max_violation(&[1.0, 5.0]), 3.0);
    }

    #[test]
    fn detects_boundary_and_infeasible_points() {
        let constraints = ConstraintSet::new()
            .inequality(|x: &[f64; 1]| -x[0])
            .inequality(|x: &[f64; 1]| x[0] - 1.0);

        assert_eq!(constraints.first_not_strictly_feasible(&[0.5]), None);
        assert_eq!(constraints.first_not_strictly_feasible(&[1.0]), Some((1, 0.0)));
        assert_eq!(constraints.first_not_strictly_feasible(&[-2.0]), Some((0, 2.0)));
    }

    #[test]
    fn empty_set_has_no_violation() {
        let constraints: ConstraintSet<'_, 3> = ConstraintSet::new();
        assert!(constraints.is_empty());
        assert_relative_eq!(constraints.max_violation(&[1.0, 2.0, 3.0]), 0.0);
    }
}

//! Unconstrained objectives that fold constraints into the original objective.
//!
//! Each surrogate borrows the caller's objective and constraint set and
//! composes its gradient from `∇f` and the constraint gradients.

use descent_core::{ConstraintSet, Objective, Vector, linalg};

/// Quadratic penalty `f + μΣh² + μΣmax(0, g)²`.
pub(super) struct Penalty<'a, 'c, P, const N: usize> {
    pub(super) problem: &'a P,
    pub(super) constraints: &'a ConstraintSet<'c, N>,
    pub(super) weight: f64,
}

impl<P, const N: usize> Objective<N> for Penalty<'_, '_, P, N>
where
    P: Objective<N>,
{
    type Error = P::Error;

    fn value(&self, x: &Vector<N>) -> Result<f64, Self::Error> {
        let equality: f64 = self
            .constraints
            .equalities()
            .iter()
            .map(|h| h.value(x).powi(2))
            .sum();
        let inequality: f64 = self
            .constraints
            .inequalities()
            .iter()
            .map(|g| g.value(x).max(0.0).powi(2))
            .sum();
        Ok(self.problem.value(x)? + self.weight * (equality + inequality))
    }

    fn gradient(&self, x: &Vector<N>) -> Result<Vector<N>, Self::Error> {
        let mut grad = self.problem.gradient(x)?;
        for h in self.constraints.equalities() {
            grad = linalg::axpy(&grad, 2.0 * self.weight * h.value(x), &h.gradient(x));
        }
        for g in self.constraints.inequalities() {
            let active = g.value(x).max(0.0);
            if active > 0.0 {
                grad = linalg::axpy(&grad, 2.0 * self.weight * active, &g.gradient(x));
            }
        }
        Ok(grad)
    }
}

/// Log barrier `t·f − Σlog(−g)`, infinite outside the strict interior.
pub(super) struct Barrier<'a, 'c, P, const N: usize> {
    pub(super) problem: &'a P,
    pub(super) constraints: &'a ConstraintSet<'c, N>,
    pub(super) t: f64,
}

impl<P, const N: usize> Objective<N> for Barrier<'_, '_, P, N>
where
    P: Objective<N>,
{
    type Error = P::Error;

    fn value(&self, x: &Vector<N>) -> Result<f64, Self::Error> {
        if self.constraints.first_not_strictly_feasible(x).is_some() {
            return Ok(f64::INFINITY);
        }
        let barrier: f64 = self
            .constraints
            .inequalities()
            .iter()
            .map(|g| (-g.value(x)).ln())
            .sum();
        Ok(self.t * self.problem.value(x)? - barrier)
    }

    fn gradient(&self, x: &Vector<N>) -> Result<Vector<N>, Self::Error> {
        let mut grad = linalg::scale(&self.problem.gradient(x)?, self.t);
        for g in self.constraints.inequalities() {
            grad = linalg::axpy(&grad, -1.0 / g.value(x), &g.gradient(x));
        }
        Ok(grad)
    }
}

/// Augmented Lagrangian
/// `f + Σ[λh + ½ρh²] + (1/2ρ)Σ[max(0, μ + ρg)² − μ²]`.
pub(super) struct AugmentedLagrangian<'a, 'c, P, const N: usize> {
    pub(super) problem: &'a P,
    pub(super) constraints: &'a ConstraintSet<'c, N>,
    pub(super) rho: f64,
    pub(super) lambda: &'a [f64],
    pub(super) mu: &'a [f64],
}

impl<P, const N: usize> Objective<N> for AugmentedLagrangian<'_, '_, P, N>
where
    P: Objective<N>,
{
    type Error = P::Error;

    fn value(&self, x: &Vector<N>) -> Result<f64, Self::Error> {
        let rho = self.rho;
        let equality: f64 = self
            .constraints
            .equalities()
            .iter()
            .zip(self.lambda)
            .map(|(h, lambda)| {
                let h = h.value(x);
                lambda * h + 0.5 * rho * h * h
            })
            .sum();
        let inequality: f64 = self
            .constraints
            .inequalities()
            .iter()
            .zip(self.mu)
            .map(|(g, mu)| {
                let shifted = (mu + rho * g.value(x)).max(0.0);
                (shifted * shifted - mu * mu) / (2.0 * rho)
            })
            .sum();
        Ok(self.problem.value(x)? + equality + inequality)
    }

    fn gradient(&self, x: &Vector<N>) -> Result<Vector<N>, Self::Error> {
        let mut grad = self.problem.gradient(x)?;
        for (h, lambda) in self.constraints.equalities().iter().zip(self.lambda) {
            grad = linalg::axpy(&grad, lambda + self.rho * h.value(x), &h.gradient(x));
        }
        for (g, mu) in self.constraints.inequalities().iter().zip(self.mu) {
            let shifted = (mu + self.rho * g.value(x)).max(0.0);
            if shifted > 0.0 {
                grad = linalg::axpy(&grad, shifted, &g.gradient(x));
            }
        }
        Ok(grad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use descent_core::differentiate;

    fn objective(x: &[f64; 2]) -> f64 {
        x[0].powi(2) + 3.0 * x[1].powi(2)
    }

    fn constraints() -> ConstraintSet<'static, 2> {
        ConstraintSet::new()
            .equality(|x: &[f64; 2]| x[0] + x[1] - 1.0)
            .inequality(|x: &[f64; 2]| x[0] - 0.2)
    }

    fn assert_gradient_matches<S: Objective<2>>(surrogate: &S, x: [f64; 2]) {
        let analytic = surrogate.gradient(&x).unwrap();
        let numeric = differentiate::gradient(|p| surrogate.value(p), &x).unwrap();
        assert_relative_eq!(analytic[0], numeric[0], epsilon = 1e-5, max_relative = 1e-6);
        assert_relative_eq!(analytic[1], numeric[1], epsilon = 1e-5, max_relative = 1e-6);
    }

    #[test]
    fn penalty_value_and_gradient() {
        let set = constraints();
        let penalty = Penalty {
            problem: &objective,
            constraints: &set,
            weight: 10.0,
        };

        // f = 3.25; h = 0.5 and g = 0.3 add 10·(0.25 + 0.09).
        assert_relative_eq!(penalty.value(&[0.5, 1.0]).unwrap(), 3.25 + 3.4, epsilon = 1e-12);
        assert_gradient_matches(&penalty, [0.5, 1.0]);
        assert_gradient_matches(&penalty, [0.1, 0.3]);
    }

    #[test]
    fn barrier_is_infinite_outside_interior() {
        let set = ConstraintSet::new().inequality(|x: &[f64; 2]| x[0] - 0.2);
        let barrier = Barrier {
            problem: &objective,
            constraints: &set,
            t: 2.0,
        };

        assert_eq!(barrier.value(&[0.2, 0.0]).unwrap(), f64::INFINITY);
        assert_eq!(barrier.value(&[1.0, 0.0]).unwrap(), f64::INFINITY);
        assert_relative_eq!(barrier.value(&[0.1, 0.0]).unwrap(), 0.02 - 0.1_f64.ln(), epsilon = 1e-12);
        assert_gradient_matches(&barrier, [0.1, -0.4]);
    }

    #[test]
    fn augmented_lagrangian_gradient() {
        let set = constraints();
        let lambda = [0.7];
        let mu = [0.4];
        let lagrangian = AugmentedLagrangian {
            problem: &objective,
            constraints: &set,
            rho: 5.0,
            lambda: &lambda,
            mu: &mu,
        };

        assert_gradient_matches(&lagrangian, [0.5, 1.0]);
        // μ + ρg < 0 here, so the inequality term is constant.
        assert_gradient_matches(&lagrangian, [-0.5, 0.2]);
    }
}

//! Dense vector and matrix primitives.
//!
//! Vectors are `[f64; N]` and matrices are row-major `[[f64; N]; N]`, so the
//! dimension of every operand is checked at compile time.

/// A vector in `N` dimensions.
pub type Vector<const N: usize> = [f64; N];

/// A square row-major matrix in `N` dimensions.
pub type Matrix<const N: usize> = [[f64; N]; N];

/// Pivots with a magnitude below this value are replaced by it.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Returns the dot product `aᵗb`.
#[must_use]
pub fn dot<const N: usize>(a: &Vector<N>, b: &Vector<N>) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Returns the Euclidean norm `‖a‖`.
#[must_use]
pub fn norm<const N: usize>(a: &Vector<N>) -> f64 {
    dot(a, a).sqrt()
}

/// Returns `s·a`.
#[must_use]
pub fn scale<const N: usize>(a: &Vector<N>, s: f64) -> Vector<N> {
    a.map(|v| v * s)
}

/// Returns `a + b`.
#[must_use]
pub fn add<const N: usize>(a: &Vector<N>, b: &Vector<N>) -> Vector<N> {
    std::array::from_fn(|i| a[i] + b[i])
}

/// Returns `a − b`.
#[must_use]
pub fn sub<const N: usize>(a: &Vector<N>, b: &Vector<N>) -> Vector<N> {
    std::array::from_fn(|i| a[i] - b[i])
}

/// Returns `x + α·d`.
#[must_use]
pub fn axpy<const N: usize>(x: &Vector<N>, alpha: f64, d: &Vector<N>) -> Vector<N> {
    std::array::from_fn(|i| x[i] + alpha * d[i])
}

/// Returns the matrix-vector product `Mv`.
#[must_use]
pub fn mat_vec<const N: usize>(m: &Matrix<N>, v: &Vector<N>) -> Vector<N> {
    std::array::from_fn(|i| dot(&m[i], v))
}

/// Returns the quadratic form `vᵗMv`.
#[must_use]
pub fn quadratic_form<const N: usize>(m: &Matrix<N>, v: &Vector<N>) -> f64 {
    dot(v, &mat_vec(m, v))
}

/// Returns the outer product `abᵗ`.
#[must_use]
pub fn outer<const N: usize>(a: &Vector<N>, b: &Vector<N>) -> Matrix<N> {
    std::array::from_fn(|i| std::array::from_fn(|j| a[i] * b[j]))
}

/// Returns the identity matrix.
#[must_use]
pub fn identity<const N: usize>() -> Matrix<N> {
    std::array::from_fn(|i| std::array::from_fn(|j| if i == j { 1.0 } else { 0.0 }))
}

/// Returns `A + s·B`.
#[must_use]
pub fn add_scaled<const N: usize>(a: &Matrix<N>, s: f64, b: &Matrix<N>) -> Matrix<N> {
    std::array::from_fn(|i| axpy(&a[i], s, &b[i]))
}

/// The solution of a dense linear system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSolution<const N: usize> {
    /// The computed solution.
    pub x: Vector<N>,

    /// Number of pivots that were replaced by [`PIVOT_EPSILON`].
    ///
    /// A nonzero count means the matrix is singular or nearly so and `x`
    /// should not be trusted as an exact solve.
    pub regularized: usize,
}

impl<const N: usize> LinearSolution<N> {
    /// Returns true if no pivot had to be regularized.
    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.regularized == 0
    }
}

/// Solves `Ax = b` by Gaussian elimination with partial pivoting.
///
/// Near-zero pivots are replaced by a signed [`PIVOT_EPSILON`] instead of
/// failing; check [`LinearSolution::regularized`] to detect that case.
#[must_use]
pub fn solve_linear<const N: usize>(a: &Matrix<N>, b: &Vector<N>) -> LinearSolution<N> {
    let mut m = *a;
    let mut rhs = *b;
    let mut regularized = 0;

    for col in 0..N {
        let pivot_row = (col..N)
            .max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))
            .unwrap_or(col);
        if pivot_row != col {
            m.swap(col, pivot_row);
            rhs.swap(col, pivot_row);
        }

        if m[col][col].abs() < PIVOT_EPSILON {
            m[col][col] = PIVOT_EPSILON.copysign(m[col][col]);
            regularized += 1;
        }

        let pivot = m[col];
        for row in col + 1..N {
            let factor = m[row][col] / pivot[col];
            for (value, p) in m[row][col..].iter_mut().zip(&pivot[col..]) {
                *value -= factor * p;
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = [0.0; N];
    for row in (0..N).rev() {
        let tail: f64 = (row + 1..N).map(|k| m[row][k] * x[k]).sum();
        x[row] = (rhs[row] - tail) / m[row][row];
    }

    LinearSolution { x, regularized }
}

use ndarray::Array1;

/// A fixed-length vector of `f64` coordinates that can be integrated.
///
/// Runge-Kutta schemes only need two vector operations: scaling by a scalar
/// and accumulating a scaled vector into another one. Implementing this trait
/// lets the solvers work with any state representation that supports them.
///
/// States have value semantics. Solvers clone a state when storing it, so
/// later mutation of a working value never rewrites recorded history.
///
/// Derivatives share the state's type: a derivative is a vector with the same
/// shape, holding the rate of change of each coordinate.
pub trait OdeState: Clone {
    /// Returns the number of coordinates.
    fn dim(&self) -> usize;

    /// Returns an iterator over the coordinates in order.
    fn components(&self) -> impl Iterator<Item = f64> + '_;

    /// Returns a copy with every coordinate multiplied by `factor`.
    #[must_use]
    fn scaled(&self, factor: f64) -> Self;

    /// Adds `factor * other` to `self` in place.
    ///
    /// Both vectors must have the same dimension.
    fn add_scaled(&mut self, factor: f64, other: &Self);

    /// Returns `true` if every coordinate is finite.
    fn is_finite(&self) -> bool {
        self.components().all(f64::is_finite)
    }
}

impl OdeState for f64 {
    fn dim(&self) -> usize {
        1
    }

    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(*self)
    }

    fn scaled(&self, factor: f64) -> Self {
        self * factor
    }

    fn add_scaled(&mut self, factor: f64, other: &Self) {
        *self += factor * other;
    }
}

impl<const N: usize> OdeState for [f64; N] {
    fn dim(&self) -> usize {
        N
    }

    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().copied()
    }

    fn scaled(&self, factor: f64) -> Self {
        self.map(|x| x * factor)
    }

    fn add_scaled(&mut self, factor: f64, other: &Self) {
        for (x, y) in self.iter_mut().zip(other) {
            *x += factor * y;
        }
    }
}

impl OdeState for Vec<f64> {
    fn dim(&self) -> usize {
        self.len()
    }

    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().copied()
    }

    fn scaled(&self, factor: f64) -> Self {
        self.iter().map(|x| x * factor).collect()
    }

    fn add_scaled(&mut self, factor: f64, other: &Self) {
        debug_assert_eq!(self.len(), other.len(), "state dimensions differ");
        for (x, y) in self.iter_mut().zip(other) {
            *x += factor * y;
        }
    }
}

impl OdeState for Array1<f64> {
    fn dim(&self) -> usize {
        self.len()
    }

    fn components(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().copied()
    }

    fn scaled(&self, factor: f64) -> Self {
        self * factor
    }

    fn add_scaled(&mut self, factor: f64, other: &Self) {
        self.scaled_add(factor, other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn scalar_state() {
        let mut y = 1.0_f64;
        y.add_scaled(0.5, &4.0);

        assert_relative_eq!(y, 3.0);
        assert_relative_eq!(y.scaled(2.0), 6.0);
        assert_eq!(y.dim(), 1);
    }

    #[test]
    fn array_state() {
        let mut y: [f64; 3] = [1.0, 2.0, 3.0];
        y.add_scaled(10.0, &[0.1, 0.2, 0.3]);

        assert_eq!(y.dim(), 3);
        assert_relative_eq!(y[0], 2.0);
        assert_relative_eq!(y[1], 4.0);
        assert_relative_eq!(y[2], 6.0);
        assert_relative_eq!(y.scaled(-1.0).components().sum::<f64>(), -12.0);
    }

    #[test]
    fn vec_state_is_copied_not_aliased() {
        let original: Vec<f64> = vec![1.0, -1.0];
        let mut working = original.clone();
        working.add_scaled(1.0, &vec![1.0, 1.0]);

        assert_eq!(original, vec![1.0, -1.0]);
        assert_eq!(working, vec![2.0, 0.0]);
    }

    #[test]
    fn ndarray_state() {
        let mut y: Array1<f64> = array![1.0, 2.0];
        y.add_scaled(-2.0, &array![0.5, 1.0]);

        assert_eq!(y, array![0.0, 0.0]);
        let z: Array1<f64> = array![3.0, 4.0];
        assert_eq!(z.scaled(0.5), array![1.5, 2.0]);
    }

    #[test]
    fn detects_non_finite_coordinates() {
        let finite: Vec<f64> = vec![0.0, 1.0];
        let poisoned: Vec<f64> = vec![0.0, f64::NAN];

        assert!(OdeState::is_finite(&finite));
        assert!(!OdeState::is_finite(&poisoned));
        assert!(!OdeState::is_finite(&[f64::INFINITY]));
        assert!(!OdeState::is_finite(&f64::NEG_INFINITY));
    }
}

//! Cash-Karp embedded Runge-Kutta 4(5) coefficients.
//!
//! Cash, J. R. and Karp, A. H. (1990). "A variable order Runge-Kutta method
//! for initial value problems with rapidly varying right-hand sides."
//! ACM Transactions on Mathematical Software 16(3), 201-222.

/// Number of stages in the Cash-Karp pair.
pub const STAGES: usize = 6;

/// Butcher tableau of an embedded six-stage Runge-Kutta pair.
///
/// Row `i` of `b` holds the weights of the earlier stages used to build the
/// intermediate state for stage `i`; entries at and above the diagonal are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tableau {
    /// Fractional time offsets `a_i` of each stage.
    pub a: [f64; STAGES],

    /// Intermediate-state weights `b_ij` for `j < i`.
    pub b: [[f64; STAGES - 1]; STAGES],

    /// Fifth-order combination weights.
    pub c: [f64; STAGES],

    /// Error weights: fourth-order minus fifth-order combination weights.
    pub d: [f64; STAGES],
}

/// Fourth-order weights of the embedded solution.
const C_STAR: [f64; STAGES] = [
    2825.0 / 27648.0,
    0.0,
    18575.0 / 48384.0,
    13525.0 / 55296.0,
    277.0 / 14336.0,
    1.0 / 4.0,
];

const C: [f64; STAGES] = [
    37.0 / 378.0,
    0.0,
    250.0 / 621.0,
    125.0 / 594.0,
    0.0,
    512.0 / 1771.0,
];

/// The Cash-Karp tableau.
pub const CASH_KARP: Tableau = Tableau {
    a: [0.0, 1.0 / 5.0, 3.0 / 10.0, 3.0 / 5.0, 1.0, 7.0 / 8.0],
    b: [
        [0.0, 0.0, 0.0, 0.0, 0.0],
        [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
        [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
        [3.0 / 10.0, -9.0 / 10.0, 6.0 / 5.0, 0.0, 0.0],
        [-11.0 / 54.0, 5.0 / 2.0, -70.0 / 27.0, 35.0 / 27.0, 0.0],
        [
            1631.0 / 55296.0,
            175.0 / 512.0,
            575.0 / 13824.0,
            44275.0 / 110592.0,
            253.0 / 4096.0,
        ],
    ],
    c: C,
    d: [
        C_STAR[0] - C[0],
        C_STAR[1] - C[1],
        C_STAR[2] - C[2],
        C_STAR[3] - C[3],
        C_STAR[4] - C[4],
        C_STAR[5] - C[5],
    ],
};

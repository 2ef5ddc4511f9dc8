use std::fmt::Debug;

/// Bundles the operations needed to treat `Elem` as a linear element,
/// so tap vectors and matrices can stay generic over what they hold.
///
/// `dot` is expected to be bilinear with respect to `add` and `scale`.
/// Nothing checks this, but the RLS recursion is meaningless without it.
pub trait Algebra: Clone + Debug {
    /// The element stored in tap vectors
    type Elem: Clone + Debug;

    /// Elementwise sum
    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Multiply an element by a scalar
    fn scale(&self, a: &Self::Elem, factor: f64) -> Self::Elem;

    /// Inner product of two elements
    fn dot(&self, a: &Self::Elem, b: &Self::Elem) -> f64;

    /// Additive identity, standing in for the absent side of a length mismatch
    fn identity(&self) -> Self::Elem;
}

/// An algebra that also knows how to turn raw samples into regressors
pub trait Regressor: Algebra {
    /// Build the regressor element for the raw input `x`
    fn regressor(&self, x: f64) -> Self::Elem;

    /// The coefficient of `x` carried by a weight element,
    /// i.e. d/dx of `dot(regressor(x), weight)`
    fn slope(&self, weight: &Self::Elem) -> f64;
}

/// Plain `f64` elements
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarAlgebra;

impl Algebra for ScalarAlgebra {
    type Elem = f64;

    #[inline(always)]
    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    #[inline(always)]
    fn scale(&self, a: &f64, factor: f64) -> f64 {
        a * factor
    }

    #[inline(always)]
    fn dot(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }

    #[inline(always)]
    fn identity(&self) -> f64 {
        0.0
    }
}

impl Regressor for ScalarAlgebra {
    #[inline(always)]
    fn regressor(&self, x: f64) -> f64 {
        x
    }

    #[inline(always)]
    fn slope(&self, weight: &f64) -> f64 {
        *weight
    }
}

/// Two component element.
/// As a regressor it holds `(x, bias)`, as a weight `(k, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tuple2(pub f64, pub f64);

/// Weighted inner product over [`Tuple2`] elements, modelling `y = k * x + b`
/// within a single tap.
#[derive(Debug, Clone, Copy)]
pub struct TupleAlgebra {
    /// Weights of the two components in the inner product
    pub weights: (f64, f64),
    /// Constant placed in the second component of every regressor
    pub bias: f64,
}

impl Default for TupleAlgebra {
    fn default() -> Self {
        Self {
            weights: (1.0, 1.0),
            bias: 1.0,
        }
    }
}

impl Algebra for TupleAlgebra {
    type Elem = Tuple2;

    #[inline(always)]
    fn add(&self, a: &Tuple2, b: &Tuple2) -> Tuple2 {
        Tuple2(a.0 + b.0, a.1 + b.1)
    }

    #[inline(always)]
    fn scale(&self, a: &Tuple2, factor: f64) -> Tuple2 {
        Tuple2(a.0 * factor, a.1 * factor)
    }

    #[inline(always)]
    fn dot(&self, a: &Tuple2, b: &Tuple2) -> f64 {
        self.weights.0 * a.0 * b.0 + self.weights.1 * a.1 * b.1
    }

    #[inline(always)]
    fn identity(&self) -> Tuple2 {
        Tuple2(0.0, 0.0)
    }
}

impl Regressor for TupleAlgebra {
    #[inline(always)]
    fn regressor(&self, x: f64) -> Tuple2 {
        Tuple2(x, self.bias)
    }

    #[inline(always)]
    fn slope(&self, weight: &Tuple2) -> f64 {
        self.weights.0 * weight.0
    }
}

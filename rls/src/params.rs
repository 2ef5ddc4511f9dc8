use common::{MapperError, Result};

/// Construction parameters of the RLS mapper, fixed for its lifetime
#[derive(Debug, Clone)]
pub struct Params {
    /// Number of most recent regressors combined into a prediction,
    /// i.e. filter order + 1
    pub tap_count: usize,
    /// Forgetting factor in (0, 1].
    /// 1 weights all history equally, smaller values track changes faster
    /// but let the covariance estimate grow quickly.
    pub lambda: f64,
    /// Seeds the inverse covariance as `I / delta`.
    /// Small values trust the first samples more, large values act like a
    /// ridge penalty of `delta` on the weights.
    pub delta: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            tap_count: 5,
            lambda: 0.99,
            delta: 400.0,
        }
    }
}

impl Params {
    /// Reject parameters the recursion cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.tap_count == 0 {
            return Err(MapperError::InvalidParam {
                name: "tap_count",
                value: 0.0,
                reason: "at least one tap is required",
            });
        }
        if !(self.lambda > 0.0 && self.lambda <= 1.0) {
            return Err(MapperError::InvalidParam {
                name: "lambda",
                value: self.lambda,
                reason: "must lie in (0, 1]",
            });
        }
        if !(self.delta > 0.0 && self.delta.is_finite()) {
            return Err(MapperError::InvalidParam {
                name: "delta",
                value: self.delta,
                reason: "must be positive and finite",
            });
        }
        Ok(())
    }

    /// Scale of the identity the inverse covariance is reset to
    #[inline(always)]
    pub fn inv_delta(&self) -> f64 {
        1.0 / self.delta
    }
}

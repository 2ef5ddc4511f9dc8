//! Batch linear regression, the offline counterpart of the online mappers

#[macro_use]
extern crate log;

use common::Result;
use nalgebra::DMatrix;

mod tikhonov_regularization;

pub use tikhonov_regularization::{fit_line, LineFit, TikhonovRegularization};

/// Generic way of performing linear regression over a whole data set at once
pub trait LinReg: Clone {
    /// Fit a readout matrix, mapping inputs to targets
    ///
    /// # Parameters
    /// design: One row per observation, a leading column of 1s adds an intercept
    /// targets: Target data with one row per observation
    fn fit_readout(&self, design: &DMatrix<f64>, targets: &DMatrix<f64>)
        -> Result<DMatrix<f64>>;
}

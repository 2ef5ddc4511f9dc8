use common::{MapperError, Result};
use nalgebra::DMatrix;

use super::LinReg;

/// Tikhonov regularization aka ridge regression
/// It is particularly useful to mitigate the problem of multicollinearity in
/// linear regression
#[derive(Debug, Clone)]
pub struct TikhonovRegularization {
    /// Ridge parameter
    pub regularization_coeff: f64,
}

impl LinReg for TikhonovRegularization {
    fn fit_readout(
        &self,
        design: &DMatrix<f64>,
        targets: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>> {
        MapperError::check_dim("fit_readout", design.nrows(), targets.nrows())?;

        let reg_m = DMatrix::from_diagonal_element(
            design.ncols(),
            design.ncols(),
            self.regularization_coeff,
        );

        let p0 = design.transpose() * design;
        let p1 = (p0 + reg_m).try_inverse().ok_or_else(|| {
            MapperError::Regression("normal equations are singular".to_string())
        })?;
        let p2 = design.transpose() * targets;

        Ok(p1 * p2)
    }
}

/// Straight line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    #[inline(always)]
    pub fn y(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least squares line through all samples at once
///
/// # Arguments
/// xs, ys: Paired samples, at least two of them
/// regularization_coeff: Ridge penalty, 0 for ordinary least squares
pub fn fit_line(xs: &[f64], ys: &[f64], regularization_coeff: f64) -> Result<LineFit> {
    MapperError::check_dim("fit_line", xs.len(), ys.len())?;
    if xs.len() < 2 {
        return Err(MapperError::Regression(format!(
            "at least 2 samples are needed, got {}",
            xs.len()
        )));
    }

    // Note the first column being just ones
    let design = DMatrix::from_fn(xs.len(), 2, |i, j| if j == 0 { 1.0 } else { xs[i] });
    let targets = DMatrix::from_column_slice(ys.len(), 1, ys);

    let regressor = TikhonovRegularization {
        regularization_coeff,
    };
    let readout = regressor.fit_readout(&design, &targets)?;
    let fit = LineFit {
        slope: readout[(1, 0)],
        intercept: readout[(0, 0)],
    };
    debug!("batch line fit over {} samples: {:?}", xs.len(), fit);

    Ok(fit)
}

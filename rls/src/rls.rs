use common::{LinearMapper, MapperError, Result};

use crate::{DenseMatrix, Params, Regressor, TapDelay};

/// How far the mapper has come since the last reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No sample observed yet
    Uninitialized,
    /// Some samples observed, but the tap line is not full yet
    Warming,
    /// The tap line is full and predictions are meaningful
    Trained,
}

/// Recursive least squares estimator of a linear tap model.
///
/// Every call to `update` refines the weights in O(taps^2) element
/// operations plus one O(taps^3) matrix product, without storing past
/// samples. The element type of the taps is decided by the algebra,
/// e.g. [`crate::TupleAlgebra`] for `y = k * x + b` within one tap.
#[derive(Debug, Clone)]
pub struct Rls<A: Regressor> {
    params: Params,
    algebra: A,
    /// Ws
    weights: TapDelay<A::Elem>,
    /// Xs, newest regressor first
    regressors: TapDelay<A::Elem>,
    /// Inverse covariance estimate, taps x taps
    p: DenseMatrix,
    num_updates: usize,
}

impl<A: Regressor> Rls<A> {
    /// Create a new mapper in the `Uninitialized` phase
    ///
    /// # Arguments:
    /// params: validated before anything is allocated
    /// algebra: the element operations used by the tap lines
    pub fn new(params: Params, algebra: A) -> Result<Self> {
        params.validate()?;

        let n = params.tap_count;
        let p = DenseMatrix::identity(n, params.inv_delta());
        debug!("new rls mapper with {:?}, algebra: {:?}", params, algebra);

        Ok(Self {
            params,
            algebra,
            weights: TapDelay::new(n),
            regressors: TapDelay::new(n),
            p,
            num_updates: 0,
        })
    }

    #[inline(always)]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline(always)]
    pub fn algebra(&self) -> &A {
        &self.algebra
    }

    #[inline(always)]
    pub fn tap_count(&self) -> usize {
        self.params.tap_count
    }

    /// The current weight line, one element per tap
    #[inline(always)]
    pub fn weights(&self) -> &TapDelay<A::Elem> {
        &self.weights
    }

    /// The current regressor window, newest first
    #[inline(always)]
    pub fn regressors(&self) -> &TapDelay<A::Elem> {
        &self.regressors
    }

    /// The inverse covariance estimate `P`
    #[inline(always)]
    pub fn covariance(&self) -> &DenseMatrix {
        &self.p
    }

    /// Number of successful updates since the last reset
    #[inline(always)]
    pub fn num_updates(&self) -> usize {
        self.num_updates
    }

    pub fn phase(&self) -> Phase {
        if self.regressors.is_empty() {
            Phase::Uninitialized
        } else if self.regressors.is_full() {
            Phase::Trained
        } else {
            Phase::Warming
        }
    }

    fn ensure_established(&self) -> Result<()> {
        if self.weights.is_empty() {
            return Err(MapperError::ModelNotEstablished);
        }
        Ok(())
    }

    // Steps 2 to 8 read only the state from before the call.
    // Nothing is written back unless all of them succeed.
    fn step(
        &self,
        x: f64,
        y: f64,
    ) -> Result<(TapDelay<A::Elem>, TapDelay<A::Elem>, DenseMatrix)> {
        let algebra = &self.algebra;
        let lambda = self.params.lambda;

        let mut xs = self.regressors.clone();
        xs.push_front(algebra.regressor(x));

        // a priori error
        let a = y - xs.dot(&self.weights, algebra)?;

        let px = self.p.left_multiply(&xs, algebra)?;
        let xpx = self.p.quadratic(&xs, algebra)?;

        let coeff = MapperError::checked_recip("lambda + x'Px", lambda + xpx).map_err(|e| {
            warn!("gain denominator collapsed, x: {}, y: {}, xPx: {}", x, y, xpx);
            e
        })?;
        let gain = px.scale(coeff, algebra);

        let gx = gain.outer(&xs, algebra);
        let gxp = gx.multiply(&self.p)?;
        let mut p = self.p.subtract(&gxp)?;
        p.scale_by(1.0 / lambda);

        let weights = self.weights.add(&gain.scale(a, algebra), algebra)?;

        Ok((weights, xs, p))
    }
}

impl<A: Regressor> LinearMapper for Rls<A> {
    fn reset(&mut self) {
        let n = self.params.tap_count;
        self.p = DenseMatrix::identity(n, self.params.inv_delta());
        self.weights.clear();
        self.regressors.clear();
        self.num_updates = 0;
        debug!("rls mapper reset, P = {} * I", self.params.inv_delta());
    }

    fn update(&mut self, x: f64, y: f64) -> Result<()> {
        let phase = self.phase();

        let (weights, regressors, p) = self.step(x, y)?;
        self.weights = weights;
        self.regressors = regressors;
        self.p = p;
        self.num_updates += 1;

        trace!(
            "update #{} (x: {}, y: {}), weights: {:?}\nP:\n{}",
            self.num_updates,
            x,
            y,
            self.weights,
            self.p
        );
        let new_phase = self.phase();
        if new_phase != phase {
            debug!("rls mapper phase {:?} -> {:?}", phase, new_phase);
        }

        Ok(())
    }

    fn map_x_to_y(&self, x: f64) -> Result<f64> {
        self.ensure_established()?;

        let mut window = self.regressors.clone();
        window.push_front(self.algebra.regressor(x));
        window.dot(&self.weights, &self.algebra)
    }

    /// Only defined for a single tap, where the model reduces to `y = K * x + y0`
    fn map_y_to_x(&self, y: f64) -> Result<f64> {
        self.ensure_established()?;
        if self.params.tap_count != 1 {
            return Err(MapperError::UnsupportedInversion {
                tap_count: self.params.tap_count,
            });
        }

        let y0 = self.map_x_to_y(0.0)?;
        let k = self.weights.get(0).map(|w| self.algebra.slope(w)).unwrap_or(0.0);
        let inv_k = MapperError::checked_recip("slope", k).map_err(|e| {
            warn!("cannot invert a model with slope {}", k);
            e
        })?;

        Ok((y - y0) * inv_k)
    }
}

#[cfg(test)]
mod tests {
    use lin_reg::{LinReg, TikhonovRegularization};
    use round::round;

    use super::*;
    use crate::{ScalarAlgebra, TupleAlgebra};

    const GOLDEN: f64 = 0.618_033_988_749_894_9;

    /// Deterministic, well spread sequence in [0, 1)
    fn spread(i: usize, offset: f64) -> f64 {
        (i as f64 * GOLDEN + offset).fract()
    }

    fn params(tap_count: usize, lambda: f64, delta: f64) -> Params {
        Params {
            tap_count,
            lambda,
            delta,
        }
    }

    fn fir_input(i: usize) -> f64 {
        (0.7 * i as f64).sin() + 0.5 * (1.9 * i as f64).cos()
    }

    #[test]
    fn rejects_invalid_params() {
        assert!(Rls::new(params(0, 0.9, 1.0), ScalarAlgebra).is_err());
        assert!(Rls::new(params(1, 0.0, 1.0), ScalarAlgebra).is_err());
        assert!(Rls::new(params(1, 0.9, -1.0), TupleAlgebra::default()).is_err());
    }

    #[test]
    fn untrained_fails() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let mut rls = Rls::new(params(1, 0.9, 400.0), TupleAlgebra::default()).unwrap();
        assert_eq!(rls.phase(), Phase::Uninitialized);
        assert_eq!(rls.map_x_to_y(1.0), Err(MapperError::ModelNotEstablished));
        assert_eq!(rls.map_y_to_x(1.0), Err(MapperError::ModelNotEstablished));

        rls.update(1.0, 2.0).unwrap();
        assert!(rls.map_x_to_y(1.0).is_ok());

        rls.reset();
        assert_eq!(rls.phase(), Phase::Uninitialized);
        assert_eq!(rls.num_updates(), 0);
        assert_eq!(rls.covariance(), &DenseMatrix::identity(1, 1.0 / 400.0));
        assert_eq!(rls.map_x_to_y(1.0), Err(MapperError::ModelNotEstablished));
        assert_eq!(rls.map_y_to_x(1.0), Err(MapperError::ModelNotEstablished));
    }

    #[test]
    fn warm_up() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let mut rls = Rls::new(params(3, 0.99, 1.0), ScalarAlgebra).unwrap();
        rls.update(1.0, 2.0).unwrap();
        assert_eq!(rls.phase(), Phase::Warming);
        assert_eq!(rls.regressors().len(), 1);
        // the gain spans all taps, so the weights are full after the first step
        assert_eq!(rls.weights().len(), 3);

        let w: Vec<f64> = rls.weights().iter().map(|v| round(*v, 6)).collect();
        assert_eq!(w, vec![round(2.0 / 1.99, 6), 0.0, 0.0]);
        let p = rls.covariance();
        assert_eq!(round(p[(0, 0)], 6), round(1.0 / 1.99, 6));
        assert_eq!(round(p[(1, 1)], 6), round(1.0 / 0.99, 6));
        assert_eq!(p[(0, 1)], 0.0);

        rls.update(2.0, 3.0).unwrap();
        assert_eq!(rls.phase(), Phase::Warming);
        rls.update(3.0, 4.0).unwrap();
        assert_eq!(rls.phase(), Phase::Trained);
        rls.update(4.0, 5.0).unwrap();
        assert_eq!(rls.phase(), Phase::Trained);
        assert_eq!(rls.regressors().iter().cloned().collect::<Vec<f64>>(), vec![4.0, 3.0, 2.0]);
        assert_eq!(rls.num_updates(), 4);
    }

    #[test]
    fn converges_noiseless_line() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let mut rls = Rls::new(params(1, 0.01, 400.0), TupleAlgebra::default()).unwrap();
        for i in 0..200 {
            let x = -10.0 + 20.0 * spread(i, 0.0);
            rls.update(x, 7.0 * x + 3.0).unwrap();
        }
        assert_eq!(rls.phase(), Phase::Trained);

        let w = rls.weights().get(0).cloned().unwrap();
        info!("weights: {:?}", w);
        assert!((w.0 - 7.0).abs() < 1e-6);
        assert!((w.1 - 3.0).abs() < 1e-6);

        for x in [-25.0, 0.0, 4.0, 13.5, 100.0] {
            let y = rls.map_x_to_y(x).unwrap();
            assert!((y - (7.0 * x + 3.0)).abs() < 1e-6, "x: {}, y: {}", x, y);
        }
    }

    #[test]
    fn round_trip() {
        let mut rls = Rls::new(params(1, 0.01, 400.0), TupleAlgebra::default()).unwrap();
        for i in 0..200 {
            let x = -10.0 + 20.0 * spread(i, 0.0);
            rls.update(x, -2.5 * x + 11.0).unwrap();
        }
        for x in [-3.0, 0.5, 42.0, 1e3] {
            let y = rls.map_x_to_y(x).unwrap();
            let back = rls.map_y_to_x(y).unwrap();
            assert!((back - x).abs() < 1e-6, "x: {}, back: {}", x, back);
        }
    }

    #[test]
    fn noisy_line() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let mut rls = Rls::new(params(1, 0.1, 400.0), TupleAlgebra::default()).unwrap();
        for i in 0..100 {
            let x = 20.0 * spread(i, 0.1);
            let noise = 0.3 * (i as f64 * 12.9898).sin();
            rls.update(x, 7.0 * x + 3.0 + noise).unwrap();
        }

        let y = rls.map_x_to_y(4.0).unwrap();
        let x = rls.map_y_to_x(31.0).unwrap();
        info!("map_x_to_y(4): {}, map_y_to_x(31): {}", y, x);
        assert!((y - 31.0).abs() < 1.0);
        assert!((x - 4.0).abs() < 1.0);
    }

    #[test]
    fn identifies_fir_system() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // y[t] = 2 x[t] - 0.5 x[t - 1]
        let mut rls = Rls::new(params(2, 1.0, 1e-6), ScalarAlgebra).unwrap();
        let mut prev = 0.0;
        for i in 0..200 {
            let x = fir_input(i);
            rls.update(x, 2.0 * x - 0.5 * prev).unwrap();
            prev = x;
        }

        let w: Vec<f64> = rls.weights().iter().cloned().collect();
        info!("fir weights: {:?}", w);
        assert!((w[0] - 2.0).abs() < 1e-6);
        assert!((w[1] + 0.5).abs() < 1e-6);

        // the prediction uses the last observed input as the delayed tap
        let y = rls.map_x_to_y(1.0).unwrap();
        assert!((y - (2.0 - 0.5 * prev)).abs() < 1e-6);

        assert_eq!(
            rls.map_y_to_x(1.0),
            Err(MapperError::UnsupportedInversion { tap_count: 2 })
        );
    }

    #[test]
    fn covariance_stays_symmetric() {
        let mut tuple = Rls::new(params(3, 0.95, 10.0), TupleAlgebra::default()).unwrap();
        let mut scalar = Rls::new(params(3, 0.95, 10.0), ScalarAlgebra).unwrap();
        for i in 0..300 {
            let x = 5.0 * (0.3 * i as f64).sin() + spread(i, 0.0);
            tuple.update(x, 2.0 * x - 1.0).unwrap();
            scalar.update(x, 2.0 * x - 1.0).unwrap();
            assert!(tuple.covariance().is_symmetric(1e-9), "{}", tuple.covariance());
            assert!(scalar.covariance().is_symmetric(1e-9), "{}", scalar.covariance());
        }
    }

    #[test]
    fn matches_ridge_regression() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // With lambda = 1 the recursion solves the ridge problem with penalty delta exactly,
        // where taps not filled yet count as zero inputs.
        const DELTA: f64 = 0.5;
        const N: usize = 150;

        let mut rls = Rls::new(params(2, 1.0, DELTA), ScalarAlgebra).unwrap();
        let mut design = Vec::with_capacity(N * 2);
        let mut targets = Vec::with_capacity(N);
        let mut prev = 0.0;
        for i in 0..N {
            let x = fir_input(i);
            let y = 2.0 * x - 0.5 * prev + 0.1 * (i as f64 * 12.9898).sin();
            rls.update(x, y).unwrap();
            design.extend_from_slice(&[x, prev]);
            targets.push(y);
            prev = x;
        }

        let design = nalgebra::DMatrix::from_row_slice(N, 2, &design);
        let targets = nalgebra::DMatrix::from_column_slice(N, 1, &targets);
        let regressor = TikhonovRegularization {
            regularization_coeff: DELTA,
        };
        let readout = regressor.fit_readout(&design, &targets).unwrap();
        info!("ridge readout: {}, rls weights: {:?}", readout, rls.weights());

        for (i, w) in rls.weights().iter().enumerate() {
            assert!((w - readout[(i, 0)]).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_slope_cannot_invert() {
        let mut rls = Rls::new(params(1, 0.5, 1.0), TupleAlgebra::default()).unwrap();
        // x = 0 only ever informs the bias component
        for _ in 0..10 {
            rls.update(0.0, 5.0).unwrap();
        }
        assert_eq!(rls.weights().get(0).map(|w| w.0), Some(0.0));
        assert!(matches!(
            rls.map_y_to_x(5.0),
            Err(MapperError::NumericalInstability { what: "slope", .. })
        ));
    }

    #[test]
    fn failed_update_keeps_state() {
        let mut rls = Rls::new(params(1, 1.0, 1.0), TupleAlgebra::default()).unwrap();
        rls.update(1.0, 2.0).unwrap();
        let before = rls.clone();

        // lambda + x'Px turns infinite
        let err = rls.update(f64::INFINITY, 1.0).unwrap_err();
        assert!(matches!(err, MapperError::NumericalInstability { .. }));
        assert_eq!(rls.num_updates(), before.num_updates());
        assert_eq!(rls.weights(), before.weights());
        assert_eq!(rls.regressors(), before.regressors());
        assert_eq!(rls.covariance(), before.covariance());
    }
}

//! Online linear mapping between `x` and `y` by recursive least squares

#[macro_use]
extern crate log;

mod algebra;
mod matrix;
mod params;
mod rls;
mod tap_delay;

pub use algebra::{Algebra, Regressor, ScalarAlgebra, Tuple2, TupleAlgebra};
pub use common::{LinearMapper, MapperError, Result};
pub use matrix::DenseMatrix;
pub use params::Params;
pub use rls::{Phase, Rls};
pub use tap_delay::TapDelay;

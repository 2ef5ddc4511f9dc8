#[macro_use]
extern crate log;

mod fit_gather;
pub mod plot;

pub use fit_gather::FitGather;
pub use plot::plot_fit;

pub type Series = Vec<(f64, f64)>;

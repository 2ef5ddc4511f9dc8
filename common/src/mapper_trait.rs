use crate::Result;

/// Anything that learns a linear relation between `x` and `y` from a stream
/// of samples and can map in both directions afterwards.
pub trait LinearMapper {
    /// Forget everything learned so far
    fn reset(&mut self);

    /// Observe one new sample pair
    fn update(&mut self, x: f64, y: f64) -> Result<()>;

    /// Predict `y` for the given `x`, taking the current tap window into account
    fn map_x_to_y(&self, x: f64) -> Result<f64>;

    /// Invert the learned relation, predicting the `x` that yields `y`
    fn map_y_to_x(&self, y: f64) -> Result<f64>;
}

use crate::Series;

/// Collects everything that ends up in a fit plot
#[derive(Debug, Clone, Default)]
pub struct FitGather {
    samples: Series,
    online_fit: Series,
    batch_fit: Series,
}

impl FitGather {
    #[inline(always)]
    pub fn push_sample(&mut self, x: f64, y: f64) {
        self.samples.push((x, y))
    }

    #[inline(always)]
    pub fn push_online(&mut self, x: f64, y: f64) {
        self.online_fit.push((x, y))
    }

    #[inline(always)]
    pub fn push_batch(&mut self, x: f64, y: f64) {
        self.batch_fit.push((x, y))
    }

    #[inline(always)]
    pub fn samples(&self) -> &Series {
        &self.samples
    }

    #[inline(always)]
    pub fn online_fit(&self) -> &Series {
        &self.online_fit
    }

    #[inline(always)]
    pub fn batch_fit(&self) -> &Series {
        &self.batch_fit
    }

    /// Smallest box `(x_min, x_max, y_min, y_max)` containing every gathered point,
    /// widened where it would otherwise be degenerate
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points =
            self.samples.iter().chain(self.online_fit.iter()).chain(self.batch_fit.iter());
        let first = points.next()?;
        let (mut x_min, mut x_max, mut y_min, mut y_max) = (first.0, first.0, first.1, first.1);
        for (x, y) in points {
            x_min = x_min.min(*x);
            x_max = x_max.max(*x);
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
        if x_max - x_min <= f64::EPSILON {
            x_min -= 1.0;
            x_max += 1.0;
        }
        if y_max - y_min <= f64::EPSILON {
            y_min -= 1.0;
            y_max += 1.0;
        }
        Some((x_min, x_max, y_min, y_max))
    }
}

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use common::{MapperError, Result};

use crate::{Algebra, TapDelay};

/// Row major `rows x cols` grid of `f64` with dimension checked operations
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Square matrix with `scale` on the diagonal
    pub fn identity(n: usize, scale: f64) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = scale;
        }
        m
    }

    /// Build from a list of equally long rows
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            MapperError::check_dim("from_rows", cols, row.len())?;
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Classic triple loop product `self * right`
    pub fn multiply(&self, right: &DenseMatrix) -> Result<DenseMatrix> {
        MapperError::check_dim("multiply", self.cols, right.rows)?;

        let mut result = DenseMatrix::zeros(self.rows, right.cols);
        for i in 0..self.rows {
            for j in 0..right.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self[(i, k)] * right[(k, j)];
                }
                result[(i, j)] = sum;
            }
        }
        Ok(result)
    }

    /// Element wise `self + sign * other`
    pub fn add_signed(&self, other: &DenseMatrix, sign: f64) -> Result<DenseMatrix> {
        MapperError::check_dim("add (rows)", self.rows, other.rows)?;
        MapperError::check_dim("add (cols)", self.cols, other.cols)?;

        let data = self.data.iter().zip(other.data.iter()).map(|(a, b)| a + sign * b).collect();
        Ok(DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    #[inline(always)]
    pub fn add(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.add_signed(other, 1.0)
    }

    #[inline(always)]
    pub fn subtract(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.add_signed(other, -1.0)
    }

    /// Overwrite with `scale` on the diagonal and zeros elsewhere
    pub fn set_identity(&mut self, scale: f64) -> Result<()> {
        MapperError::check_dim("set_identity", self.rows, self.cols)?;

        self.data.iter_mut().for_each(|v| *v = 0.0);
        for i in 0..self.rows {
            self[(i, i)] = scale;
        }
        Ok(())
    }

    pub fn scale_by(&mut self, scale: f64) {
        self.data.iter_mut().for_each(|v| *v *= scale);
    }

    pub fn transpose(&self) -> DenseMatrix {
        let mut t = DenseMatrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }

    /// Whether every `m[i, j]` is within `tol` of `m[j, i]`
    pub fn is_symmetric(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let t = self.transpose();
        self.data.iter().zip(t.data.iter()).all(|(a, b)| (a - b).abs() <= tol)
    }

    /// Matrix vector product `M * v` for vectors of any algebra.
    /// `result[i] = sum_j scale(v[j], M[i, j])`
    pub fn left_multiply<A>(
        &self,
        v: &TapDelay<A::Elem>,
        algebra: &A,
    ) -> Result<TapDelay<A::Elem>>
    where
        A: Algebra,
    {
        MapperError::check_dim("left_multiply", self.cols, v.capacity())?;

        let out = (0..self.rows).filter_map(|i| self.accumulate(v, algebra, |j| self[(i, j)]));
        Ok(TapDelay::from_newest_first(self.rows, out))
    }

    /// Vector matrix product `v^T * M` for vectors of any algebra.
    /// `result[i] = sum_j scale(v[j], M[j, i])`
    pub fn right_multiply<A>(
        &self,
        v: &TapDelay<A::Elem>,
        algebra: &A,
    ) -> Result<TapDelay<A::Elem>>
    where
        A: Algebra,
    {
        MapperError::check_dim("right_multiply", self.rows, v.capacity())?;

        let out = (0..self.cols).filter_map(|i| self.accumulate(v, algebra, |j| self[(j, i)]));
        Ok(TapDelay::from_newest_first(self.cols, out))
    }

    /// The quadratic form `v^T * M * v`
    pub fn quadratic<A>(&self, v: &TapDelay<A::Elem>, algebra: &A) -> Result<f64>
    where
        A: Algebra,
    {
        MapperError::check_dim("quadratic", self.rows, self.cols)?;

        let tmp = self.right_multiply(v, algebra)?;
        tmp.dot(v, algebra)
    }

    // The first scaled term seeds the sum, so no zero element is required.
    // Returns None only when `v` holds no elements.
    fn accumulate<A, F>(&self, v: &TapDelay<A::Elem>, algebra: &A, coeff: F) -> Option<A::Elem>
    where
        A: Algebra,
        F: Fn(usize) -> f64,
    {
        v.iter().enumerate().fold(None, |acc, (j, e)| {
            let term = algebra.scale(e, coeff(j));
            Some(match acc {
                Some(sum) => algebra.add(&sum, &term),
                None => term,
            })
        })
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    #[inline(always)]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.6}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

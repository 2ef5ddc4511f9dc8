use std::collections::VecDeque;

use common::{MapperError, Result};

use crate::{Algebra, DenseMatrix};

/// Fixed capacity window holding the most recently pushed elements,
/// newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TapDelay<T> {
    capacity: usize,
    data: VecDeque<T>,
}

impl<T> TapDelay<T> {
    /// Create an empty tap line which retains at most `capacity` elements
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            data: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Build a tap line from elements given newest first.
    /// Elements beyond `capacity` are dropped.
    pub fn from_newest_first<I>(capacity: usize, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut data: VecDeque<T> = items.into_iter().take(capacity).collect();
        data.reserve(capacity + 1 - data.len());
        Self { capacity, data }
    }

    /// The maximum number of elements retained
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of elements currently held
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Element at position `i`, where 0 is the newest
    #[inline(always)]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }

    /// Iterate from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Insert the newest element, evicting the oldest once over capacity
    pub fn push_front(&mut self, value: T) {
        self.data.push_front(value);
        while self.data.len() > self.capacity {
            let _ = self.data.pop_back();
        }
    }

    /// Visit both lines in lockstep from the front,
    /// stopping at the end of the shorter one
    pub fn pairwise<U, F>(&self, other: &TapDelay<U>, mut op: F)
    where
        F: FnMut(&T, &U),
    {
        for (a, b) in self.data.iter().zip(other.data.iter()) {
            op(a, b);
        }
    }

    /// Visit every combination of elements along with their positions
    pub fn indexed_pairwise<U, F>(&self, other: &TapDelay<U>, mut op: F)
    where
        F: FnMut(&T, &U, usize, usize),
    {
        for (i, a) in self.data.iter().enumerate() {
            for (j, b) in other.data.iter().enumerate() {
                op(a, b, i, j);
            }
        }
    }
}

impl<T: Clone> TapDelay<T> {
    /// Sum of the element wise inner products, requires equal capacities
    pub fn dot<A>(&self, other: &TapDelay<T>, algebra: &A) -> Result<f64>
    where
        A: Algebra<Elem = T>,
    {
        MapperError::check_dim("dot", self.capacity, other.capacity)?;

        let mut sum = 0.0;
        self.pairwise(other, |a, b| sum += algebra.dot(a, b));
        Ok(sum)
    }

    /// A new line with every element scaled by `factor`
    pub fn scale<A>(&self, factor: f64, algebra: &A) -> TapDelay<T>
    where
        A: Algebra<Elem = T>,
    {
        TapDelay::from_newest_first(
            self.capacity,
            self.data.iter().map(|v| algebra.scale(v, factor)),
        )
    }

    /// Element wise sum. Capacities must match, but a shorter line is padded
    /// with the algebra's identity so a partially filled window can be added
    /// to a full one.
    pub fn add<A>(&self, other: &TapDelay<T>, algebra: &A) -> Result<TapDelay<T>>
    where
        A: Algebra<Elem = T>,
    {
        MapperError::check_dim("add", self.capacity, other.capacity)?;

        let len = self.len().max(other.len());
        let zero = algebra.identity();
        let sums = (0..len).map(|i| {
            let a = self.data.get(i).unwrap_or(&zero);
            let b = other.data.get(i).unwrap_or(&zero);
            algebra.add(a, b)
        });
        Ok(TapDelay::from_newest_first(self.capacity, sums))
    }

    /// Outer product `m[i, j] = dot(self[i], other[j])` sized by the two
    /// capacities. Positions without an element stay zero.
    pub fn outer<A>(&self, other: &TapDelay<T>, algebra: &A) -> DenseMatrix
    where
        A: Algebra<Elem = T>,
    {
        let mut m = DenseMatrix::zeros(self.capacity, other.capacity);
        self.indexed_pairwise(other, |a, b, i, j| m[(i, j)] = algebra.dot(a, b));
        m
    }
}

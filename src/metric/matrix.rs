//! distance provider over an ndarray matrix, each row is a point

use ndarray::Array2;
use num_traits::float::Float;

use super::{Distance, Norm};

/// Rows of an `Array2` compared with a [Norm].
pub struct MatrixData<T> {
    data: Array2<T>,
    norm: Norm,
}

impl<T> MatrixData<T>
where
    T: Float,
{
    pub fn new(data: Array2<T>, norm: Norm) -> Self {
        MatrixData { data, norm }
    }

    /// number of rows
    pub fn get_nb_points(&self) -> usize {
        self.data.nrows()
    }

    pub fn get_dimension(&self) -> usize {
        self.data.ncols()
    }

    pub fn get_data(&self) -> &Array2<T> {
        &self.data
    }
}

impl<T> Distance for MatrixData<T>
where
    T: Float + Send + Sync,
{
    fn distance(&self, i: usize, j: usize) -> f64 {
        let (ri, rj) = (self.data.row(i), self.data.row(j));
        // rows of a standard layout matrix are contiguous
        match (ri.as_slice(), rj.as_slice()) {
            (Some(a), Some(b)) => self.norm.eval(a, b),
            _ => self.norm.eval(&ri.to_vec(), &rj.to_vec()),
        }
    }
}

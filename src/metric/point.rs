//! defines data description

use num_traits::float::Float;

use std::fmt::Debug;

use super::Distance;

/// data to cluster identifier
pub type PointId = usize;

#[derive(Debug, Clone)]
pub struct Point<T> {
    // id to identify points as coming from external client.
    id: PointId,
    /// data point
    p: Vec<T>,
}

impl<T> Point<T>
where
    T: Float + Debug,
{
    ///a point is characterized by its Id (in fact a rank)
    pub fn new(id: PointId, p: Vec<T>) -> Self {
        Point { id, p }
    }

    /// get id
    pub fn get_id(&self) -> PointId {
        self.id
    }

    /// gets the points coordinate
    pub fn get_position(&self) -> &[T] {
        &self.p
    }

    pub fn get_dimension(&self) -> usize {
        self.p.len()
    }
} // end of impl Point

//====

/// The norms used to compare points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Norm {
    L1,
    #[default]
    L2,
    /// squared L2, the k-means cost
    SqrL2,
}

impl Norm {
    /// dissimilarity between two slices of the same length
    pub fn eval<T: Float>(&self, a: &[T], b: &[T]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        let pairs = a.iter().zip(b.iter());
        let res = match self {
            Norm::L1 => pairs.fold(T::zero(), |acc, (x, y)| acc + (*x - *y).abs()),
            Norm::L2 => pairs
                .fold(T::zero(), |acc, (x, y)| acc + (*x - *y) * (*x - *y))
                .sqrt(),
            Norm::SqrL2 => pairs.fold(T::zero(), |acc, (x, y)| acc + (*x - *y) * (*x - *y)),
        };
        res.to_f64().unwrap_or(f64::INFINITY)
    }
} // end of impl Norm

//====

/// A set of points compared with a [Norm]. The point of rank i in the set answers distance requests for index i.
pub struct PointSet<T> {
    points: Vec<Point<T>>,
    norm: Norm,
}

impl<T> PointSet<T>
where
    T: Float + Debug,
{
    pub fn new(points: Vec<Point<T>>, norm: Norm) -> Self {
        PointSet { points, norm }
    }

    /// builds points from raw vectors, ids are the ranks in data
    pub fn from_vecs(data: Vec<Vec<T>>, norm: Norm) -> Self {
        let points = data
            .into_iter()
            .enumerate()
            .map(|(i, p)| Point::new(i, p))
            .collect();
        PointSet { points, norm }
    }

    pub fn get_nb_points(&self) -> usize {
        self.points.len()
    }

    pub fn get_point(&self, rank: usize) -> &Point<T> {
        &self.points[rank]
    }

    pub fn get_norm(&self) -> Norm {
        self.norm
    }
}

impl<T> Distance for PointSet<T>
where
    T: Float + Debug + Sync + Send,
{
    fn distance(&self, i: usize, j: usize) -> f64 {
        self.norm
            .eval(self.points[i].get_position(), self.points[j].get_position())
    }
}

//========================================================

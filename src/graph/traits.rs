use std::fmt::Debug;
use num_traits::{CheckedAdd, Float, Zero};
use ordered_float::OrderedFloat;

use crate::Result;

/// Edge weight usable by the shortest path engine.
///
/// Implemented for the primitive integers and for `OrderedFloat` over `f32`/`f64`.
pub trait Weight: Zero + Ord + Debug + Copy + Send + Sync {
    /// Sum of two path lengths, `None` when it does not fit in the type
    fn checked_sum(self, other: Self) -> Option<Self>;
}

macro_rules! impl_integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn checked_sum(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }
            }
        )*
    };
}

impl_integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<T> Weight for OrderedFloat<T>
where
    T: Float + Debug + Send + Sync,
{
    fn checked_sum(self, other: Self) -> Option<Self> {
        let sum = self.into_inner() + other.into_inner();
        if sum.is_finite() {
            Some(OrderedFloat(sum))
        } else {
            None
        }
    }
}

/// Trait representing a weighted graph addressed by dense vertex indices
pub trait Graph<W>: Debug
where
    W: Weight,
{
    /// Returns the number of vertices in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of edges inserted into the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the `(neighbor, weight)` pairs of a vertex, in insertion order
    fn neighbors(&self, node: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_node(&self, node: usize) -> bool {
        node < self.node_count()
    }

    /// Display label of a vertex, if it has one
    fn label(&self, node: usize) -> Option<&str>;
}

/// Trait for append-only graph construction
pub trait MutableGraph<W>: Graph<W>
where
    W: Weight,
{
    /// Adds a vertex to the graph and returns its ID
    fn add_node(&mut self, label: Option<&str>) -> usize;

    /// Adds a weighted edge between two existing vertices
    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()>;
}

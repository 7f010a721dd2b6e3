pub mod array_list_edges;
pub mod factory;
pub mod hash_map_edges;
pub mod io;
pub mod load;
pub mod long_double_array_edges;
pub mod long_double_hash_map_edges;
pub mod observability;
mod slot_index;

pub use array_list_edges::ArrayListEdges;
pub use factory::{OutEdgesClass, OutEdgesFactory};
pub use geaflow_api::edges::{Edge, EdgeIter, EdgeRef, OutEdges, StrictRandomAccessOutEdges};
pub use hash_map_edges::HashMapEdges;
pub use load::OutEdgesLoader;
pub use long_double_array_edges::LongDoubleArrayEdges;
pub use long_double_hash_map_edges::LongDoubleHashMapEdges;

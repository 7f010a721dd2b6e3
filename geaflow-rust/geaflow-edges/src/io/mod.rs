pub mod codec;
pub mod writable;

pub use codec::{
    deserialize_out_edges, read_edge, read_out_edges, serialize_out_edges, write_out_edges,
};
pub use writable::{Bincoded, Writable};

//! Length-prefixed binary records of a vertex's out-edges.
//!
//! Layout: `count: u32 | count x (target, value)`, with targets and values
//! encoded by their [`Writable`] impls. Decoding goes through
//! [`OutEdges::initialize`], so a strict store rebuilt from a record holds the
//! same entries it would hold had the edges been loaded directly.

use crate::factory::OutEdgesFactory;
use crate::io::writable::{ensure_remaining, Writable};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use geaflow_api::edges::{Edge, OutEdges};
use geaflow_common::error::{GeaFlowError, GeaFlowResult};
use std::marker::PhantomData;
use tracing::warn;

const COUNT_LEN: usize = 4;

pub fn write_out_edges<K, EV, B>(edges: &dyn OutEdges<K, EV>, buf: &mut B) -> GeaFlowResult<()>
where
    K: Writable,
    EV: Writable,
    B: BufMut,
{
    let count = u32::try_from(edges.size()).map_err(|_| {
        GeaFlowError::InvalidArgument(format!(
            "{} out-edges exceed the record limit of {}",
            edges.size(),
            u32::MAX
        ))
    })?;
    buf.put_u32(count);
    for edge in edges.iter() {
        edge.target_id().write_to(buf)?;
        edge.value().write_to(buf)?;
    }
    Ok(())
}

pub fn serialize_out_edges<K, EV>(edges: &dyn OutEdges<K, EV>) -> GeaFlowResult<Bytes>
where
    K: Writable,
    EV: Writable,
{
    let pair_len = K::MIN_ENCODED_LEN + EV::MIN_ENCODED_LEN;
    let mut buf = BytesMut::with_capacity(COUNT_LEN + edges.size().saturating_mul(pair_len));
    write_out_edges(edges, &mut buf)?;
    metrics::counter!("geaflow_edges_encoded_bytes_total").increment(buf.len() as u64);
    Ok(buf.freeze())
}

pub fn read_edge<K, EV, B>(buf: &mut B) -> GeaFlowResult<Edge<K, EV>>
where
    K: Writable,
    EV: Writable,
    B: Buf,
{
    let target_id = K::read_from(buf)?;
    let value = EV::read_from(buf)?;
    Ok(Edge::new(target_id, value))
}

/// Replaces the contents of `edges` with the record at the front of `buf`.
///
/// On failure `edges` is left empty and `buf` is positioned somewhere inside
/// the corrupt record.
pub fn read_out_edges<K, EV, B>(edges: &mut dyn OutEdges<K, EV>, buf: &mut B) -> GeaFlowResult<()>
where
    K: Writable,
    EV: Writable,
    B: Buf,
{
    let result = decode_into(edges, buf);
    if let Err(e) = &result {
        edges.initialize_with_capacity(0);
        record_decode_failure(e);
    }
    result
}

/// Decodes a complete record into a fresh store from `factory`. Bytes left over
/// after the record are treated as corruption.
pub fn deserialize_out_edges<K, EV>(
    factory: &OutEdgesFactory<K, EV>,
    bytes: &[u8],
) -> GeaFlowResult<Box<dyn OutEdges<K, EV>>>
where
    K: Writable,
    EV: Writable,
{
    let mut buf = bytes;
    let mut edges = factory.create();
    read_out_edges(edges.as_mut(), &mut buf)?;
    if buf.has_remaining() {
        let e = GeaFlowError::Decode(format!(
            "{} trailing bytes after out-edges record",
            buf.remaining()
        ));
        record_decode_failure(&e);
        return Err(e);
    }
    Ok(edges)
}

fn record_decode_failure(e: &GeaFlowError) {
    warn!(error = %e, "discarding corrupt out-edges record");
    metrics::counter!("geaflow_edges_decode_failures_total").increment(1);
}

fn decode_into<K, EV, B>(edges: &mut dyn OutEdges<K, EV>, buf: &mut B) -> GeaFlowResult<()>
where
    K: Writable,
    EV: Writable,
    B: Buf,
{
    ensure_remaining(buf, COUNT_LEN, "out-edges count")?;
    let count = buf.get_u32() as usize;

    // The count is only trusted as far as the remaining bytes can back it.
    let pair_len = K::MIN_ENCODED_LEN + EV::MIN_ENCODED_LEN;
    let presize = if pair_len == 0 {
        count.min(buf.remaining())
    } else if count > buf.remaining() / pair_len {
        return Err(GeaFlowError::Decode(format!(
            "record claims {count} edges but only {} bytes follow",
            buf.remaining()
        )));
    } else {
        count
    };

    let mut decoder = EdgeDecoder::<K, EV, B> {
        buf,
        remaining: count,
        presize,
        error: None,
        _marker: PhantomData,
    };
    edges.initialize(&mut decoder);
    match decoder.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Feeds decoded edges to `initialize`, stopping at the first bad edge.
struct EdgeDecoder<'a, K, EV, B> {
    buf: &'a mut B,
    remaining: usize,
    presize: usize,
    error: Option<GeaFlowError>,
    _marker: PhantomData<fn() -> (K, EV)>,
}

impl<K, EV, B> Iterator for EdgeDecoder<'_, K, EV, B>
where
    K: Writable,
    EV: Writable,
    B: Buf,
{
    type Item = Edge<K, EV>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.error.is_some() {
            return None;
        }
        match read_edge::<K, EV, B>(&mut *self.buf) {
            Ok(edge) => {
                self.remaining -= 1;
                Some(edge)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.error.is_some() {
            return (0, Some(0));
        }
        (self.presize.min(self.remaining), Some(self.remaining))
    }
}

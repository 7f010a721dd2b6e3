use bytes::{Buf, BufMut};
use geaflow_common::error::{GeaFlowError, GeaFlowResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Binary encoding of an edge target or payload.
///
/// Numbers are fixed width and big-endian. Variable-length values carry a
/// `u32` byte-length prefix.
pub trait Writable: Sized {
    /// Fewest bytes any value of the type encodes to.
    const MIN_ENCODED_LEN: usize;

    fn write_to<B: BufMut>(&self, buf: &mut B) -> GeaFlowResult<()>;

    fn read_from<B: Buf>(buf: &mut B) -> GeaFlowResult<Self>;
}

pub(crate) fn ensure_remaining<B: Buf>(buf: &B, needed: usize, what: &str) -> GeaFlowResult<()> {
    if buf.remaining() < needed {
        return Err(GeaFlowError::Decode(format!(
            "truncated {what}: need {needed} bytes, have {}",
            buf.remaining()
        )));
    }
    Ok(())
}

fn put_len<B: BufMut>(buf: &mut B, len: usize, what: &str) -> GeaFlowResult<()> {
    let len = u32::try_from(len)
        .map_err(|_| GeaFlowError::InvalidArgument(format!("{what} of {len} bytes is too long")))?;
    buf.put_u32(len);
    Ok(())
}

fn get_len<B: Buf>(buf: &mut B, what: &str) -> GeaFlowResult<usize> {
    ensure_remaining(buf, 4, what)?;
    let len = buf.get_u32() as usize;
    ensure_remaining(buf, len, what)?;
    Ok(len)
}

macro_rules! fixed_width_writable {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl Writable for $ty {
                const MIN_ENCODED_LEN: usize = std::mem::size_of::<$ty>();

                fn write_to<B: BufMut>(&self, buf: &mut B) -> GeaFlowResult<()> {
                    buf.$put(*self);
                    Ok(())
                }

                fn read_from<B: Buf>(buf: &mut B) -> GeaFlowResult<Self> {
                    ensure_remaining(buf, Self::MIN_ENCODED_LEN, stringify!($ty))?;
                    Ok(buf.$get())
                }
            }
        )*
    };
}

fixed_width_writable! {
    u8 => put_u8, get_u8;
    i32 => put_i32, get_i32;
    u32 => put_u32, get_u32;
    i64 => put_i64, get_i64;
    u64 => put_u64, get_u64;
    f32 => put_f32, get_f32;
    f64 => put_f64, get_f64;
}

impl Writable for bool {
    const MIN_ENCODED_LEN: usize = 1;

    fn write_to<B: BufMut>(&self, buf: &mut B) -> GeaFlowResult<()> {
        buf.put_u8(u8::from(*self));
        Ok(())
    }

    fn read_from<B: Buf>(buf: &mut B) -> GeaFlowResult<Self> {
        ensure_remaining(buf, 1, "bool")?;
        match buf.get_u8() {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(GeaFlowError::Decode(format!("invalid bool byte {other:#04x}"))),
        }
    }
}

/// Unweighted edges.
impl Writable for () {
    const MIN_ENCODED_LEN: usize = 0;

    fn write_to<B: BufMut>(&self, _buf: &mut B) -> GeaFlowResult<()> {
        Ok(())
    }

    fn read_from<B: Buf>(_buf: &mut B) -> GeaFlowResult<Self> {
        Ok(())
    }
}

impl Writable for String {
    const MIN_ENCODED_LEN: usize = 4;

    fn write_to<B: BufMut>(&self, buf: &mut B) -> GeaFlowResult<()> {
        put_len(buf, self.len(), "string")?;
        buf.put_slice(self.as_bytes());
        Ok(())
    }

    fn read_from<B: Buf>(buf: &mut B) -> GeaFlowResult<Self> {
        let len = get_len(buf, "string")?;
        let bytes = buf.copy_to_bytes(len);
        String::from_utf8(bytes.to_vec())
            .map_err(|e| GeaFlowError::Decode(format!("string is not utf-8: {e}")))
    }
}

/// Encodes any serde type with bincode, behind a `u32` length prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bincoded<T>(pub T);

impl<T> Bincoded<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Writable for Bincoded<T>
where
    T: Serialize + DeserializeOwned,
{
    const MIN_ENCODED_LEN: usize = 4;

    fn write_to<B: BufMut>(&self, buf: &mut B) -> GeaFlowResult<()> {
        let bytes = bincode::serialize(&self.0)
            .map_err(|e| GeaFlowError::Internal(format!("bincode encode: {e}")))?;
        put_len(buf, bytes.len(), "bincode value")?;
        buf.put_slice(&bytes);
        Ok(())
    }

    fn read_from<B: Buf>(buf: &mut B) -> GeaFlowResult<Self> {
        let len = get_len(buf, "bincode value")?;
        let bytes = buf.copy_to_bytes(len);
        bincode::deserialize(&bytes)
            .map(Bincoded)
            .map_err(|e| GeaFlowError::Decode(format!("bincode decode: {e}")))
    }
}

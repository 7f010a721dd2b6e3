use crate::array_list_edges::ArrayListEdges;
use crate::hash_map_edges::HashMapEdges;
use crate::long_double_array_edges::LongDoubleArrayEdges;
use crate::long_double_hash_map_edges::LongDoubleHashMapEdges;
use geaflow_api::edges::{OutEdges, StrictRandomAccessOutEdges};
use geaflow_common::config::Configuration;
use geaflow_common::error::{GeaFlowError, GeaFlowResult};
use std::any::Any;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::debug;

pub const EDGES_CLASS_KEY: &str = "geaflow.edges.class";
pub const EDGES_STRICT_KEY: &str = "geaflow.edges.strict";
pub const EDGES_PRIMITIVE_KEY: &str = "geaflow.edges.primitive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutEdgesClass {
    HashMap,
    ArrayList,
    LongDoubleHashMap,
    LongDoubleArray,
}

impl OutEdgesClass {
    pub fn select(strict: bool, primitive: bool) -> Self {
        match (strict, primitive) {
            (true, false) => OutEdgesClass::HashMap,
            (false, false) => OutEdgesClass::ArrayList,
            (true, true) => OutEdgesClass::LongDoubleHashMap,
            (false, true) => OutEdgesClass::LongDoubleArray,
        }
    }

    pub fn is_strict(self) -> bool {
        matches!(
            self,
            OutEdgesClass::HashMap | OutEdgesClass::LongDoubleHashMap
        )
    }

    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            OutEdgesClass::LongDoubleHashMap | OutEdgesClass::LongDoubleArray
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            OutEdgesClass::HashMap => "hash_map",
            OutEdgesClass::ArrayList => "array_list",
            OutEdgesClass::LongDoubleHashMap => "long_double_hash_map",
            OutEdgesClass::LongDoubleArray => "long_double_array",
        }
    }

    /// Reads the class from `geaflow.edges.class`, or derives it from the
    /// strict/primitive flags when no class is named.
    pub fn from_config(conf: &Configuration) -> GeaFlowResult<Self> {
        match conf.get(EDGES_CLASS_KEY) {
            Some(name) => name.parse(),
            None => Ok(Self::select(
                conf.get_bool(EDGES_STRICT_KEY, true)?,
                conf.get_bool(EDGES_PRIMITIVE_KEY, false)?,
            )),
        }
    }
}

impl fmt::Display for OutEdgesClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutEdgesClass {
    type Err = GeaFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hash_map" => Ok(OutEdgesClass::HashMap),
            "array_list" => Ok(OutEdgesClass::ArrayList),
            "long_double_hash_map" => Ok(OutEdgesClass::LongDoubleHashMap),
            "long_double_array" => Ok(OutEdgesClass::LongDoubleArray),
            other => Err(GeaFlowError::Config(format!(
                "{EDGES_CLASS_KEY}: unknown out-edges class {other:?}"
            ))),
        }
    }
}

type Ctor<K, EV> = fn() -> Box<dyn OutEdges<K, EV>>;
type StrictCtor<K, EV> = fn() -> Box<dyn StrictRandomAccessOutEdges<K, EV>>;

/// Creates the out-edges store chosen for a graph.
///
/// The class is resolved once, against the graph's id and payload types; a
/// primitive class requested for any types other than `(i64, f64)` is
/// rejected here rather than when a vertex is loaded.
pub struct OutEdgesFactory<K, EV> {
    class: OutEdgesClass,
    ctor: Ctor<K, EV>,
    strict_ctor: Option<StrictCtor<K, EV>>,
    _marker: PhantomData<fn() -> (K, EV)>,
}

impl<K, EV> Clone for OutEdgesFactory<K, EV> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, EV> Copy for OutEdgesFactory<K, EV> {}

impl<K, EV> fmt::Debug for OutEdgesFactory<K, EV> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutEdgesFactory")
            .field("class", &self.class)
            .finish()
    }
}

fn hash_map_edges<K, EV>() -> Box<dyn OutEdges<K, EV>>
where
    K: Hash + Eq + Send + 'static,
    EV: Send + 'static,
{
    Box::new(HashMapEdges::new())
}

fn strict_hash_map_edges<K, EV>() -> Box<dyn StrictRandomAccessOutEdges<K, EV>>
where
    K: Hash + Eq + Send + 'static,
    EV: Send + 'static,
{
    Box::new(HashMapEdges::new())
}

fn array_list_edges<K, EV>() -> Box<dyn OutEdges<K, EV>>
where
    K: PartialEq + Send + 'static,
    EV: Send + 'static,
{
    Box::new(ArrayListEdges::new())
}

fn long_double_hash_map_edges() -> Box<dyn OutEdges<i64, f64>> {
    Box::new(LongDoubleHashMapEdges::new())
}

fn strict_long_double_hash_map_edges() -> Box<dyn StrictRandomAccessOutEdges<i64, f64>> {
    Box::new(LongDoubleHashMapEdges::new())
}

fn long_double_array_edges() -> Box<dyn OutEdges<i64, f64>> {
    Box::new(LongDoubleArrayEdges::new())
}

/// Reinterprets a constructor for `(i64, f64)` stores as one for `(K, EV)`.
/// Yields `None` unless the two are the same types.
fn cast_ctor<F: 'static, T: 'static>(f: F) -> Option<T> {
    let boxed: Box<dyn Any> = Box::new(f);
    boxed.downcast::<T>().ok().map(|b| *b)
}

fn type_mismatch<K, EV>(class: OutEdgesClass) -> GeaFlowError {
    GeaFlowError::TypeMismatch(format!(
        "out-edges class {class} requires i64 targets and f64 values, got ({}, {})",
        std::any::type_name::<K>(),
        std::any::type_name::<EV>()
    ))
}

impl<K, EV> OutEdgesFactory<K, EV>
where
    K: Hash + Eq + Send + 'static,
    EV: Send + 'static,
{
    pub fn new(class: OutEdgesClass) -> GeaFlowResult<Self> {
        let (ctor, strict_ctor): (Ctor<K, EV>, Option<StrictCtor<K, EV>>) = match class {
            OutEdgesClass::HashMap => (
                hash_map_edges::<K, EV> as Ctor<K, EV>,
                Some(strict_hash_map_edges::<K, EV> as StrictCtor<K, EV>),
            ),
            OutEdgesClass::ArrayList => (array_list_edges::<K, EV> as Ctor<K, EV>, None),
            OutEdgesClass::LongDoubleHashMap => {
                let ctor = cast_ctor::<Ctor<i64, f64>, Ctor<K, EV>>(long_double_hash_map_edges);
                let strict_ctor = cast_ctor::<StrictCtor<i64, f64>, StrictCtor<K, EV>>(
                    strict_long_double_hash_map_edges,
                );
                match (ctor, strict_ctor) {
                    (Some(ctor), Some(strict_ctor)) => (ctor, Some(strict_ctor)),
                    _ => return Err(type_mismatch::<K, EV>(class)),
                }
            }
            OutEdgesClass::LongDoubleArray => {
                let ctor = cast_ctor::<Ctor<i64, f64>, Ctor<K, EV>>(long_double_array_edges)
                    .ok_or_else(|| type_mismatch::<K, EV>(class))?;
                (ctor, None)
            }
        };
        debug!(class = class.name(), "resolved out-edges class");
        Ok(Self {
            class,
            ctor,
            strict_ctor,
            _marker: PhantomData,
        })
    }

    pub fn from_config(conf: &Configuration) -> GeaFlowResult<Self> {
        Self::new(OutEdgesClass::from_config(conf)?)
    }
}

impl<K, EV> OutEdgesFactory<K, EV> {
    pub fn class(&self) -> OutEdgesClass {
        self.class
    }

    /// A fresh, empty store.
    pub fn create(&self) -> Box<dyn OutEdges<K, EV>> {
        (self.ctor)()
    }

    /// A fresh, empty store with point lookups. Fails for permissive classes.
    pub fn create_strict(&self) -> GeaFlowResult<Box<dyn StrictRandomAccessOutEdges<K, EV>>> {
        match self.strict_ctor {
            Some(ctor) => Ok(ctor()),
            None => Err(GeaFlowError::InvalidArgument(format!(
                "out-edges class {} allows parallel edges and has no random access",
                self.class
            ))),
        }
    }
}

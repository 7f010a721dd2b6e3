use bytes::BufMut;
use geaflow_common::error::GeaFlowError;
use geaflow_edges::io::{
    deserialize_out_edges, read_out_edges, serialize_out_edges, write_out_edges, Bincoded,
};
use geaflow_edges::{
    ArrayListEdges, Edge, HashMapEdges, LongDoubleHashMapEdges, OutEdges, OutEdgesClass,
    OutEdgesFactory,
};
use serde::{Deserialize, Serialize};

const CLASSES: [OutEdgesClass; 4] = [
    OutEdgesClass::HashMap,
    OutEdgesClass::ArrayList,
    OutEdgesClass::LongDoubleHashMap,
    OutEdgesClass::LongDoubleArray,
];

fn sorted_pairs(edges: &dyn OutEdges<i64, f64>) -> Vec<(i64, f64)> {
    let mut out: Vec<(i64, f64)> = edges
        .iter()
        .map(|e| (*e.target_id(), *e.value()))
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
    out
}

#[test]
fn test_record_layout() {
    let mut edges = ArrayListEdges::<i64, f64>::new();
    edges.add(Edge::new(1, 2.5));
    edges.add(Edge::new(-1, 0.0));

    let bytes = serialize_out_edges::<i64, f64>(&edges).unwrap();

    let mut expected = Vec::new();
    expected.put_u32(2);
    expected.put_i64(1);
    expected.put_f64(2.5);
    expected.put_i64(-1);
    expected.put_f64(0.0);
    assert_eq!(&bytes[..], expected.as_slice());
}

#[test]
fn test_round_trip_every_class() {
    let input = vec![
        Edge::new(1, 1.0),
        Edge::new(2, 2.0),
        Edge::new(3, 3.0),
        Edge::new(2, 20.0),
        Edge::new(-7, f64::MAX),
    ];
    for class in CLASSES {
        let factory = OutEdgesFactory::<i64, f64>::new(class).unwrap();
        let mut edges = factory.create();
        edges.initialize(&mut input.clone().into_iter());

        let bytes = serialize_out_edges(&*edges).unwrap();
        let restored = deserialize_out_edges(&factory, &bytes).unwrap();

        assert_eq!(restored.size(), edges.size(), "{class}");
        assert_eq!(
            sorted_pairs(&*restored),
            sorted_pairs(&*edges),
            "{class}"
        );
    }
}

#[test]
fn test_strict_decode_deduplicates() {
    let mut multiset = ArrayListEdges::<i64, f64>::new();
    multiset.initialize(&mut vec![Edge::new(5, 1.0), Edge::new(5, 2.0)].into_iter());
    let bytes = serialize_out_edges::<i64, f64>(&multiset).unwrap();

    let factory = OutEdgesFactory::<i64, f64>::new(OutEdgesClass::LongDoubleHashMap).unwrap();
    let strict = deserialize_out_edges(&factory, &bytes).unwrap();
    assert_eq!(sorted_pairs(&*strict), vec![(5, 2.0)]);
}

#[test]
fn test_empty_store() {
    let edges = LongDoubleHashMapEdges::new();
    let bytes = serialize_out_edges::<i64, f64>(&edges).unwrap();
    assert_eq!(&bytes[..], &[0u8, 0, 0, 0]);

    let factory = OutEdgesFactory::<i64, f64>::new(OutEdgesClass::LongDoubleHashMap).unwrap();
    let restored = deserialize_out_edges(&factory, &bytes).unwrap();
    assert!(restored.is_empty());
}

#[test]
fn test_truncated_record_is_rejected() {
    let mut edges = HashMapEdges::<i64, f64>::new();
    edges.initialize(&mut (0..4).map(|i| Edge::new(i, 0.5)));
    let bytes = serialize_out_edges::<i64, f64>(&edges).unwrap();

    let factory = OutEdgesFactory::<i64, f64>::new(OutEdgesClass::HashMap).unwrap();
    for cut in [0, 3, 4, 11, bytes.len() - 1] {
        let err = deserialize_out_edges(&factory, &bytes[..cut]).err().unwrap();
        assert!(matches!(err, GeaFlowError::Decode(_)), "cut at {cut}: {err}");
    }
}

#[test]
fn test_oversized_count_is_rejected_before_allocation() {
    let mut bytes = Vec::new();
    bytes.put_u32(u32::MAX);
    bytes.put_i64(1);
    bytes.put_f64(1.0);

    let factory = OutEdgesFactory::<i64, f64>::new(OutEdgesClass::LongDoubleArray).unwrap();
    let err = deserialize_out_edges(&factory, &bytes).err().unwrap();
    assert!(matches!(err, GeaFlowError::Decode(_)), "{err}");
}

#[test]
fn test_trailing_bytes_are_rejected() {
    let edges = ArrayListEdges::<i64, f64>::new();
    let mut bytes = serialize_out_edges::<i64, f64>(&edges).unwrap().to_vec();
    bytes.push(0xff);

    let factory = OutEdgesFactory::<i64, f64>::new(OutEdgesClass::ArrayList).unwrap();
    let err = deserialize_out_edges(&factory, &bytes).err().unwrap();
    assert!(matches!(err, GeaFlowError::Decode(_)), "{err}");
}

#[test]
fn test_failed_read_leaves_store_empty() {
    // Second edge's string claims 50 bytes that are not there.
    let mut record = Vec::new();
    record.put_u32(2);
    record.put_u32(1);
    record.put_u32(0);
    record.put_u32(2);
    record.put_u32(50);

    let mut edges = ArrayListEdges::<u32, String>::new();
    edges.add(Edge::new(100, "old".to_string()));
    let err = read_out_edges::<u32, String, _>(&mut edges, &mut record.as_slice())
        .err()
        .unwrap();
    assert!(matches!(err, GeaFlowError::Decode(_)), "{err}");
    assert!(edges.is_empty());
    assert_eq!(edges.iter().count(), 0);
}

#[test]
fn test_records_back_to_back() {
    let mut first = ArrayListEdges::<u32, String>::new();
    first.add(Edge::new(1, "a".to_string()));
    first.add(Edge::new(1, "bb".to_string()));
    let mut second = ArrayListEdges::<u32, String>::new();
    second.add(Edge::new(9, String::new()));

    let mut stream = Vec::new();
    write_out_edges::<u32, String, _>(&first, &mut stream).unwrap();
    write_out_edges::<u32, String, _>(&second, &mut stream).unwrap();

    let mut buf = stream.as_slice();
    let mut decoded = ArrayListEdges::<u32, String>::new();
    read_out_edges::<u32, String, _>(&mut decoded, &mut buf).unwrap();
    let got: Vec<Edge<u32, String>> = decoded.iter().map(|e| e.to_edge()).collect();
    assert_eq!(
        got,
        vec![Edge::new(1, "a".to_string()), Edge::new(1, "bb".to_string())]
    );

    read_out_edges::<u32, String, _>(&mut decoded, &mut buf).unwrap();
    assert_eq!(decoded.size(), 1);
    assert!(buf.is_empty());
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Weight {
    label: String,
    cost: u16,
}

#[test]
fn test_bincoded_payloads() {
    let factory = OutEdgesFactory::<u64, Bincoded<Weight>>::new(OutEdgesClass::HashMap).unwrap();
    let mut edges = factory.create();
    edges.add(Edge::new(
        3,
        Bincoded(Weight {
            label: "road".to_string(),
            cost: 12,
        }),
    ));
    edges.add(Edge::new(
        4,
        Bincoded(Weight {
            label: "rail".to_string(),
            cost: 40,
        }),
    ));

    let bytes = serialize_out_edges(&*edges).unwrap();
    let restored = deserialize_out_edges(&factory, &bytes).unwrap();
    let mut got: Vec<(u64, Weight)> = restored
        .iter()
        .map(|e| (*e.target_id(), e.value().clone().into_inner()))
        .collect();
    got.sort_by_key(|(t, _)| *t);
    assert_eq!(got[0].1.label, "road");
    assert_eq!(got[1].1.cost, 40);
}

#[test]
fn test_unweighted_edges_round_trip() {
    let factory = OutEdgesFactory::<i32, ()>::new(OutEdgesClass::ArrayList).unwrap();
    let mut edges = factory.create();
    edges.initialize(&mut [1, 1, 2].into_iter().map(|t| Edge::new(t, ())));

    let bytes = serialize_out_edges(&*edges).unwrap();
    assert_eq!(bytes.len(), 4 + 3 * 4);
    let restored = deserialize_out_edges(&factory, &bytes).unwrap();
    assert_eq!(restored.size(), 3);
}

//! Property-based tests for the round-trip guarantee: any tree the
//! serializer writes parses back to an equal tree.

use proptest::prelude::*;
use toml_tree::{
    from_str, to_string, to_string_with_options, Array, Datetime, FormatOptions, Table, Value,
};

fn roundtrip(table: &Table, options: &FormatOptions) -> bool {
    let serialized = to_string_with_options(table, options);
    match from_str(&serialized) {
        Ok(parsed) => {
            if parsed != *table {
                eprintln!("Mismatch after reparse of:\n{}", serialized);
                return false;
            }
            true
        }
        Err(e) => {
            eprintln!("Parse failed: {}", e);
            eprintln!("Serialized was:\n{}", serialized);
            false
        }
    }
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_-]{0,6}",
        any::<String>(),
        Just(String::new()),
        Just("a.b".to_string()),
    ]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(Value::String),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("nan never compares equal", |f| !f.is_nan())
            .prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
        prop::sample::select(vec![
            "1979-05-27T07:32:00Z",
            "1979-05-27 00:32:00.999999-07:00",
            "1979-05-27T07:32:00",
            "1979-05-27",
            "07:32:00",
        ])
        .prop_map(|s| Value::Datetime(Datetime::parse(s).unwrap())),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|v| Value::Array(Array::from(v))),
            prop::collection::vec((key(), inner), 0..6)
                .prop_map(|entries| Value::Table(entries.into_iter().collect())),
        ]
    })
}

fn document() -> impl Strategy<Value = Table> {
    prop::collection::vec((key(), value()), 0..8).prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_document_roundtrip(doc in document()) {
        prop_assert!(roundtrip(&doc, &FormatOptions::new()));
    }

    #[test]
    fn prop_pretty_document_roundtrip(doc in document(), width in 0usize..4) {
        let options = FormatOptions::pretty().with_array_width(width);
        prop_assert!(roundtrip(&doc, &options));
    }

    #[test]
    fn prop_string_roundtrip(s in any::<String>()) {
        let mut doc = Table::new();
        doc.set(s.clone(), Value::String(s.clone()));
        let parsed = from_str(&to_string(&doc)).unwrap();
        prop_assert_eq!(parsed.get(&s).and_then(|v| v.as_str()), Some(s.as_str()));
    }

    #[test]
    fn prop_float_text_reads_back_exactly(
        f in any::<f64>().prop_filter("finite", |f| f.is_finite())
    ) {
        let mut doc = Table::new();
        doc.set("f", Value::Float(f));
        let parsed = from_str(&to_string(&doc)).unwrap();
        prop_assert_eq!(parsed.get("f").and_then(|v| v.as_float()), Some(f));
    }

    #[test]
    fn prop_parser_never_panics(input in "\\PC{0,64}") {
        let _ = from_str(&input);
    }
}

// tests/transform_tests.rs

use chrono::{FixedOffset, NaiveDate, TimeZone};
use cql_template::transform::{self, TransformError};
use cql_template::{BindValue, Category, parse};
use rust_decimal::Decimal;

// ============================================================================
// Placeholder substitution
// ============================================================================

#[test]
fn test_replace_by_position() {
    let mut root = parse("INSERT INTO test (age,year,day) VALUES (?,?,?)").unwrap();
    transform::replace(&mut root, Category::PlaceholderInject, 5, 2).unwrap();
    transform::replace(&mut root, Category::PlaceholderInject, 2016, 1).unwrap();
    transform::replace(&mut root, Category::PlaceholderInject, 33, 0).unwrap();
    assert_eq!(
        root.to_string(),
        "INSERT INTO test (age,year,day) VALUES (33,2016,5)"
    );
}

#[test]
fn test_index_is_recomputed_per_call() {
    let mut root = parse("INSERT INTO test (age,year,day) VALUES (?,?,?)").unwrap();
    for value in [1, 2, 3] {
        transform::replace(&mut root, Category::PlaceholderInject, value, 0).unwrap();
    }
    assert_eq!(root.to_string(), "INSERT INTO test (age,year,day) VALUES (1,2,3)");
}

#[test]
fn test_replaced_placeholder_becomes_literal() {
    let mut root = parse("INSERT INTO t (a) VALUES (?)").unwrap();
    transform::replace(&mut root, Category::PlaceholderInject, 5, 0).unwrap();

    assert_eq!(transform::count(&root, Category::PlaceholderInject), 0);
    assert_eq!(transform::count(&root, Category::Literal), 1);
    let literal = transform::find(&root, Category::Literal, 0).unwrap();
    assert!(literal.is_rewritten());
    assert_eq!(literal.text(), "5");

    // a rewritten node cannot be selected again
    assert_eq!(transform::remaining(&root, Category::Literal), 0);
    assert_eq!(
        transform::replace_with(&mut root, Category::Literal, 0, |t| t.push('0')),
        Err(TransformError::NoMatch {
            category: Category::Literal
        })
    );
}

#[test]
fn test_value_rendering() {
    let cases: Vec<(BindValue, &str)> = vec![
        (BindValue::Null, "NULL"),
        (None::<&str>.into(), "NULL"),
        (Some(7).into(), "7"),
        (true.into(), "true"),
        (1.0f64.into(), "1.0"),
        (2.5f32.into(), "2.5"),
        (Decimal::new(1050, 2).into(), "10.50"),
        ("o'brien".into(), "'o''brien'"),
        (String::new().into(), "''"),
        (f64::NAN.into(), "NaN"),
        (f64::NEG_INFINITY.into(), "-Infinity"),
    ];
    for (value, expected) in cases {
        let mut root = parse("UPDATE t SET v = ? WHERE k = 1").unwrap();
        transform::replace(&mut root, Category::PlaceholderInject, value.clone(), 0).unwrap();
        assert_eq!(
            root.to_string(),
            format!("UPDATE t SET v = {} WHERE k = 1", expected),
            "Failed for value: {:?}",
            value
        );
    }
}

#[test]
fn test_wide_integers() {
    let mut root = parse("INSERT INTO t (a, b, c) VALUES (?, ?, ?)").unwrap();
    transform::bind(
        &mut root,
        [BindValue::from(5usize), BindValue::from(u64::MAX), BindValue::from(-3isize)],
    )
    .unwrap();
    assert_eq!(
        root.to_string(),
        "INSERT INTO t (a, b, c) VALUES (5, 18446744073709551615, -3)"
    );
    assert_eq!(BindValue::from(7u64), BindValue::Integer(7));
}

#[test]
fn test_timestamp_rendered_in_utc() {
    let offset = FixedOffset::east_opt(3600).unwrap();
    let when = offset.with_ymd_and_hms(2016, 3, 1, 12, 0, 0).unwrap();

    let mut root = parse("INSERT INTO t (at) VALUES (?)").unwrap();
    transform::replace(&mut root, Category::PlaceholderInject, when, 0).unwrap();
    assert_eq!(
        root.to_string(),
        "INSERT INTO t (at) VALUES ('2016-03-01 11:00:00+0000')"
    );

    let naive = NaiveDate::from_ymd_opt(2016, 3, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    assert_eq!(BindValue::from(naive).to_literal(), "'2016-03-01 08:30:00+0000'");
}

// ============================================================================
// Mutator rewrites
// ============================================================================

#[test]
fn test_quote_all_field_names() {
    let mut root = parse("INSERT INTO test (age,year,day) VALUES (?,?,?)").unwrap();
    let rewritten = transform::replace_all(&mut root, Category::FieldName, |text| {
        *text = format!("'{}'", text);
    })
    .unwrap();

    assert_eq!(rewritten, 3);
    assert_eq!(
        root.to_string(),
        "INSERT INTO test ('age','year','day') VALUES (?,?,?)"
    );
    // categories survive a mutator rewrite
    assert_eq!(transform::count(&root, Category::FieldName), 3);
    assert_eq!(transform::remaining(&root, Category::FieldName), 0);
    assert_eq!(
        transform::replace_all(&mut root, Category::FieldName, |_| {}),
        Err(TransformError::NoMatch {
            category: Category::FieldName
        })
    );
}

#[test]
fn test_quote_keyword_named_columns() {
    let mut root = parse("CREATE TABLE t (key int PRIMARY KEY, ttl int, timestamp text)").unwrap();
    let rewritten = transform::replace_all(&mut root, Category::FieldName, |text| {
        *text = format!("\"{}\"", text);
    })
    .unwrap();

    assert_eq!(rewritten, 3);
    assert_eq!(
        root.to_string(),
        "CREATE TABLE t (\"key\" int PRIMARY KEY, \"ttl\" int, \"timestamp\" text)"
    );
}

#[test]
fn test_replace_with_sees_current_text() {
    let mut root = parse("SELECT name FROM users").unwrap();
    transform::replace_with(&mut root, Category::TableName, 0, |text| {
        assert_eq!(text.as_str(), "users");
        text.insert_str(0, "ks.");
    })
    .unwrap();
    assert_eq!(root.to_string(), "SELECT name FROM ks.users");

    let table = transform::find(&root, Category::TableName, 0).unwrap();
    assert_eq!(table.category(), Category::TableName);
    assert_eq!(table.matched(), "users");
    assert_eq!(table.text(), "ks.users");
}

#[test]
fn test_rewritten_subtree_hides_placeholders() {
    let mut root = parse("UPDATE t SET m = {'a': ?} WHERE id = ?").unwrap();
    assert_eq!(transform::remaining(&root, Category::PlaceholderInject), 2);

    transform::replace_with(&mut root, Category::MapLiteral, 0, |text| {
        *text = "{}".to_string();
    })
    .unwrap();
    assert_eq!(transform::remaining(&root, Category::PlaceholderInject), 1);
    assert_eq!(transform::count(&root, Category::PlaceholderInject), 2);

    transform::bind(&mut root, [7]).unwrap();
    assert_eq!(root.to_string(), "UPDATE t SET m = {} WHERE id = 7");
}

#[test]
fn test_placeholders_inside_collections() {
    let mut root = parse("INSERT INTO t (a, b) VALUES ([1, ?], {'k': ?})").unwrap();
    transform::bind(&mut root, [BindValue::from(5), "x".into()]).unwrap();
    assert_eq!(
        root.to_string(),
        "INSERT INTO t (a, b) VALUES ([1, 5], {'k': 'x'})"
    );
}

// ============================================================================
// Failures leave the tree alone
// ============================================================================

#[test]
fn test_index_out_of_range() {
    let input = "INSERT INTO test (age,year,day) VALUES (?,?,?)";
    let mut root = parse(input).unwrap();
    let err = transform::replace(&mut root, Category::PlaceholderInject, 1, 3).unwrap_err();
    assert_eq!(
        err,
        TransformError::IndexOutOfRange {
            category: Category::PlaceholderInject,
            index: 3,
            available: 3,
        }
    );
    assert_eq!(root.to_string(), input);
}

#[test]
fn test_no_match() {
    let input = "SELECT a FROM t";
    let mut root = parse(input).unwrap();
    let err = transform::replace(&mut root, Category::PlaceholderInject, 1, 0).unwrap_err();
    assert_eq!(
        err,
        TransformError::NoMatch {
            category: Category::PlaceholderInject
        }
    );
    assert_eq!(err.to_string(), "no placeholder-inject left to rewrite");
    assert_eq!(root.to_string(), input);
}

#[test]
fn test_bind_arity() {
    let input = "INSERT INTO test (age,year,day) VALUES (?,?,?)";
    let mut root = parse(input).unwrap();

    assert_eq!(
        transform::bind(&mut root, [1, 2]),
        Err(TransformError::TooFewValues {
            expected: 3,
            supplied: 2
        })
    );
    assert_eq!(
        transform::bind(&mut root, [1, 2, 3, 4]),
        Err(TransformError::TooManyValues {
            expected: 3,
            supplied: 4
        })
    );
    assert_eq!(root.to_string(), input);

    assert_eq!(transform::bind(&mut root, [1, 2, 3]), Ok(3));
    assert_eq!(root.to_string(), "INSERT INTO test (age,year,day) VALUES (1,2,3)");
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_find_and_nodes() {
    let root = parse("SELECT a, b FROM t WHERE a = ? AND b = ?").unwrap();
    assert!(transform::find(&root, Category::PlaceholderInject, 1).is_some());
    assert!(transform::find(&root, Category::PlaceholderInject, 2).is_none());

    let names: Vec<&str> = transform::nodes(&root, Category::ItemNameCaseInsensitive)
        .iter()
        .map(|n| n.matched())
        .collect();
    assert_eq!(names, vec!["a", "b", "t", "a", "b"]);
}

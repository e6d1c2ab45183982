use cql_template::cli::{
    self, BindOptions, CheckOptions, CliError, CountOptions, TreeOptions, parse_value,
};
use cql_template::{BindValue, Category, ParseError, ParserOptions, output, parse, transform};
use serde_json::Value;

fn bind(query: &str, values: &[&str], text: bool) -> Result<String, CliError> {
    cli::execute_bind(&BindOptions {
        query: query.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
        text,
        parser: ParserOptions::default(),
    })
}

// ============================================================================
// check / count / tree
// ============================================================================

#[test]
fn test_check_reports_placeholders() {
    let options = CheckOptions {
        query: "SELECT a FROM t WHERE a = ? AND b = ?".to_string(),
        ..Default::default()
    };
    assert_eq!(cli::execute_check(&options).unwrap(), 2);
}

#[test]
fn test_check_rejects_invalid_query() {
    let options = CheckOptions {
        query: "SELECT a FROM t WHERE".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        cli::execute_check(&options),
        Err(CliError::Parse(ParseError::Expected { .. }))
    ));
}

#[test]
fn test_check_honors_depth_limit() {
    let options = CheckOptions {
        query: "SELECT a FROM t".to_string(),
        parser: ParserOptions { max_depth: 1 },
    };
    assert!(matches!(
        cli::execute_check(&options),
        Err(CliError::Parse(ParseError::TooDeep { limit: 1, .. }))
    ));
}

#[test]
fn test_count_by_category_name() {
    for name in ["placeholder-inject", "placeholder_inject", " PLACEHOLDER-INJECT "] {
        let options = CountOptions {
            query: "INSERT INTO test (age,year,day) VALUES (?,?,?)".to_string(),
            category: name.to_string(),
            ..Default::default()
        };
        assert_eq!(cli::execute_count(&options).unwrap(), 3, "Failed for input: {}", name);
    }
}

#[test]
fn test_count_unknown_category() {
    let options = CountOptions {
        query: "SELECT a".to_string(),
        category: "column".to_string(),
        ..Default::default()
    };
    let err = cli::execute_count(&options).unwrap_err();
    assert!(matches!(err, CliError::Category(_)));
}

#[test]
fn test_tree_json() {
    let options = TreeOptions {
        query: "SELECT a".to_string(),
        ..Default::default()
    };
    let json: Value = serde_json::from_str(&cli::execute_tree(&options).unwrap()).unwrap();
    assert_eq!(json["category"], "statement");
    assert_eq!(json["text"], "SELECT a");
    assert_eq!(json["children"][0]["category"], "command");
    assert_eq!(json["children"][0]["children"][0]["category"], "reserved-word-sequence");
    assert_eq!(json["children"][0]["children"][2]["category"], "field-name");
}

#[test]
fn test_tree_pretty() {
    let options = TreeOptions {
        query: "SELECT a".to_string(),
        pretty: true,
        ..Default::default()
    };
    let output = cli::execute_tree(&options).unwrap();
    assert!(output.starts_with("{\n  \""));
}

// ============================================================================
// bind
// ============================================================================

#[test]
fn test_bind_typed_values() {
    let output = bind(
        "INSERT INTO t (a,b,c,d,e,f) VALUES (?,?,?,?,?,?)",
        &["7", "o'brien", "null", "TRUE", "1.5", "2016-03-01T12:00:00+01:00"],
        false,
    )
    .unwrap();
    assert_eq!(
        output,
        "INSERT INTO t (a,b,c,d,e,f) VALUES (7,'o''brien',NULL,true,1.5,'2016-03-01 11:00:00+0000')"
    );
}

#[test]
fn test_bind_as_text() {
    let output = bind("UPDATE t SET a = ? WHERE k = ?", &["7", "null"], true).unwrap();
    assert_eq!(output, "UPDATE t SET a = '7' WHERE k = 'null'");
}

#[test]
fn test_bind_arity_error() {
    let err = bind("UPDATE t SET a = ? WHERE k = ?", &["1"], false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Rewrite error: 2 placeholder(s) to bind but only 1 value(s) supplied"
    );
}

#[test]
fn test_parse_value_shapes() {
    assert_eq!(parse_value("null", false), BindValue::Null);
    assert_eq!(parse_value("false", false), BindValue::Boolean(false));
    assert_eq!(parse_value("-12", false), BindValue::Integer(-12));
    assert!(matches!(parse_value("3.25", false), BindValue::Decimal(_)));
    assert!(matches!(
        parse_value("2016-03-01T12:00:00Z", false),
        BindValue::Timestamp(_)
    ));
    assert_eq!(parse_value("2016-03-01", false), BindValue::Text("2016-03-01".to_string()));
    assert_eq!(parse_value("abc", false), BindValue::Text("abc".to_string()));
}

#[test]
fn test_no_query_message() {
    assert_eq!(
        CliError::NoQuery.to_string(),
        "No query provided. Pass it as an argument or pipe it to stdin."
    );
}

// ============================================================================
// JSON output
// ============================================================================

#[test]
fn test_json_marks_rewrites() {
    let mut root = parse("INSERT INTO t (a) VALUES (?)").unwrap();
    transform::replace(&mut root, Category::PlaceholderInject, "x", 0).unwrap();

    let json = output::to_json(&root);
    assert_eq!(json["text"], "INSERT INTO t (a) VALUES ('x')");

    let literal = transform::find(&root, Category::Literal, 0).unwrap();
    let literal = output::to_json(literal);
    assert_eq!(literal["category"], "literal");
    assert_eq!(literal["rewritten"], true);
    assert_eq!(literal["text"], "'x'");
    assert!(literal.get("children").is_none());
}

#[test]
fn test_json_leaves_have_no_children() {
    let root = parse("SELECT a").unwrap();
    let json = output::to_json(&root);
    let words = &json["children"][0]["children"][0];
    assert_eq!(words["children"][0]["category"], "reserved-word");
    assert!(words["children"][0].get("children").is_none());
    assert!(json.get("rewritten").is_none());
}

//! End-to-end SQL round trips through the full text → parse → execute path.

use rowdb::{
    EngineError, ExecutionResult, ParseError, QueryProcessor, QueryResult, StorageManager, Value,
};

fn new_processor() -> QueryProcessor {
    QueryProcessor::new(StorageManager::new())
}

fn rows(result: ExecutionResult) -> QueryResult {
    match result {
        ExecutionResult::Rows(rows) => rows,
        other => panic!("expected a result set, got {other:?}"),
    }
}

#[test]
fn create_insert_select_round_trip() {
    let mut processor = new_processor();

    processor
        .run("CREATE TABLE users (id INT NOT NULL UNIQUE, name VARCHAR)")
        .unwrap();
    processor
        .run("INSERT INTO users VALUES (1, 'Alice')")
        .unwrap();
    processor
        .run("INSERT INTO users VALUES (2, 'Bob')")
        .unwrap();

    let result = rows(processor.run("SELECT * FROM users").unwrap());
    assert_eq!(result.schema.column_names(), vec!["id", "name"]);
    assert_eq!(result.row_count(), 2);
    assert_eq!(
        result.rows[0].values(),
        &[Value::Int(1), Value::Text("Alice".into())]
    );
    assert_eq!(
        result.rows[1].values(),
        &[Value::Int(2), Value::Text("Bob".into())]
    );
}

#[test]
fn insertion_order_is_preserved_across_many_rows() {
    let mut processor = new_processor();
    processor.run("CREATE TABLE seq (n INT)").unwrap();

    for n in 0..50 {
        processor
            .run(&format!("INSERT INTO seq VALUES ({n})"))
            .unwrap();
    }

    let result = rows(processor.run("SELECT n FROM seq").unwrap());
    assert_eq!(result.row_count(), 50);
    for (n, row) in result.rows.iter().enumerate() {
        assert_eq!(row.values(), &[Value::Int(n as i64)]);
    }
}

#[test]
fn duplicate_unique_value_is_rejected_and_table_unchanged() {
    let mut processor = new_processor();
    processor
        .run("CREATE TABLE users (id INT NOT NULL UNIQUE, name VARCHAR)")
        .unwrap();
    processor
        .run("INSERT INTO users VALUES (1, 'Alice')")
        .unwrap();

    let result = processor.run("INSERT INTO users VALUES (1, 'Bob')");
    assert_eq!(
        result,
        Err(EngineError::UniqueConstraintViolation {
            column: "id".into(),
            value: Value::Int(1),
        })
    );

    let remaining = rows(processor.run("SELECT name FROM users").unwrap());
    assert_eq!(remaining.row_count(), 1);
    assert_eq!(remaining.rows[0].values(), &[Value::Text("Alice".into())]);
}

#[test]
fn where_equality_projects_requested_column() {
    let mut processor = new_processor();
    processor
        .run("CREATE TABLE users (id INT NOT NULL UNIQUE, name VARCHAR)")
        .unwrap();
    processor
        .run("INSERT INTO users VALUES (1, 'Alice')")
        .unwrap();
    processor
        .run("INSERT INTO users VALUES (2, 'Bob')")
        .unwrap();

    let result = rows(processor.run("SELECT name FROM users WHERE id = 1").unwrap());
    assert_eq!(result.schema.column_names(), vec!["name"]);
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.rows[0].values(), &[Value::Text("Alice".into())]);
}

#[test]
fn arity_mismatch_fails_before_any_mutation() {
    let mut processor = new_processor();
    processor
        .run("CREATE TABLE users (id INT NOT NULL UNIQUE, name VARCHAR)")
        .unwrap();

    let result = processor.run("INSERT INTO users VALUES (1)");
    assert_eq!(
        result,
        Err(EngineError::ArityMismatch { expected: 2, got: 1 })
    );

    let table = processor.storage().get_table("users").unwrap();
    assert_eq!(table.row_count(), 0);
}

#[test]
fn select_from_missing_table_fails_without_partial_result() {
    let mut processor = new_processor();

    let result = processor.run("SELECT * FROM missing_table");
    assert_eq!(
        result,
        Err(EngineError::TableNotFound {
            name: "missing_table".into()
        })
    );
}

#[test]
fn not_null_violation_through_sql() {
    let mut processor = new_processor();
    processor
        .run("CREATE TABLE users (id INT NOT NULL, name VARCHAR)")
        .unwrap();

    let result = processor.run("INSERT INTO users VALUES (NULL, 'Alice')");
    assert_eq!(
        result,
        Err(EngineError::NullConstraintViolation { column: "id".into() })
    );
}

#[test]
fn varchar_length_is_enforced() {
    let mut processor = new_processor();
    processor.run("CREATE TABLE codes (code VARCHAR(3))").unwrap();

    processor.run("INSERT INTO codes VALUES ('abc')").unwrap();
    let result = processor.run("INSERT INTO codes VALUES ('abcd')");

    assert!(matches!(result, Err(EngineError::TypeMismatch { .. })));
    let table = processor.storage().get_table("codes").unwrap();
    assert_eq!(table.row_count(), 1);
}

#[test]
fn float_columns_accept_integer_literals_everywhere() {
    let mut processor = new_processor();
    processor.run("CREATE TABLE prices (amount FLOAT)").unwrap();
    processor.run("INSERT INTO prices VALUES (2)").unwrap();
    processor.run("INSERT INTO prices VALUES (2.5)").unwrap();

    // Integer literal in the predicate too: numeric comparison.
    let result = rows(
        processor
            .run("SELECT amount FROM prices WHERE amount > 2")
            .unwrap(),
    );
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.rows[0].values(), &[Value::Float(2.5)]);
}

#[test]
fn null_comparisons_never_match() {
    let mut processor = new_processor();
    processor
        .run("CREATE TABLE people (id INT, age INT)")
        .unwrap();
    processor.run("INSERT INTO people VALUES (1, NULL)").unwrap();
    processor.run("INSERT INTO people VALUES (2, 25)").unwrap();

    let result = rows(
        processor
            .run("SELECT id FROM people WHERE age > 18")
            .unwrap(),
    );
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.rows[0].values(), &[Value::Int(2)]);

    let result = rows(
        processor
            .run("SELECT id FROM people WHERE age = NULL")
            .unwrap(),
    );
    assert_eq!(result.row_count(), 0);
}

#[test]
fn all_comparison_operators_work() {
    let mut processor = new_processor();
    processor.run("CREATE TABLE nums (n INT)").unwrap();
    for n in 1..=5 {
        processor
            .run(&format!("INSERT INTO nums VALUES ({n})"))
            .unwrap();
    }

    let count = |processor: &mut QueryProcessor, sql: &str| {
        rows(processor.run(sql).unwrap()).row_count()
    };

    assert_eq!(count(&mut processor, "SELECT n FROM nums WHERE n = 3"), 1);
    assert_eq!(count(&mut processor, "SELECT n FROM nums WHERE n != 3"), 4);
    assert_eq!(count(&mut processor, "SELECT n FROM nums WHERE n <> 3"), 4);
    assert_eq!(count(&mut processor, "SELECT n FROM nums WHERE n < 3"), 2);
    assert_eq!(count(&mut processor, "SELECT n FROM nums WHERE n <= 3"), 3);
    assert_eq!(count(&mut processor, "SELECT n FROM nums WHERE n > 3"), 2);
    assert_eq!(count(&mut processor, "SELECT n FROM nums WHERE n >= 3"), 3);
}

#[test]
fn bad_statement_leaves_processor_usable() {
    let mut processor = new_processor();
    processor.run("CREATE TABLE t (n INT)").unwrap();

    // One bad statement must not poison the engine.
    assert!(processor.run("SELEC * FROM t").is_err());
    assert!(matches!(
        processor.run("INSERT INTO t VALUES ('nope')"),
        Err(EngineError::ConversionError { .. })
    ));

    processor.run("INSERT INTO t VALUES (1)").unwrap();
    let result = rows(processor.run("SELECT * FROM t").unwrap());
    assert_eq!(result.row_count(), 1);
}

#[test]
fn unsupported_type_is_a_parse_error() {
    let mut processor = new_processor();

    let result = processor.run("CREATE TABLE t (id BIGSERIAL)");
    assert_eq!(
        result,
        Err(EngineError::Parse(ParseError::UnsupportedType {
            name: "BIGSERIAL".into()
        }))
    );
}

#[test]
fn engines_are_independent() {
    let mut first = new_processor();
    let mut second = new_processor();

    first.run("CREATE TABLE t (n INT)").unwrap();

    // No shared global registry: the second engine doesn't see the table.
    assert_eq!(
        second.run("SELECT * FROM t"),
        Err(EngineError::TableNotFound { name: "t".into() })
    );
}

#[test]
fn storage_survives_the_processor() {
    let mut processor = new_processor();
    processor.run("CREATE TABLE t (n INT)").unwrap();
    processor.run("INSERT INTO t VALUES (7)").unwrap();

    let storage = processor.into_storage();
    let table = storage.get_table("t").unwrap();
    assert_eq!(table.row_count(), 1);
}

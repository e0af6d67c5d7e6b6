use rowdb::{EngineError, ExecutionResult, QueryProcessor, QueryResult, StorageManager, Value};

/// Renders a result set the way an interactive shell would.
fn print_result(result: &QueryResult) {
    let names = result.schema.column_names();
    println!("{}", names.join(" | "));
    println!("{}", "-".repeat(names.join(" | ").len().max(10)));

    for row in &result.rows {
        let cells: Vec<String> = row
            .values()
            .iter()
            .map(|value| match value {
                Value::Text(s) => s.to_string(),
                other => other.to_string(),
            })
            .collect();
        println!("{}", cells.join(" | "));
    }
    println!("({} rows)\n", result.rows.len());
}

fn main() -> Result<(), EngineError> {
    println!("In-Memory SQL Engine Demo\n");

    let mut processor = QueryProcessor::new(StorageManager::new());

    let statements = [
        "CREATE TABLE users (id INT NOT NULL UNIQUE, name VARCHAR(50), age INT)",
        "INSERT INTO users VALUES (1, 'Alice', 30)",
        "INSERT INTO users VALUES (2, 'Bob', NULL)",
        "INSERT INTO users VALUES (3, 'Charlie', 25)",
    ];

    for sql in statements {
        match processor.run(sql)? {
            ExecutionResult::Created { table } => println!("Created table '{table}'"),
            ExecutionResult::Inserted { table } => println!("Inserted 1 row into '{table}'"),
            ExecutionResult::Rows(_) => unreachable!("no SELECT yet"),
        }
    }
    println!();

    if let ExecutionResult::Rows(result) = processor.run("SELECT * FROM users")? {
        print_result(&result);
    }

    if let ExecutionResult::Rows(result) =
        processor.run("SELECT name FROM users WHERE age >= 25")?
    {
        print_result(&result);
    }

    // Errors are values: a bad statement doesn't take the engine down.
    if let Err(error) = processor.run("INSERT INTO users VALUES (1, 'Eve', 99)") {
        println!("rejected: {error}");
    }

    println!("\nTables: {:?}", processor.storage().list_tables());
    Ok(())
}

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rowdb::{QueryProcessor, StorageManager, parse_statement};
use std::hint::black_box;

fn setup_populated_engine(n: usize) -> QueryProcessor {
    let mut processor = QueryProcessor::new(StorageManager::new());

    processor
        .run("CREATE TABLE users (id INT NOT NULL UNIQUE, name VARCHAR, age INT, active BOOLEAN)")
        .unwrap();

    for i in 0..n {
        processor
            .run(&format!(
                "INSERT INTO users VALUES ({i}, 'user{i}', {}, {})",
                i % 100,
                if i % 2 == 0 { "TRUE" } else { "FALSE" }
            ))
            .unwrap();
    }
    processor
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parse");
    group.bench_function("parse_select_with_where", |b| {
        b.iter(|| {
            let statement =
                parse_statement(black_box("SELECT name, age FROM users WHERE age >= 21")).unwrap();
            black_box(statement);
        });
    });
    group.finish();
}

fn bench_insert_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insert_SQL_Pipeline");
    group.bench_function("insert_single_row_sql", |b| {
        let mut processor = QueryProcessor::new(StorageManager::new());
        processor.run("CREATE TABLE tests (id INT)").unwrap();
        b.iter(|| {
            processor
                .run(black_box("INSERT INTO tests VALUES (42)"))
                .unwrap();
        });
    });
    group.finish();
}

fn bench_select_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Select_Where_Performance");

    for n in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let mut processor = setup_populated_engine(n);
            b.iter(|| {
                let result = processor
                    .run("SELECT name FROM users WHERE age = 42")
                    .unwrap();
                black_box(result);
            });
        });
    }
    group.finish();
}

fn bench_unique_insert_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Unique_Check_Performance");

    for n in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            b.iter_with_setup(
                || setup_populated_engine(n),
                |mut processor| {
                    // Insert at the end of a populated table: full linear scan.
                    processor
                        .run(&format!("INSERT INTO users VALUES ({n}, 'late', 1, TRUE)"))
                        .unwrap();
                    black_box(processor);
                },
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_insert_sql,
    bench_select_scaling,
    bench_unique_insert_scaling
);
criterion_main!(benches);

//! Benchmarks for template compilation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use termsheet::template::Table;
use termsheet::{CompileConfig, Compiler};

/// A property table plus `n` class rows whose parents point at earlier rows.
fn workload(n: usize) -> Vec<Table> {
    let properties = Table::new(
        "properties",
        vec![
            vec!["Id".into(), "Type".into(), "Label".into()],
            vec!["ID".into(), "TYPE".into(), "A rdfs:label".into()],
            vec!["part_of".into(), "owl:ObjectProperty".into(), "part of".into()],
        ],
    )
    .unwrap();

    let mut rows = vec![
        vec!["Id".into(), "Label".into(), "Synonyms".into(), "Part of".into(), "Parent".into()],
        vec![
            "ID".into(),
            "A rdfs:label".into(),
            "A synonym SPLIT=|".into(),
            "C 'part of' some %".into(),
            "CI".into(),
        ],
    ];
    for i in 0..n {
        let parent = if i == 0 { String::new() } else { format!("term {}", i - 1) };
        rows.push(vec![
            format!("T{i}"),
            format!("term {i}"),
            format!("syn-a-{i}|syn-b-{i}"),
            parent,
            format!("T{}", i / 2),
        ]);
    }
    let classes = Table::new("classes", rows).unwrap();
    vec![classes, properties]
}

fn bench_compile(c: &mut Criterion) {
    let compiler = Compiler::new(CompileConfig::default()).unwrap();
    let tables = workload(1_000);

    c.bench_function("compile_1k_rows", |bench| {
        bench.iter(|| black_box(compiler.compile(&tables, None, None).unwrap()))
    });
}

fn bench_list_identifiers(c: &mut Criterion) {
    let compiler = Compiler::new(CompileConfig::default()).unwrap();
    let tables = workload(1_000);

    c.bench_function("list_identifiers_1k_rows", |bench| {
        bench.iter(|| black_box(compiler.list_identifiers(&tables).unwrap()))
    });
}

criterion_group!(benches, bench_compile, bench_list_identifiers);
criterion_main!(benches);

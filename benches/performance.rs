use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nexus::core::CodebaseAnalyzer;
use nexus::formatters::JsonGraphFormatter;
use std::path::Path;
use tempfile::TempDir;

/// `count` components, each importing its neighbour, a shared aliased util and React.
fn write_project(root: &Path, count: usize) {
    std::fs::create_dir_all(root.join("src/components")).unwrap();
    std::fs::write(
        root.join("tsconfig.json"),
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*"] } } }"#,
    )
    .unwrap();
    std::fs::write(
        root.join("src/utils.ts"),
        "export const cx = (...names: string[]): string => names.join(' ');\n",
    )
    .unwrap();

    for i in 0..count {
        let next = (i + 1) % count;
        let content = format!(
            r#"
import React from "react";
import type {{ ReactNode }} from "react";
import {{ cx }} from "@/utils";
import {{ Component{next} }} from "./Component{next}";

interface Props{i} {{
    label: string;
    children?: ReactNode;
}}

export function Component{i}({{ label, children }}: Props{i}) {{
    return (
        <div className={{cx("component", "c{i}")}}>
            <span>{{label}}</span>
            {{children}}
        </div>
    );
}}

export {{ Component{next} }};
"#
        );
        std::fs::write(
            root.join(format!("src/components/Component{}.tsx", i)),
            content,
        )
        .unwrap();
    }
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("codebase_analysis");

    let small = TempDir::new().unwrap();
    write_project(small.path(), 20);

    group.bench_function("small_codebase", |b| {
        let analyzer = CodebaseAnalyzer::new().unwrap();
        b.iter(|| black_box(analyzer.analyze(black_box(small.path())).unwrap()));
    });

    let large = TempDir::new().unwrap();
    write_project(large.path(), 500);

    group.bench_function("large_codebase", |b| {
        let analyzer = CodebaseAnalyzer::new().unwrap();
        b.iter(|| black_box(analyzer.analyze(black_box(large.path())).unwrap()));
    });

    group.bench_function("large_codebase_single_thread", |b| {
        let analyzer = CodebaseAnalyzer::new().unwrap().with_threads(1);
        b.iter(|| black_box(analyzer.analyze(black_box(large.path())).unwrap()));
    });

    group.finish();
}

fn benchmark_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let project = TempDir::new().unwrap();
    write_project(project.path(), 500);
    let analysis = CodebaseAnalyzer::new()
        .unwrap()
        .analyze(project.path())
        .unwrap();
    let formatter = JsonGraphFormatter::new();

    group.bench_function("format_graph", |b| {
        b.iter(|| {
            let rendered = formatter.format_graph(black_box(&analysis.graph)).unwrap();
            black_box(rendered)
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_analysis, benchmark_serialization);
criterion_main!(benches);

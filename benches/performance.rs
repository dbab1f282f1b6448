use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reqsmith::core::{DependencyAnalyzer, ReferenceManifest, ScanConfig};
use reqsmith::parsers::python::PythonParser;
use reqsmith::parsers::ImportParser;
use std::path::Path;
use tempfile::TempDir;

const THIRD_PARTY: &[&str] = &["requests", "flask", "numpy", "pandas", "sqlalchemy"];

fn module_source(i: usize) -> String {
    let package = THIRD_PARTY[i % THIRD_PARTY.len()];
    format!(
        r#"
import os
import json
from collections import defaultdict
import {package}
from {package}.sub import thing as alias_{i}
from .sibling_{i} import helper

class Service{i}:
    def __init__(self):
        self.value = {i}

    def process(self):
        import logging
        return self.value * 2

def main():
    return Service{i}().process()

if __name__ == "__main__":
    main()
"#
    )
}

fn build_tree(root: &Path, packages: usize, modules_per_package: usize) {
    for p in 0..packages {
        let dir = root.join(format!("pkg_{p}"));
        std::fs::create_dir_all(&dir).unwrap();
        for m in 0..modules_per_package {
            let i = p * modules_per_package + m;
            std::fs::write(dir.join(format!("module_{i}.py")), module_source(i)).unwrap();
        }
    }
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_discovery");

    let small = TempDir::new().unwrap();
    build_tree(small.path(), 2, 5);

    group.bench_function("small_tree", |b| {
        b.iter(|| {
            let mut analyzer = DependencyAnalyzer::new(ScanConfig::new(small.path())).unwrap();
            black_box(analyzer.analyze())
        });
    });

    let large = TempDir::new().unwrap();
    build_tree(large.path(), 20, 25);

    group.bench_function("large_tree", |b| {
        b.iter(|| {
            let mut analyzer = DependencyAnalyzer::new(ScanConfig::new(large.path())).unwrap();
            black_box(analyzer.analyze())
        });
    });

    group.finish();
}

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("import_extraction");
    let source = module_source(3);
    let mut parser = PythonParser::new().unwrap();

    group.bench_function("single_module", |b| {
        b.iter(|| black_box(parser.parse_source(black_box(&source), Path::new("bench.py"))));
    });

    let reference: String = (0..500)
        .map(|i| format!("package-{i}=={}.{}.0\n", i / 10, i % 10))
        .collect();
    group.bench_function("reference_manifest", |b| {
        b.iter(|| black_box(ReferenceManifest::parse(black_box(&reference))));
    });

    group.finish();
}

criterion_group!(benches, benchmark_analysis, benchmark_parsing);
criterion_main!(benches);

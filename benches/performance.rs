//! Performance benchmarks for loglint
//!
//! These benchmarks measure:
//! - File walking speed with include/exclude globs
//! - Parsing and analysing a single Go file of growing size
//! - Rule evaluation on resolved messages, without parsing
//! - Full check workflow across many files in parallel
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench file_walking
//! cargo bench analyze_source
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use loglint::analysis::{Analyzer, check_context};
use loglint::config::Config;
use loglint::engine::{ExecutionEngine, FileWalker};
use loglint::rules::RuleRegistry;
use loglint::syntax::Expr;
use loglint::types::GlobPattern;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// A Go file with `calls` logging statements, a mix of clean and failing ones
fn go_source(calls: usize) -> String {
    let mut body = String::new();
    for i in 0..calls {
        let line = match i % 5 {
            0 => format!("\tslog.Info(\"request {} handled\", \"id\", id)\n", i),
            1 => format!("\tlogger.Warn(\"Retrying request {}\")\n", i),
            2 => "\tslog.Error(\"connection failed!!!\")\n".to_string(),
            3 => "\tlogger.Debug(\"token refreshed \" + token)\n".to_string(),
            _ => format!("\tfmt.Println(\"Not a log call {}\")\n", i),
        };
        body.push_str(&line);
    }

    format!(
        "package main\n\nimport (\n\t\"fmt\"\n\t\"log/slog\"\n\n\t\"go.uber.org/zap\"\n)\n\n\
         func handle(id int, token string) {{\n\tlogger, _ := zap.NewProduction()\n{}}}\n",
        body
    )
}

/// Create a temporary directory with Go files, some under `vendor/`
fn create_test_files(count: usize, calls: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let vendor = temp_dir.path().join("vendor");
    fs::create_dir_all(&vendor).unwrap();

    for i in 0..count {
        let dir = if i % 10 == 0 { &vendor } else { temp_dir.path() };
        fs::write(dir.join(format!("file{}.go", i)), go_source(calls)).unwrap();
    }

    temp_dir
}

fn default_analyzer() -> Analyzer {
    let registry = RuleRegistry::with_builtins().unwrap();
    Analyzer::from_config(&registry, &Config::default()).unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_file_walking(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_walking");

    for file_count in [10, 50, 100].iter() {
        let temp_dir = create_test_files(*file_count, 10);
        group.throughput(Throughput::Elements(*file_count as u64));

        group.bench_with_input(
            BenchmarkId::new("default_include", file_count),
            file_count,
            |b, _| {
                b.iter(|| {
                    let include = vec![GlobPattern::new("**/*.go")];
                    let walker = FileWalker::new(temp_dir.path(), &include, &[]).unwrap();
                    let files: Vec<_> = walker.walk().collect();
                    black_box(files)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("with_exclude_filter", file_count),
            file_count,
            |b, _| {
                b.iter(|| {
                    let include = vec![GlobPattern::new("**/*.go")];
                    let exclude = vec![GlobPattern::new("vendor/**")];
                    let walker = FileWalker::new(temp_dir.path(), &include, &exclude).unwrap();
                    let files: Vec<_> = walker.walk().collect();
                    black_box(files)
                });
            },
        );
    }

    group.finish();
}

/// Parse plus analysis of one in-memory file
fn bench_analyze_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_source");
    let analyzer = default_analyzer();

    for calls in [10, 100, 1000].iter() {
        let source = go_source(*calls);
        group.throughput(Throughput::Bytes(source.len() as u64));

        group.bench_with_input(BenchmarkId::new("calls", calls), &source, |b, source| {
            b.iter(|| black_box(analyzer.analyze_source(source.as_str()).unwrap()));
        });
    }

    group.finish();
}

/// Every enabled rule against a single resolved message
fn bench_rule_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_evaluation");
    let analyzer = default_analyzer();

    let messages = [
        ("clean", Expr::string("request handled")),
        ("uppercase", Expr::string("Request handled")),
        ("special", Expr::string("connection failed!!! 🚀")),
        (
            "concatenation",
            Expr::concat(Expr::string("user password: "), Expr::ident("userPassword")),
        ),
    ];

    for (name, expr) in messages.iter() {
        group.bench_with_input(BenchmarkId::new("message", name), expr, |b, expr| {
            b.iter(|| {
                let ctx = check_context(expr);
                let failures: Vec<_> = analyzer
                    .rules()
                    .filter_map(|rule| rule.check(&ctx).into_failure())
                    .collect();
                black_box(failures)
            });
        });
    }

    group.finish();
}

/// Walk, read, parse and analyse a whole tree in parallel
fn bench_full_workflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_workflow");
    group.sample_size(10);
    let analyzer = default_analyzer();

    for file_count in [10, 100].iter() {
        let temp_dir = create_test_files(*file_count, 50);
        group.throughput(Throughput::Elements(*file_count as u64));

        group.bench_with_input(
            BenchmarkId::new("check", file_count),
            file_count,
            |b, _| {
                b.iter(|| {
                    let include = vec![GlobPattern::new("**/*.go")];
                    let walker = FileWalker::new(temp_dir.path(), &include, &[]).unwrap();
                    let files: Vec<PathBuf> = walker.walk().filter_map(Result::ok).collect();

                    let engine = ExecutionEngine::new(&analyzer);
                    black_box(engine.execute(&files))
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Benchmark Registration
// ============================================================================

criterion_group!(file_benches, bench_file_walking);

criterion_group!(analysis_benches, bench_analyze_source, bench_rule_evaluation);

criterion_group!(workflow_benches, bench_full_workflow);

criterion_main!(file_benches, analysis_benches, workflow_benches);

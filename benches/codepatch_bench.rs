use codepatch::{
    apply_hunks, generate_minimal_diff, generate_unified_diff, parse_patch, split_lines,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indoc::indoc;

// --- Parsing Benchmarks ---

fn parsing_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parsing");

    let simple_patch = indoc! {r#"
        --- a/src/main.rs
        +++ b/src/main.rs
        @@ -1,3 +1,3 @@
         fn main() {
        -    println!("Hello, world!");
        +    println!("Hello, codepatch!");
         }
    "#};
    group.bench_function("simple_patch", |b| {
        b.iter(|| parse_patch(black_box(simple_patch)))
    });

    let mut large_patch = "--- a/large_file.txt\n+++ b/large_file.txt\n".to_string();
    for i in 0..100 {
        large_patch.push_str(&format!(
            "@@ -{},3 +{},3 @@\n context line {}\n-old line {}\n+new line {}\n",
            i * 5 + 1,
            i * 5 + 1,
            i,
            i,
            i
        ));
    }
    group.bench_function("large_patch_100_hunks", |b| {
        b.iter(|| parse_patch(black_box(&large_patch)))
    });

    group.finish();
}

// --- Applying Benchmarks ---

fn applying_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Applying");

    let mut large_file_content = String::new();
    for i in 0..10000 {
        large_file_content.push_str(&format!("This is line number {}\n", i));
    }
    let large_lines = split_lines(&large_file_content);

    let single_hunk = parse_patch(indoc! {"
        @@ -5000,3 +5000,3 @@
         This is line number 4999
        -This is line number 5000
        +THIS LINE WAS CHANGED
         This is line number 5001
    "});
    group.bench_function("single_hunk_large_file", |b| {
        b.iter(|| apply_hunks(black_box(&large_lines), black_box(&single_hunk)))
    });

    let mut many_hunks_patch = String::new();
    for i in 0..100 {
        let start = i * 100 + 1;
        many_hunks_patch.push_str(&format!(
            "@@ -{},1 +{},2 @@\n This is line number {}\n+inserted after {}\n",
            start,
            start,
            start - 1,
            start - 1
        ));
    }
    let many_hunks = parse_patch(&many_hunks_patch);
    group.bench_function("100_hunks_large_file", |b| {
        b.iter(|| apply_hunks(black_box(&large_lines), black_box(&many_hunks)))
    });

    group.finish();
}

// --- Diffing Benchmarks ---

fn diffing_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Diffing");

    let old: String = (0..2000).map(|i| format!("line {}\n", i)).collect();
    let new = old.replace("line 1000\n", "line 1000 changed\n");
    let old_lines = split_lines(&old);
    let new_lines = split_lines(&new);

    group.bench_function("positional_2000_lines", |b| {
        b.iter(|| generate_unified_diff(black_box(&old_lines), black_box(&new_lines), "a", "b"))
    });
    group.bench_function("minimal_2000_lines", |b| {
        b.iter(|| generate_minimal_diff(black_box(&old), black_box(&new), "a", "b"))
    });

    group.finish();
}

criterion_group!(benches, parsing_benches, applying_benches, diffing_benches);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skein::{compile, read_one, read_str, Interpreter};

// Reading alone, without analysis or execution.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    group.bench_function("simple_number", |b| {
        b.iter(|| black_box(read_str("bench", "42").unwrap()));
    });

    group.bench_function("nested_expr", |b| {
        b.iter(|| black_box(read_str("bench", "(+ (* 2 3) (- 10 5))").unwrap()));
    });

    let large_list = format!(
        "({})",
        (0..100)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    group.bench_function("large_list_100", |b| {
        b.iter(|| black_box(read_str("bench", &large_list).unwrap()));
    });

    group.finish();
}

// Analysis plus code generation for one form.
fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");
    let sources = [
        ("arithmetic", "(+ 1 2 3 4 5)"),
        (
            "closure",
            "(define (make-counter) (let ((n 0)) (lambda () (set! n (+ n 1)) n)))",
        ),
        (
            "named_let",
            "(let loop ((i 0) (acc '())) (if (= i 10) acc (loop (+ i 1) (cons i acc))))",
        ),
    ];
    for (name, src) in sources {
        let syntax = read_one("bench", src).unwrap().unwrap();
        group.bench_function(name, |b| b.iter(|| black_box(compile(&syntax).unwrap())));
    }
    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    let mut interp = Interpreter::new();
    interp
        .eval_str("(define (fib n) (if (< n 2) n (+ (fib (- n 1)) (fib (- n 2)))))")
        .unwrap();
    for n in [10, 15, 20] {
        group.bench_with_input(BenchmarkId::new("fib", n), &n, |b, &n| {
            let src = format!("(fib {})", n);
            b.iter(|| black_box(interp.eval_str(&src).unwrap()));
        });
    }

    let mut interp = Interpreter::new();
    interp
        .eval_str("(define (count n acc) (if (= n 0) acc (count (- n 1) (+ acc 1))))")
        .unwrap();
    group.bench_function("tail_loop_10000", |b| {
        b.iter(|| black_box(interp.eval_str("(count 10000 0)").unwrap()));
    });

    let mut interp = Interpreter::new();
    group.bench_function("map_closure", |b| {
        b.iter(|| {
            black_box(
                interp
                    .eval_str("(map (lambda (x) (* x x)) '(1 2 3 4 5 6 7 8 9 10))")
                    .unwrap(),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_compilation, bench_evaluation);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use route_predicates::{
    AntPathMatcher, CompiledPattern, Exchange, HostConfig, HostRoutePredicate, MatcherOptions,
    RequestAttributes, RoutePredicate,
};

fn host_patterns(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{{tenant}}.region{i}.example.com"))
        .collect()
}

fn bench_pattern_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_kinds");
    group.throughput(Throughput::Elements(1));

    let cases = [
        ("literal", "api.example.com", "api.example.com"),
        ("single_star", "*.example.com", "api.example.com"),
        ("double_star", "**.example.com", "a.b.c.example.com"),
        ("placeholder", "{sub}.example.com", "api.example.com"),
        (
            "regex_placeholder",
            "{ip:[0-9]{1,3}\\.[0-9]{1,3}}.*.net",
            "10.42.edge.net",
        ),
    ];

    for (name, pattern, host) in cases {
        let compiled = CompiledPattern::compile(pattern, MatcherOptions::host()).unwrap();
        group.bench_function(BenchmarkId::new("match_and_extract", name), |b| {
            b.iter(|| compiled.match_and_extract(black_box(host)));
        });
    }

    group.finish();
}

fn bench_first_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("host_first_match");

    for pattern_count in [1, 10, 50, 100].iter() {
        let mut config = HostConfig::default();
        config.set_patterns(host_patterns(*pattern_count));
        let predicate = HostRoutePredicate::new(&config).unwrap();

        let host_first = "acme.region0.example.com".to_string();
        let host_last = format!("acme.region{}.example.com", pattern_count - 1);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("match_first", pattern_count),
            pattern_count,
            |b, _| b.iter(|| predicate.evaluate(black_box(Some(&host_first)))),
        );
        group.bench_with_input(
            BenchmarkId::new("match_last", pattern_count),
            pattern_count,
            |b, _| b.iter(|| predicate.evaluate(black_box(Some(&host_last)))),
        );
        group.bench_with_input(
            BenchmarkId::new("no_match", pattern_count),
            pattern_count,
            |b, _| b.iter(|| predicate.evaluate(black_box(Some("acme.example.org")))),
        );
    }

    group.finish();
}

fn bench_predicate_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("host_predicate_test");

    let mut config = HostConfig::default();
    config.set_patterns(vec![
        "{tenant}.internal.example.com".to_string(),
        "{tenant}.example.com".to_string(),
    ]);
    let predicate = HostRoutePredicate::new(&config).unwrap();
    let request = hyper::Request::builder()
        .uri("/orders/42")
        .header("Host", "acme.example.com")
        .body(())
        .unwrap();

    group.bench_function("test_with_publish", |b| {
        b.iter(|| {
            let mut attributes = RequestAttributes::new();
            predicate.test(&mut Exchange::new(black_box(&request), &mut attributes))
        });
    });

    group.finish();
}

fn bench_matcher_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher_cache");

    let matcher = AntPathMatcher::host();
    matcher.compile("{sub}.example.com").unwrap();

    group.bench_function("cached_matches", |b| {
        b.iter(|| matcher.matches(black_box("{sub}.example.com"), black_box("api.example.com")));
    });

    group.bench_function("compile_uncached", |b| {
        b.iter(|| CompiledPattern::compile(black_box("{sub}.**.example.com"), MatcherOptions::host()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pattern_kinds,
    bench_first_match,
    bench_predicate_test,
    bench_matcher_cache
);
criterion_main!(benches);

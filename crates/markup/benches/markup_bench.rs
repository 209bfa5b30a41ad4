use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use markup::perf_fixtures::{make_blocks, make_nested};
use markup::{Parser, ParserConfig, deparse, deparse_into, parse};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;
const DEEP_NESTING: usize = 50_000;

fn make_attribute_heavy(attrs: usize) -> String {
    let mut markup = String::with_capacity(attrs * 24 + 16);
    markup.push_str("<wide");
    for i in 0..attrs {
        markup.push_str(" key");
        markup.push_str(&i.to_string());
        markup.push_str("=\"value > with = noise\"");
    }
    markup.push_str("/>");
    markup
}

fn bench_parse_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_parse_small", |b| {
        b.iter(|| {
            let root = parse(black_box(&input)).expect("fixture parses");
            black_box(root.children().len());
        });
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_parse_large", |b| {
        b.iter(|| {
            let root = parse(black_box(&input)).expect("fixture parses");
            black_box(root);
        });
    });
}

fn bench_parse_large_presized(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let parser = Parser::new(ParserConfig {
        // <doc> plus four elements per block.
        node_capacity: Some(LARGE_BLOCKS * 4 + 1),
    });
    c.bench_function("bench_parse_large_presized", |b| {
        b.iter(|| {
            let root = parser.parse(black_box(&input)).expect("fixture parses");
            black_box(root);
        });
    });
}

fn bench_parse_deep(c: &mut Criterion) {
    let input = make_nested(DEEP_NESTING);
    c.bench_function("bench_parse_deep", |b| {
        b.iter(|| {
            let root = parse(black_box(&input)).expect("fixture parses");
            black_box(root);
        });
    });
}

fn bench_parse_attribute_heavy(c: &mut Criterion) {
    let input = make_attribute_heavy(4096);
    c.bench_function("bench_parse_attribute_heavy", |b| {
        b.iter(|| {
            let root = parse(black_box(&input)).expect("fixture parses");
            black_box(root.attrs().len());
        });
    });
}

fn bench_deparse_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let root = parse(&input).expect("fixture parses");
    c.bench_function("bench_deparse_large", |b| {
        b.iter(|| {
            let text = deparse(black_box(&root));
            black_box(text.len());
        });
    });
}

fn bench_deparse_into_reused_buffer(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let root = parse(&input).expect("fixture parses");
    c.bench_function("bench_deparse_into_reused_buffer", |b| {
        b.iter_batched(
            || String::with_capacity(input.len()),
            |mut out| {
                deparse_into(&mut out, black_box(&root));
                black_box(out.len());
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_parse_small,
    bench_parse_large,
    bench_parse_large_presized,
    bench_parse_deep,
    bench_parse_attribute_heavy,
    bench_deparse_large,
    bench_deparse_into_reused_buffer
);
criterion_main!(benches);

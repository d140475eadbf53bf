use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use html::Document;
use layout::FlowLayout;
use split::{SplitOptions, split_text};

const SHORT_WORDS: usize = 12;
const LONG_WORDS: usize = 2_000;
const PARAGRAPHS: usize = 200;

fn make_sentence(words: usize) -> String {
    const VOCAB: &[&str] = &["lorem", "ipsum", "dolor", "sit", "amet", "caf\u{e9}", "na\u{ef}ve"];
    let mut out = String::with_capacity(words * 6);
    for i in 0..words {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(VOCAB[i % VOCAB.len()]);
    }
    out
}

fn bench_split_short(c: &mut Criterion) {
    let html = format!("<p id=t>{}</p>", make_sentence(SHORT_WORDS));
    let doc = Document::parse(&html);
    let options = SplitOptions::default();
    c.bench_function("bench_split_short", |b| {
        b.iter_batched(
            || (doc.clone(), FlowLayout::monospace(400.0)),
            |(mut doc, mut host)| {
                let result = split_text(&mut doc, &mut host, "#t", &options);
                black_box(result.map(|r| r.chars.len()).unwrap_or(0));
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_split_long_narrow(c: &mut Criterion) {
    let html = format!("<p id=t>{}</p>", make_sentence(LONG_WORDS));
    let doc = Document::parse(&html);
    let options = SplitOptions::default();
    c.bench_function("bench_split_long_narrow", |b| {
        b.iter_batched(
            || (doc.clone(), FlowLayout::monospace(300.0)),
            |(mut doc, mut host)| {
                let result = split_text(&mut doc, &mut host, "#t", &options);
                black_box(result.map(|r| r.lines.len()).unwrap_or(0));
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_split_recursive(c: &mut Criterion) {
    let mut html = String::from("<article id=t>");
    for i in 0..PARAGRAPHS {
        html.push_str(&format!("<section><h3>Part {i}</h3><p>{}</p></section>", make_sentence(40)));
    }
    html.push_str("</article>");
    let doc = Document::parse(&html);
    let options = SplitOptions::default().recursive(true);
    c.bench_function("bench_split_recursive", |b| {
        b.iter_batched(
            || (doc.clone(), FlowLayout::monospace(600.0)),
            |(mut doc, mut host)| {
                let result = split_text(&mut doc, &mut host, "#t", &options);
                black_box(result.map(|r| r.words.len()).unwrap_or(0));
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_split_short,
    bench_split_long_narrow,
    bench_split_recursive
);
criterion_main!(benches);

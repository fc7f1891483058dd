use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use search_core::{DocId, DocumentStatus, ExecutionPolicy, SearchServer};

const VOCABULARY: [&str; 16] = [
    "cat", "dog", "rat", "pet", "curly", "nasty", "funny", "hair", "tail", "eyes", "big", "small", "white",
    "yellow", "hat", "collar",
];

fn build_server(documents: usize) -> SearchServer {
    let mut server = SearchServer::new("and with").expect("valid stop words");
    let mut seed: u64 = 1;
    for id in 0..documents as DocId {
        let words: Vec<&str> = (0..12)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                VOCABULARY[(seed >> 33) as usize % VOCABULARY.len()]
            })
            .collect();
        server
            .add_document(id, &words.join(" "), DocumentStatus::Actual, &[1, 2, 3])
            .expect("generated document is valid");
    }
    server
}

fn bench_find_top_documents(c: &mut Criterion) {
    let server = build_server(10_000);
    let query = "curly nasty cat big small white -hat -collar";
    let mut group = c.benchmark_group("find_top_documents");
    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{policy:?}")), &policy, |b, &policy| {
            b.iter(|| {
                server
                    .find_top_documents_with(policy, query, |_: DocId, status: DocumentStatus, _: i32| {
                        status == DocumentStatus::Actual
                    })
                    .expect("valid query")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_top_documents);
criterion_main!(benches);

//! Benchmarks da matriz de similaridade.
//!
//! Testa performance de:
//! - Produto escalar inteiro (scalar vs AVX2)
//! - Matriz N×N sequencial vs paralela (vários tamanhos de pool)
//! - Construção do vocabulário e vetorização
//!
//! Executar: `cargo bench --bench similarity_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use doc_similarity::performance::simd::{dot_product, dot_product_scalar};
use doc_similarity::similarity::{compute_sequential, pair_count, ParallelEngine};
use doc_similarity::types::{DocumentRecord, DocumentVector};
use doc_similarity::utils::build_term_frequency;
use doc_similarity::Vocabulary;
use rand::Rng;
use std::sync::Arc;

/// Gera vetor esparso de contagens (maioria zero, como num corpus real)
fn generate_count_vector(dim: usize) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    (0..dim)
        .map(|_| if rng.gen_bool(0.1) { rng.gen_range(1..20) } else { 0 })
        .collect()
}

/// Gera múltiplos vetores
fn generate_vectors(count: usize, dim: usize) -> Vec<DocumentVector> {
    (0..count).map(|_| generate_count_vector(dim)).collect()
}

/// Gera registros com tokens sintéticos de um vocabulário de `vocab` termos
fn generate_records(count: usize, vocab: usize, tokens_per_doc: usize) -> Vec<DocumentRecord> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let tokens = (0..tokens_per_doc).map(|_| format!("term{:05}", rng.gen_range(0..vocab)));
            DocumentRecord::new(format!("doc{}.txt", i), 0, build_term_frequency(tokens))
        })
        .collect()
}

fn build_engine(threads: usize) -> ParallelEngine {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("failed to build bench pool");
    ParallelEngine::new(Arc::new(pool))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Dot Product
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_dot_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_product");

    for size in [64, 1024, 8192, 65536].iter() {
        let a = generate_count_vector(*size);
        let b = generate_count_vector(*size);

        group.throughput(Throughput::Elements(*size as u64));

        // Versão scalar (baseline)
        group.bench_with_input(BenchmarkId::new("scalar", size), size, |bencher, _| {
            bencher.iter(|| black_box(dot_product_scalar(&a, &b)))
        });

        // Versão auto-detect (SIMD quando disponível)
        group.bench_with_input(BenchmarkId::new("auto", size), size, |bencher, _| {
            bencher.iter(|| black_box(dot_product(&a, &b)))
        });
    }

    group.finish();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Matriz de Similaridade
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_similarity_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_matrix");
    group.sample_size(20);

    let engines: Vec<(usize, ParallelEngine)> = [2, 4, 8].iter().map(|&t| (t, build_engine(t))).collect();

    for n_docs in [50, 200, 500].iter() {
        let vectors = generate_vectors(*n_docs, 2048);

        group.throughput(Throughput::Elements(pair_count(*n_docs) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", n_docs), n_docs, |bencher, _| {
            bencher.iter(|| black_box(compute_sequential(&vectors)))
        });

        for (threads, engine) in &engines {
            let id = BenchmarkId::new(format!("parallel_{}w", threads), n_docs);
            group.bench_with_input(id, n_docs, |bencher, _| {
                bencher.iter(|| black_box(engine.compute(&vectors)))
            });
        }
    }

    group.finish();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Vocabulário
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_vocabulary(c: &mut Criterion) {
    let mut group = c.benchmark_group("vocabulary");

    let records = generate_records(1000, 20_000, 300);

    group.bench_function("build", |bencher| {
        bencher.iter(|| black_box(Vocabulary::build(&records)))
    });

    group.bench_function("par_build", |bencher| {
        bencher.iter(|| black_box(Vocabulary::par_build(&records)))
    });

    let vocabulary = Vocabulary::build(&records);

    group.bench_function("vectorize_all", |bencher| {
        bencher.iter(|| black_box(vocabulary.vectorize_all(&records)))
    });

    group.bench_function("par_vectorize_all", |bencher| {
        bencher.iter(|| black_box(vocabulary.par_vectorize_all(&records)))
    });

    group.finish();
}

criterion_group!(benches, bench_dot_product, bench_similarity_matrix, bench_vocabulary);
criterion_main!(benches);

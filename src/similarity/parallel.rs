//! # Cálculo Paralelo da Matriz
//!
//! Estratégia partition → map → merge:
//!
//! 1. **Partition**: linhas divididas em lotes balanceados por pares
//!    ([`partition_rows`])
//! 2. **Map**: cada lote é processado por um worker do pool Rayon, lendo
//!    os vetores (somente leitura) e produzindo suas próprias linhas
//! 3. **Merge**: o orquestrador escreve as linhas na matriz depois que
//!    TODOS os lotes terminaram (barreira implícita de `collect`)
//!
//! Nenhum estado mutável é compartilhado durante o cálculo. O resultado é
//! bit a bit igual ao de [`compute_sequential`](super::compute_sequential)
//! para qualquer tamanho de pool.

use rayon::prelude::*;
use rayon::ThreadPool;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{partition_rows, squared_norms, upper_row, SimilarityError, SimilarityMatrix};
use crate::types::DocumentVector;

/// Lotes por worker, para compensar variação de tempo entre lotes
pub const DEFAULT_BATCHES_PER_WORKER: usize = 4;

/// Sinal de cancelamento compartilhado entre threads.
///
/// Verificado entre unidades de trabalho (linhas), nunca no meio de uma.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Cria um sinal não cancelado
    pub fn new() -> Self {
        Self::default()
    }

    /// Solicita cancelamento
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Cancelamento foi solicitado?
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Linhas superiores calculadas por um lote
type RowBatch = Vec<(usize, Vec<f64>)>;

/// Motor de similaridade paralelo sobre um pool Rayon de tamanho fixo.
///
/// # Exemplo
///
/// ```rust
/// use doc_similarity::similarity::{compute_sequential, ParallelEngine};
/// use std::sync::Arc;
///
/// let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap());
/// let engine = ParallelEngine::new(pool);
///
/// let vectors = vec![vec![0, 2, 1, 0], vec![1, 0, 2, 0], vec![0, 0, 0, 3]];
/// let matrix = engine.compute(&vectors).unwrap();
/// assert_eq!(matrix, compute_sequential(&vectors));
/// ```
#[derive(Debug, Clone)]
pub struct ParallelEngine {
    pool: Arc<ThreadPool>,
    batches_per_worker: usize,
    cancel: CancellationFlag,
}

impl ParallelEngine {
    /// Cria o motor com [`DEFAULT_BATCHES_PER_WORKER`] e sem cancelamento externo.
    pub fn new(pool: Arc<ThreadPool>) -> Self {
        Self {
            pool,
            batches_per_worker: DEFAULT_BATCHES_PER_WORKER,
            cancel: CancellationFlag::new(),
        }
    }

    /// Define quantos lotes cada worker recebe (mínimo 1).
    pub fn with_batches_per_worker(mut self, batches_per_worker: usize) -> Self {
        self.batches_per_worker = batches_per_worker.max(1);
        self
    }

    /// Usa um sinal de cancelamento externo.
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Número de workers do pool
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Calcula a matriz N×N.
    ///
    /// Retorna [`SimilarityError::Cancelled`] se o cancelamento for
    /// solicitado antes do fim; nunca retorna matriz parcial.
    pub fn compute(&self, vectors: &[DocumentVector]) -> Result<SimilarityMatrix, SimilarityError> {
        let n = vectors.len();
        let batches = partition_rows(n, self.workers() * self.batches_per_worker);

        log::debug!(
            "🧮 {} documentos, {} lotes em {} workers",
            n,
            batches.len(),
            self.workers()
        );

        let results: Vec<Option<RowBatch>> = self.pool.install(|| {
            let norms = squared_norms(vectors);
            batches
                .into_par_iter()
                .map(|rows| self.compute_batch(vectors, &norms, rows))
                .collect()
        });

        // Barreira: todos os lotes terminaram, agora o merge
        let mut rows = Vec::with_capacity(n);
        for batch in results {
            rows.extend(batch.ok_or(SimilarityError::Cancelled)?);
        }

        Ok(SimilarityMatrix::from_upper_rows(n, rows))
    }

    fn compute_batch(
        &self,
        vectors: &[DocumentVector],
        norms: &[u64],
        rows: Range<usize>,
    ) -> Option<RowBatch> {
        let mut out = Vec::with_capacity(rows.len());
        for i in rows {
            if self.cancel.is_cancelled() {
                log::debug!("🛑 Lote interrompido na linha {}", i);
                return None;
            }
            out.push((i, upper_row(vectors, norms, i)));
        }
        Some(out)
    }
}

//! # Doc Similarity - Harness de Similaridade de Documentos
//!
//! Este crate implementa um benchmark de similaridade entre documentos de
//! texto que contrasta execução **sequencial** e **paralela** do mesmo
//! pipeline.
//!
//! ## Pipeline
//!
//! 1. **Descoberta** (`corpus::discovery`): arquivos regulares sob a raiz
//! 2. **Carga** (`corpus::loader`): texto (UTF-8 → Latin-1), tokens, TF
//! 3. **Vocabulário** (`vocabulary`): união ordenada de todos os termos
//! 4. **Vetorização** (`vocabulary`): um vetor denso de contagens por documento
//! 5. **Similaridade** (`similarity`): matriz N×N de cosseno, O(N² · V)
//! 6. **Runner** (`runner`): orquestra tudo, sequencial ou paralelo
//!
//! ## Paralelismo
//!
//! O cálculo O(N²) é dividido em lotes de linhas balanceados por número de
//! pares e distribuído em um pool Rayon de tamanho fixo. Cada worker lê os
//! vetores (somente leitura) e produz suas próprias linhas; o orquestrador
//! junta tudo depois da barreira. O resultado é idêntico ao sequencial.
//!
//! ## Exemplo de Uso
//!
//! ```rust,no_run
//! use doc_similarity::prelude::*;
//! use std::path::Path;
//!
//! let mut config = HarnessConfig::default();
//! config.mode = ExecutionMode::Parallel;
//!
//! let runner = runner_for(&config).unwrap();
//! let output = runner.run(Path::new("./corpus")).unwrap();
//! println!("{} documentos, vocabulário {}", output.records.len(), output.vocabulary_size);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Tipos fundamentais compartilhados por todo o pipeline.
///
/// - [`DocumentRecord`]: registro imutável de um arquivo
/// - [`TermFrequency`]: mapa token → contagem
/// - [`DocumentVector`]: vetor denso indexado pelo vocabulário
pub mod types;

/// Entrada do pipeline: descoberta de arquivos e carga de documentos.
pub mod corpus;

/// Vocabulário ordenado e vetorização densa.
pub mod vocabulary;

/// Otimizações de performance de baixo nível.
///
/// Produto escalar e similaridade cosseno sobre vetores de contagem,
/// com AVX2 quando disponível.
pub mod performance;

/// Matriz de similaridade: cálculo sequencial e paralelo.
pub mod similarity;

/// Runners sequencial e paralelo.
pub mod runner;

/// Estatísticas e formatação do relatório.
pub mod report;

/// Utilitários diversos.
///
/// - Tokenização e frequência de termos
/// - Timing das etapas
pub mod utils;

/// Configuração do harness e do pool de workers.
///
/// Fornece configuração dinâmica via variáveis de ambiente:
/// - `SIMILARITY_MODE`: "seq" ou "par" (padrão: seq)
/// - `SIMILARITY_WORKERS`: número fixo ou "auto" (padrão: 4)
/// - `SIMILARITY_MAX_WORKERS`: limite para "auto" (padrão: 16)
/// - `SIMILARITY_BATCHES_PER_WORKER`: lotes por worker (padrão: 4)
/// - `SIMILARITY_SAMPLE_SIZE`: canto da matriz no relatório (padrão: 5)
/// - `SIMILARITY_TOP_PAIRS`: pares mais similares (padrão: 5)
pub mod config;

// Re-exports principais
pub use config::{
    create_worker_pool, load_harness_config, ConfigError, ExecutionMode, HarnessConfig,
};
pub use performance::simd::cosine_similarity;
pub use runner::{runner_for, HarnessError, ParallelRunner, RunOutput, Runner, SequentialRunner};
pub use similarity::SimilarityMatrix;
pub use types::*;
pub use vocabulary::Vocabulary;

/// Versão da biblioteca.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude com imports comuns para uso rápido.
///
/// Importar tudo de uma vez:
/// ```rust,ignore
/// use doc_similarity::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ExecutionMode, HarnessConfig};
    pub use crate::performance::simd::cosine_similarity;
    pub use crate::runner::{runner_for, ParallelRunner, RunOutput, Runner, SequentialRunner};
    pub use crate::similarity::{compute_sequential, CancellationFlag, ParallelEngine, SimilarityMatrix};
    pub use crate::types::*;
    pub use crate::vocabulary::Vocabulary;
}

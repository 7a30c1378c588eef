// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RUNNERS - ORQUESTRAÇÃO DO PIPELINE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// descoberta → carga → vocabulário → vetorização → similaridade
//
// Os dois runners devolvem o mesmo formato (registros, tamanho do
// vocabulário, matriz), então o relatório não sabe qual estratégia foi
// usada. O runner sequencial é o oráculo de corretude do paralelo.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use rayon::ThreadPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{create_worker_pool, ExecutionMode, HarnessConfig};
use crate::corpus::{discover_files, load_documents, par_load_documents};
use crate::similarity::{
    compute_sequential, CancellationFlag, ParallelEngine, SimilarityError, SimilarityMatrix,
};
use crate::types::DocumentRecord;
use crate::utils::{ActionTimer, StageTimings};
use crate::vocabulary::Vocabulary;

/// Erros que abortam uma execução.
///
/// Falhas por documento nunca aparecem aqui: são absorvidas pelo loader.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Caminho raiz inexistente ou não é diretório
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Pool de workers não pôde ser criado
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Cancelamento solicitado durante a execução
    #[error("run cancelled before the similarity matrix was complete")]
    Cancelled,
}

impl From<SimilarityError> for HarnessError {
    fn from(err: SimilarityError) -> Self {
        match err {
            SimilarityError::Cancelled => Self::Cancelled,
        }
    }
}

/// Resultado completo de uma execução.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Um registro por arquivo descoberto, na ordem da matriz
    pub records: Vec<DocumentRecord>,
    /// Número de tokens distintos no corpus
    pub vocabulary_size: usize,
    /// Matriz N×N de similaridade
    pub matrix: SimilarityMatrix,
    /// Estratégia usada
    pub mode: ExecutionMode,
    /// Workers usados (1 no sequencial)
    pub workers: usize,
    /// Tempo por etapa
    pub timings: StageTimings,
}

impl RunOutput {
    /// Nenhum documento encontrado
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tripla (registros, tamanho do vocabulário, matriz)
    pub fn into_parts(self) -> (Vec<DocumentRecord>, usize, SimilarityMatrix) {
        (self.records, self.vocabulary_size, self.matrix)
    }
}

/// Estratégia de execução do pipeline.
///
/// Implementações definem como carregar e analisar; a orquestração
/// ponta a ponta ([`Runner::run`]) é compartilhada.
pub trait Runner: Send + Sync {
    /// Estratégia implementada
    fn mode(&self) -> ExecutionMode;

    /// Número de workers
    fn workers(&self) -> usize;

    /// Carrega os documentos, preservando a ordem de `paths`.
    fn load(&self, paths: &[PathBuf]) -> Vec<DocumentRecord>;

    /// Vocabulário → vetores → matriz sobre registros já carregados.
    fn analyze(&self, records: Vec<DocumentRecord>) -> Result<RunOutput, HarnessError>;

    /// Ponto de checagem entre etapas.
    fn check_cancelled(&self) -> Result<(), HarnessError> {
        Ok(())
    }

    /// Executa o pipeline completo a partir do diretório raiz.
    ///
    /// Corpus vazio é um resultado válido (registros vazios), não um erro.
    fn run(&self, root: &Path) -> Result<RunOutput, HarnessError> {
        if !root.is_dir() {
            return Err(HarnessError::NotADirectory(root.to_path_buf()));
        }

        log::info!("▶️  Executando {} em {}", self.mode(), root.display());

        let timer = ActionTimer::start("Descoberta de arquivos");
        let paths = discover_files(root);
        let discovery_ms = timer.stop_and_log();
        log::info!("🔍 {} arquivos encontrados", paths.len());

        if paths.is_empty() {
            log::info!("📭 Nenhum arquivo encontrado em {}", root.display());
        }
        self.check_cancelled()?;

        let timer = ActionTimer::start("Carga de documentos");
        let records = self.load(&paths);
        let load_ms = timer.stop_and_log();
        self.check_cancelled()?;

        let mut output = self.analyze(records)?;
        output.timings.discovery_ms = discovery_ms;
        output.timings.load_ms = load_ms;
        Ok(output)
    }
}

/// Runner de referência, single-thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialRunner;

impl SequentialRunner {
    /// Cria o runner sequencial
    pub fn new() -> Self {
        Self
    }
}

impl Runner for SequentialRunner {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }

    fn workers(&self) -> usize {
        1
    }

    fn load(&self, paths: &[PathBuf]) -> Vec<DocumentRecord> {
        load_documents(paths)
    }

    fn analyze(&self, records: Vec<DocumentRecord>) -> Result<RunOutput, HarnessError> {
        let mut timings = StageTimings::new();

        let timer = ActionTimer::start("Vocabulário");
        let vocabulary = Vocabulary::build(&records);
        timings.vocabulary_ms = timer.stop_and_log();

        let timer = ActionTimer::start("Vetorização");
        let vectors = vocabulary.vectorize_all(&records);
        timings.vectorize_ms = timer.stop_and_log();

        let timer = ActionTimer::start("Matriz de similaridade");
        let matrix = compute_sequential(&vectors);
        timings.similarity_ms = timer.stop_and_log();

        Ok(RunOutput {
            records,
            vocabulary_size: vocabulary.len(),
            matrix,
            mode: self.mode(),
            workers: self.workers(),
            timings,
        })
    }
}

/// Runner paralelo sobre um pool Rayon de tamanho fixo.
///
/// Carga, vocabulário, vetorização e similaridade rodam no mesmo pool.
#[derive(Debug, Clone)]
pub struct ParallelRunner {
    pool: Arc<ThreadPool>,
    engine: ParallelEngine,
    cancel: CancellationFlag,
}

impl ParallelRunner {
    /// Cria o runner sobre um pool existente
    pub fn new(pool: Arc<ThreadPool>) -> Self {
        let cancel = CancellationFlag::new();
        Self {
            engine: ParallelEngine::new(Arc::clone(&pool)).with_cancellation(cancel.clone()),
            pool,
            cancel,
        }
    }

    /// Cria o pool a partir da configuração
    pub fn from_config(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let pool = Arc::new(create_worker_pool(config)?);
        let runner = Self::new(pool);
        let engine = runner.engine.clone().with_batches_per_worker(config.batches_per_worker);
        Ok(Self { engine, ..runner })
    }

    /// Usa um sinal de cancelamento externo
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.engine = self.engine.with_cancellation(cancel.clone());
        self.cancel = cancel;
        self
    }

    /// Sinal de cancelamento desta execução
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }
}

impl Runner for ParallelRunner {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }

    fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn load(&self, paths: &[PathBuf]) -> Vec<DocumentRecord> {
        self.pool.install(|| par_load_documents(paths))
    }

    fn check_cancelled(&self) -> Result<(), HarnessError> {
        if self.cancel.is_cancelled() {
            return Err(HarnessError::Cancelled);
        }
        Ok(())
    }

    fn analyze(&self, records: Vec<DocumentRecord>) -> Result<RunOutput, HarnessError> {
        let mut timings = StageTimings::new();
        log::info!("👷 Workers: {}", self.workers());

        let timer = ActionTimer::start("Vocabulário (paralelo)");
        let vocabulary = self.pool.install(|| Vocabulary::par_build(&records));
        timings.vocabulary_ms = timer.stop_and_log();
        self.check_cancelled()?;

        let timer = ActionTimer::start("Vetorização (paralela)");
        let vectors = self.pool.install(|| vocabulary.par_vectorize_all(&records));
        timings.vectorize_ms = timer.stop_and_log();
        self.check_cancelled()?;

        let timer = ActionTimer::start("Matriz de similaridade (paralela)");
        let matrix = self.engine.compute(&vectors)?;
        timings.similarity_ms = timer.stop_and_log();

        Ok(RunOutput {
            records,
            vocabulary_size: vocabulary.len(),
            matrix,
            mode: self.mode(),
            workers: self.workers(),
            timings,
        })
    }
}

/// Cria o runner correspondente ao modo configurado.
pub fn runner_for(config: &HarnessConfig) -> Result<Box<dyn Runner>, HarnessError> {
    match config.mode {
        ExecutionMode::Sequential => Ok(Box::new(SequentialRunner::new())),
        ExecutionMode::Parallel => Ok(Box::new(ParallelRunner::from_config(config)?)),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CONFIGURAÇÃO DO HARNESS E DO POOL DE WORKERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Modo de execução, tamanho do pool e opções de relatório.
// Todas as configurações podem ser definidas via .env e sobrescritas
// pela linha de comando.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::fmt;

use crate::similarity::parallel::DEFAULT_BATCHES_PER_WORKER;

/// Número padrão de workers (fixo, para benchmarks reproduzíveis)
pub const DEFAULT_WORKERS: usize = 4;

/// Erros de configuração (valores inválidos vindos da CLI).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Modo desconhecido
    #[error("invalid mode '{0}' (expected 'seq' or 'par')")]
    InvalidMode(String),

    /// Número de workers inválido
    #[error("invalid worker count '{0}' (expected a positive integer or 'auto')")]
    InvalidWorkers(String),

    /// Valor numérico inválido para uma opção
    #[error("invalid value '{value}' for {option}")]
    InvalidNumber {
        /// Nome da opção
        option: String,
        /// Valor recebido
        value: String,
    },
}

/// Estratégia de execução do pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Implementação de referência, uma thread.
    #[default]
    Sequential,

    /// Pool de workers de tamanho fixo.
    Parallel,
}

impl ExecutionMode {
    /// Converte "seq"/"par" (ou nomes completos), case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "seq" | "sequential" => Ok(Self::Sequential),
            "par" | "parallel" => Ok(Self::Parallel),
            _ => Err(ConfigError::InvalidMode(value.to_string())),
        }
    }

    /// Rótulo curto usado no relatório ("SEQ" / "PAR")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sequential => "SEQ",
            Self::Parallel => "PAR",
        }
    }

    /// Retorna nome legível para logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Parallel => "Parallel",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Converte "auto" ou inteiro positivo em número de workers.
///
/// `None` significa automático.
pub fn parse_workers(value: &str) -> Result<Option<usize>, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidWorkers(value.to_string())),
    }
}

/// Configuração completa de uma execução.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Sequencial ou paralelo.
    pub mode: ExecutionMode,

    /// Número fixo de workers.
    /// Se None, usa cálculo dinâmico: min(cpu_cores, max_workers).
    pub workers: Option<usize>,

    /// Limite superior para o cálculo dinâmico.
    /// Padrão: 16
    pub max_workers: usize,

    /// Lotes de linhas por worker na matriz de similaridade.
    pub batches_per_worker: usize,

    /// Tamanho do canto da matriz exibido no relatório.
    pub sample_size: usize,

    /// Quantidade de pares mais similares exibidos.
    pub top_pairs: usize,

    /// Prefixo do nome das threads do pool.
    pub thread_name: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            workers: Some(DEFAULT_WORKERS),
            max_workers: 16,
            batches_per_worker: DEFAULT_BATCHES_PER_WORKER,
            sample_size: 5,
            top_pairs: 5,
            thread_name: "doc-similarity".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Cria configuração padrão.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calcula número efetivo de workers.
    ///
    /// Se `workers` está definido, usa esse valor.
    /// Senão, calcula: min(cpu_cores, max_workers)
    pub fn effective_workers(&self) -> usize {
        if let Some(workers) = self.workers {
            workers.max(1)
        } else {
            let cpu_cores = num_cpus::get();
            std::cmp::min(cpu_cores, self.max_workers).max(1)
        }
    }
}

/// Carrega configuração a partir das variáveis de ambiente.
///
/// Variáveis suportadas:
/// - `SIMILARITY_MODE`: "seq" ou "par" (padrão: seq)
/// - `SIMILARITY_WORKERS`: inteiro positivo ou "auto" (padrão: 4)
/// - `SIMILARITY_MAX_WORKERS`: limite para "auto" (padrão: 16)
/// - `SIMILARITY_BATCHES_PER_WORKER`: lotes por worker (padrão: 4)
/// - `SIMILARITY_SAMPLE_SIZE`: canto da matriz no relatório (padrão: 5)
/// - `SIMILARITY_TOP_PAIRS`: pares mais similares no relatório (padrão: 5)
///
/// Valores inválidos são ignorados (com warning) e o padrão é mantido.
pub fn load_harness_config() -> HarnessConfig {
    load_harness_config_from(|key| std::env::var(key).ok())
}

/// Igual a [`load_harness_config`], lendo as variáveis de `lookup`.
pub fn load_harness_config_from<F>(lookup: F) -> HarnessConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = HarnessConfig::default();

    if let Some(mode_str) = lookup("SIMILARITY_MODE") {
        match ExecutionMode::parse(&mode_str) {
            Ok(mode) => {
                config.mode = mode;
                log::info!("📦 SIMILARITY_MODE={}", mode);
            }
            Err(e) => log::warn!("⚠️  SIMILARITY_MODE ignorado: {}", e),
        }
    }

    if let Some(workers_str) = lookup("SIMILARITY_WORKERS") {
        match parse_workers(&workers_str) {
            Ok(workers) => {
                config.workers = workers;
                log::info!("📦 SIMILARITY_WORKERS={}", workers_str.trim());
            }
            Err(e) => log::warn!("⚠️  SIMILARITY_WORKERS ignorado: {}", e),
        }
    }

    if let Some(max) = positive_var(&lookup, "SIMILARITY_MAX_WORKERS") {
        config.max_workers = max;
    }

    if let Some(batches) = positive_var(&lookup, "SIMILARITY_BATCHES_PER_WORKER") {
        config.batches_per_worker = batches;
    }

    if let Some(sample) = positive_var(&lookup, "SIMILARITY_SAMPLE_SIZE") {
        config.sample_size = sample;
    }

    if let Some(top) = positive_var(&lookup, "SIMILARITY_TOP_PAIRS") {
        config.top_pairs = top;
    }

    if config.workers.is_none() {
        log::info!(
            "🔧 Workers: {} (dinâmico: min({} cores, {} max))",
            config.effective_workers(),
            num_cpus::get(),
            config.max_workers
        );
    }

    config
}

fn positive_var<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => {
            log::info!("📦 {}={}", key, value);
            Some(value)
        }
        _ => {
            log::warn!("⚠️  {}='{}' inválido, usando padrão", key, raw);
            None
        }
    }
}

/// Cria o pool Rayon com a configuração informada.
///
/// As threads recebem nomes `<thread_name>-<i>`.
pub fn create_worker_pool(config: &HarnessConfig) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    let workers = config.effective_workers();
    let thread_name = config.thread_name.clone();

    log::info!("🚀 Criando pool de workers: {} threads", workers);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(move |i| format!("{}-{}", thread_name, i))
        .build()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TIMING UTILITIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Utilitários para medir tempo de execução das etapas do pipeline.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::Serialize;
use std::time::{Duration, Instant};

/// Timer para medir duração de operações
pub struct ActionTimer {
    start: Instant,
    action_name: String,
}

impl ActionTimer {
    /// Inicia um novo timer para uma ação
    pub fn start(action_name: &str) -> Self {
        Self {
            start: Instant::now(),
            action_name: action_name.to_string(),
        }
    }

    /// Retorna o tempo decorrido em milissegundos
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Retorna o tempo decorrido como Duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Para o timer e loga o tempo decorrido
    pub fn stop_and_log(self) -> u128 {
        let elapsed = self.elapsed_ms();
        log::info!("⏱️  {} completado em {}ms", self.action_name, elapsed);
        elapsed
    }
}

/// Tempo gasto em cada etapa do pipeline (ms)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageTimings {
    /// Descoberta de arquivos
    pub discovery_ms: u128,
    /// Leitura + tokenização
    pub load_ms: u128,
    /// Construção do vocabulário
    pub vocabulary_ms: u128,
    /// Vetorização densa
    pub vectorize_ms: u128,
    /// Matriz de similaridade
    pub similarity_ms: u128,
}

impl StageTimings {
    /// Cria uma nova instância com todas as etapas zeradas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Soma de todas as etapas
    pub fn total_ms(&self) -> u128 {
        self.discovery_ms + self.load_ms + self.vocabulary_ms + self.vectorize_ms + self.similarity_ms
    }

    /// Formata um resumo das etapas
    pub fn summary(&self) -> String {
        format!(
            "Stage timings:\n\
             - Discovery:  {}ms\n\
             - Load:       {}ms\n\
             - Vocabulary: {}ms\n\
             - Vectorize:  {}ms\n\
             - Similarity: {}ms\n\
             - Total:      {}ms",
            self.discovery_ms,
            self.load_ms,
            self.vocabulary_ms,
            self.vectorize_ms,
            self.similarity_ms,
            self.total_ms()
        )
    }
}

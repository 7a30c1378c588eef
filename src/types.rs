// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TIPOS COMPARTILHADOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mapa token → número de ocorrências em um documento
pub type TermFrequency = HashMap<String, u32>;

/// Vetor denso de contagens, indexado pela posição no vocabulário.
///
/// Posição `i` guarda a frequência do token `vocabulary[i]` (0 se ausente).
pub type DocumentVector = Vec<u32>;

/// Registro de um documento descoberto no corpus.
///
/// Criado uma única vez por arquivo e nunca modificado depois.
/// Falhas de leitura resultam em campos zerados, nunca em erro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Nome de exibição (basename do arquivo)
    pub filename: String,
    /// Caminho completo de origem
    pub path: PathBuf,
    /// Tamanho em bytes (0 se os metadados não puderam ser lidos)
    pub size_bytes: u64,
    /// Frequência de cada termo no documento
    #[serde(skip)]
    pub term_frequency: TermFrequency,
}

impl DocumentRecord {
    /// Cria um registro a partir do caminho, derivando o nome de exibição.
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64, term_frequency: TermFrequency) -> Self {
        let path = path.into();
        Self {
            filename: display_name(&path),
            path,
            size_bytes,
            term_frequency,
        }
    }

    /// Registro vazio (sem termos, tamanho 0) para um arquivo inacessível.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::new(path, 0, TermFrequency::new())
    }

    /// Número total de tokens (soma das frequências)
    pub fn token_count(&self) -> u64 {
        self.term_frequency.values().map(|&c| c as u64).sum()
    }

    /// Número de termos distintos
    pub fn distinct_terms(&self) -> usize {
        self.term_frequency.len()
    }

    /// Documento sem nenhum token
    pub fn is_empty(&self) -> bool {
        self.term_frequency.is_empty()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

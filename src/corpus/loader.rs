//! # Document Loader
//!
//! Converte um caminho de arquivo em um [`DocumentRecord`]: tamanho,
//! texto decodificado e mapa de frequência de termos.
//!
//! ## Decodificação
//!
//! 1. Tenta UTF-8
//! 2. Se falhar, decodifica como Latin-1 (todo byte é um caractere válido)
//! 3. Se o arquivo não puder ser lido, o texto é vazio
//!
//! O loader é uma função total: nenhuma falha por arquivo chega ao caller.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::types::DocumentRecord;
use crate::utils::term_frequency;

/// Codificação efetivamente usada para obter o texto de um arquivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Bytes eram UTF-8 válido
    Utf8,
    /// Fallback: cada byte mapeado para U+0000..U+00FF
    Latin1,
    /// Leitura falhou, texto tratado como vazio
    Unreadable,
}

/// Texto decodificado junto com a codificação usada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Conteúdo textual
    pub text: String,
    /// Codificação aplicada
    pub encoding: TextEncoding,
}

/// Decodifica bytes com fallback UTF-8 → Latin-1.
pub fn decode_bytes(bytes: Vec<u8>) -> DecodedText {
    match String::from_utf8(bytes) {
        Ok(text) => DecodedText {
            text,
            encoding: TextEncoding::Utf8,
        },
        Err(e) => DecodedText {
            text: e.into_bytes().into_iter().map(char::from).collect(),
            encoding: TextEncoding::Latin1,
        },
    }
}

/// Lê o arquivo como texto. Nunca falha.
pub fn read_text(path: &Path) -> DecodedText {
    match std::fs::read(path) {
        Ok(bytes) => {
            let decoded = decode_bytes(bytes);
            if decoded.encoding == TextEncoding::Latin1 {
                log::debug!("🔤 {} não é UTF-8, usando Latin-1", path.display());
            }
            decoded
        }
        Err(e) => {
            log::warn!("⚠️  Falha ao ler {}: {} (tratado como vazio)", path.display(), e);
            DecodedText {
                text: String::new(),
                encoding: TextEncoding::Unreadable,
            }
        }
    }
}

/// Tamanho do arquivo em bytes, 0 se os metadados forem inacessíveis.
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|meta| meta.len()).unwrap_or(0)
}

/// Constrói o registro de um único documento.
pub fn load_document(path: &Path) -> DocumentRecord {
    let decoded = read_text(path);
    DocumentRecord::new(path, file_size(path), term_frequency(&decoded.text))
}

/// Carrega documentos na ordem dos caminhos recebidos.
pub fn load_documents(paths: &[PathBuf]) -> Vec<DocumentRecord> {
    paths.iter().map(|path| load_document(path)).collect()
}

/// Versão paralela de [`load_documents`].
///
/// Executa no pool Rayon corrente (use dentro de `ThreadPool::install`).
/// A ordem da saída é a mesma da entrada.
pub fn par_load_documents(paths: &[PathBuf]) -> Vec<DocumentRecord> {
    paths.par_iter().map(|path| load_document(path)).collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CORPUS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Entrada do pipeline: descoberta de arquivos e carga de documentos.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Travessia recursiva do diretório raiz.
pub mod discovery;
/// Leitura, decodificação e frequência de termos por arquivo.
pub mod loader;

pub use discovery::discover_files;
pub use loader::{
    decode_bytes, file_size, load_document, load_documents, par_load_documents, read_text,
    DecodedText, TextEncoding,
};

//! # Descoberta de Arquivos
//!
//! Percorre recursivamente um diretório raiz e coleta os caminhos de todos
//! os arquivos regulares encontrados.
//!
//! ## Política de Falhas
//!
//! | Entrada | Comportamento |
//! |---------|---------------|
//! | Arquivo regular | ✅ Incluído |
//! | Link simbólico | ⏭️ Ignorado (não é seguido) |
//! | Permissão negada | ⏭️ Ignorado, travessia continua |
//! | Diretório vazio | ✅ Resultado vazio (não é erro) |

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Coleta todos os arquivos regulares abaixo de `root`.
///
/// Entradas inacessíveis são ignoradas silenciosamente (log em `debug`).
/// O resultado é ordenado por caminho para que a ordem dos documentos,
/// e portanto os índices da matriz, seja a mesma em todas as execuções.
pub fn discover_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("⏭️  Ignorando entrada inacessível: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    log::debug!("🔍 {} arquivos encontrados em {}", files.len(), root.display());
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/b.txt"), "beta").unwrap();
        fs::write(dir.path().join("sub/deeper/c.log"), "gamma").unwrap();

        let files = discover_files(dir.path());

        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|p| p.is_file()));
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        assert!(discover_files(dir.path()).is_empty());
    }

    #[test]
    fn test_discover_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_files(&dir.path().join("does-not-exist")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.txt");
        fs::write(&target, "real content").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

        let files = discover_files(dir.path());

        assert_eq!(files, vec![target]);
    }
}

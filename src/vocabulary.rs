// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// VOCABULÁRIO E VETORIZAÇÃO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// O vocabulário é a união ordenada (lexicográfica) de todos os termos do
// corpus. A posição de cada token define o índice correspondente em todos
// os vetores densos, então a ordem precisa ser idêntica nos caminhos
// sequencial e paralelo.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::{DocumentRecord, DocumentVector};

/// Vocabulário ordenado com lookup token → índice.
///
/// Imutável depois de construído; reconstruído a cada execução.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Constrói o vocabulário a partir dos registros (sequencial).
    pub fn build(records: &[DocumentRecord]) -> Self {
        let terms: BTreeSet<&str> = records
            .iter()
            .flat_map(|record| record.term_frequency.keys().map(String::as_str))
            .collect();

        Self::from_sorted(terms.into_iter().map(str::to_string).collect())
    }

    /// Constrói o vocabulário em paralelo.
    ///
    /// Cada thread acumula um `HashSet` parcial, os parciais são unidos
    /// e o resultado é ordenado no final. A saída é byte a byte igual
    /// à de [`Vocabulary::build`].
    pub fn par_build(records: &[DocumentRecord]) -> Self {
        let terms: HashSet<&str> = records
            .par_iter()
            .fold(HashSet::new, |mut acc, record| {
                acc.extend(record.term_frequency.keys().map(String::as_str));
                acc
            })
            .reduce(HashSet::new, |mut a, mut b| {
                if a.len() < b.len() {
                    std::mem::swap(&mut a, &mut b);
                }
                a.extend(b);
                a
            });

        let mut tokens: Vec<String> = terms.into_iter().map(str::to_string).collect();
        tokens.par_sort_unstable();
        Self::from_sorted(tokens)
    }

    fn from_sorted(tokens: Vec<String>) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (token.clone(), i))
            .collect();
        Self { tokens, index }
    }

    /// Número de tokens distintos
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Vocabulário vazio
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens na ordem dos índices
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Índice de um token, se presente
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Projeta um documento no vetor denso de tamanho `len()`.
    pub fn vectorize(&self, record: &DocumentRecord) -> DocumentVector {
        let mut vector = vec![0u32; self.tokens.len()];
        for (token, &count) in &record.term_frequency {
            if let Some(i) = self.index_of(token) {
                vector[i] = count;
            }
        }
        vector
    }

    /// Vetoriza todos os documentos, mantendo a ordem.
    pub fn vectorize_all(&self, records: &[DocumentRecord]) -> Vec<DocumentVector> {
        records.iter().map(|record| self.vectorize(record)).collect()
    }

    /// Versão paralela de [`Vocabulary::vectorize_all`].
    pub fn par_vectorize_all(&self, records: &[DocumentRecord]) -> Vec<DocumentVector> {
        records.par_iter().map(|record| self.vectorize(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::term_frequency;

    fn record(name: &str, text: &str) -> DocumentRecord {
        DocumentRecord::new(name, text.len() as u64, term_frequency(text))
    }

    fn sample_records() -> Vec<DocumentRecord> {
        vec![
            record("doc1.txt", "cat dog cat"),
            record("doc2.txt", "dog dog bird"),
            record("doc3.txt", "fish fish fish"),
        ]
    }

    #[test]
    fn test_vocabulary_sorted_union() {
        let vocab = Vocabulary::build(&sample_records());
        assert_eq!(vocab.tokens(), &["bird", "cat", "dog", "fish"]);
        assert_eq!(vocab.index_of("dog"), Some(2));
        assert_eq!(vocab.index_of("cow"), None);
    }

    #[test]
    fn test_vectorize_reference_corpus() {
        let records = sample_records();
        let vocab = Vocabulary::build(&records);
        let vectors = vocab.vectorize_all(&records);

        assert_eq!(vectors[0], vec![0, 2, 1, 0]);
        assert_eq!(vectors[1], vec![1, 0, 2, 0]);
        assert_eq!(vectors[2], vec![0, 0, 0, 3]);
    }

    #[test]
    fn test_vocabulary_independent_of_record_order() {
        let records = sample_records();
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = Vocabulary::build(&records);
        assert_eq!(forward, Vocabulary::build(&reversed));
        assert_eq!(forward, Vocabulary::par_build(&records));
        assert_eq!(forward, Vocabulary::par_build(&reversed));
    }

    #[test]
    fn test_par_build_matches_on_larger_corpus() {
        let words = ["alpha", "beta", "gamma", "delta", "omega", "sigma", "kappa"];
        let records: Vec<DocumentRecord> = (0..200)
            .map(|i| {
                let text = format!("{} {} {}", words[i % 7], words[(i * 3) % 7], words[(i / 7) % 7]);
                record(&format!("d{}.txt", i), &text)
            })
            .collect();

        let sequential = Vocabulary::build(&records);
        let parallel = Vocabulary::par_build(&records);
        assert_eq!(sequential.tokens(), parallel.tokens());
        assert_eq!(sequential.len(), words.len());
        assert_eq!(
            sequential.vectorize_all(&records),
            parallel.par_vectorize_all(&records)
        );
    }

    #[test]
    fn test_empty_corpus_vocabulary() {
        let vocab = Vocabulary::build(&[]);
        assert!(vocab.is_empty());
        assert!(Vocabulary::par_build(&[]).is_empty());
    }

    #[test]
    fn test_vectorize_empty_document() {
        let records = sample_records();
        let vocab = Vocabulary::build(&records);
        let empty = DocumentRecord::empty("blank.txt");

        assert_eq!(vocab.vectorize(&empty), vec![0, 0, 0, 0]);
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// MATRIZ DE SIMILARIDADE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Matriz N×N simétrica de similaridade cosseno entre todos os pares de
// documentos. Apenas o triângulo superior (i < j) é calculado; o valor é
// espelhado em (j, i) e a diagonal é fixada em 1.0.
//
// Custo: O(N² · V) tempo, O(N²) memória.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Cálculo paralelo particionado por linhas.
pub mod parallel;
/// Particionamento balanceado do triângulo superior.
pub mod partition;

pub use parallel::{CancellationFlag, ParallelEngine};
pub use partition::{pair_count, partition_rows};

use serde::Serialize;

use crate::performance::{cosine_from_parts, dot_product, squared_norm};
use crate::types::DocumentVector;

/// Erros do cálculo de similaridade.
///
/// A similaridade em si é total; o único erro possível é cancelamento.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimilarityError {
    /// Cancelamento solicitado antes de todas as linhas serem calculadas
    #[error("similarity computation cancelled")]
    Cancelled,
}

/// Par de documentos com sua similaridade (i < j)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarPair {
    /// Índice do primeiro documento
    pub i: usize,
    /// Índice do segundo documento
    pub j: usize,
    /// Similaridade cosseno
    pub score: f64,
}

/// Matriz N×N de similaridades, row-major.
///
/// Somente leitura depois de construída.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Matriz com diagonal 1.0 e zeros fora dela.
    pub(crate) fn with_unit_diagonal(size: usize) -> Self {
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            values[i * size + i] = 1.0;
        }
        Self { size, values }
    }

    /// Escreve a parte superior da linha `i` (colunas i+1..N) e o espelho.
    pub(crate) fn fill_upper_row(&mut self, i: usize, upper: &[f64]) {
        debug_assert_eq!(upper.len(), self.size - i - 1);
        for (offset, &score) in upper.iter().enumerate() {
            let j = i + 1 + offset;
            self.values[i * self.size + j] = score;
            self.values[j * self.size + i] = score;
        }
    }

    /// Monta a matriz a partir das linhas superiores (i, valores para j > i).
    pub(crate) fn from_upper_rows<I>(size: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = (usize, Vec<f64>)>,
    {
        let mut matrix = Self::with_unit_diagonal(size);
        for (i, upper) in rows {
            matrix.fill_upper_row(i, &upper);
        }
        matrix
    }

    /// Número de documentos (N)
    pub fn len(&self) -> usize {
        self.size
    }

    /// Matriz sem documentos
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Valor em (i, j)
    ///
    /// # Panics
    ///
    /// Se `i` ou `j` estiverem fora de `0..len()`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "index out of bounds");
        self.values[i * self.size + j]
    }

    /// Linha `i` completa
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Iterador sobre as linhas
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.size).map(move |i| self.row(i))
    }

    /// Canto superior esquerdo k×k (k limitado a N)
    pub fn corner(&self, k: usize) -> Vec<Vec<f64>> {
        let k = k.min(self.size);
        (0..k).map(|i| self.row(i)[..k].to_vec()).collect()
    }

    /// Verifica (i, j) == (j, i) para todo par
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Maior diferença absoluta elemento a elemento.
    ///
    /// `None` se as dimensões forem diferentes.
    pub fn max_abs_diff(&self, other: &SimilarityMatrix) -> Option<f64> {
        if self.size != other.size {
            return None;
        }
        Some(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Igualdade dentro da tolerância
    pub fn approx_eq(&self, other: &SimilarityMatrix, tolerance: f64) -> bool {
        self.max_abs_diff(other).is_some_and(|diff| diff <= tolerance)
    }

    /// Pares (i < j) com score ≥ `threshold`, do mais similar ao menos.
    ///
    /// Empates são ordenados por (i, j). No máximo `limit` pares.
    /// Roda na thread que chama, fora de qualquer pool.
    pub fn most_similar_pairs(&self, limit: usize, threshold: f64) -> Vec<SimilarPair> {
        let mut pairs: Vec<SimilarPair> = (0..self.size)
            .flat_map(|i| {
                (i + 1..self.size).filter_map(move |j| {
                    let score = self.get(i, j);
                    (score >= threshold).then_some(SimilarPair { i, j, score })
                })
            })
            .collect();

        pairs.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.i.cmp(&b.i))
                .then(a.j.cmp(&b.j))
        });
        pairs.truncate(limit);
        pairs
    }
}

/// ‖v‖² de cada vetor
pub(crate) fn squared_norms(vectors: &[DocumentVector]) -> Vec<u64> {
    vectors.iter().map(|v| squared_norm(v)).collect()
}

/// Similaridades da linha `i` para as colunas j > i.
///
/// Compartilhado pelos caminhos sequencial e paralelo, o que garante
/// resultados bit a bit idênticos.
pub(crate) fn upper_row(vectors: &[DocumentVector], norms: &[u64], i: usize) -> Vec<f64> {
    let a = &vectors[i];
    (i + 1..vectors.len())
        .map(|j| cosine_from_parts(dot_product(a, &vectors[j]), norms[i], norms[j]))
        .collect()
}

/// Calcula a matriz completa sequencialmente.
///
/// Implementação de referência: o caminho paralelo deve produzir
/// exatamente o mesmo resultado.
pub fn compute_sequential(vectors: &[DocumentVector]) -> SimilarityMatrix {
    let norms = squared_norms(vectors);
    SimilarityMatrix::from_upper_rows(
        vectors.len(),
        (0..vectors.len()).map(|i| (i, upper_row(vectors, &norms, i))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::cosine_similarity;

    fn reference_vectors() -> Vec<DocumentVector> {
        vec![vec![0, 2, 1, 0], vec![1, 0, 2, 0], vec![0, 0, 0, 3]]
    }

    #[test]
    fn test_sequential_reference_matrix() {
        let matrix = compute_sequential(&reference_vectors());

        assert_eq!(matrix.len(), 3);
        assert!((matrix.get(0, 1) - 0.4).abs() < 1e-9);
        assert_eq!(matrix.get(0, 2), 0.0);
        assert_eq!(matrix.get(1, 2), 0.0);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 1.0);
        }
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn test_zero_vector_diagonal_is_one() {
        let matrix = compute_sequential(&[vec![0, 0, 0], vec![1, 2, 3]]);

        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(0, 1), 0.0);
        assert_eq!(matrix.get(1, 0), 0.0);
    }

    #[test]
    fn test_matrix_entries_match_pairwise_cosine() {
        let vectors: Vec<DocumentVector> = (0..9u32)
            .map(|d| (0..13u32).map(|t| (d * 7 + t * 3) % 5).collect())
            .collect();
        let matrix = compute_sequential(&vectors);

        for i in 0..vectors.len() {
            for j in 0..vectors.len() {
                if i != j {
                    assert_eq!(matrix.get(i, j), cosine_similarity(&vectors[i], &vectors[j]));
                }
            }
        }
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = compute_sequential(&[]);
        assert!(matrix.is_empty());
        assert!(matrix.corner(5).is_empty());
        assert!(matrix.most_similar_pairs(5, 0.0).is_empty());
    }

    #[test]
    fn test_corner_is_clamped() {
        let matrix = compute_sequential(&reference_vectors());
        let corner = matrix.corner(10);

        assert_eq!(corner.len(), 3);
        assert!(corner.iter().all(|row| row.len() == 3));
        assert_eq!(matrix.corner(2), vec![matrix.row(0)[..2].to_vec(), matrix.row(1)[..2].to_vec()]);
    }

    #[test]
    fn test_max_abs_diff_dimension_mismatch() {
        let a = compute_sequential(&reference_vectors());
        let b = compute_sequential(&reference_vectors()[..2]);

        assert_eq!(a.max_abs_diff(&b), None);
        assert!(!a.approx_eq(&b, 1.0));
        assert_eq!(a.max_abs_diff(&a), Some(0.0));
    }

    #[test]
    fn test_most_similar_pairs_ordering() {
        let vectors = vec![vec![1, 0], vec![1, 0], vec![1, 1], vec![0, 1]];
        let matrix = compute_sequential(&vectors);

        let pairs = matrix.most_similar_pairs(10, 0.5);

        assert_eq!((pairs[0].i, pairs[0].j), (0, 1));
        assert!((pairs[0].score - 1.0).abs() < 1e-12);
        assert!(pairs.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(pairs.iter().all(|p| p.i < p.j && p.score >= 0.5));
        // (0,3) e (1,3) são ortogonais
        assert!(!pairs.iter().any(|p| p.j == 3 && p.i < 2));
        assert_eq!(matrix.most_similar_pairs(1, 0.0).len(), 1);
    }

    #[test]
    fn test_most_similar_pairs_ties_by_index() {
        // três documentos idênticos e um ortogonal
        let vectors = vec![vec![2, 1], vec![0, 3], vec![2, 1], vec![2, 1]];
        let matrix = compute_sequential(&vectors);

        let pairs = matrix.most_similar_pairs(10, f64::MIN_POSITIVE);
        let order: Vec<(usize, usize)> = pairs.iter().map(|p| (p.i, p.j)).collect();

        assert_eq!(&order[..3], &[(0, 2), (0, 3), (2, 3)]);
        assert!(pairs[..3].iter().all(|p| p.score == 1.0));
    }

    #[test]
    fn test_identical_documents_off_diagonal_is_one() {
        let matrix = compute_sequential(&[vec![1, 1], vec![1, 1], vec![0, 2]]);

        assert_eq!(matrix.get(0, 1), 1.0);
        assert_eq!(matrix.get(1, 0), 1.0);

        let docs = vec![vec![0, 2, 1, 0], vec![0, 2, 1, 0]];
        assert_eq!(compute_sequential(&docs).get(0, 1), 1.0);
    }
}

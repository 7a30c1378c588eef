//! Particionamento do triângulo superior em lotes de linhas.
//!
//! A linha `i` de uma matriz N×N contém `N - 1 - i` pares (i, j) com j > i,
//! então dividir as linhas em fatias de mesmo tamanho deixaria o primeiro
//! worker com quase o triplo de trabalho do último. Aqui os lotes são
//! faixas contíguas de linhas com contagem de pares aproximadamente igual.

use std::ops::Range;

/// Número de pares não ordenados {(i, j) : i < j}
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Divide as linhas `0..n` em no máximo `parts` faixas contíguas.
///
/// As faixas cobrem todas as linhas exatamente uma vez, em ordem.
/// Cada faixa recebe aproximadamente `pair_count(n) / parts` pares
/// (excedendo o alvo em no máximo uma linha).
pub fn partition_rows(n: usize, parts: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }

    let total = pair_count(n);
    if total == 0 {
        return vec![0..n];
    }

    let parts = parts.clamp(1, n);
    let target = total.div_ceil(parts);

    let mut batches = Vec::with_capacity(parts);
    let mut start = 0;
    let mut acc = 0;
    for i in 0..n {
        acc += n - 1 - i;
        if acc >= target && batches.len() + 1 < parts {
            batches.push(start..i + 1);
            start = i + 1;
            acc = 0;
        }
    }
    if start < n {
        batches.push(start..n);
    }

    batches
}

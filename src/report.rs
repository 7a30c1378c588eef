// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RELATÓRIO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Consome apenas (registros, tamanho do vocabulário, matriz): não sabe
// se o resultado veio do runner sequencial ou do paralelo.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::Serialize;
use std::fmt::Write as _;

use crate::runner::RunOutput;
use crate::similarity::{SimilarPair, SimilarityMatrix};
use crate::types::DocumentRecord;
use crate::utils::StageTimings;

const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Estatísticas agregadas de tamanho dos arquivos
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStats {
    /// Número de documentos
    pub n_docs: usize,
    /// Soma dos tamanhos em bytes
    pub total_bytes: u64,
    /// Tamanho médio (0 se não houver documentos)
    pub avg_size: f64,
}

/// Agrega tamanho total e médio dos registros
pub fn aggregate_file_stats(records: &[DocumentRecord]) -> FileStats {
    let n_docs = records.len();
    let total_bytes: u64 = records.iter().map(|r| r.size_bytes).sum();
    let avg_size = if n_docs == 0 {
        0.0
    } else {
        total_bytes as f64 / n_docs as f64
    };

    FileStats {
        n_docs,
        total_bytes,
        avg_size,
    }
}

/// Formata bytes em MB, ou GB a partir de 1 GiB
pub fn format_bytes(num_bytes: f64) -> String {
    if num_bytes / GB >= 1.0 {
        format!("{:.2} GB", num_bytes / GB)
    } else {
        format!("{:.2} MB", num_bytes / MB)
    }
}

/// Bloco de resumo da execução
pub fn render_summary(mode_label: &str, stats: &FileStats, vocabulary_size: usize, total_secs: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} Summary ===", mode_label);
    let _ = writeln!(out, "Documents:            {}", stats.n_docs);
    let _ = writeln!(out, "Vocabulary size:      {}", vocabulary_size);
    let _ = writeln!(out);
    let _ = writeln!(out, "File statistics:");
    let _ = writeln!(out, "  {:<28}{:>12}", "Total size:", format_bytes(stats.total_bytes as f64));
    let _ = writeln!(out, "  {:<28}{:>12}", "Average file size:", format_bytes(stats.avg_size));
    let _ = writeln!(out, "  {:<28}{:>12.3}", "Total processing time (sec):", total_secs);
    out
}

/// Canto superior esquerdo da matriz, uma linha por documento
pub fn render_sample_similarities(records: &[DocumentRecord], matrix: &SimilarityMatrix, max_show: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sample similarities (first {} docs):", max_show);

    for (record, row) in records.iter().zip(matrix.corner(max_show)) {
        let scores: Vec<String> = row.iter().map(|v| format!("{:.3}", v)).collect();
        let _ = writeln!(out, "{:<25} {}", record.filename, scores.join(" "));
    }
    out
}

/// Lista dos pares mais similares
pub fn render_top_pairs(records: &[DocumentRecord], pairs: &[SimilarPair]) -> String {
    let mut out = String::new();
    if pairs.is_empty() {
        return out;
    }

    let _ = writeln!(out, "Most similar pairs:");
    for pair in pairs {
        let _ = writeln!(
            out,
            "  {:.3}  {} <-> {}",
            pair.score, records[pair.i].filename, records[pair.j].filename
        );
    }
    out
}

/// Linha do canto da matriz no relatório JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    /// Documento da linha
    pub filename: String,
    /// Similaridades com os primeiros documentos
    pub scores: Vec<f64>,
}

/// Par similar identificado por nome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    /// Primeiro documento
    pub first: String,
    /// Segundo documento
    pub second: String,
    /// Similaridade cosseno
    pub score: f64,
}

/// Relatório completo, serializável em JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// "SEQ" ou "PAR"
    pub mode: String,
    /// Workers usados
    pub workers: usize,
    /// Tamanho do vocabulário
    pub vocabulary_size: usize,
    /// Estatísticas de arquivos
    pub file_stats: FileStats,
    /// Tempo total de parede (s)
    pub total_time_secs: f64,
    /// Tempo por etapa
    pub timings: StageTimings,
    /// Canto da matriz
    pub sample: Vec<SampleRow>,
    /// Pares mais similares
    pub top_pairs: Vec<PairReport>,
}

impl RunReport {
    /// Monta o relatório a partir do resultado de uma execução
    pub fn from_output(output: &RunOutput, total_time_secs: f64, sample_size: usize, top_pairs: usize) -> Self {
        let records = &output.records;
        let sample = records
            .iter()
            .zip(output.matrix.corner(sample_size))
            .map(|(record, scores)| SampleRow {
                filename: record.filename.clone(),
                scores,
            })
            .collect();

        let top_pairs = output
            .matrix
            .most_similar_pairs(top_pairs, f64::MIN_POSITIVE)
            .into_iter()
            .map(|pair| PairReport {
                first: records[pair.i].filename.clone(),
                second: records[pair.j].filename.clone(),
                score: pair.score,
            })
            .collect();

        Self {
            mode: output.mode.label().to_string(),
            workers: output.workers,
            vocabulary_size: output.vocabulary_size,
            file_stats: aggregate_file_stats(records),
            total_time_secs,
            timings: output.timings.clone(),
            sample,
            top_pairs,
        }
    }

    /// Serializa em JSON formatado
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Runner, SequentialRunner};
    use crate::utils::term_frequency;

    fn record(name: &str, text: &str, size: u64) -> DocumentRecord {
        DocumentRecord::new(name, size, term_frequency(text))
    }

    fn reference_output() -> RunOutput {
        SequentialRunner::new()
            .analyze(vec![
                record("doc1.txt", "cat dog cat", 11),
                record("doc2.txt", "dog dog bird", 12),
                record("doc3.txt", "fish fish fish", 14),
            ])
            .unwrap()
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0.0), "0.00 MB");
        assert_eq!(format_bytes(1024.0 * 1024.0 * 1.5), "1.50 MB");
        assert_eq!(format_bytes(1024.0 * 1024.0 * 1024.0 * 2.0), "2.00 GB");
    }

    #[test]
    fn test_aggregate_file_stats() {
        let stats = aggregate_file_stats(&reference_output().records);
        assert_eq!(stats.n_docs, 3);
        assert_eq!(stats.total_bytes, 37);
        assert!((stats.avg_size - 37.0 / 3.0).abs() < 1e-12);

        let empty = aggregate_file_stats(&[]);
        assert_eq!(empty.n_docs, 0);
        assert_eq!(empty.avg_size, 0.0);
    }

    #[test]
    fn test_render_summary() {
        let stats = aggregate_file_stats(&reference_output().records);
        let summary = render_summary("SEQ", &stats, 4, 0.25);

        assert!(summary.starts_with("=== SEQ Summary ===\n"));
        assert!(summary.contains("Documents:            3\n"));
        assert!(summary.contains("Vocabulary size:      4\n"));
        assert!(summary.contains("Total processing time (sec):       0.250"));
    }

    #[test]
    fn test_render_sample_similarities() {
        let output = reference_output();
        let sample = render_sample_similarities(&output.records, &output.matrix, 5);
        let lines: Vec<&str> = sample.lines().collect();

        assert_eq!(lines[0], "Sample similarities (first 5 docs):");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], format!("{:<25} 1.000 0.400 0.000", "doc1.txt"));
        assert_eq!(lines[3], format!("{:<25} 0.000 0.000 1.000", "doc3.txt"));
    }

    #[test]
    fn test_report_json() {
        let output = reference_output();
        let report = RunReport::from_output(&output, 0.5, 2, 5);

        assert_eq!(report.mode, "SEQ");
        assert_eq!(report.sample.len(), 2);
        assert_eq!(report.top_pairs.len(), 1);
        assert_eq!(report.top_pairs[0].first, "doc1.txt");
        assert_eq!(report.top_pairs[0].second, "doc2.txt");

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["vocabulary_size"], 4);
        assert_eq!(json["file_stats"]["n_docs"], 3);
    }

    #[test]
    fn test_render_top_pairs() {
        let output = reference_output();
        let pairs = output.matrix.most_similar_pairs(5, f64::MIN_POSITIVE);
        let text = render_top_pairs(&output.records, &pairs);

        assert!(text.contains("0.400  doc1.txt <-> doc2.txt"));
        assert!(render_top_pairs(&output.records, &[]).is_empty());
    }
}

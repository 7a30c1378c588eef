// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TEXT UTILITIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Tokenização e contagem de termos:
// - Lowercase do texto inteiro
// - Palavras alfabéticas (ASCII) com 3+ letras, delimitadas por word boundary
// - Dígitos, pontuação e palavras curtas são descartados
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::TermFrequency;

/// Tamanho mínimo de um token
pub const MIN_TOKEN_LEN: usize = 3;

// `\b` é Unicode: "abc123" e "café" não produzem token algum.
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("token pattern is valid"));

/// Tokeniza um texto em palavras minúsculas.
///
/// # Exemplo
///
/// ```rust
/// use doc_similarity::utils::tokenize;
///
/// assert_eq!(tokenize("Hello, World! 3820 go-go"), vec!["hello", "world"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Conta ocorrências de cada token
pub fn build_term_frequency<I, S>(tokens: I) -> TermFrequency
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tf = TermFrequency::new();
    for token in tokens {
        *tf.entry(token.into()).or_insert(0) += 1;
    }
    tf
}

/// Atalho: tokeniza e conta em um único passo
pub fn term_frequency(text: &str) -> TermFrequency {
    build_term_frequency(tokenize(text))
}

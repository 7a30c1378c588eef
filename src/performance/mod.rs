//! Módulo de otimizações de performance.
//!
//! Este módulo contém os kernels executados O(N²) vezes durante o
//! cálculo da matriz de similaridade.
//!
//! ## Técnicas Utilizadas
//!
//! - **SIMD (AVX2)**: 4 produtos u32×u32 → u64 por instrução
//! - **Aritmética exata**: acumuladores inteiros, resultado independente
//!   da ordem de soma
//! - **Cache-friendly**: acesso sequencial à memória

/// Operações vetoriais otimizadas com SIMD.
///
/// - [`dot_product`]: produto escalar exato
/// - [`squared_norm`]: ‖v‖²
/// - [`cosine_similarity`]: similaridade com guarda para vetor nulo
///
/// Usa instruções AVX2 quando disponíveis (x86_64),
/// com fallback para implementação escalar.
pub mod simd;

pub use simd::{cosine_from_parts, cosine_similarity, dot_product, squared_norm};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SIMD - SINGLE INSTRUCTION, MULTIPLE DATA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Operações sobre vetores de contagem (u32) usando instruções SIMD.
//
// Os vetores de frequência são inteiros, então o produto escalar e as
// normas são acumulados em u64 de forma EXATA:
// - AVX2: 4 lanes u64 por instrução (_mm256_mul_epu32)
// - Scalar: mesmo resultado, bit a bit
//
// Como a aritmética é exata, a ordem de soma não importa: o caminho
// SIMD, o escalar e qualquer particionamento paralelo produzem o mesmo
// valor de similaridade.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Produto escalar - implementação simples (fallback)
pub fn dot_product_scalar(a: &[u32], b: &[u32]) -> u64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    a.iter()
        .zip(b.iter())
        .fold(0u64, |acc, (&x, &y)| acc.wrapping_add(x as u64 * y as u64))
}

/// Produto escalar com AVX2
///
/// Expande 4 contagens u32 para lanes u64 e multiplica com
/// `_mm256_mul_epu32` (resultado de 64 bits, sem overflow por produto).
///
/// # Safety
///
/// O caller deve garantir que a CPU suporta AVX2.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn dot_product_avx2(a: &[u32], b: &[u32]) -> u64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    let len = a.len();

    let mut acc = _mm256_setzero_si256();

    // Processa 4 elementos por iteração
    let chunks = len / 4;
    for i in 0..chunks {
        let offset = i * 4;

        let va = _mm256_cvtepu32_epi64(_mm_loadu_si128(a.as_ptr().add(offset) as *const __m128i));
        let vb = _mm256_cvtepu32_epi64(_mm_loadu_si128(b.as_ptr().add(offset) as *const __m128i));

        acc = _mm256_add_epi64(acc, _mm256_mul_epu32(va, vb));
    }

    let mut result = hsum_epi64_avx2(acc);

    // Remainder
    for i in (chunks * 4)..len {
        result = result.wrapping_add(a[i] as u64 * b[i] as u64);
    }

    result
}

/// Soma horizontal de 4 u64 em um registro AVX2
#[cfg(target_arch = "x86_64")]
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn hsum_epi64_avx2(v: __m256i) -> u64 {
    let mut lanes = [0u64; 4];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, v);
    lanes
        .iter()
        .fold(0u64, |acc, &lane| acc.wrapping_add(lane))
}

/// Seleciona automaticamente a melhor implementação disponível
pub fn dot_product(a: &[u32], b: &[u32]) -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { dot_product_avx2(a, b) };
        }
    }

    dot_product_scalar(a, b)
}

/// Quadrado da norma L2 (‖v‖²), exato em u64
pub fn squared_norm(v: &[u32]) -> u64 {
    dot_product(v, v)
}

/// Combina produto escalar e normas² em similaridade cosseno.
///
/// Retorna 0.0 se qualquer um dos vetores tiver magnitude zero.
/// Vetores paralelos (dot² == ‖a‖²·‖b‖², verificado em u128) resultam
/// exatamente em 1.0. O denominador é `sqrt(‖a‖²·‖b‖²)` com o produto
/// em u128, e o resultado é limitado a 1.0.
#[inline]
pub fn cosine_from_parts(dot: u64, squared_norm_a: u64, squared_norm_b: u64) -> f64 {
    if squared_norm_a == 0 || squared_norm_b == 0 {
        return 0.0;
    }

    let norms_product = squared_norm_a as u128 * squared_norm_b as u128;
    if dot as u128 * dot as u128 == norms_product {
        return 1.0;
    }

    let similarity = dot as f64 / (norms_product as f64).sqrt();
    similarity.min(1.0)
}

/// Similaridade cosseno - implementação escalar
///
/// # Fórmula
/// ```text
/// cos(θ) = (A · B) / (||A|| × ||B||)
/// ```
pub fn cosine_similarity_scalar(a: &[u32], b: &[u32]) -> f64 {
    cosine_from_parts(
        dot_product_scalar(a, b),
        dot_product_scalar(a, a),
        dot_product_scalar(b, b),
    )
}

/// Similaridade cosseno entre dois vetores de contagem.
///
/// Função total: vetores nulos resultam em 0.0, nunca NaN.
///
/// # Complexidade
/// O(n) onde n é o tamanho dos vetores
pub fn cosine_similarity(a: &[u32], b: &[u32]) -> f64 {
    cosine_from_parts(dot_product(a, b), squared_norm(a), squared_norm(b))
}

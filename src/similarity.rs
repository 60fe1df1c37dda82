//! Pluggable symbol comparison strategies, plus an optional memoizing
//! wrapper around any of them.
//!
//! A [`SimilarityFunc`] compares two [`Constant`](crate::term::Constant)s
//! or two [`Predicate`](crate::term::Predicate)s and returns a score in
//! `[0, 1]`. It is modeled as a boxed closure (a first-class function
//! value), per the "dynamic dispatch for similarity" design note: this
//! lets callers plug in anything from exact-match to a cosine similarity
//! over externally-computed embeddings without the crate needing to know
//! how those embeddings were produced.

use std::rc::Rc;

use crate::term::{Constant, Predicate};

/// Either operand a [`SimilarityFunc`] may be asked to compare. Constants
/// and predicates share a comparison interface (a symbol name and an
/// optional embedding), so strategies are written once against this enum.
#[derive(Debug, Clone, Copy)]
pub enum SimSymbol<'a> {
    Constant(&'a Constant),
    Predicate(&'a Predicate),
}

impl<'a> SimSymbol<'a> {
    pub fn symbol(&self) -> &str {
        match self {
            SimSymbol::Constant(c) => &c.symbol,
            SimSymbol::Predicate(p) => &p.symbol,
        }
    }

    pub fn embedding(&self) -> Option<&[f32]> {
        match self {
            SimSymbol::Constant(c) => c.embedding.as_deref(),
            SimSymbol::Predicate(p) => p.embedding.as_deref(),
        }
    }

    fn symbol_rc(&self) -> Rc<str> {
        match self {
            SimSymbol::Constant(c) => c.symbol.clone(),
            SimSymbol::Predicate(p) => p.symbol.clone(),
        }
    }
}

impl<'a> From<&'a Constant> for SimSymbol<'a> {
    fn from(c: &'a Constant) -> Self {
        SimSymbol::Constant(c)
    }
}
impl<'a> From<&'a Predicate> for SimSymbol<'a> {
    fn from(p: &'a Predicate) -> Self {
        SimSymbol::Predicate(p)
    }
}

/// A comparison strategy between two symbols of the same kind.
pub type SimilarityFunc = Rc<dyn Fn(SimSymbol, SimSymbol) -> f64>;

/// Compare symbols by exact name match: `1.0` if identical, else `0.0`.
/// Ignores any embedding; this is the strategy used when the caller has
/// no fuzzy comparator at all.
pub fn symbol_compare(a: SimSymbol, b: SimSymbol) -> f64 {
    if a.symbol() == b.symbol() {
        1.0
    } else {
        0.0
    }
}

/// Cosine similarity over the two symbols' embeddings, falling back to
/// [`symbol_compare`] when either embedding is absent.
pub fn cosine_similarity(a: SimSymbol, b: SimSymbol) -> f64 {
    match (a.embedding(), b.embedding()) {
        (Some(ea), Some(eb)) => {
            let dot: f64 = ea.iter().zip(eb.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
            let norm_a: f64 = ea.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
            let norm_b: f64 = eb.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
            if norm_a == 0.0 || norm_b == 0.0 {
                0.0
            } else {
                dot / (norm_a * norm_b)
            }
        }
        _ => symbol_compare(a, b),
    }
}

/// Combine several strategies by taking their pointwise maximum.
pub fn max_similarity(funcs: Vec<SimilarityFunc>) -> SimilarityFunc {
    Rc::new(move |a, b| funcs.iter().map(|f| f(a, b)).fold(0.0_f64, f64::max))
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Name(Rc<str>),
    Identity(usize),
}

fn cache_key(sym: SimSymbol) -> CacheKey {
    match sym.embedding() {
        Some(e) => CacheKey::Identity(e.as_ptr() as usize),
        None => CacheKey::Name(sym.symbol_rc()),
    }
}

/// Memoizes a [`SimilarityFunc`] by the identity of its two arguments
/// (for symbols carrying an embedding, the embedding's address; for
/// symbols without one, the symbol name). Cleared wholesale by
/// [`SimilarityCache::purge`].
pub struct SimilarityCache {
    inner: SimilarityFunc,
    cache: std::cell::RefCell<std::collections::HashMap<(CacheKey, CacheKey), f64>>,
}

impl SimilarityCache {
    pub fn new(inner: SimilarityFunc) -> Self {
        SimilarityCache {
            inner,
            cache: std::cell::RefCell::new(std::collections::HashMap::new()),
        }
    }

    /// Look up or compute the similarity of `a` and `b`. Returns the
    /// score and whether it was served from the cache, so callers can
    /// update their own comparison/hit counters.
    pub fn get_or_compute(&self, a: SimSymbol, b: SimSymbol) -> (f64, bool) {
        let key = (cache_key(a), cache_key(b));
        if let Some(score) = self.cache.borrow().get(&key) {
            return (*score, true);
        }
        let score = (self.inner)(a, b);
        self.cache.borrow_mut().insert(key, score);
        (score, false)
    }

    pub fn purge(&self) {
        self.cache.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Constant;

    fn embed(vals: &[f32]) -> crate::term::Embedding {
        Rc::from(vals.to_vec().into_boxed_slice())
    }

    #[test]
    fn symbol_compare_exact_match() {
        let a = Constant::new("abe");
        let b = Constant::new("abe");
        assert_eq!(symbol_compare(SimSymbol::Constant(&a), SimSymbol::Constant(&b)), 1.0);
    }

    #[test]
    fn symbol_compare_mismatch() {
        let a = Constant::new("abe");
        let b = Constant::new("homer");
        assert_eq!(symbol_compare(SimSymbol::Constant(&a), SimSymbol::Constant(&b)), 0.0);
    }

    #[test]
    fn cosine_similarity_falls_back_without_embeddings() {
        let a = Constant::new("abe");
        let b = Constant::new("abe");
        assert_eq!(cosine_similarity(SimSymbol::Constant(&a), SimSymbol::Constant(&b)), 1.0);
    }

    #[test]
    fn cosine_similarity_of_identical_vectors_is_one() {
        let a = Constant::with_embedding("a", embed(&[1.0, 2.0, 3.0]));
        let b = Constant::with_embedding("b", embed(&[1.0, 2.0, 3.0]));
        let score = cosine_similarity(SimSymbol::Constant(&a), SimSymbol::Constant(&b));
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn max_similarity_takes_pointwise_max() {
        let always_low: SimilarityFunc = Rc::new(|_, _| 0.1);
        let always_high: SimilarityFunc = Rc::new(|_, _| 0.9);
        let combined = max_similarity(vec![always_low, always_high]);
        let a = Constant::new("a");
        let b = Constant::new("b");
        assert_eq!(combined(SimSymbol::Constant(&a), SimSymbol::Constant(&b)), 0.9);
    }

    #[test]
    fn cache_reports_hits_on_repeat_lookups() {
        let cache = SimilarityCache::new(Rc::new(symbol_compare));
        let a = Constant::new("abe");
        let b = Constant::new("abe");
        let (score1, hit1) = cache.get_or_compute(SimSymbol::Constant(&a), SimSymbol::Constant(&b));
        let (score2, hit2) = cache.get_or_compute(SimSymbol::Constant(&a), SimSymbol::Constant(&b));
        assert_eq!(score1, 1.0);
        assert_eq!(score2, 1.0);
        assert!(!hit1);
        assert!(hit2);
    }

    #[test]
    fn cache_purge_clears_entries() {
        let cache = SimilarityCache::new(Rc::new(symbol_compare));
        let a = Constant::new("abe");
        cache.get_or_compute(SimSymbol::Constant(&a), SimSymbol::Constant(&a));
        cache.purge();
        let (_, hit) = cache.get_or_compute(SimSymbol::Constant(&a), SimSymbol::Constant(&a));
        assert!(!hit);
    }
}

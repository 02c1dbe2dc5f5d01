//! Operator translation into engine terms.
//!
//! Each [`PauliTerm`] is written in the engine's OpenFermion-style
//! interchange text, `"<coefficient> [<P><q> <P><q> ...]"`, and parsed back by
//! an [`ObservableImporter`]. The resulting term handles are memoized per
//! operator value in a [`TermCache`].

use std::sync::{Arc, Mutex, PoisonError};

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use qbridge_ir::{PauliOp, PauliSum, PauliTerm};
use qbridge_statevector::{EngineResult, Observable, PauliOperator};

use crate::error::AdapterResult;

/// Parses interchange text into an engine observable.
pub trait ObservableImporter: Send + Sync {
    /// Parse one interchange string.
    fn import(&self, text: &str) -> EngineResult<Observable>;
}

/// The engine's own OpenFermion-text importer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenFermionImporter;

impl ObservableImporter for OpenFermionImporter {
    fn import(&self, text: &str) -> EngineResult<Observable> {
        Observable::from_openfermion_text(text)
    }
}

/// Format a coefficient the way the importer reads it.
///
/// Real values use round-trip float formatting (`2.0`, `1e-7`); values with
/// an imaginary part are written `(re+imj)` or `(re-imj)`.
pub fn format_coefficient(coefficient: Complex64) -> String {
    if coefficient.im == 0.0 {
        format!("{:?}", coefficient.re)
    } else {
        let sign = if coefficient.im.is_sign_negative() { '-' } else { '+' };
        format!("({:?}{sign}{:?}j)", coefficient.re, coefficient.im.abs())
    }
}

/// Interchange text for one term, e.g. `"2.0 [Z0 Z1]"` or `"0.5 []"`.
pub fn to_interchange_text(term: &PauliTerm) -> String {
    let ops: Vec<String> = term
        .operations()
        .iter()
        .map(|(qubit, op)| format!("{}{qubit}", op.letter()))
        .collect();
    format!("{} [{}]", format_coefficient(term.coefficient()), ops.join(" "))
}

/// Translate every term of `operator`, without caching.
///
/// The result is flat and in term order.
pub fn translate_operator(
    operator: &PauliSum,
    importer: &dyn ObservableImporter,
) -> AdapterResult<Vec<PauliOperator>> {
    let mut native = Vec::with_capacity(operator.n_terms());
    for term in operator.terms() {
        let observable = importer.import(&to_interchange_text(term))?;
        native.extend(observable.into_terms());
    }
    Ok(native)
}

/// Cache key: coefficient bit patterns plus operations, per term.
type OperatorKey = Vec<(u64, u64, Vec<(u32, PauliOp)>)>;

fn operator_key(operator: &PauliSum) -> OperatorKey {
    operator
        .terms()
        .iter()
        .map(|t| {
            let c = t.coefficient();
            (c.re.to_bits(), c.im.to_bits(), t.operations().to_vec())
        })
        .collect()
}

/// Memoized operator translations.
///
/// Entries are never evicted. Share one cache between simulators with
/// `Arc<TermCache>`.
#[derive(Debug, Default)]
pub struct TermCache {
    entries: Mutex<FxHashMap<OperatorKey, Arc<[PauliOperator]>>>,
}

impl TermCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached operators.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached translation.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Cached terms for `operator`, translating with `importer` on a miss.
    ///
    /// A failed translation is not cached.
    pub fn get_or_translate(
        &self,
        operator: &PauliSum,
        importer: &dyn ObservableImporter,
    ) -> AdapterResult<Arc<[PauliOperator]>> {
        let key = operator_key(operator);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(terms) = entries.get(&key) {
            trace!("Term cache hit ({} terms)", terms.len());
            return Ok(Arc::clone(terms));
        }

        let terms: Arc<[PauliOperator]> = translate_operator(operator, importer)?.into();
        debug!(
            "Translated operator: {} terms -> {} engine terms",
            operator.n_terms(),
            terms.len()
        );
        entries.insert(key, Arc::clone(&terms));
        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::AdapterError;

    /// Counts calls before delegating to the OpenFermion importer.
    #[derive(Default)]
    struct CountingImporter {
        calls: AtomicUsize,
    }

    impl ObservableImporter for CountingImporter {
        fn import(&self, text: &str) -> EngineResult<Observable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            OpenFermionImporter.import(text)
        }
    }

    fn zz_plus_x() -> PauliSum {
        PauliSum::from_terms(vec![
            PauliTerm::new(2.0, [(0, PauliOp::Z), (1, PauliOp::Z)]).unwrap(),
            PauliTerm::x(3, -0.5),
        ])
    }

    #[test]
    fn test_format_coefficient() {
        assert_eq!(format_coefficient(Complex64::new(2.0, 0.0)), "2.0");
        assert_eq!(format_coefficient(Complex64::new(-0.5, 0.0)), "-0.5");
        assert_eq!(format_coefficient(Complex64::new(1e-7, 0.0)), "1e-7");
        assert_eq!(format_coefficient(Complex64::new(1.0, 2.0)), "(1.0+2.0j)");
        assert_eq!(format_coefficient(Complex64::new(0.0, -1.5)), "(0.0-1.5j)");
    }

    #[test]
    fn test_interchange_text() {
        let terms = zz_plus_x();
        assert_eq!(to_interchange_text(&terms.terms()[0]), "2.0 [Z0 Z1]");
        assert_eq!(to_interchange_text(&terms.terms()[1]), "-0.5 [X3]");
        assert_eq!(to_interchange_text(&PauliTerm::identity(0.25)), "0.25 []");

        let sorted = PauliTerm::new(1.0, [(4, PauliOp::Y), (2, PauliOp::X)]).unwrap();
        assert_eq!(to_interchange_text(&sorted), "1.0 [X2 Y4]");
    }

    #[test]
    fn test_translate_preserves_order() {
        let native = translate_operator(&zz_plus_x(), &OpenFermionImporter).unwrap();
        assert_eq!(native.len(), 2);
        assert_eq!(native[0].targets(), &[0, 1]);
        assert_eq!(native[0].coefficient(), Complex64::new(2.0, 0.0));
        assert_eq!(native[1].targets(), &[3]);
        assert_eq!(native[1].coefficient(), Complex64::new(-0.5, 0.0));
    }

    #[test]
    fn test_translate_empty_operator() {
        let native = translate_operator(&PauliSum::default(), &OpenFermionImporter).unwrap();
        assert!(native.is_empty());
    }

    #[test]
    fn test_cache_parses_once_per_operator() {
        let cache = TermCache::new();
        let importer = CountingImporter::default();

        let first = cache.get_or_translate(&zz_plus_x(), &importer).unwrap();
        assert_eq!(importer.calls.load(Ordering::SeqCst), 2);

        // An equal but distinct operator value hits the cache.
        let second = cache.get_or_translate(&zz_plus_x(), &importer).unwrap();
        assert_eq!(importer.calls.load(Ordering::SeqCst), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let other = PauliSum::from(PauliTerm::z(0, 1.0));
        cache.get_or_translate(&other, &importer).unwrap();
        assert_eq!(importer.calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_distinguishes_coefficients() {
        let cache = TermCache::new();
        let a = PauliSum::from(PauliTerm::z(0, 1.0));
        let b = PauliSum::from(PauliTerm::z(0, 2.0));
        let ta = cache.get_or_translate(&a, &OpenFermionImporter).unwrap();
        let tb = cache.get_or_translate(&b, &OpenFermionImporter).unwrap();
        assert_eq!(ta[0].coefficient().re, 1.0);
        assert_eq!(tb[0].coefficient().re, 2.0);
    }

    #[test]
    fn test_import_failure_is_not_cached() {
        struct Failing;
        impl ObservableImporter for Failing {
            fn import(&self, text: &str) -> EngineResult<Observable> {
                Observable::from_openfermion_text(&format!("{text} [bogus"))
            }
        }

        let cache = TermCache::new();
        let err = cache
            .get_or_translate(&zz_plus_x(), &Failing)
            .unwrap_err();
        assert!(matches!(err, AdapterError::Engine(_)));
        assert!(cache.is_empty());
    }
}

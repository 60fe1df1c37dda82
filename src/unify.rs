//! Robinson-style unification of two atoms, extended with an
//! occurs-check and a running similarity score.
//!
//! The two atoms being unified are independently scoped: a variable
//! named `X` in one has no relation to a variable named `X` in the
//! other. Rather than renaming one side up front, every variable is
//! tagged with the [`Side`] it came from, and the substitution table is
//! keyed by `(Side, Variable)` pairs. This is what lets the algorithm
//! run directly on two disjunctions pulled from different clauses
//! without a renaming pass first.

use std::collections::HashMap;
use std::rc::Rc;

use crate::similarity::SimSymbol;
use crate::term::{Atom, BoundFunction, Term, Variable};

/// Which atom a labeled variable or term came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Target,
}

type Subs = HashMap<(Side, Variable), (Side, Term)>;

/// The result of a successful unification: the substitutions to apply
/// to each side, and the similarity of the match.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifyResult {
    pub source_substitutions: HashMap<Variable, Term>,
    pub target_substitutions: HashMap<Variable, Term>,
    pub similarity: f64,
}

/// How many similarity comparisons a single [`unify`] call performed,
/// and how many were served from a cache. Separate from [`UnifyResult`]
/// because these are reported to the caller's stats whether or not
/// unification ultimately succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnifyStats {
    pub similarity_comparisons: usize,
    pub similarity_cache_hits: usize,
}

/// A symbol comparator that additionally reports whether its answer was
/// served from a cache, so the caller can tally cache hits without
/// `unify` needing to know anything about caching itself.
pub type Compare<'a> = dyn FnMut(SimSymbol, SimSymbol) -> (f64, bool) + 'a;

fn chase(mut side: Side, mut term: Term, table: &Subs) -> (Side, Term) {
    loop {
        let next = match &term {
            Term::Variable(v) => table.get(&(side, v.clone())).cloned(),
            _ => None,
        };
        match next {
            Some((next_side, next_term)) => {
                side = next_side;
                term = next_term;
            }
            None => return (side, term),
        }
    }
}

fn resolve_fully(side: Side, term: Term, table: &Subs) -> Term {
    let (side, value) = chase(side, term, table);
    match value {
        Term::Variable(_) | Term::Constant(_) => value,
        Term::BoundFunction(bf) => Term::BoundFunction(BoundFunction {
            function: bf.function.clone(),
            terms: Rc::new(
                bf.terms
                    .iter()
                    .cloned()
                    .map(|t| resolve_fully(side, t, table))
                    .collect(),
            ),
        }),
    }
}

fn occurs(var_side: Side, var: &Variable, term_side: Side, term: &Term, table: &Subs) -> bool {
    let (side, resolved) = chase(term_side, term.clone(), table);
    match resolved {
        Term::Variable(v) => side == var_side && v == *var,
        Term::Constant(_) => false,
        Term::BoundFunction(bf) => bf.terms.iter().any(|t| occurs(var_side, var, side, t, table)),
    }
}

fn flatten(side: Side, table: &Subs) -> HashMap<Variable, Term> {
    table
        .iter()
        .filter(|((s, _), _)| *s == side)
        .map(|((_, v), (bound_side, bound_term))| {
            (v.clone(), resolve_fully(*bound_side, bound_term.clone(), table))
        })
        .collect()
}

/// Attempt to unify `source` and `target`, failing below `threshold`
/// similarity. Always returns [`UnifyStats`], even on failure, so the
/// caller can fold comparison counts into its running stats.
pub fn unify(
    source: &Atom,
    target: &Atom,
    compare: &mut Compare<'_>,
    threshold: f64,
) -> (Option<UnifyResult>, UnifyStats) {
    let mut stats = UnifyStats::default();
    if source.arity() != target.arity() {
        return (None, stats);
    }

    let mut similarity = if source.predicate == target.predicate {
        1.0
    } else {
        let (score, hit) = compare(SimSymbol::Predicate(&source.predicate), SimSymbol::Predicate(&target.predicate));
        stats.similarity_comparisons += 1;
        if hit {
            stats.similarity_cache_hits += 1;
        }
        score
    };
    if similarity <= threshold {
        return (None, stats);
    }

    let mut table: Subs = HashMap::new();
    let mut pending: Vec<(Side, Term, Side, Term)> = source
        .terms
        .iter()
        .cloned()
        .zip(target.terms.iter().cloned())
        .map(|(s, t)| (Side::Source, s, Side::Target, t))
        .collect();
    pending.reverse();

    while let Some((s_side0, s_term0, t_side0, t_term0)) = pending.pop() {
        let (s_side, s_val) = chase(s_side0, s_term0, &table);
        let (t_side, t_val) = chase(t_side0, t_term0, &table);

        match (&s_val, &t_val) {
            (Term::Constant(a), Term::Constant(b)) => {
                if a != b {
                    let (score, hit) = compare(SimSymbol::Constant(a), SimSymbol::Constant(b));
                    stats.similarity_comparisons += 1;
                    if hit {
                        stats.similarity_cache_hits += 1;
                    }
                    similarity = similarity.min(score);
                    if similarity <= threshold {
                        return (None, stats);
                    }
                }
            }
            (Term::Variable(sv), Term::Variable(tv)) => {
                if !(s_side == t_side && sv == tv) {
                    table.insert((t_side, tv.clone()), (s_side, Term::Variable(sv.clone())));
                }
            }
            (Term::Variable(v), _) => {
                if occurs(s_side, v, t_side, &t_val, &table) {
                    return (None, stats);
                }
                table.insert((s_side, v.clone()), (t_side, t_val.clone()));
            }
            (_, Term::Variable(v)) => {
                if occurs(t_side, v, s_side, &s_val, &table) {
                    return (None, stats);
                }
                table.insert((t_side, v.clone()), (s_side, s_val.clone()));
            }
            (Term::BoundFunction(bf_s), Term::BoundFunction(bf_t)) => {
                if bf_s.function != bf_t.function || bf_s.terms.len() != bf_t.terms.len() {
                    return (None, stats);
                }
                let mut pairs: Vec<(Side, Term, Side, Term)> = bf_s
                    .terms
                    .iter()
                    .cloned()
                    .zip(bf_t.terms.iter().cloned())
                    .map(|(a, b)| (s_side, a, t_side, b))
                    .collect();
                pairs.reverse();
                pending.extend(pairs);
            }
            (Term::Constant(_), Term::BoundFunction(_)) | (Term::BoundFunction(_), Term::Constant(_)) => {
                return (None, stats);
            }
        }
    }

    let result = UnifyResult {
        source_substitutions: flatten(Side::Source, &table),
        target_substitutions: flatten(Side::Target, &table),
        similarity,
    };
    (Some(result), stats)
}

//! A single resolution step between two disjunctions: selecting the
//! source's head literal, unifying it against every opposite-polarity
//! literal of the target, and building the resolvent for each success.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::normalize::{CnfDisjunction, CnfLiteral};
use crate::proof::{ProofStats, ProofStep};
use crate::term::{find_variables_in_terms, Atom, BoundFunction, Term, Variable};
use crate::unify::{unify, Compare};

/// Resolve `source`'s head literal against every opposite-polarity
/// literal of `target`, returning one [`ProofStep`] per successful
/// unification.
pub fn resolve(
    source: &CnfDisjunction,
    target: &CnfDisjunction,
    compare: &mut Compare<'_>,
    threshold: f64,
    depth: usize,
    parent: Option<Rc<ProofStep>>,
    stats: &mut ProofStats,
) -> Vec<Rc<ProofStep>> {
    let Some(source_literal) = source.head() else {
        return Vec::new();
    };
    let source_literal = source_literal.clone();
    let remaining_source = source.without(&source_literal);

    let mut steps = Vec::new();
    for target_literal in target.literals() {
        if target_literal.is_negative() == source_literal.is_negative() {
            continue;
        }
        stats.attempted_unifications += 1;
        stats.attempted_resolutions += 1;
        let (outcome, unify_stats) = unify(
            source_literal.atom(),
            target_literal.atom(),
            compare,
            threshold,
        );
        stats.similarity_comparisons += unify_stats.similarity_comparisons;
        stats.similarity_cache_hits += unify_stats.similarity_cache_hits;
        let Some(unification) = outcome else {
            continue;
        };
        stats.successful_unifications += 1;
        stats.successful_resolutions += 1;

        let remaining_target = target.without(target_literal);
        let resolvent = build_resolvent(
            &remaining_source,
            &remaining_target,
            &unification.source_substitutions,
            &unification.target_substitutions,
        );
        stats.max_resolvent_width_seen = stats.max_resolvent_width_seen.max(resolvent.len());

        let running_similarity = match &parent {
            Some(p) => p.running_similarity.min(unification.similarity),
            None => unification.similarity,
        };

        steps.push(Rc::new(ProofStep {
            source: source.clone(),
            target: target.clone(),
            source_literal: source_literal.clone(),
            target_literal: target_literal.clone(),
            source_substitutions: unification.source_substitutions,
            target_substitutions: unification.target_substitutions,
            resolvent,
            similarity: unification.similarity,
            running_similarity,
            depth,
            parent: parent.clone(),
        }));
    }
    steps
}

fn disjunction_var_names(d: &CnfDisjunction) -> HashSet<String> {
    find_variables_in_terms(d.literals().flat_map(|lit| lit.atom().terms.iter()))
        .into_iter()
        .map(|v| v.name().to_string())
        .collect()
}

/// Rename variables that appear, unsubstituted, in both the remaining
/// source and remaining target literals, then apply each side's
/// substitutions, then concatenate. Collisions are always resolved by
/// renaming the target's occurrences, never the source's.
fn build_resolvent(
    remaining_source: &CnfDisjunction,
    remaining_target: &CnfDisjunction,
    source_subs: &HashMap<Variable, Term>,
    target_subs: &HashMap<Variable, Term>,
) -> CnfDisjunction {
    let unused_source: HashSet<String> = disjunction_var_names(remaining_source)
        .into_iter()
        .filter(|name| !source_subs.keys().any(|v| v.name() == name))
        .collect();
    let unused_target: HashSet<String> = disjunction_var_names(remaining_target)
        .into_iter()
        .filter(|name| !target_subs.keys().any(|v| v.name() == name))
        .collect();

    let mut colliding: Vec<String> = unused_source.intersection(&unused_target).cloned().collect();
    colliding.sort();

    let mut used_names: HashSet<String> = unused_source.union(&unused_target).cloned().collect();
    let mut rename_map: HashMap<Variable, Variable> = HashMap::new();
    for name in colliding {
        let mut k = 1usize;
        let mut candidate = format!("{}_{}", name, k);
        while used_names.contains(&candidate) {
            k += 1;
            candidate = format!("{}_{}", name, k);
        }
        used_names.insert(candidate.clone());
        rename_map.insert(Variable::new(name), Variable::new(candidate));
    }

    let renamed_target = rename_literals(remaining_target, &rename_map);
    let substituted_source = substitute_literals(remaining_source, source_subs);
    let substituted_target = substitute_literals(&renamed_target, target_subs);

    substituted_source.union(&substituted_target)
}

fn rename_literals(d: &CnfDisjunction, rename_map: &HashMap<Variable, Variable>) -> CnfDisjunction {
    if rename_map.is_empty() {
        return d.clone();
    }
    CnfDisjunction::new(d.literals().map(|lit| rename_literal(lit, rename_map)))
}

fn rename_literal(lit: &CnfLiteral, rename_map: &HashMap<Variable, Variable>) -> CnfLiteral {
    let atom = lit.atom();
    let terms = atom.terms.iter().map(|t| rename_term(t, rename_map)).collect();
    let renamed = Atom::new(atom.predicate.clone(), terms);
    match lit {
        CnfLiteral::Positive(_) => CnfLiteral::Positive(renamed),
        CnfLiteral::Negative(_) => CnfLiteral::Negative(renamed),
    }
}

fn rename_term(term: &Term, rename_map: &HashMap<Variable, Variable>) -> Term {
    match term {
        Term::Variable(v) => Term::Variable(rename_map.get(v).cloned().unwrap_or_else(|| v.clone())),
        Term::Constant(_) => term.clone(),
        Term::BoundFunction(bf) => Term::BoundFunction(BoundFunction {
            function: bf.function.clone(),
            terms: Rc::new(bf.terms.iter().map(|t| rename_term(t, rename_map)).collect()),
        }),
    }
}

fn substitute_literals(d: &CnfDisjunction, subs: &HashMap<Variable, Term>) -> CnfDisjunction {
    if subs.is_empty() {
        return d.clone();
    }
    CnfDisjunction::new(d.literals().map(|lit| substitute_literal(lit, subs)))
}

fn substitute_literal(lit: &CnfLiteral, subs: &HashMap<Variable, Term>) -> CnfLiteral {
    let atom = lit.atom();
    let terms = atom.terms.iter().map(|t| substitute_term(t, subs)).collect();
    let substituted = Atom::new(atom.predicate.clone(), terms);
    match lit {
        CnfLiteral::Positive(_) => CnfLiteral::Positive(substituted),
        CnfLiteral::Negative(_) => CnfLiteral::Negative(substituted),
    }
}

fn substitute_term(term: &Term, subs: &HashMap<Variable, Term>) -> Term {
    match term {
        Term::Variable(v) => subs.get(v).cloned().unwrap_or_else(|| term.clone()),
        Term::Constant(_) => term.clone(),
        Term::BoundFunction(bf) => Term::BoundFunction(BoundFunction {
            function: bf.function.clone(),
            terms: Rc::new(bf.terms.iter().map(|t| substitute_term(t, subs)).collect()),
        }),
    }
}

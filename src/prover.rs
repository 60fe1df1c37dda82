//! The public entry point: [`Prover`] holds a persistent knowledge set
//! and similarity cache, and answers `prove`/`prove_all` queries by
//! input resolution against the negated goal.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::clause::Clause;
use crate::error::ProverResult;
use crate::normalize::{to_cnf, CnfDisjunction};
use crate::proof::{Proof, ProofStats, ProofStep};
use crate::resolve::resolve;
use crate::similarity::{cosine_similarity, SimSymbol, SimilarityCache, SimilarityFunc};
use crate::unify::Compare;

/// Construction options for a [`Prover`]; see the crate docs for the
/// semantics of each field.
#[derive(Clone)]
pub struct ProverConfig {
    pub max_proof_depth: usize,
    pub max_resolvent_width: Option<usize>,
    pub max_resolution_attempts: Option<usize>,
    pub similarity_func: SimilarityFunc,
    pub min_similarity_threshold: f64,
    pub cache_similarity: bool,
    pub skip_seen_resolvents: bool,
    pub find_highest_similarity_proofs: bool,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            max_proof_depth: 10,
            max_resolvent_width: None,
            max_resolution_attempts: None,
            similarity_func: Rc::new(cosine_similarity),
            min_similarity_threshold: 0.5,
            cache_similarity: true,
            skip_seen_resolvents: false,
            find_highest_similarity_proofs: true,
        }
    }
}

/// A fuzzy first-order resolution prover over a persistent knowledge
/// set. Not `Sync`: all mutating operations take `&mut self`, and
/// queries (`&self`) are not meant to run concurrently against one
/// instance.
pub struct Prover {
    knowledge: Vec<CnfDisjunction>,
    knowledge_set: HashSet<CnfDisjunction>,
    config: ProverConfig,
    cache: Option<SimilarityCache>,
}

impl Prover {
    pub fn new(knowledge: impl IntoIterator<Item = Clause>, config: ProverConfig) -> ProverResult<Self> {
        let cache = if config.cache_similarity {
            Some(SimilarityCache::new(config.similarity_func.clone()))
        } else {
            None
        };
        let mut prover = Prover {
            knowledge: Vec::new(),
            knowledge_set: HashSet::new(),
            config,
            cache,
        };
        prover.extend_knowledge(knowledge)?;
        Ok(prover)
    }

    pub fn with_defaults(knowledge: impl IntoIterator<Item = Clause>) -> ProverResult<Self> {
        Prover::new(knowledge, ProverConfig::default())
    }

    /// Normalize and append `clauses`. Disjunctions structurally equal
    /// to one already present are skipped.
    pub fn extend_knowledge(&mut self, clauses: impl IntoIterator<Item = Clause>) -> ProverResult<()> {
        for clause in clauses {
            for disjunction in to_cnf(clause)? {
                if self.knowledge_set.insert(disjunction.clone()) {
                    self.knowledge.push(disjunction);
                }
            }
        }
        Ok(())
    }

    pub fn purge_similarity_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.purge();
        }
    }

    pub fn reset(&mut self) {
        self.knowledge.clear();
        self.knowledge_set.clear();
        self.purge_similarity_cache();
    }

    /// The single highest-similarity proof of `goal`, if any.
    pub fn prove(&self, goal: Clause, extra_knowledge: Option<Vec<Clause>>) -> ProverResult<Option<Proof>> {
        let (mut proofs, _) = self.prove_all_with_stats(goal, extra_knowledge, Some(1), Some(true))?;
        Ok(proofs.pop())
    }

    /// Every proof of `goal` found within budget, sorted by similarity
    /// descending (ties broken by depth ascending).
    pub fn prove_all(
        &self,
        goal: Clause,
        extra_knowledge: Option<Vec<Clause>>,
        max_proofs: Option<usize>,
        skip_seen_resolvents: Option<bool>,
    ) -> ProverResult<Vec<Proof>> {
        let (proofs, _) = self.prove_all_with_stats(goal, extra_knowledge, max_proofs, skip_seen_resolvents)?;
        Ok(proofs)
    }

    pub fn prove_all_with_stats(
        &self,
        goal: Clause,
        extra_knowledge: Option<Vec<Clause>>,
        max_proofs: Option<usize>,
        skip_seen_resolvents: Option<bool>,
    ) -> ProverResult<(Vec<Proof>, ProofStats)> {
        let mut query_knowledge = self.knowledge.clone();
        if let Some(extra) = extra_knowledge {
            for clause in extra {
                query_knowledge.extend(to_cnf(clause)?);
            }
        }

        let negated_goal = Clause::not(goal);
        let negated_goal_disjunctions = to_cnf(negated_goal)?;
        query_knowledge.extend(negated_goal_disjunctions.iter().cloned());

        let skip_seen = skip_seen_resolvents.unwrap_or(self.config.skip_seen_resolvents);

        let mut ctx = SearchContext {
            config: &self.config,
            cache: self.cache.as_ref(),
            query_knowledge: &query_knowledge,
            skip_seen_resolvents: skip_seen,
            threshold: self.config.min_similarity_threshold,
            max_proofs,
            stats: ProofStats::default(),
            seen: HashMap::new(),
            proofs: Vec::new(),
            aborted: false,
        };

        for g in &negated_goal_disjunctions {
            if ctx.aborted {
                break;
            }
            search(g, 1, None, &mut ctx);
        }

        Ok((ctx.proofs, ctx.stats))
    }
}

struct SearchContext<'a> {
    config: &'a ProverConfig,
    cache: Option<&'a SimilarityCache>,
    query_knowledge: &'a [CnfDisjunction],
    skip_seen_resolvents: bool,
    threshold: f64,
    max_proofs: Option<usize>,
    stats: ProofStats,
    seen: HashMap<CnfDisjunction, (usize, f64)>,
    proofs: Vec<Proof>,
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    fn compare(&self) -> Box<dyn FnMut(SimSymbol, SimSymbol) -> (f64, bool) + 'a> {
        match self.cache {
            Some(cache) => Box::new(move |a, b| cache.get_or_compute(a, b)),
            None => {
                let sim_fn = self.config.similarity_func.clone();
                Box::new(move |a, b| (sim_fn(a, b), false))
            }
        }
    }

    fn attempts_exhausted(&self) -> bool {
        matches!(
            self.config.max_resolution_attempts,
            Some(budget) if self.stats.attempted_resolutions >= budget
        )
    }

    fn record_proof(&mut self, leaf: Rc<ProofStep>) {
        let chain = leaf.chain();
        let goal = chain[0].source.clone();
        let proof = Proof::reconstruct(goal, leaf, self.stats.clone());
        self.proofs.push(proof);
        self.proofs.sort_by(compare_proofs);
        if let Some(max) = self.max_proofs {
            if self.proofs.len() > max {
                let evicted = self.proofs.len() - max;
                self.stats.discarded_proofs += evicted;
                self.proofs.truncate(max);
                if let Some(worst) = self.proofs.last() {
                    self.threshold = self.threshold.max(worst.similarity);
                }
            }
            if !self.config.find_highest_similarity_proofs && self.proofs.len() >= max {
                self.aborted = true;
            }
        }
    }
}

fn compare_proofs(a: &Proof, b: &Proof) -> Ordering {
    b.similarity
        .partial_cmp(&a.similarity)
        .unwrap_or(Ordering::Equal)
        .then(a.depth.cmp(&b.depth))
}

fn search(current: &CnfDisjunction, depth: usize, parent: Option<Rc<ProofStep>>, ctx: &mut SearchContext) {
    if ctx.aborted {
        return;
    }
    if let Some(p) = &parent {
        if p.depth >= ctx.config.max_proof_depth {
            log::trace!("pruned-depth at depth {}", p.depth);
            return;
        }
    }

    for target in ctx.query_knowledge {
        if ctx.aborted {
            return;
        }
        if let Some(max_width) = ctx.config.max_resolvent_width {
            let combined = current.len() + target.len();
            if combined >= 2 && combined - 2 > max_width {
                log::trace!("pruned-width {} > {}", combined - 2, max_width);
                continue;
            }
        }
        if ctx.attempts_exhausted() {
            log::warn!("max resolution attempts exhausted before search tree exhausted");
            ctx.aborted = true;
            return;
        }

        let mut compare = ctx.compare();
        let steps = resolve(
            current,
            target,
            compare.as_mut(),
            ctx.threshold,
            depth,
            parent.clone(),
            &mut ctx.stats,
        );

        for step in steps {
            ctx.stats.max_depth_seen = ctx.stats.max_depth_seen.max(step.depth);
            if step.running_similarity <= ctx.threshold {
                log::trace!("pruned-similarity {} <= {}", step.running_similarity, ctx.threshold);
                continue;
            }
            if step.resolvent.is_empty() {
                ctx.record_proof(step);
                continue;
            }
            if ctx.skip_seen_resolvents {
                ctx.stats.resolvent_checks += 1;
                if let Some(&(seen_depth, seen_sim)) = ctx.seen.get(&step.resolvent) {
                    if seen_depth <= step.depth && seen_sim >= step.running_similarity {
                        ctx.stats.resolvent_check_hits += 1;
                        log::trace!("pruned-seen resolvent at depth {}", step.depth);
                        continue;
                    }
                }
                ctx.seen.insert(step.resolvent.clone(), (step.depth, step.running_similarity));
            }
            search(&step.resolvent, step.depth + 1, Some(step), ctx);
            if ctx.aborted {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Clause;
    use crate::term::{Constant, Predicate, Term, Variable};

    fn parent_of(a: &str, b: &str) -> Clause {
        Predicate::new("parent_of").of(vec![Term::Constant(Constant::new(a)), Term::Constant(Constant::new(b))])
    }

    fn father_of(a: &str, b: &str) -> Clause {
        Predicate::new("father_of").of(vec![Term::Constant(Constant::new(a)), Term::Constant(Constant::new(b))])
    }

    fn grandpa_rule() -> Clause {
        let x = Variable::new("X");
        let y = Variable::new("Y");
        let z = Variable::new("Z");
        let father = Predicate::new("father_of").of(vec![Term::Variable(x.clone()), Term::Variable(z.clone())]);
        let parent = Predicate::new("parent_of").of(vec![Term::Variable(z), Term::Variable(y.clone())]);
        let grandpa = Predicate::new("grandpa_of").of(vec![Term::Variable(x.clone()), Term::Variable(y)]);
        Clause::forall(
            x,
            Clause::implies(Clause::and(vec![father, parent]), grandpa),
        )
    }

    fn grandpa_goal(var_name: &str) -> Clause {
        Predicate::new("grandpa_of").of(vec![
            Term::Variable(Variable::new(var_name)),
            Term::Constant(Constant::new("bart")),
        ])
    }

    #[test]
    fn simple_ancestry_proof_exists() {
        let prover = Prover::with_defaults(vec![
            parent_of("homer", "bart"),
            father_of("abe", "homer"),
            grandpa_rule(),
        ])
        .unwrap();
        let proof = prover.prove(grandpa_goal("X"), None).unwrap().expect("proof should exist");
        assert_eq!(proof.similarity, 1.0);
        assert_eq!(proof.depth, 3);
        let x = Variable::new("X");
        assert_eq!(proof.substitutions.get(&x), Some(&Term::Constant(Constant::new("abe"))));
    }

    #[test]
    fn unprovable_goal_returns_none() {
        let prover = Prover::with_defaults(vec![
            parent_of("homer", "bart"),
            father_of("abe", "homer"),
            grandpa_rule(),
        ])
        .unwrap();
        let goal = Predicate::new("grandpa_of").of(vec![
            Term::Constant(Constant::new("marge")),
            Term::Constant(Constant::new("bart")),
        ]);
        let proof = prover.prove(goal, None).unwrap();
        assert!(proof.is_none());
    }

    #[test]
    fn max_proofs_bounds_accumulator() {
        let mut config = ProverConfig::default();
        config.max_proof_depth = 10;
        let prover = Prover::new(
            vec![parent_of("homer", "bart"), father_of("abe", "homer"), grandpa_rule()],
            config,
        )
        .unwrap();
        let proofs = prover.prove_all(grandpa_goal("X"), None, Some(1), None).unwrap();
        assert!(proofs.len() <= 1);
    }
}

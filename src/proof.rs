//! Proof steps, per-query statistics, and the reconstructed [`Proof`]
//! returned to callers.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::normalize::{CnfDisjunction, CnfLiteral};
use crate::term::{BoundFunction, Term, Variable};

/// Counters accumulated over the course of a single `prove`/`prove_all`
/// call. Field names are kept verbose and self-describing since this is
/// the primary diagnostic surface exposed to callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProofStats {
    pub attempted_unifications: usize,
    pub successful_unifications: usize,
    pub similarity_comparisons: usize,
    pub similarity_cache_hits: usize,
    pub attempted_resolutions: usize,
    pub successful_resolutions: usize,
    pub max_resolvent_width_seen: usize,
    pub max_depth_seen: usize,
    pub discarded_proofs: usize,
    pub resolvent_checks: usize,
    pub resolvent_check_hits: usize,
}

/// One resolution step: the two disjunctions resolved, the pivot
/// literals, the substitutions each side applied, and the resulting
/// resolvent. Steps link to their parent with an owned [`Rc`]; the
/// proof they belong to is a tree rooted at the negated goal, so this
/// can never form a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ProofStep {
    pub source: CnfDisjunction,
    pub target: CnfDisjunction,
    pub source_literal: CnfLiteral,
    pub target_literal: CnfLiteral,
    pub source_substitutions: HashMap<Variable, Term>,
    pub target_substitutions: HashMap<Variable, Term>,
    pub resolvent: CnfDisjunction,
    pub similarity: f64,
    pub running_similarity: f64,
    pub depth: usize,
    pub parent: Option<Rc<ProofStep>>,
}

impl ProofStep {
    /// This step and every ancestor, root first.
    pub fn chain(self: &Rc<Self>) -> Vec<Rc<ProofStep>> {
        let mut chain = Vec::new();
        let mut current = Some(Rc::clone(self));
        while let Some(step) = current {
            current = step.parent.clone();
            chain.push(step);
        }
        chain.reverse();
        chain
    }
}

fn fmt_disjunction(d: &CnfDisjunction) -> String {
    if d.is_empty() {
        return "[]".to_string();
    }
    let mut parts = Vec::new();
    for lit in d.literals() {
        parts.push(lit.to_string());
    }
    format!("[{}]", parts.join(" \u{2228} "))
}

fn fmt_substitutions(subs: &HashMap<Variable, Term>) -> String {
    let mut entries: Vec<(&Variable, &Term)> = subs.iter().collect();
    entries.sort_by(|a, b| a.0.name().cmp(b.0.name()));
    let body = entries
        .iter()
        .map(|(v, t)| format!("{} -> {}", v, t))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", body)
}

/// Resolve a term through a proof's chain of source-side substitutions,
/// starting the search at `from_index`. The search strategy always
/// resolves the frontier disjunction as the *source* of each step, so
/// the goal's free variables (and anything they chain to) are tracked
/// on the source side throughout, never the target side.
fn chase_through_steps(term: Term, steps: &[Rc<ProofStep>], from_index: usize) -> Term {
    match term {
        Term::Variable(ref v) => {
            for (offset, step) in steps.iter().enumerate().skip(from_index) {
                if let Some(bound) = step.source_substitutions.get(v) {
                    return chase_through_steps(bound.clone(), steps, offset + 1);
                }
            }
            term
        }
        Term::Constant(_) => term,
        Term::BoundFunction(bf) => Term::BoundFunction(BoundFunction {
            function: bf.function.clone(),
            terms: Rc::new(
                bf.terms
                    .iter()
                    .cloned()
                    .map(|t| chase_through_steps(t, steps, from_index))
                    .collect(),
            ),
        }),
    }
}

/// A complete proof of a goal: an ordered chain of resolution steps
/// from the negated goal down to an empty resolvent, plus the
/// reconstructed bindings for the goal's free variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Proof {
    pub goal: CnfDisjunction,
    pub steps: Vec<Rc<ProofStep>>,
    pub substitutions: HashMap<Variable, Term>,
    pub similarity: f64,
    pub depth: usize,
    pub stats: ProofStats,
}

impl Proof {
    /// Reconstruct a [`Proof`] from its leaf step by walking the parent
    /// chain back to the root and resolving `goal`'s free variables.
    pub fn reconstruct(goal: CnfDisjunction, leaf: Rc<ProofStep>, stats: ProofStats) -> Proof {
        let similarity = leaf.running_similarity;
        let depth = leaf.depth;
        let steps = leaf.chain();
        let free_vars = crate::term::find_variables_in_terms(
            goal.literals().flat_map(|lit| lit.atom().terms.iter()),
        );
        let substitutions = free_vars
            .into_iter()
            .map(|v| {
                let resolved = chase_through_steps(Term::Variable(v.clone()), &steps, 0);
                (v, resolved)
            })
            .collect();
        Proof {
            goal,
            steps,
            substitutions,
            similarity,
            depth,
            stats,
        }
    }
}

/// Two-space-indent every line of `text`, matching the printed-proof
/// contract's "each step indented" rule.
fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {}", line)).collect::<Vec<_>>().join("\n")
}

fn fmt_step(step: &ProofStep) -> String {
    format!(
        "Similarity: {}\nSource: {}\nTarget: {}\nUnify: {} = {}\nSubsitutions: {}, {}\nResolvent: {}",
        step.similarity,
        fmt_disjunction(&step.source),
        fmt_disjunction(&step.target),
        step.source_literal.atom(),
        step.target_literal.atom(),
        fmt_substitutions(&step.source_substitutions),
        fmt_substitutions(&step.target_substitutions),
        fmt_disjunction(&step.resolvent),
    )
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Goal: {}", fmt_disjunction(&self.goal))?;
        writeln!(f, "Subsitutions: {}", fmt_substitutions(&self.substitutions))?;
        writeln!(f, "Similarity: {}", self.similarity)?;
        writeln!(f, "Depth: {}", self.depth)?;
        writeln!(f, "Steps:")?;
        let steps = self
            .steps
            .iter()
            .map(|step| indent(&fmt_step(step)))
            .collect::<Vec<_>>()
            .join("\n  ---\n");
        write!(f, "{}", steps)
    }
}

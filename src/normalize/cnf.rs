//! The normal form itself, and the pipeline that produces it.
//!
//! A [`CnfDisjunction`] is a set of [`CnfLiteral`]s: the literals are
//! kept in a [`BTreeSet`] rather than a `Vec` or a hash-based set so that
//! two disjunctions built from the same literals in different orders
//! compare equal and hash identically, which the resolution engine's
//! seen-resolvent memoization depends on.

use std::collections::BTreeSet;
use std::fmt;

use crate::clause::Clause;
use crate::error::{ProverError, ProverResult};
use crate::term::Atom;

use super::distribute::normalize_conjunctions;
use super::nnf::to_nnf;
use super::skolemize::normalize_quantifiers;
use super::standardize::normalize_variables;

/// A literal: an atom, or its negation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CnfLiteral {
    Positive(Atom),
    Negative(Atom),
}

impl CnfLiteral {
    pub fn atom(&self) -> &Atom {
        match self {
            CnfLiteral::Positive(a) | CnfLiteral::Negative(a) => a,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, CnfLiteral::Negative(_))
    }

    /// The literal with the opposite polarity over the same atom.
    pub fn negated(&self) -> CnfLiteral {
        match self {
            CnfLiteral::Positive(a) => CnfLiteral::Negative(a.clone()),
            CnfLiteral::Negative(a) => CnfLiteral::Positive(a.clone()),
        }
    }
}

impl fmt::Display for CnfLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CnfLiteral::Positive(a) => write!(f, "{}", a),
            CnfLiteral::Negative(a) => write!(f, "\u{ac}{}", a),
        }
    }
}

/// A disjunction of literals: one conjunct of a clause's CNF form, and
/// the unit the resolution engine operates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CnfDisjunction {
    literals: BTreeSet<CnfLiteral>,
}

impl CnfDisjunction {
    pub fn new(literals: impl IntoIterator<Item = CnfLiteral>) -> Self {
        CnfDisjunction {
            literals: literals.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        CnfDisjunction {
            literals: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn literals(&self) -> impl Iterator<Item = &CnfLiteral> {
        self.literals.iter()
    }

    pub fn contains(&self, literal: &CnfLiteral) -> bool {
        self.literals.contains(literal)
    }

    /// The literal this disjunction resolves on first: the one whose
    /// atom has the greatest arity, breaking ties by the set's own
    /// (canonical, symbol-based) ordering. Derived rather than stored,
    /// so it never drifts out of sync with `literals`.
    pub fn head(&self) -> Option<&CnfLiteral> {
        self.literals
            .iter()
            .max_by_key(|lit| (lit.atom().arity(), std::cmp::Reverse(lit.clone())))
    }

    /// All literals except `literal` (by value, not by position).
    pub fn without(&self, literal: &CnfLiteral) -> CnfDisjunction {
        CnfDisjunction {
            literals: self
                .literals
                .iter()
                .filter(|l| *l != literal)
                .cloned()
                .collect(),
        }
    }

    /// The union of `self` and `other`'s literals.
    pub fn union(&self, other: &CnfDisjunction) -> CnfDisjunction {
        CnfDisjunction {
            literals: self.literals.union(&other.literals).cloned().collect(),
        }
    }
}

impl fmt::Display for CnfDisjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "\u{22a5}");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " \u{2228} ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// Run the full normalization pipeline and extract the conjuncts as
/// [`CnfDisjunction`]s.
pub fn to_cnf(clause: Clause) -> ProverResult<Vec<CnfDisjunction>> {
    let nnf = to_nnf(clause);
    let standardized = normalize_variables(nnf)?;
    let quantifier_free = normalize_quantifiers(standardized);
    let distributed = normalize_conjunctions(quantifier_free);
    extract_disjunctions(distributed)
}

fn extract_disjunctions(clause: Clause) -> ProverResult<Vec<CnfDisjunction>> {
    match clause {
        Clause::And(args) => args.into_iter().map(extract_one).collect(),
        other => Ok(vec![extract_one(other)?]),
    }
}

fn extract_one(clause: Clause) -> ProverResult<CnfDisjunction> {
    match clause {
        Clause::Or(args) => {
            let literals = args
                .into_iter()
                .map(extract_literal)
                .collect::<ProverResult<Vec<_>>>()?;
            Ok(CnfDisjunction::new(literals))
        }
        other @ (Clause::Atom(_) | Clause::Not(_)) => {
            Ok(CnfDisjunction::new(vec![extract_literal(other)?]))
        }
        other => Err(ProverError::Normalization {
            clause: other,
            stage: "extract_disjunctions",
        }),
    }
}

fn extract_literal(clause: Clause) -> ProverResult<CnfLiteral> {
    match clause {
        Clause::Atom(atom) => Ok(CnfLiteral::Positive(atom)),
        Clause::Not(body) => match *body {
            Clause::Atom(atom) => Ok(CnfLiteral::Negative(atom)),
            other => Err(ProverError::Normalization {
                clause: Clause::not(other),
                stage: "extract_literal",
            }),
        },
        other => Err(ProverError::Normalization {
            clause: other,
            stage: "extract_literal",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Predicate, Term, Variable};

    fn atom(name: &str, arity: usize) -> Atom {
        let terms: Vec<Term> = (0..arity)
            .map(|i| Term::Variable(Variable::new(format!("X{}", i))))
            .collect();
        Atom::new(Predicate::new(name), terms)
    }

    #[test]
    fn disjunction_equality_is_order_independent() {
        let a = CnfLiteral::Positive(atom("a", 0));
        let b = CnfLiteral::Negative(atom("b", 0));
        let left = CnfDisjunction::new(vec![a.clone(), b.clone()]);
        let right = CnfDisjunction::new(vec![b, a]);
        assert_eq!(left, right);
    }

    #[test]
    fn head_prefers_highest_arity() {
        let unary = CnfLiteral::Positive(atom("p", 1));
        let binary = CnfLiteral::Positive(atom("q", 2));
        let disjunction = CnfDisjunction::new(vec![unary, binary.clone()]);
        assert_eq!(disjunction.head(), Some(&binary));
    }

    #[test]
    fn to_cnf_extracts_one_disjunction_per_conjunct() {
        let p = Clause::Atom(atom("p", 0));
        let q = Clause::Atom(atom("q", 0));
        let clause = Clause::and(vec![p, Clause::or(vec![q, Clause::not(Clause::Atom(atom("r", 0)))])]);
        let disjunctions = to_cnf(clause).unwrap();
        assert_eq!(disjunctions.len(), 2);
    }

    #[test]
    fn to_cnf_distributes_before_extracting() {
        let a = Clause::Atom(atom("a", 0));
        let b = Clause::Atom(atom("b", 0));
        let c = Clause::Atom(atom("c", 0));
        let clause = Clause::or(vec![a, Clause::and(vec![b, c])]);
        let disjunctions = to_cnf(clause).unwrap();
        assert_eq!(disjunctions.len(), 2);
        assert!(disjunctions.iter().all(|d| d.len() == 2));
    }
}

//! Stage 4: distribute `Or` over `And` so the clause becomes a
//! conjunction of disjunctions of literals.
//!
//! Input is restricted to {Atom, Not(Atom), And, Or} (the output of
//! [`super::skolemize::normalize_quantifiers`]); output is the same
//! shape with every `Or` pushed below every `And`.

use crate::clause::Clause;

/// Distribute disjunction over conjunction until no `Or` has an `And`
/// child.
pub fn normalize_conjunctions(clause: Clause) -> Clause {
    match clause {
        Clause::Atom(_) | Clause::Not(_) => clause,
        Clause::And(args) => Clause::and(args.into_iter().map(normalize_conjunctions)),
        Clause::Or(args) => {
            let distributed = args.into_iter().map(normalize_conjunctions);
            distributed.fold(None, |acc, next| match acc {
                None => Some(next),
                Some(acc) => Some(distribute_pair(acc, next)),
            })
            .unwrap_or_else(|| Clause::Or(vec![]))
        }
        Clause::Implies(..) | Clause::Exists(..) | Clause::ForAll(..) => {
            panic!("normalize_conjunctions requires quantifier-free NNF input")
        }
    }
}

/// Distribute `left ∨ right` over any `And` in either operand, taking
/// the Cartesian product of their conjuncts.
fn distribute_pair(left: Clause, right: Clause) -> Clause {
    match (left, right) {
        (Clause::And(left_args), right) => {
            Clause::and(left_args.into_iter().map(|l| distribute_pair(l, right.clone())))
        }
        (left, Clause::And(right_args)) => {
            Clause::and(right_args.into_iter().map(|r| distribute_pair(left.clone(), r)))
        }
        (left, right) => Clause::or(vec![left, right]),
    }
}

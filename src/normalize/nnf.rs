//! Stage 1: push negation down to the atoms.
//!
//! After this stage a clause contains only {Atom, Not(Atom), And, Or,
//! Exists, ForAll} — `Implies` and double/compound negation are gone.

use crate::clause::Clause;

/// Convert `clause` to negation normal form.
pub fn to_nnf(clause: Clause) -> Clause {
    match clause {
        Clause::Atom(_) => clause,
        Clause::Not(body) => not_to_nnf(*body),
        Clause::And(args) => Clause::and(args.into_iter().map(to_nnf)),
        Clause::Or(args) => Clause::or(args.into_iter().map(to_nnf)),
        Clause::Implies(antecedent, consequent) => {
            to_nnf(Clause::or(vec![Clause::not(*antecedent), *consequent]))
        }
        Clause::Exists(var, body) => Clause::exists(var, to_nnf(*body)),
        Clause::ForAll(var, body) => Clause::forall(var, to_nnf(*body)),
    }
}

/// Convert `not(body)` to NNF, i.e. `to_nnf(Clause::not(body))` without
/// constructing the intermediate `Not` node.
fn not_to_nnf(body: Clause) -> Clause {
    match body {
        Clause::Atom(_) => Clause::not(body),
        Clause::Not(inner) => to_nnf(*inner),
        Clause::And(args) => Clause::or(args.into_iter().map(not_to_nnf)),
        Clause::Or(args) => Clause::and(args.into_iter().map(not_to_nnf)),
        Clause::Implies(antecedent, consequent) => {
            to_nnf(Clause::and(vec![*antecedent, Clause::not(*consequent)]))
        }
        Clause::Exists(var, inner) => Clause::forall(var, not_to_nnf(*inner)),
        Clause::ForAll(var, inner) => Clause::exists(var, not_to_nnf(*inner)),
    }
}

/// Asserts, for tests, that `clause` is a valid NNF tree.
#[cfg(test)]
pub(crate) fn assert_nnf(clause: &Clause) {
    match clause {
        Clause::Atom(_) => {}
        Clause::Not(body) => assert!(matches!(**body, Clause::Atom(_)), "Not must wrap an Atom in NNF, got {:?}", body),
        Clause::And(args) | Clause::Or(args) => args.iter().for_each(assert_nnf),
        Clause::Exists(_, body) | Clause::ForAll(_, body) => assert_nnf(body),
        Clause::Implies(..) => panic!("Implies must not survive to_nnf"),
    }
}

//! Stage 3: eliminate existential quantifiers by Skolemization, then
//! drop the (now-redundant) universal quantifiers.
//!
//! After this stage a clause contains only {Atom, Not(Atom), And, Or}:
//! every variable remaining is implicitly universally quantified.

use std::collections::HashSet;

use crate::clause::Clause;
use crate::term::{find_variables_in_terms, Atom, Function, Term, Variable};

/// Generates Skolem function symbols, one per existential quantifier
/// eliminated, named `_SK_0`, `_SK_1`, ... in the order encountered.
#[derive(Debug, Default)]
pub struct Skolemizer {
    next_id: usize,
}

impl Skolemizer {
    pub fn new() -> Self {
        Skolemizer::default()
    }

    fn next_function(&mut self) -> Function {
        let f = Function::new(format!("_SK_{}", self.next_id));
        self.next_id += 1;
        f
    }
}

/// Eliminate quantifiers from `clause`, replacing each existentially
/// bound variable with a Skolem term over the universally quantified
/// variables in whose scope it appears (and over any free variable of
/// the whole clause, which is implicitly universal).
pub fn normalize_quantifiers(clause: Clause) -> Clause {
    let mut skolemizer = Skolemizer::new();
    let free: Vec<Variable> = {
        let mut names: Vec<String> = super::standardize::find_unbound_var_names(&clause)
            .into_iter()
            .collect();
        names.sort();
        names.into_iter().map(Variable::new).collect()
    };
    walk(clause, &mut skolemizer, &free)
}

fn walk(clause: Clause, skolemizer: &mut Skolemizer, universals: &[Variable]) -> Clause {
    match clause {
        Clause::Atom(_) => clause,
        Clause::Not(body) => Clause::not(walk(*body, skolemizer, universals)),
        Clause::And(args) => Clause::and(args.into_iter().map(|a| walk(a, skolemizer, universals))),
        Clause::Or(args) => Clause::or(args.into_iter().map(|a| walk(a, skolemizer, universals))),
        Clause::Implies(..) => panic!("normalize_quantifiers requires NNF input; Implies must not survive"),
        Clause::Exists(var, body) => {
            let skolem_fn = skolemizer.next_function();
            let args: Vec<Term> = universals.iter().cloned().map(Term::Variable).collect();
            let replacement = Term::BoundFunction(skolem_fn.of(args));
            let substituted = substitute_var(*body, &var, &replacement);
            walk(substituted, skolemizer, universals)
        }
        Clause::ForAll(var, body) => {
            let mut extended = universals.to_vec();
            if !extended.contains(&var) {
                extended.push(var);
            }
            walk(*body, skolemizer, &extended)
        }
    }
}

fn substitute_var(clause: Clause, var: &Variable, replacement: &Term) -> Clause {
    match clause {
        Clause::Atom(atom) => {
            let terms = atom
                .terms
                .iter()
                .map(|t| substitute_in_term(t, var, replacement))
                .collect::<Vec<_>>();
            Clause::Atom(Atom::new(atom.predicate.clone(), terms))
        }
        Clause::Not(body) => Clause::not(substitute_var(*body, var, replacement)),
        Clause::And(args) => Clause::and(args.into_iter().map(|a| substitute_var(a, var, replacement))),
        Clause::Or(args) => Clause::or(args.into_iter().map(|a| substitute_var(a, var, replacement))),
        Clause::Implies(a, c) => Clause::implies(
            substitute_var(*a, var, replacement),
            substitute_var(*c, var, replacement),
        ),
        Clause::Exists(v, body) => {
            if &v == var {
                Clause::exists(v, *body)
            } else {
                Clause::exists(v, substitute_var(*body, var, replacement))
            }
        }
        Clause::ForAll(v, body) => {
            if &v == var {
                Clause::forall(v, *body)
            } else {
                Clause::forall(v, substitute_var(*body, var, replacement))
            }
        }
    }
}

fn substitute_in_term(term: &Term, var: &Variable, replacement: &Term) -> Term {
    match term {
        Term::Variable(v) if v == var => replacement.clone(),
        Term::Variable(_) | Term::Constant(_) => term.clone(),
        Term::BoundFunction(bf) => Term::BoundFunction(crate::term::BoundFunction {
            function: bf.function.clone(),
            terms: std::rc::Rc::new(
                bf.terms
                    .iter()
                    .map(|t| substitute_in_term(t, var, replacement))
                    .collect(),
            ),
        }),
    }
}

/// Returns every variable appearing in `clause`'s atoms, whether bound
/// or free. Used by tests to confirm Skolemization removed the targeted
/// existential variable.
#[cfg(test)]
pub(crate) fn all_term_variables(clause: &Clause) -> HashSet<Variable> {
    fn collect(clause: &Clause, out: &mut HashSet<Variable>) {
        match clause {
            Clause::Atom(atom) => {
                for v in find_variables_in_terms(atom.terms.iter()) {
                    out.insert(v);
                }
            }
            Clause::Not(body) => collect(body, out),
            Clause::And(args) | Clause::Or(args) => args.iter().for_each(|a| collect(a, out)),
            Clause::Implies(a, c) => {
                collect(a, out);
                collect(c, out);
            }
            Clause::Exists(_, body) | Clause::ForAll(_, body) => collect(body, out),
        }
    }
    let mut out = HashSet::new();
    collect(clause, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Predicate;

    #[test]
    fn existential_becomes_skolem_constant_with_no_enclosing_universal() {
        let x = Variable::new("X");
        let p = Predicate::new("p");
        let clause = Clause::exists(x.clone(), Clause::Atom(Atom::new(p, vec![Term::Variable(x)])));
        let result = normalize_quantifiers(clause);
        match result {
            Clause::Atom(atom) => match &atom.terms[0] {
                Term::BoundFunction(bf) => {
                    assert_eq!(bf.function.0.as_ref(), "_SK_0");
                    assert!(bf.terms.is_empty());
                }
                other => panic!("expected Skolem term, got {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn existential_under_universal_becomes_skolem_function() {
        let x = Variable::new("X");
        let y = Variable::new("Y");
        let p = Predicate::new("p");
        let clause = Clause::forall(
            x.clone(),
            Clause::exists(
                y.clone(),
                Clause::Atom(Atom::new(p, vec![Term::Variable(x), Term::Variable(y)])),
            ),
        );
        let result = normalize_quantifiers(clause);
        match result {
            Clause::Atom(atom) => match &atom.terms[1] {
                Term::BoundFunction(bf) => assert_eq!(bf.terms.len(), 1),
                other => panic!("expected Skolem function of arity 1, got {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn quantifiers_fully_removed() {
        let x = Variable::new("X");
        let p = Predicate::new("p");
        let clause = Clause::forall(x.clone(), Clause::Atom(Atom::new(p, vec![Term::Variable(x)])));
        let result = normalize_quantifiers(clause);
        assert!(matches!(result, Clause::Atom(_)));
    }
}

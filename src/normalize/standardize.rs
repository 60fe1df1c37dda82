//! Stage 2: rename every variable to a name unique within this
//! conversion, so later stages never have to worry about one
//! disjunction's variables accidentally aliasing another's.

use std::collections::{HashMap, HashSet};

use crate::clause::Clause;
use crate::error::{ProverError, ProverResult};
use crate::term::{Term, Variable};

/// Generates fresh variable names, never repeating one it has already
/// handed out. Given a base name already in use, it appends the next
/// unused `_k` suffix (`x`, then `x_1`, `x_2`, ...).
#[derive(Debug, Default)]
pub struct VarNameGenerator {
    used_names: HashSet<String>,
}

impl VarNameGenerator {
    pub fn new() -> Self {
        VarNameGenerator::default()
    }

    /// Produce a fresh name derived from `base_name`.
    pub fn generate(&mut self, base_name: &str) -> String {
        if !self.used_names.contains(base_name) {
            self.used_names.insert(base_name.to_string());
            return base_name.to_string();
        }
        let mut k = 1usize;
        loop {
            let candidate = format!("{}_{}", base_name, k);
            if !self.used_names.contains(&candidate) {
                self.used_names.insert(candidate.clone());
                return candidate;
            }
            k += 1;
        }
    }
}

/// Collect the names of every variable in `clause` not bound by an
/// enclosing quantifier within `clause` itself.
pub fn find_unbound_var_names(clause: &Clause) -> HashSet<String> {
    let mut bound = HashSet::new();
    let mut free = HashSet::new();
    walk_free(clause, &mut bound, &mut free);
    free
}

fn walk_free(clause: &Clause, bound: &mut HashSet<String>, free: &mut HashSet<String>) {
    match clause {
        Clause::Atom(atom) => collect_free_in_terms(atom.terms.iter(), bound, free),
        Clause::Not(body) => walk_free(body, bound, free),
        Clause::And(args) | Clause::Or(args) => {
            for arg in args {
                walk_free(arg, bound, free);
            }
        }
        Clause::Implies(antecedent, consequent) => {
            walk_free(antecedent, bound, free);
            walk_free(consequent, bound, free);
        }
        Clause::Exists(var, body) | Clause::ForAll(var, body) => {
            let newly_bound = bound.insert(var.name().to_string());
            walk_free(body, bound, free);
            if newly_bound {
                bound.remove(var.name());
            }
        }
    }
}

fn collect_free_in_terms<'a>(terms: impl Iterator<Item = &'a Term>, bound: &HashSet<String>, free: &mut HashSet<String>) {
    for term in terms {
        match term {
            Term::Variable(v) => {
                if !bound.contains(v.name()) {
                    free.insert(v.name().to_string());
                }
            }
            Term::Constant(_) => {}
            Term::BoundFunction(bf) => collect_free_in_terms(bf.terms.iter(), bound, free),
        }
    }
}

/// Rename every bound variable in `clause` to a name unique within this
/// conversion; free variables are renamed once, at the outer scope.
pub fn normalize_variables(clause: Clause) -> ProverResult<Clause> {
    let mut free_names: Vec<String> = find_unbound_var_names(&clause).into_iter().collect();
    free_names.sort();
    let mut generator = VarNameGenerator::new();
    let mut remap: HashMap<String, String> = HashMap::new();
    for name in free_names {
        let fresh = generator.generate(&name);
        remap.insert(name, fresh);
    }
    walk_rename(clause, &mut generator, &remap)
}

fn walk_rename(clause: Clause, generator: &mut VarNameGenerator, remap: &HashMap<String, String>) -> ProverResult<Clause> {
    match clause {
        Clause::Atom(atom) => {
            let terms = atom
                .terms
                .iter()
                .map(|t| rename_term(t, remap))
                .collect::<ProverResult<Vec<_>>>()?;
            Ok(Clause::Atom(crate::term::Atom::new(atom.predicate.clone(), terms)))
        }
        Clause::Not(body) => Ok(Clause::not(walk_rename(*body, generator, remap)?)),
        Clause::And(args) => Ok(Clause::and(
            args.into_iter()
                .map(|a| walk_rename(a, generator, remap))
                .collect::<ProverResult<Vec<_>>>()?,
        )),
        Clause::Or(args) => Ok(Clause::or(
            args.into_iter()
                .map(|a| walk_rename(a, generator, remap))
                .collect::<ProverResult<Vec<_>>>()?,
        )),
        Clause::Implies(antecedent, consequent) => Ok(Clause::implies(
            walk_rename(*antecedent, generator, remap)?,
            walk_rename(*consequent, generator, remap)?,
        )),
        Clause::Exists(var, body) => {
            let fresh = generator.generate(var.name());
            let mut extended = remap.clone();
            extended.insert(var.name().to_string(), fresh.clone());
            Ok(Clause::exists(Variable::new(fresh), walk_rename(*body, generator, &extended)?))
        }
        Clause::ForAll(var, body) => {
            let fresh = generator.generate(var.name());
            let mut extended = remap.clone();
            extended.insert(var.name().to_string(), fresh.clone());
            Ok(Clause::forall(Variable::new(fresh), walk_rename(*body, generator, &extended)?))
        }
    }
}

fn rename_term(term: &Term, remap: &HashMap<String, String>) -> ProverResult<Term> {
    match term {
        Term::Variable(v) => {
            let fresh = remap
                .get(v.name())
                .ok_or_else(|| ProverError::Invariant(format!("variable '{}' missing from rename map", v.name())))?;
            Ok(Term::Variable(Variable::new(fresh.clone())))
        }
        Term::Constant(c) => Ok(Term::Constant(c.clone())),
        Term::BoundFunction(bf) => Ok(Term::BoundFunction(crate::term::BoundFunction {
            function: bf.function.clone(),
            terms: std::rc::Rc::new(
                bf.terms
                    .iter()
                    .map(|t| rename_term(t, remap))
                    .collect::<ProverResult<Vec<_>>>()?,
            ),
        })),
    }
}

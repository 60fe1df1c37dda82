//! Immutable value types for variables, constants, predicates, functions,
//! and the terms and atoms built from them.
//!
//! Everything here is cheap to [`Clone`] (symbols are reference-counted)
//! and compared/hashed on its symbolic name, never its embedding: an
//! embedding is an opaque payload consumed only by a similarity function
//! (see [`crate::similarity`]), not part of a symbol's identity.

use std::fmt;
use std::rc::Rc;

/// An opaque numeric vector attached to a [`Constant`] or [`Predicate`]
/// for fuzzy comparison. The prover never inspects these values itself;
/// it hands them to a [`crate::similarity::SimilarityFunc`].
pub type Embedding = Rc<[f32]>;

/// A logic variable. Equality and hashing are by name: two variables
/// with the same name are the same variable within one disjunction, and
/// are deliberately made distinct across disjunctions by renaming during
/// CNF conversion and resolvent construction, never by identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub Rc<str>);

impl Variable {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Variable(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named individual, optionally carrying an embedding for fuzzy
/// comparison against other constants.
#[derive(Debug, Clone)]
pub struct Constant {
    pub symbol: Rc<str>,
    pub embedding: Option<Embedding>,
}

impl Constant {
    pub fn new(symbol: impl Into<Rc<str>>) -> Self {
        Constant {
            symbol: symbol.into(),
            embedding: None,
        }
    }

    pub fn with_embedding(symbol: impl Into<Rc<str>>, embedding: Embedding) -> Self {
        Constant {
            symbol: symbol.into(),
            embedding: Some(embedding),
        }
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}
impl Eq for Constant {}

impl std::hash::Hash for Constant {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl PartialOrd for Constant {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Constant {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.symbol.cmp(&other.symbol)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A predicate symbol, optionally carrying an embedding. Shares its
/// comparison interface with [`Constant`]: both are valid operands of a
/// [`crate::similarity::SimilarityFunc`].
#[derive(Debug, Clone)]
pub struct Predicate {
    pub symbol: Rc<str>,
    pub embedding: Option<Embedding>,
}

impl Predicate {
    pub fn new(symbol: impl Into<Rc<str>>) -> Self {
        Predicate {
            symbol: symbol.into(),
            embedding: None,
        }
    }

    pub fn with_embedding(symbol: impl Into<Rc<str>>, embedding: Embedding) -> Self {
        Predicate {
            symbol: symbol.into(),
            embedding: Some(embedding),
        }
    }

    /// Shorthand for building an [`crate::clause::Clause::Atom`] applying
    /// this predicate to a list of terms.
    pub fn of(&self, terms: impl Into<Vec<Term>>) -> crate::clause::Clause {
        crate::clause::Clause::Atom(Atom::new(self.clone(), terms.into()))
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}
impl Eq for Predicate {}

impl std::hash::Hash for Predicate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl PartialOrd for Predicate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Predicate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.symbol.cmp(&other.symbol)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A function symbol with no embedding; functions are only ever compared
/// by exact symbol equality (they never participate in fuzzy matching).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Function(pub Rc<str>);

impl Function {
    pub fn new(symbol: impl Into<Rc<str>>) -> Self {
        Function(symbol.into())
    }

    /// Apply this function to a fixed-length sequence of terms.
    pub fn of(&self, terms: impl Into<Vec<Term>>) -> BoundFunction {
        BoundFunction {
            function: self.clone(),
            terms: Rc::new(terms.into()),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A function applied to a fixed-length sequence of terms. Arguments may
/// themselves be `BoundFunction`s, so terms nest arbitrarily deep.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundFunction {
    pub function: Function,
    pub terms: Rc<Vec<Term>>,
}

impl fmt::Display for BoundFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", term)?;
        }
        write!(f, ")")
    }
}

/// The disjoint union of term kinds: a logic term is a variable, a
/// constant, or a function applied to other terms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    BoundFunction(BoundFunction),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::BoundFunction(bf) => write!(f, "{}", bf),
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}
impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}
impl From<BoundFunction> for Term {
    fn from(bf: BoundFunction) -> Self {
        Term::BoundFunction(bf)
    }
}

/// A predicate applied to an ordered tuple of terms; arity is implicit
/// in the tuple length.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom {
    pub predicate: Predicate,
    pub terms: Rc<Vec<Term>>,
}

impl Atom {
    pub fn new(predicate: Predicate, terms: Vec<Term>) -> Self {
        Atom {
            predicate,
            terms: Rc::new(terms),
        }
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", term)?;
        }
        write!(f, ")")
    }
}

/// Recursively collect every distinct [`Variable`] appearing in `terms`,
/// descending into [`BoundFunction`] arguments.
pub fn find_variables_in_terms<'a>(terms: impl IntoIterator<Item = &'a Term>) -> Vec<Variable> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    fn walk(term: &Term, seen: &mut std::collections::HashSet<Variable>, out: &mut Vec<Variable>) {
        match term {
            Term::Variable(v) => {
                if seen.insert(v.clone()) {
                    out.push(v.clone());
                }
            }
            Term::Constant(_) => {}
            Term::BoundFunction(bf) => {
                for t in bf.terms.iter() {
                    walk(t, seen, out);
                }
            }
        }
    }
    for term in terms {
        walk(term, &mut seen, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_compare_by_symbol_not_embedding() {
        let a = Constant::with_embedding("abe", Rc::from(vec![1.0, 0.0].into_boxed_slice()));
        let b = Constant::new("abe");
        assert_eq!(a, b);
    }

    #[test]
    fn bound_function_display_nests() {
        let f = Function::new("f");
        let g = Function::new("g");
        let x = Variable::new("X");
        let inner = g.of(vec![Term::Variable(x.clone())]);
        let outer = f.of(vec![Term::BoundFunction(inner)]);
        assert_eq!(outer.to_string(), "f(g(X))");
    }

    #[test]
    fn atom_display_matches_contract() {
        let p = Predicate::new("pred");
        let atom = Atom::new(
            p,
            vec![
                Term::Constant(Constant::new("arg1")),
                Term::Constant(Constant::new("arg2")),
            ],
        );
        assert_eq!(atom.to_string(), "pred(arg1,arg2)");
    }

    #[test]
    fn find_variables_in_terms_descends_into_functions() {
        let f = Function::new("f");
        let x = Variable::new("X");
        let y = Variable::new("Y");
        let terms = vec![
            Term::Variable(x.clone()),
            Term::BoundFunction(f.of(vec![Term::Variable(y.clone()), Term::Variable(x.clone())])),
        ];
        let vars = find_variables_in_terms(terms.iter());
        assert_eq!(vars, vec![x, y]);
    }
}

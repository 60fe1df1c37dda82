//! The user-facing clause algebra: atoms composed with the six
//! connectives {And, Or, Not, Implies, Exists, ForAll}.
//!
//! This is a closed sum type; normalization (see [`crate::normalize`])
//! is a total function from any value of this type down to a list of
//! [`crate::normalize::cnf::CnfDisjunction`]s.

use std::fmt;

use crate::term::{Atom, Variable};

/// A first-order clause: an atom, or atoms composed with connectives.
///
/// `And` and `Or` auto-flatten on construction through [`Clause::and`]
/// and [`Clause::or`]: `Clause::and([Clause::and([a, b]), c])` produces
/// the same three-way `And` as `Clause::and([a, b, c])`. Building the
/// variants directly (`Clause::And(vec![...])`) does not flatten; use
/// the constructors unless you specifically want a non-flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Atom(Atom),
    Not(Box<Clause>),
    And(Vec<Clause>),
    Or(Vec<Clause>),
    Implies(Box<Clause>, Box<Clause>),
    Exists(Variable, Box<Clause>),
    ForAll(Variable, Box<Clause>),
}

impl Clause {
    pub fn not(body: Clause) -> Clause {
        Clause::Not(Box::new(body))
    }

    pub fn implies(antecedent: Clause, consequent: Clause) -> Clause {
        Clause::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn exists(variable: Variable, body: Clause) -> Clause {
        Clause::Exists(variable, Box::new(body))
    }

    pub fn forall(variable: Variable, body: Clause) -> Clause {
        Clause::ForAll(variable, Box::new(body))
    }

    /// Build a (flattened) conjunction. A single argument is returned
    /// unwrapped; nested `And`s are spliced into the parent's argument
    /// list rather than nested.
    pub fn and(args: impl IntoIterator<Item = Clause>) -> Clause {
        let mut flat = Vec::new();
        for arg in args {
            match arg {
                Clause::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.into_iter().next().unwrap()
        } else {
            Clause::And(flat)
        }
    }

    /// Build a (flattened) disjunction, analogous to [`Clause::and`].
    pub fn or(args: impl IntoIterator<Item = Clause>) -> Clause {
        let mut flat = Vec::new();
        for arg in args {
            match arg {
                Clause::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.into_iter().next().unwrap()
        } else {
            Clause::Or(flat)
        }
    }
}

/// Binding strength from tightest to loosest: {Not} < {And} < {Or} <
/// {Implies} < {Exists, ForAll}. A child is parenthesized only when its
/// own precedence is looser than its parent's.
fn precedence(clause: &Clause) -> u8 {
    match clause {
        Clause::Atom(_) => 0,
        Clause::Not(_) => 1,
        Clause::And(_) => 2,
        Clause::Or(_) => 3,
        Clause::Implies(..) => 4,
        Clause::Exists(..) | Clause::ForAll(..) => 5,
    }
}

fn fmt_child(f: &mut fmt::Formatter<'_>, parent: &Clause, child: &Clause) -> fmt::Result {
    if precedence(child) > precedence(parent) {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Atom(atom) => write!(f, "{}", atom),
            Clause::Not(body) => {
                write!(f, "\u{ac}")?;
                fmt_child(f, self, body)
            }
            Clause::And(args) => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " \u{2227} ")?;
                    }
                    fmt_child(f, self, arg)?;
                }
                Ok(())
            }
            Clause::Or(args) => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " \u{2228} ")?;
                    }
                    fmt_child(f, self, arg)?;
                }
                Ok(())
            }
            Clause::Implies(antecedent, consequent) => {
                fmt_child(f, self, antecedent)?;
                write!(f, " \u{2192} ")?;
                fmt_child(f, self, consequent)
            }
            Clause::Exists(var, body) => {
                write!(f, "\u{2203}{}.", var)?;
                fmt_child(f, self, body)
            }
            Clause::ForAll(var, body) => {
                write!(f, "\u{2200}{}.", var)?;
                fmt_child(f, self, body)
            }
        }
    }
}

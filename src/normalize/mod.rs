//! Converts an arbitrary [`crate::clause::Clause`] into conjunctive
//! normal form, as a pipeline of four total functions:
//!
//! 1. [`nnf::to_nnf`] pushes negation down to the atoms.
//! 2. [`standardize::normalize_variables`] renames every variable to a
//!    name unique within the clause being converted.
//! 3. [`skolemize::normalize_quantifiers`] eliminates existentials by
//!    Skolemization and drops the now-redundant universals.
//! 4. [`distribute::normalize_conjunctions`] distributes `Or` over `And`.
//!
//! [`cnf::to_cnf`] runs all four and extracts the result as a list of
//! [`cnf::CnfDisjunction`]s.

pub mod cnf;
pub mod distribute;
pub mod nnf;
pub mod skolemize;
pub mod standardize;

pub use cnf::{to_cnf, CnfDisjunction, CnfLiteral};

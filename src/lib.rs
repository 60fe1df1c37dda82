//! A fuzzy first-order resolution theorem prover.
//!
//! Clauses are built from [`term`] values composed with [`clause::Clause`]
//! connectives, normalized to conjunctive normal form by [`normalize`],
//! and proved by [`prover::Prover`] via input resolution ([`resolve`],
//! [`unify`]) over a knowledge set. Predicates and constants may carry
//! an embedding; when two symbols with different names are compared, a
//! [`similarity::SimilarityFunc`] produces a score in `[0, 1]` instead
//! of requiring exact equality, and every proof carries the minimum
//! such score encountered along its resolution chain.

pub mod clause;
pub mod error;
pub mod normalize;
pub mod proof;
pub mod prover;
pub mod resolve;
pub mod similarity;
pub mod term;
pub mod unify;

pub use clause::Clause;
pub use error::{ProverError, ProverResult};
pub use normalize::{to_cnf, CnfDisjunction, CnfLiteral};
pub use proof::{Proof, ProofStats, ProofStep};
pub use prover::{Prover, ProverConfig};
pub use similarity::{cosine_similarity, max_similarity, symbol_compare, SimilarityFunc};
pub use term::{Atom, Constant, Function, Predicate, Term, Variable};

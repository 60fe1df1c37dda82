use resolvent::{Clause, Constant, Predicate, Prover, ProverConfig, Term, Variable};

fn unary(name: &str, term: Term) -> Clause {
    Predicate::new(name).of(vec![term])
}

fn var(name: &str) -> Term {
    Term::Variable(Variable::new(name))
}

fn rule(from: &str, to: &str) -> Clause {
    Clause::forall(Variable::new("X"), Clause::implies(unary(from, var("X")), unary(to, var("X"))))
}

/// A non-Horn knowledge base chaining a long, purely-Horn run of facts
/// into the one wide disjunctive rule that can derive `bad`:
///
///   fact0(c)
///   fact0(X) → fact1(X), fact1(X) → fact2(X), ..., fact6(X) → a(X)
///   a(X) → (bad(X) ∨ junk1(X) ∨ junk2(X) ∨ junk3(X))   (5-literal clause once negated)
///   ¬junk1(X), ¬junk2(X), ¬junk3(X)
///
/// `a` has only this one route in, through the wide clause, so proving
/// `bad(X)` forces the search through every junk literal before it can
/// walk the seven-rule Horn chain back down to the ground fact, binding
/// `X` to `c` along the way.
fn commitment_knowledge() -> Vec<Clause> {
    vec![
        unary("fact0", Term::Constant(Constant::new("c"))),
        rule("fact0", "fact1"),
        rule("fact1", "fact2"),
        rule("fact2", "fact3"),
        rule("fact3", "fact4"),
        rule("fact4", "fact5"),
        rule("fact5", "fact6"),
        rule("fact6", "a"),
        Clause::forall(
            Variable::new("X"),
            Clause::implies(
                unary("a", var("X")),
                Clause::or(vec![
                    unary("bad", var("X")),
                    unary("junk1", var("X")),
                    unary("junk2", var("X")),
                    unary("junk3", var("X")),
                ]),
            ),
        ),
        Clause::forall(Variable::new("X"), Clause::not(unary("junk1", var("X")))),
        Clause::forall(Variable::new("X"), Clause::not(unary("junk2", var("X")))),
        Clause::forall(Variable::new("X"), Clause::not(unary("junk3", var("X")))),
    ]
}

fn goal() -> Clause {
    unary("bad", var("X"))
}

#[test]
fn wide_clause_is_reachable_with_a_generous_resolvent_width() {
    let mut config = ProverConfig::default();
    config.max_proof_depth = 20;
    config.max_resolvent_width = Some(10);
    let prover = Prover::new(commitment_knowledge(), config).unwrap();

    let proof = prover.prove(goal(), None).unwrap().expect("bad(X) should be derivable");
    assert_eq!(proof.similarity, 1.0);
    assert!(proof.depth >= 10);
    assert_eq!(proof.substitutions.get(&Variable::new("X")), Some(&Term::Constant(Constant::new("c"))));
}

#[test]
fn a_narrow_resolvent_width_prunes_the_only_path_to_the_wide_clause() {
    let mut config = ProverConfig::default();
    config.max_proof_depth = 20;
    config.max_resolvent_width = Some(3);
    let prover = Prover::new(commitment_knowledge(), config).unwrap();

    let proof = prover.prove(goal(), None).unwrap();
    assert!(proof.is_none());
}

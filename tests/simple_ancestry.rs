use resolvent::{Clause, Constant, Predicate, Prover, Term, Variable};

fn parent_of(a: &str, b: &str) -> Clause {
    Predicate::new("parent_of").of(vec![Term::Constant(Constant::new(a)), Term::Constant(Constant::new(b))])
}

fn father_of(a: &str, b: &str) -> Clause {
    Predicate::new("father_of").of(vec![Term::Constant(Constant::new(a)), Term::Constant(Constant::new(b))])
}

fn grandpa_rule() -> Clause {
    let x = Variable::new("X");
    let y = Variable::new("Y");
    let z = Variable::new("Z");
    let father = Predicate::new("father_of").of(vec![Term::Variable(x.clone()), Term::Variable(z.clone())]);
    let parent = Predicate::new("parent_of").of(vec![Term::Variable(z), Term::Variable(y.clone())]);
    let grandpa = Predicate::new("grandpa_of").of(vec![Term::Variable(x.clone()), Term::Variable(y)]);
    Clause::forall(x, Clause::implies(Clause::and(vec![father, parent]), grandpa))
}

#[test]
fn finds_the_grandparent_and_binds_the_query_variable() {
    let prover = Prover::with_defaults(vec![
        parent_of("homer", "bart"),
        father_of("abe", "homer"),
        grandpa_rule(),
    ])
    .unwrap();

    let goal = Predicate::new("grandpa_of").of(vec![
        Term::Variable(Variable::new("X")),
        Term::Constant(Constant::new("bart")),
    ]);
    let proof = prover.prove(goal, None).unwrap().expect("abe is bart's grandfather");

    assert_eq!(proof.similarity, 1.0);
    assert_eq!(proof.depth, 3);
    assert_eq!(
        proof.substitutions.get(&Variable::new("X")),
        Some(&Term::Constant(Constant::new("abe")))
    );

    let rendered = proof.to_string();
    assert!(rendered.starts_with("Goal:"));
    assert!(rendered.contains("Subsitutions:"));
    assert!(rendered.contains("Similarity:"));
    assert!(rendered.contains("Depth: 3"));
}

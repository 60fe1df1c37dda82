use std::rc::Rc;

use resolvent::{Clause, Constant, Predicate, Term, Variable};

fn embed(vals: &[f32]) -> resolvent::term::Embedding {
    Rc::from(vals.to_vec().into_boxed_slice())
}

fn father_of_embed() -> Predicate {
    Predicate::with_embedding("father_of_embed", embed(&[1.0, 0.0]))
}

fn dad_of_embed() -> Predicate {
    Predicate::with_embedding("dad_of_embed", embed(&[0.98, 0.198_997_49]))
}

fn fact(pred: &Predicate, a: &str, b: &str) -> Clause {
    pred.of(vec![Term::Constant(Constant::new(a)), Term::Constant(Constant::new(b))])
}

/// Two fathers-of-fathers facts asserted under two near-synonymous
/// predicates (`father_of_embed`, `dad_of_embed`, cosine similarity
/// 0.98), plus a rule chaining `father_of_embed` twice into
/// `grandpa_of_fuzzy`. Resolving the goal against the rule admits either
/// predicate for either hop, yielding one exact-match proof and three
/// fuzzy-matched ones.
pub fn fuzzy_ancestry_knowledge() -> Vec<Clause> {
    let father = father_of_embed();
    let dad = dad_of_embed();

    let x = Variable::new("X");
    let y = Variable::new("Y");
    let z = Variable::new("Z");
    let hop1 = father.of(vec![Term::Variable(x.clone()), Term::Variable(z.clone())]);
    let hop2 = father.of(vec![Term::Variable(z), Term::Variable(y.clone())]);
    let grandpa = Predicate::new("grandpa_of_fuzzy").of(vec![Term::Variable(x.clone()), Term::Variable(y)]);
    let rule = Clause::forall(x, Clause::implies(Clause::and(vec![hop1, hop2]), grandpa));

    vec![
        fact(&father, "abe", "homer"),
        fact(&father, "homer", "bart"),
        fact(&dad, "abe", "homer"),
        fact(&dad, "homer", "bart"),
        rule,
    ]
}

pub fn fuzzy_ancestry_goal(var_name: &str) -> Clause {
    Predicate::new("grandpa_of_fuzzy").of(vec![
        Term::Variable(Variable::new(var_name)),
        Term::Constant(Constant::new("bart")),
    ])
}

use resolvent::similarity::symbol_compare;
use resolvent::term::{Atom, Function, Predicate, Term, Variable};
use resolvent::unify::unify;

#[test]
fn binding_a_variable_to_a_term_containing_itself_fails() {
    let p = Predicate::new("p");
    let f = Function::new("f");
    let x = Variable::new("X");
    let y = Variable::new("Y");

    // source: p(f(X), X), target: p(Y, f(Y)) -- X would have to bind to
    // f(Y), and Y to f(X), an infinite term either way round.
    let source = Atom::new(
        p.clone(),
        vec![Term::BoundFunction(f.of(vec![Term::Variable(x.clone())])), Term::Variable(x)],
    );
    let target = Atom::new(
        p,
        vec![Term::Variable(y.clone()), Term::BoundFunction(f.of(vec![Term::Variable(y)]))],
    );

    let mut compare = |a, b| (symbol_compare(a, b), false);
    let (result, _) = unify(&source, &target, &mut compare, 0.5);
    assert!(result.is_none());
}

mod common;

use resolvent::{Prover, ProverConfig};

#[test]
fn accumulator_keeps_only_the_highest_similarity_proofs() {
    let prover = Prover::new(common::fuzzy_ancestry_knowledge(), ProverConfig::default()).unwrap();
    let goal = common::fuzzy_ancestry_goal("X");

    let (proofs, stats) = prover.prove_all_with_stats(goal, None, Some(2), None).unwrap();

    assert!(proofs.len() <= 2);
    assert_eq!(proofs[0].similarity, 1.0);
    if proofs.len() == 2 {
        assert!(proofs[1].similarity <= proofs[0].similarity);
    }
    assert!(stats.discarded_proofs >= 1);
}

mod common;
use common::*;
use hrm::mach::{State, Val};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAXIMIZATION: &str = "
a:  INBOX
    COPYTO 0
    INBOX
    SUB 0
    JUMPN first
    ADD 0
    JUMP out
first:
    COPYFROM 0
out:
    OUTBOX
    JUMP a
";

fn random_inbox(rng: &mut StdRng) -> Vec<Val> {
    let pairs = rng.gen_range(0..20);
    (0..pairs * 2)
        .map(|_| Val::Int(rng.gen_range(-999..=999)))
        .collect()
}

#[test]
fn test_repeated_runs_agree() {
    let mut rng = StdRng::seed_from_u64(2015);
    for _ in 0..50 {
        let inbox = random_inbox(&mut rng);
        let (first, state, metrics) = interpret(MAXIMIZATION, inbox.clone(), vec![Val::Empty]);
        for _ in 0..3 {
            let (again, state_again, metrics_again) =
                interpret(MAXIMIZATION, inbox.clone(), vec![Val::Empty]);
            assert_eq!(again.outbox(), first.outbox());
            assert_eq!(state_again, state);
            assert_eq!(metrics_again, metrics);
        }
        assert_eq!(state, State::Ok);
        let expected: Vec<Val> = inbox
            .chunks(2)
            .map(|pair| match (&pair[0], &pair[1]) {
                (Val::Int(a), Val::Int(b)) => Val::Int(*a.max(b)),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(first.outbox(), expected.as_slice());
    }
}

#[test]
fn test_runtime_errors_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut inbox = random_inbox(&mut rng);
        let at = rng.gen_range(0..=inbox.len());
        inbox.insert(at, Val::Char('E'));
        let runs: Vec<_> = (0..2)
            .map(|_| interpret(MAXIMIZATION, inbox.clone(), vec![Val::Empty]))
            .collect();
        assert_eq!(runs[0].0.outbox(), runs[1].0.outbox());
        assert_eq!(runs[0].1, runs[1].1);
        assert_eq!(runs[0].2, runs[1].2);
        assert_eq!(runs[0].0.errors(), runs[1].0.errors());
    }
}

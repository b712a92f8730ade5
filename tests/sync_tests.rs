//! Replication tests: one authority, several replicas.

use ludo_engine::core::{Action, Color, RuleConfig, SyncError};
use ludo_engine::games::ludo::MatchBuilder;
use ludo_engine::rules::TurnPhase;
use ludo_engine::sync::{ApplyOutcome, Authority, Replica, StateUpdate};

fn authority(seed: u64) -> Authority {
    Authority::new(MatchBuilder::new().player_count(3).build(seed).unwrap())
}

/// Drive the authority through one step on behalf of whoever is on turn.
fn step(auth: &mut Authority) -> StateUpdate {
    if let Some(update) = auth.resolve_forced().unwrap() {
        return update;
    }
    let game = auth.game();
    let color = game.current_color().unwrap();
    let action = match game.phase() {
        TurnPhase::AwaitingRoll => Action::Roll { face: 0 },
        TurnPhase::RolledMultiMove { roll, movable } => Action::move_token(movable[0], *roll),
        TurnPhase::TurnResolved { extra_turn, .. } => Action::Advance { extra_turn: *extra_turn },
        phase => panic!("unexpected phase {phase:?}"),
    };
    auth.submit(color, &action).unwrap()
}

#[test]
fn test_replicas_converge_over_wire() {
    let mut auth = authority(5);
    let snapshot = auth.snapshot().encode().unwrap();
    let mut replicas: Vec<Replica> = (0..3)
        .map(|_| {
            Replica::from_snapshot(RuleConfig::default(), StateUpdate::decode(&snapshot).unwrap()).unwrap()
        })
        .collect();

    for _ in 0..300 {
        if auth.game().is_over() {
            break;
        }
        let bytes = step(&mut auth).encode().unwrap();
        for replica in &mut replicas {
            assert_eq!(replica.apply_bytes(&bytes).unwrap(), ApplyOutcome::Confirmed);
        }
    }

    for replica in &replicas {
        assert_eq!(replica.version(), auth.version());
        assert_eq!(replica.view(), auth.game().state());
    }
}

#[test]
fn test_correct_prediction_confirmed() {
    let mut auth = authority(8);
    let mut replica = Replica::from_snapshot(RuleConfig::default(), auth.snapshot()).unwrap();

    // Play until a color has a real choice, then predict it
    loop {
        let update = step(&mut auth);
        replica.apply(update).unwrap();
        if matches!(auth.game().phase(), TurnPhase::RolledMultiMove { .. }) {
            break;
        }
    }

    let color = auth.game().current_color().unwrap();
    let (roll, token) = match auth.game().phase() {
        TurnPhase::RolledMultiMove { roll, movable } => (*roll, movable[0]),
        _ => unreachable!(),
    };
    let action = Action::move_token(token, roll);

    replica.predict(color, &action).unwrap();
    let update = auth.submit(color, &action).unwrap();
    assert_eq!(replica.view(), &update.state);
    assert_eq!(replica.apply(update).unwrap(), ApplyOutcome::Confirmed);
}

#[test]
fn test_divergent_prediction_is_discarded() {
    let mut auth = authority(8);
    let mut replica = Replica::from_snapshot(RuleConfig::default(), auth.snapshot()).unwrap();

    loop {
        let update = step(&mut auth);
        replica.apply(update).unwrap();
        if matches!(auth.game().phase(), TurnPhase::RolledMultiMove { .. }) {
            break;
        }
    }

    let color = auth.game().current_color().unwrap();
    let (roll, first, last) = match auth.game().phase() {
        TurnPhase::RolledMultiMove { roll, movable } => (*roll, movable[0], movable[movable.len() - 1]),
        _ => unreachable!(),
    };

    // The peer predicts one token, the authority accepts another
    replica.predict(color, &Action::move_token(last, roll)).unwrap();
    let update = auth.submit(color, &Action::move_token(first, roll)).unwrap();

    assert_eq!(replica.apply(update).unwrap(), ApplyOutcome::Resynced);
    assert_eq!(replica.view(), auth.game().state());
}

#[test]
fn test_out_of_order_update_rejected() {
    let mut auth = authority(2);
    let mut replica = Replica::from_snapshot(RuleConfig::default(), auth.snapshot()).unwrap();

    let first = step(&mut auth);
    let second = step(&mut auth);
    replica.apply(second).unwrap();

    assert!(matches!(
        replica.apply(first),
        Err(SyncError::StaleUpdate { received: 1, current: 2 })
    ));
}

#[test]
fn test_skipped_update_heals() {
    let mut auth = authority(4);
    let mut replica = Replica::from_snapshot(RuleConfig::default(), auth.snapshot()).unwrap();

    let _lost = step(&mut auth);
    let update = step(&mut auth);

    assert_eq!(replica.apply(update).unwrap(), ApplyOutcome::Confirmed);
    assert_eq!(replica.confirmed(), auth.game().state());
}

#[test]
fn test_late_joiner_uses_snapshot() {
    let mut auth = authority(6);
    for _ in 0..20 {
        step(&mut auth);
    }

    let replica = Replica::from_snapshot(RuleConfig::default(), auth.snapshot()).unwrap();
    assert_eq!(replica.version(), auth.version());
    assert_eq!(replica.confirmed().history.len(), auth.game().state().history.len());
    assert!(replica.confirmed().is_seated(Color::Red));
}

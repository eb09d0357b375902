//! Property tests for role setup and the pure rules.

use proptest::prelude::*;

use werewolf_engine::core::PlayerId;
use werewolf_engine::roles::{Role, RoleRegistry, Team};
use werewolf_engine::rules::{NightResolution, VoteTally, WinConditionEvaluator};

fn count(roles: &[Role], role: Role) -> usize {
    roles.iter().filter(|r| **r == role).count()
}

fn role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

proptest! {
    /// Property: every setup has exactly one role per player
    /// and generated setups have max(1, n/3) werewolves.
    #[test]
    fn prop_setup_sizes(n in 1usize..=255) {
        let roles = RoleRegistry::standard_setup(n).unwrap();
        prop_assert_eq!(roles.len(), n);

        if ![6, 8, 9].contains(&n) {
            prop_assert_eq!(count(&roles, Role::Werewolf), (n / 3).max(1));
            prop_assert_eq!(count(&roles, Role::Guardian), 0);
        }
    }

    /// Property: no setup deals more than one of a singleton role.
    #[test]
    fn prop_setup_singletons(n in 1usize..=255) {
        let roles = RoleRegistry::standard_setup(n).unwrap();
        for singleton in Role::ALL.into_iter().filter(|r| r.is_singleton()) {
            prop_assert!(count(&roles, singleton) <= 1);
        }
    }

    /// Property: the winner has the top count, and a tie is reported
    /// exactly when another candidate shares it.
    #[test]
    fn prop_tally_winner_has_max(votes in prop::collection::vec(prop::option::of(0u8..5), 0..20)) {
        let outcome = VoteTally::tally(votes.iter().copied().enumerate());

        let mut counts = [0usize; 5];
        for target in votes.iter().flatten() {
            counts[*target as usize] += 1;
        }
        let max = counts.iter().copied().max().unwrap_or(0);

        match outcome.winner {
            None => prop_assert_eq!(max, 0),
            Some(winner) => {
                prop_assert_eq!(counts[winner as usize], max);
                prop_assert_eq!(outcome.count, max);
                let leaders = counts.iter().filter(|c| **c == max).count();
                prop_assert_eq!(outcome.tied, leaders > 1);

                // First-seen among the leaders.
                let first_leader = votes.iter().flatten().find(|t| counts[**t as usize] == max).copied();
                prop_assert_eq!(Some(winner), first_leader);
            }
        }
    }

    /// Property: a player survives the night iff not in (killed - saved) ∪ {poisoned}.
    #[test]
    fn prop_night_deaths(
        killed in prop::option::of(0u8..4),
        saved in prop::option::of(0u8..4),
        poisoned in prop::option::of(0u8..4),
    ) {
        let night = NightResolution::new(
            killed.map(PlayerId::new),
            saved.map(PlayerId::new),
            poisoned.map(PlayerId::new),
        );
        let deaths = night.deaths();

        for seat in 0u8..4 {
            let dies = (killed == Some(seat) && saved != Some(seat)) || poisoned == Some(seat);
            prop_assert_eq!(deaths.contains(&PlayerId::new(seat)), dies);
        }
        prop_assert!(deaths.len() <= 2);
    }

    /// Property: the evaluator agrees with counting by hand.
    #[test]
    fn prop_win_condition(alive in prop::collection::vec(role(), 0..12)) {
        let wolves = count(&alive, Role::Werewolf);
        let others = alive.len() - wolves;

        let expected = if wolves == 0 {
            Some(Team::Good)
        } else if wolves >= others {
            Some(Team::Werewolves)
        } else {
            None
        };
        prop_assert_eq!(WinConditionEvaluator::evaluate(alive), expected);
    }
}

/// Test the documented tally examples.
#[test]
fn test_tally_examples() {
    let outcome = VoteTally::tally([("A", Some("X")), ("B", Some("X")), ("C", Some("Y"))]);
    assert_eq!(outcome.as_pair(), ("X".to_string(), 2));

    let empty = VoteTally::tally(std::iter::empty::<(&str, Option<&str>)>());
    assert_eq!(empty.as_pair(), ("no-one".to_string(), 0));

    let abstained = VoteTally::tally([("A", None::<&str>), ("B", None)]);
    assert_eq!(abstained.as_pair(), ("no-one".to_string(), 0));
}

/// Test the documented win-condition examples.
#[test]
fn test_win_examples() {
    use Role::*;
    assert_eq!(WinConditionEvaluator::evaluate([Seer, Villager]), Some(Team::Good));
    assert_eq!(
        WinConditionEvaluator::evaluate([Werewolf, Werewolf, Seer, Villager]),
        Some(Team::Werewolves)
    );
    assert_eq!(WinConditionEvaluator::evaluate([Werewolf, Seer, Witch, Villager]), None);
}

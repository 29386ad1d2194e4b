//! Property tests for board generation and guess adjudication (pure domain, no DB).

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::board::{MapCell, CELL_COUNT};
use crate::domain::board_gen::{generate_map, generate_words_board};
use crate::domain::fixtures::{catalog, clued, guesser, teams_with_cards};
use crate::domain::test_prelude;
use crate::domain::turn::{guess, spymaster_for};
use crate::errors::domain::{ConflictKind, DomainError};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Every map holds one bomb, each team's cards, and neutral filler.
    #[test]
    fn prop_map_composition(
        seed in any::<u64>(),
        first in 0u8..=12,
        second in 0u8..=12,
    ) {
        let (team1, team2) = teams_with_cards(first, second);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map = generate_map(&team1, &team2, &mut rng).unwrap();

        let count = |cell: MapCell| map.iter().filter(|c| **c == cell).count();
        prop_assert_eq!(count(MapCell::Bomb), 1);
        prop_assert_eq!(count(MapCell::Owner(team1.id)), first as usize);
        prop_assert_eq!(count(MapCell::Owner(team2.id)), second as usize);
        prop_assert_eq!(
            count(MapCell::Neutral),
            CELL_COUNT - 1 - first as usize - second as usize
        );
    }

    /// Word boards never repeat a word.
    #[test]
    fn prop_words_distinct(seed in any::<u64>(), size in 25usize..80) {
        let words = catalog(size);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = generate_words_board(&words, &mut rng).unwrap();
        let distinct: HashSet<_> = board.iter().collect();
        prop_assert_eq!(distinct.len(), CELL_COUNT);
    }

    /// Turns n and n+2 share a spymaster; n and n+1 never do.
    #[test]
    fn prop_spymaster_alternation(seed in any::<u64>(), per_team in 1usize..5, n in 0usize..40) {
        let game = clued(per_team, seed, 0);
        let round = &game.rounds[0];
        prop_assert_eq!(
            spymaster_for(round, &game.teams, n),
            spymaster_for(round, &game.teams, n + 2)
        );
        prop_assert_ne!(
            spymaster_for(round, &game.teams, n),
            spymaster_for(round, &game.teams, n + 1)
        );
    }

    /// Accepted guesses never exceed clue_number + 1, and claimed cells keep their owner.
    #[test]
    fn prop_guess_quota_and_progress(
        seed in any::<u64>(),
        number in 0u8..6,
        attempts in proptest::collection::vec((0i64..5, 0i64..5), 1..30),
    ) {
        let mut game = clued(2, seed, number);
        let user = guesser(&game);
        let quota = number as usize + 1;
        let mut accepted = 0usize;

        for (row, col) in attempts {
            let before = game.rounds[0].progress;
            match guess(&mut game, (0, 0), user, row, col) {
                Ok(outcome) => {
                    accepted += 1;
                    if outcome.ended_round() {
                        break;
                    }
                }
                Err(DomainError::Conflict(ConflictKind::GuessQuotaReached, _)) => {
                    prop_assert_eq!(accepted, quota);
                }
                Err(DomainError::Conflict(ConflictKind::CellAlreadyGuessed, _)) => {}
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
            for (at, owner) in before.cells() {
                if owner.is_some() {
                    prop_assert_eq!(game.rounds[0].progress.get(at), owner);
                }
            }
            prop_assert!(game.rounds[0].turns[0].guess_count() <= quota);
        }
        prop_assert!(accepted <= quota);
    }
}

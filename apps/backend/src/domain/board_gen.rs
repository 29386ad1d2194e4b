//! Randomized per-round boards: hidden ownership map and word placement.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::board::{Board, MapBoard, MapCell, WordsBoard, CELL_COUNT};
use super::model::{Team, Word, WordId};
use crate::errors::domain::DomainError;

/// Build the hidden ownership map for a round.
///
/// The layout holds one bomb, `number_of_cards` cells for each team and
/// neutral cells for the remainder, shuffled uniformly.
pub fn generate_map<R: Rng + ?Sized>(
    team1: &Team,
    team2: &Team,
    rng: &mut R,
) -> Result<MapBoard, DomainError> {
    let mut cells = Vec::with_capacity(CELL_COUNT);
    cells.push(MapCell::Bomb);
    for team in [team1, team2] {
        cells.extend(std::iter::repeat(MapCell::Owner(team.id)).take(team.number_of_cards as usize));
    }
    let neutral = CELL_COUNT.saturating_sub(cells.len());
    cells.extend(std::iter::repeat(MapCell::Neutral).take(neutral));

    if cells.len() != CELL_COUNT {
        return Err(DomainError::corrupted(format!(
            "Card counts {} + {} do not fit a {CELL_COUNT}-cell map",
            team1.number_of_cards, team2.number_of_cards
        )));
    }

    cells.shuffle(rng);
    Board::from_row_major(cells)
}

/// Sample 25 distinct catalog words and lay them out in a shuffled order.
pub fn generate_words_board<R: Rng + ?Sized>(
    catalog: &[Word],
    rng: &mut R,
) -> Result<WordsBoard, DomainError> {
    if catalog.len() < CELL_COUNT {
        return Err(DomainError::insufficient_data(format!(
            "Word catalog holds {} words, at least {CELL_COUNT} are required",
            catalog.len()
        )));
    }

    let mut ids: Vec<WordId> = catalog
        .choose_multiple(rng, CELL_COUNT)
        .map(|w| w.id)
        .collect();
    ids.shuffle(rng);
    Board::from_row_major(ids)
}

/// All-empty board used for progress and pointed tracking.
pub fn generate_basic_board<T: Copy + Default>() -> Board<T> {
    Board::default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::domain::fixtures::{catalog, teams_with_cards};
    use crate::errors::domain::InfraErrorKind;

    fn count(map: &MapBoard, cell: MapCell) -> usize {
        map.iter().filter(|c| **c == cell).count()
    }

    #[test]
    fn map_counts_for_starting_team_two() {
        let (team1, team2) = teams_with_cards(6, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let map = generate_map(&team1, &team2, &mut rng).unwrap();

        assert_eq!(count(&map, MapCell::Bomb), 1);
        assert_eq!(count(&map, MapCell::Owner(team1.id)), 6);
        assert_eq!(count(&map, MapCell::Owner(team2.id)), 7);
        assert_eq!(count(&map, MapCell::Neutral), 11);
    }

    #[test]
    fn oversized_card_counts_are_rejected() {
        let (team1, team2) = teams_with_cards(12, 13);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generate_map(&team1, &team2, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ));
    }

    #[test]
    fn same_seed_same_map() {
        let (team1, team2) = teams_with_cards(7, 6);
        let a = generate_map(&team1, &team2, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = generate_map(&team1, &team2, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn words_board_is_distinct() {
        let words = catalog(40);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let board = generate_words_board(&words, &mut rng).unwrap();
        let ids: HashSet<_> = board.iter().copied().collect();
        assert_eq!(ids.len(), CELL_COUNT);
        let known: HashSet<_> = words.iter().map(|w| w.id).collect();
        assert!(ids.is_subset(&known));
    }

    #[test]
    fn exactly_twenty_five_words_is_enough() {
        let words = catalog(25);
        let board = generate_words_board(&words, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(board.iter().count(), CELL_COUNT);
    }

    #[test]
    fn small_catalog_is_insufficient() {
        let words = catalog(24);
        let err = generate_words_board(&words, &mut ChaCha8Rng::seed_from_u64(9)).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientData(_)));
    }
}

//! Team membership and naming.

use super::model::{Game, GameStatus, TeamId, UserId};
use crate::errors::domain::{DomainError, ForbiddenKind, NotFoundKind, ValidationKind};

pub const MAX_TEAM_NAME_LEN: usize = 127;

/// Put `user` on `team`, removing them from the other team first.
///
/// Joining a team the user already sits on leaves the roster unchanged.
pub fn join_team(game: &mut Game, team: TeamId, user: UserId) -> Result<(), DomainError> {
    if game.status != GameStatus::Created {
        return Err(DomainError::validation(
            ValidationKind::GameAlreadyStarted,
            "Teams are locked once the game has started",
        ));
    }
    let pos = game
        .team_position(team)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Team, format!("Team {team} not found")))?;

    for (i, other) in game.teams.iter_mut().enumerate() {
        if i != pos {
            other.members.retain(|m| *m != user);
        }
    }
    let target = &mut game.teams[pos];
    if !target.has_member(user) {
        target.members.push(user);
    }
    Ok(())
}

pub fn rename_team(
    game: &mut Game,
    team: TeamId,
    user: UserId,
    name: &str,
) -> Result<(), DomainError> {
    let pos = game
        .team_position(team)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Team, format!("Team {team} not found")))?;
    if !game.teams[pos].has_member(user) {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotTeamMember,
            "Only members of a team may rename it",
        ));
    }

    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_TEAM_NAME_LEN {
        return Err(DomainError::validation(
            ValidationKind::InvalidTeamName,
            format!("Team name must be 1..={MAX_TEAM_NAME_LEN} characters"),
        ));
    }
    game.teams[pos].name = name.to_string();
    Ok(())
}

/// Both teams must have the same, non-zero number of players.
///
/// Returns the shared roster size.
pub fn require_even_teams(game: &Game) -> Result<usize, DomainError> {
    let [team1, team2] = &game.teams;
    let (a, b) = (team1.members.len(), team2.members.len());
    if a != b {
        return Err(DomainError::validation(
            ValidationKind::UnevenTeams,
            format!("Teams must be the same size ({a} vs {b})"),
        ));
    }
    if a == 0 {
        return Err(DomainError::validation(
            ValidationKind::EmptyTeams,
            "Both teams need at least one player",
        ));
    }
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{empty_game, lobby};

    #[test]
    fn joining_moves_user_between_teams() {
        let mut game = empty_game();
        let user = UserId::new();
        let (t1, t2) = (game.teams[0].id, game.teams[1].id);

        join_team(&mut game, t1, user).unwrap();
        assert_eq!(game.teams[0].members, vec![user]);

        join_team(&mut game, t2, user).unwrap();
        assert!(game.teams[0].members.is_empty());
        assert_eq!(game.teams[1].members, vec![user]);
    }

    #[test]
    fn joining_twice_is_idempotent() {
        let mut game = empty_game();
        let user = UserId::new();
        let team = game.teams[0].id;
        join_team(&mut game, team, user).unwrap();
        let once = game.clone();
        join_team(&mut game, team, user).unwrap();
        assert_eq!(game, once);
    }

    #[test]
    fn join_after_start_is_rejected() {
        let mut game = lobby(1);
        game.status = GameStatus::InProgress;
        let team = game.teams[0].id;
        let err = join_team(&mut game, team, UserId::new()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::GameAlreadyStarted, _)
        ));
    }

    #[test]
    fn move_after_start_leaves_roster_intact() {
        let mut game = lobby(1);
        game.status = GameStatus::Finished;
        let mover = game.teams[1].members[0];
        let target = game.teams[0].id;
        let before = game.teams.clone();

        let err = join_team(&mut game, target, mover).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::GameAlreadyStarted, _)
        ));
        assert_eq!(game.teams, before);
    }

    #[test]
    fn only_members_rename() {
        let mut game = lobby(2);
        let team = game.teams[0].id;
        let outsider = game.teams[1].members[0];
        let err = rename_team(&mut game, team, outsider, "Spies").unwrap_err();
        assert!(matches!(
            err,
            DomainError::Forbidden(ForbiddenKind::NotTeamMember, _)
        ));

        let member = game.teams[0].members[1];
        rename_team(&mut game, team, member, "  Spies ").unwrap();
        assert_eq!(game.teams[0].name, "Spies");
    }

    #[test]
    fn blank_or_long_names_are_rejected() {
        let mut game = lobby(1);
        let team = game.teams[0].id;
        let member = game.teams[0].members[0];
        for name in ["   ".to_string(), "x".repeat(MAX_TEAM_NAME_LEN + 1)] {
            let err = rename_team(&mut game, team, member, &name).unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation(ValidationKind::InvalidTeamName, _)
            ));
        }
    }

    #[test]
    fn uneven_or_empty_teams() {
        let game = empty_game();
        assert!(matches!(
            require_even_teams(&game),
            Err(DomainError::Validation(ValidationKind::EmptyTeams, _))
        ));

        let mut game = lobby(2);
        let extra = UserId::new();
        game.teams[0].members.push(extra);
        assert!(matches!(
            require_even_teams(&game),
            Err(DomainError::Validation(ValidationKind::UnevenTeams, _))
        ));

        assert_eq!(require_even_teams(&lobby(3)).unwrap(), 3);
    }
}

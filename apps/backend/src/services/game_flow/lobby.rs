use time::OffsetDateTime;
use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::roster::{join_team, rename_team};
use crate::domain::{game_view, start_game, Game, GameId, GameStatus, GameView, TeamId, UserId};
use crate::errors::domain::DomainError;
use crate::realtime::{
    game_topic, GameEvent, LifecycleEvent, LifecycleStatus, SEARCHING_TOPIC,
};

impl GameFlowService {
    /// Open a new lobby hosted by `host` with two empty teams.
    pub async fn create_game(&self, host: UserId) -> Result<Game, DomainError> {
        debug!(host = %host, "Creating game");
        let game = self
            .store
            .insert_game(Game::new(host, OffsetDateTime::now_utc()))
            .await?;
        info!(game_id = %game.id, host = %host, "Game created");

        self.publish(
            SEARCHING_TOPIC,
            &LifecycleEvent {
                game: game.id,
                status: LifecycleStatus::Created,
            },
        )
        .await;
        Ok(game)
    }

    pub async fn get_game(&self, id: GameId) -> Result<Game, DomainError> {
        self.require_game(id).await
    }

    /// Project `game` for `viewer`, resolving word ids to text.
    pub async fn view(&self, game: &Game, viewer: UserId) -> Result<GameView, DomainError> {
        let catalog = self.catalog().await?;
        game_view(game, viewer, &catalog)
    }

    /// Games still waiting in the lobby, oldest first.
    pub async fn get_available(&self) -> Result<Vec<Game>, DomainError> {
        self.store.find_games_by_status(GameStatus::Created).await
    }

    pub async fn join_team(&self, team: TeamId, user: UserId) -> Result<Game, DomainError> {
        debug!(team_id = %team, user_id = %user, "Joining team");
        let game_id = self.game_id_for_team(team).await?;
        let (game, ()) = self
            .mutate(game_id, |game| join_team(game, team, user))
            .await?;
        Ok(game)
    }

    pub async fn rename_team(
        &self,
        team: TeamId,
        user: UserId,
        name: &str,
    ) -> Result<Game, DomainError> {
        debug!(team_id = %team, user_id = %user, "Renaming team");
        let game_id = self.game_id_for_team(team).await?;
        let (game, ()) = self
            .mutate(game_id, |game| rename_team(game, team, user, name))
            .await?;
        Ok(game)
    }

    /// Lock the rosters and deal the first round.
    pub async fn start_game(&self, game_id: GameId) -> Result<Game, DomainError> {
        debug!(game_id = %game_id, "Starting game");
        let catalog = self.catalog().await?;
        let rounds = self.config.rounds_per_game;
        let (game, _) = self
            .mutate_dealing(game_id, &catalog, |game, words, rng| {
                start_game(game, words, rng, rounds)
            })
            .await?;
        info!(
            game_id = %game.id,
            number_of_rounds = game.number_of_rounds,
            "Game started"
        );

        self.publish(
            SEARCHING_TOPIC,
            &LifecycleEvent {
                game: game.id,
                status: LifecycleStatus::Started,
            },
        )
        .await;
        self.announce_current_turn(&game).await;
        Ok(game)
    }

    /// Tell the game topic whose clue is awaited now.
    pub(super) async fn announce_current_turn(&self, game: &Game) {
        let Some(round) = game.current_round() else {
            return;
        };
        let Some(turn) = round.current_turn() else {
            return;
        };
        self.publish(
            &game_topic(game.id),
            &GameEvent::TurnStarted {
                game: game.id,
                round: round.id,
                turn: turn.id,
                spymaster: turn.spymaster,
            },
        )
        .await;
    }
}

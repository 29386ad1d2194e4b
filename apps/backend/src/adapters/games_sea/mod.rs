//! SeaORM adapter: persists the game aggregate across `games`, `teams`,
//! `team_members`, `rounds` and `turns`.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Game, GameId, GameStatus, TeamId, TurnId, User, UserId, Word};
use crate::entities::{games, rounds, team_members, teams, turns, users, words};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::optimistic_lock_err;
use crate::repos::{Account, GameStore};

mod dto;

use dto::{member_rows, round_row, team_row, turn_row, ChildRows};

#[derive(Clone)]
pub struct SeaStore {
    db: DatabaseConnection,
}

impl SeaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Load full aggregates for the given game rows.
async fn load_games<C: ConnectionTrait>(
    conn: &C,
    game_rows: Vec<games::Model>,
) -> Result<Vec<Game>, DomainError> {
    if game_rows.is_empty() {
        return Ok(Vec::new());
    }
    let game_ids: Vec<Uuid> = game_rows.iter().map(|g| g.id).collect();

    let team_rows = teams::Entity::find()
        .filter(teams::Column::GameId.is_in(game_ids.clone()))
        .all(conn)
        .await?;
    let team_ids: Vec<Uuid> = team_rows.iter().map(|t| t.id).collect();
    let members = team_members::Entity::find()
        .filter(team_members::Column::TeamId.is_in(team_ids))
        .all(conn)
        .await?;
    let round_rows = rounds::Entity::find()
        .filter(rounds::Column::GameId.is_in(game_ids))
        .all(conn)
        .await?;
    let round_ids: Vec<Uuid> = round_rows.iter().map(|r| r.id).collect();
    let turn_rows = if round_ids.is_empty() {
        Vec::new()
    } else {
        turns::Entity::find()
            .filter(turns::Column::RoundId.is_in(round_ids))
            .all(conn)
            .await?
    };

    let children = ChildRows::new(team_rows, members, round_rows, turn_rows);
    game_rows.into_iter().map(|g| children.game(g)).collect()
}

async fn write_children(txn: &DatabaseTransaction, game: &Game) -> Result<(), DomainError> {
    for (position, team) in game.teams.iter().enumerate() {
        team_row(team, position)
            .into_active_model()
            .reset_all()
            .update(txn)
            .await?;
    }

    let team_ids: Vec<Uuid> = game.teams.iter().map(|t| t.id.0).collect();
    team_members::Entity::delete_many()
        .filter(team_members::Column::TeamId.is_in(team_ids))
        .exec(txn)
        .await?;
    let members: Vec<team_members::ActiveModel> = game
        .teams
        .iter()
        .flat_map(member_rows)
        .map(|m| m.into_active_model())
        .collect();
    if !members.is_empty() {
        team_members::Entity::insert_many(members)
            .exec_without_returning(txn)
            .await?;
    }

    for round in &game.rounds {
        rounds::Entity::insert(round_row(round)?.into_active_model())
            .on_conflict(
                OnConflict::column(rounds::Column::Id)
                    .update_columns([
                        rounds::Column::Progress,
                        rounds::Column::WinnerTeamId,
                        rounds::Column::Status,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;

        for turn in &round.turns {
            turns::Entity::insert(turn_row(turn)?.into_active_model())
                .on_conflict(
                    OnConflict::column(turns::Column::Id)
                        .update_columns([
                            turns::Column::ClueWord,
                            turns::Column::ClueNumber,
                            turns::Column::Pointed,
                            turns::Column::Status,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(txn)
                .await?;
        }
    }
    Ok(())
}

/// Bump the game row's version if it still equals `expected_version`.
async fn update_game_row(
    txn: &DatabaseTransaction,
    game: &Game,
    expected_version: i32,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let status: games::GameStatus = game.status.into();
    let result = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::value(status))
        .col_expr(
            games::Column::WinnerTeamId,
            Expr::value(game.winner.map(|t| t.0)),
        )
        .col_expr(
            games::Column::NumberOfRounds,
            Expr::value(game.number_of_rounds as i32),
        )
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            games::Column::Version,
            Expr::col(games::Column::Version).add(1),
        )
        .filter(games::Column::Id.eq(game.id.0))
        .filter(games::Column::Version.eq(expected_version))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        // Either the game doesn't exist or the version moved on
        let current = games::Entity::find_by_id(game.id.0).one(txn).await?;
        return match current {
            Some(row) => Err(optimistic_lock_err(expected_version, Some(row.version)).into()),
            None => Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("Game {} not found", game.id),
            )),
        };
    }
    Ok(())
}

#[async_trait]
impl GameStore for SeaStore {
    async fn create_user(&self, account: Account) -> Result<User, DomainError> {
        let now = OffsetDateTime::now_utc();
        let row = users::Model {
            id: account.user.id.0,
            username: account.user.username,
            email: account.user.email,
            password_hash: account.password_hash,
            created_at: now,
            updated_at: now,
        };
        let inserted = row.into_active_model().reset_all().insert(&self.db).await?;
        Ok(inserted.into())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = users::Entity::find_by_id(id.0).one(&self.db).await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_account(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let row = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(row.map(|model| Account {
            password_hash: model.password_hash.clone(),
            user: model.into(),
        }))
    }

    async fn insert_game(&self, mut game: Game) -> Result<Game, DomainError> {
        game.version = 0;
        let row = games::Model {
            id: game.id.0,
            host_id: game.host.0,
            status: game.status.into(),
            winner_team_id: game.winner.map(|t| t.0),
            number_of_rounds: game.number_of_rounds as i32,
            version: game.version,
            created_at: game.created_at,
            updated_at: game.updated_at,
        };

        let txn = self.db.begin().await?;
        let written = async {
            row.into_active_model().reset_all().insert(&txn).await?;
            for (position, team) in game.teams.iter().enumerate() {
                team_row(team, position)
                    .into_active_model()
                    .reset_all()
                    .insert(&txn)
                    .await?;
            }
            Ok::<_, DomainError>(())
        }
        .await;

        match written {
            Ok(()) => {
                txn.commit().await?;
                debug!(game_id = %game.id, "Inserted game");
                Ok(game)
            }
            Err(err) => {
                let _ = txn.rollback().await;
                Err(err)
            }
        }
    }

    async fn find_game(&self, id: GameId) -> Result<Option<Game>, DomainError> {
        let Some(row) = games::Entity::find_by_id(id.0).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(load_games(&self.db, vec![row]).await?.pop())
    }

    async fn find_game_id_by_team(&self, team: TeamId) -> Result<Option<GameId>, DomainError> {
        let row = teams::Entity::find_by_id(team.0).one(&self.db).await?;
        Ok(row.map(|t| t.game_id.into()))
    }

    async fn find_game_id_by_turn(&self, turn: TurnId) -> Result<Option<GameId>, DomainError> {
        let Some(turn) = turns::Entity::find_by_id(turn.0).one(&self.db).await? else {
            return Ok(None);
        };
        let round = rounds::Entity::find_by_id(turn.round_id).one(&self.db).await?;
        Ok(round.map(|r| r.game_id.into()))
    }

    async fn find_games_by_status(&self, status: GameStatus) -> Result<Vec<Game>, DomainError> {
        let status: games::GameStatus = status.into();
        let rows = games::Entity::find()
            .filter(games::Column::Status.eq(status))
            .order_by_asc(games::Column::CreatedAt)
            .all(&self.db)
            .await?;
        load_games(&self.db, rows).await
    }

    async fn save_game(&self, mut game: Game, expected_version: i32) -> Result<Game, DomainError> {
        let now = OffsetDateTime::now_utc();
        let txn = self.db.begin().await?;
        let written = async {
            update_game_row(&txn, &game, expected_version, now).await?;
            write_children(&txn, &game).await
        }
        .await;

        match written {
            Ok(()) => {
                txn.commit().await?;
                game.version = expected_version + 1;
                game.updated_at = now;
                debug!(game_id = %game.id, version = game.version, "Saved game");
                Ok(game)
            }
            Err(err) => {
                let _ = txn.rollback().await;
                Err(err)
            }
        }
    }

    async fn word_catalog(&self) -> Result<Vec<Word>, DomainError> {
        let rows = words::Entity::find().all(&self.db).await?;
        Ok(rows.into_iter().map(Word::from).collect())
    }
}

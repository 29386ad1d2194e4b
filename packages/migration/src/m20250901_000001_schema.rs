use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum Words {
    Table,
    Id,
    Text,
    Lang,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    HostId,
    Status,
    WinnerTeamId,
    NumberOfRounds,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    GameId,
    Position,
    Name,
    NumberOfCards,
}

#[derive(Iden)]
enum TeamMembers {
    Table,
    TeamId,
    UserId,
    Position,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    GameId,
    RoundIndex,
    Spymaster1Id,
    Spymaster2Id,
    StartingTeamId,
    Map,
    Words,
    Progress,
    WinnerTeamId,
    Status,
}

#[derive(Iden)]
enum Turns {
    Table,
    Id,
    RoundId,
    TurnIndex,
    SpymasterId,
    ClueWord,
    ClueNumber,
    Pointed,
    Status,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string_len(64).not_null())
                    .col(ColumnDef::new(Users::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // words
        manager
            .create_table(
                Table::create()
                    .table(Words::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Words::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Words::Text).string().not_null())
                    .col(ColumnDef::new(Words::Lang).string_len(8).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_words_lang_text")
                    .table(Words::Table)
                    .col(Words::Lang)
                    .col(Words::Text)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::HostId).uuid().not_null())
                    .col(
                        ColumnDef::new(Games::Status)
                            .string_len(16)
                            .not_null()
                            .default("CREATED"),
                    )
                    .col(ColumnDef::new(Games::WinnerTeamId).uuid().null())
                    .col(
                        ColumnDef::new(Games::NumberOfRounds)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_host_id")
                            .from(Games::Table, Games::HostId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_status_created_at")
                    .table(Games::Table)
                    .col(Games::Status)
                    .col(Games::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // teams
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teams::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Teams::GameId).uuid().not_null())
                    .col(ColumnDef::new(Teams::Position).small_integer().not_null())
                    .col(ColumnDef::new(Teams::Name).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Teams::NumberOfCards)
                            .small_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teams_game_id")
                            .from(Teams::Table, Teams::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_teams_game_position")
                    .table(Teams::Table)
                    .col(Teams::GameId)
                    .col(Teams::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // team_members
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeamMembers::TeamId).uuid().not_null())
                    .col(ColumnDef::new(TeamMembers::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(TeamMembers::Position)
                            .small_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TeamMembers::TeamId)
                            .col(TeamMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_team_id")
                            .from(TeamMembers::Table, TeamMembers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_user_id")
                            .from(TeamMembers::Table, TeamMembers::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rounds::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rounds::GameId).uuid().not_null())
                    .col(ColumnDef::new(Rounds::RoundIndex).integer().not_null())
                    .col(ColumnDef::new(Rounds::Spymaster1Id).uuid().not_null())
                    .col(ColumnDef::new(Rounds::Spymaster2Id).uuid().not_null())
                    .col(ColumnDef::new(Rounds::StartingTeamId).uuid().not_null())
                    .col(ColumnDef::new(Rounds::Map).json().not_null())
                    .col(ColumnDef::new(Rounds::Words).json().not_null())
                    .col(ColumnDef::new(Rounds::Progress).json().not_null())
                    .col(ColumnDef::new(Rounds::WinnerTeamId).uuid().null())
                    .col(ColumnDef::new(Rounds::Status).string_len(16).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_game_id")
                            .from(Rounds::Table, Rounds::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_rounds_game_index")
                    .table(Rounds::Table)
                    .col(Rounds::GameId)
                    .col(Rounds::RoundIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // turns
        manager
            .create_table(
                Table::create()
                    .table(Turns::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Turns::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Turns::RoundId).uuid().not_null())
                    .col(ColumnDef::new(Turns::TurnIndex).integer().not_null())
                    .col(ColumnDef::new(Turns::SpymasterId).uuid().not_null())
                    .col(ColumnDef::new(Turns::ClueWord).string().null())
                    .col(ColumnDef::new(Turns::ClueNumber).small_integer().null())
                    .col(ColumnDef::new(Turns::Pointed).json().not_null())
                    .col(ColumnDef::new(Turns::Status).string_len(16).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_round_id")
                            .from(Turns::Table, Turns::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_turns_round_index")
                    .table(Turns::Table)
                    .col(Turns::RoundId)
                    .col(Turns::TurnIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // children before parents
        manager
            .drop_table(Table::drop().table(Turns::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rounds::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Words::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::prelude::Uuid;

use crate::m20250901_000001_schema::Words;
use crate::words::{DEFAULT_LANG, DEFAULT_WORDS};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Seeded word ids are stable so every store deals from the same catalog.
const WORD_ID_BASE: u128 = 0x5eed_0000_0000_4000_8000_0000_0000_0000;

pub fn seeded_word_id(index: usize) -> Uuid {
    Uuid::from_u128(WORD_ID_BASE + index as u128)
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Words::Table)
            .columns([Words::Id, Words::Text, Words::Lang]);
        for (index, text) in DEFAULT_WORDS.iter().enumerate() {
            insert
                .values([
                    seeded_word_id(index).into(),
                    (*text).into(),
                    DEFAULT_LANG.into(),
                ])
                .map_err(|e| DbErr::Custom(format!("word seed: {e}")))?;
        }
        manager.exec_stmt(insert.to_owned()).await?;
        tracing::info!(count = DEFAULT_WORDS.len(), lang = DEFAULT_LANG, "Seeded word catalog");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Words::Table)
                    .and_where(Expr::col(Words::Lang).eq(DEFAULT_LANG))
                    .to_owned(),
            )
            .await
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// The stored columns the leaderboard can be sorted by.
///
/// The K/D ratio isn't stored, so it has no index.
const RANKED_COLUMNS: [(&str, Players); 4] = [
    ("idx_players_experience", Players::Experience),
    ("idx_players_kills", Players::Kills),
    ("idx_players_final_kills", Players::FinalKills),
    ("idx_players_beds_broken", Players::BedsBroken),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column) in RANKED_COLUMNS {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Players::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in RANKED_COLUMNS {
            manager
                .drop_index(Index::drop().name(name).table(Players::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Players {
    Table,
    Experience,
    Kills,
    FinalKills,
    BedsBroken,
}

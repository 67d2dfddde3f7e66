mod m20261018_120000_create_players;
mod m20261018_121500_add_ranking_indexes;

use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_120000_create_players::Migration),
            Box::new(m20261018_121500_add_ranking_indexes::Migration),
        ]
    }
}

use sea_orm::entity::prelude::*;

/// A player registered on the leaderboard, with its Bedwars statistics.
///
/// Rows are only ever inserted or deleted, never updated.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// The player ID.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The display name of the player.
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub nickname: String,
    pub kills: i32,
    pub final_kills: i32,
    pub deaths: i32,
    pub beds_broken: i32,
    pub games_played: i32,
    pub wins: i32,
    pub experience: i32,
    /// A free-text label, `unranked` by default.
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub role: String,
    /// The server the player comes from, empty if unknown.
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub server_ip: String,
    /// When the player was added to the leaderboard.
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

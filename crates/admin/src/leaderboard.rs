use leaderboard_lib::{
    Database,
    leaderboard::{self, DEFAULT_LIMIT, RankingKey},
    player::DerivedStats as _,
};

#[derive(clap::Args)]
pub struct LbCommand {
    /// The statistic used to sort the players.
    #[arg(long, default_value = "experience")]
    sort: String,

    /// The maximum amount of players to print.
    #[arg(long, short = 'n')]
    limit: Option<u64>,
}

pub async fn leaderboard(db: Database, cmd: LbCommand) -> anyhow::Result<()> {
    let key: RankingKey = cmd.sort.parse()?;
    let players =
        leaderboard::leaderboard(&db.sql_conn, key, cmd.limit.unwrap_or(DEFAULT_LIMIT)).await?;

    let mut table = prettytable::Table::init(vec![prettytable::row![
        "#", "Player", "Level", "Experience", "Kills", "Final kills", "K/D", "Beds", "Wins",
        "Win rate", "Role"
    ]]);

    for (i, player) in players.iter().enumerate() {
        table.add_row(prettytable::row![
            i + 1,
            player.nickname,
            player.level(),
            player.experience,
            player.kills,
            player.final_kills,
            format!("{:.2}", player.kd_ratio()),
            player.beds_broken,
            format!("{}/{}", player.wins, player.games_played),
            format!("{:.1}%", player.win_rate()),
            player.role
        ]);
    }

    println!("Sorted by: {key}");
    println!("{table}");

    Ok(())
}

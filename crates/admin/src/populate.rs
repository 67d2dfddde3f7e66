use std::{io, path::PathBuf};

use anyhow::Context as _;
use entity::players;
use leaderboard_lib::{
    Database,
    access::Trusted,
    mutation,
    player::{self, NewPlayer},
    validation::PlayerForm,
};
use sea_orm::{ConnectionTrait, EntityTrait as _, PaginatorTrait as _, TransactionTrait};

#[derive(clap::Subcommand, Debug)]
pub enum PopulateCommand {
    /// Inserts a couple of sample players, if the leaderboard is empty.
    Sample,
    /// Inserts the players of a CSV file.
    ///
    /// The header of the file must name the columns after the fields of a player. Missing
    /// statistics are set to 0. Either every player is inserted, or none.
    Csv {
        /// The path to the CSV file.
        csv_file: PathBuf,
    },
}

fn sample_players() -> [NewPlayer; 2] {
    [
        NewPlayer {
            nickname: "TestPlayer1".to_owned(),
            kills: 150,
            final_kills: 45,
            deaths: 120,
            beds_broken: 30,
            games_played: 50,
            wins: 35,
            experience: 15_000,
            role: "LEGEND".to_owned(),
            server_ip: "play.example.com".to_owned(),
        },
        NewPlayer {
            nickname: "TestPlayer2".to_owned(),
            kills: 89,
            final_kills: 23,
            deaths: 67,
            beds_broken: 18,
            games_played: 30,
            wins: 20,
            experience: 8_500,
            role: "DIAMOND".to_owned(),
            server_ip: "play.example.com".to_owned(),
        },
    ]
}

/// Inserts the sample players if there is no player yet, and returns the amount of inserted
/// players.
async fn populate_sample<C: ConnectionTrait>(conn: &C) -> anyhow::Result<usize> {
    if players::Entity::find().count(conn).await? > 0 {
        tracing::info!("The leaderboard isn't empty, skipping the sample players");
        return Ok(0);
    }

    let sample = sample_players();
    let count = sample.len();
    for new_player in sample {
        player::create(conn, new_player).await?;
    }

    Ok(count)
}

/// Inserts the players read from the provided CSV content, and returns the amount of inserted
/// players.
async fn populate_from_csv<C, R>(conn: &C, csv: R) -> anyhow::Result<usize>
where
    C: TransactionTrait,
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(csv);

    let headers = reader.headers().context("Couldn't read the CSV header")?.clone();

    let txn = conn.begin().await?;
    let mut count = 0;

    for record in reader.records() {
        let record = record.context("Invalid CSV row")?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let form = record
            .deserialize::<PlayerForm>(Some(&headers))
            .with_context(|| format!("Invalid CSV row at line {line}"))?;
        mutation::add_player(&txn, Trusted, &form)
            .await
            .with_context(|| format!("Couldn't insert the player at line {line}"))?;
        count += 1;
    }

    txn.commit().await?;

    Ok(count)
}

pub async fn populate(db: Database, cmd: PopulateCommand) -> anyhow::Result<()> {
    let count = match cmd {
        PopulateCommand::Sample => populate_sample(&db.sql_conn).await?,
        PopulateCommand::Csv { csv_file } => {
            let file = std::fs::File::open(&csv_file)
                .with_context(|| format!("Couldn't read CSV file `{}`", csv_file.display()))?;
            populate_from_csv(&db.sql_conn, file).await?
        }
    };

    tracing::info!("Inserted {count} player(s)");

    Ok(())
}

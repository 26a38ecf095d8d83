use crate::config::{CliConfig, Command};
use crate::core::store::RaceResultsStore;
use crate::core::{ConfigProvider, RaceResult};
use crate::adapters::storage::LocalStorage;
use crate::utils::error::{RaceError, Result};
use std::io::Write;
use std::path::Path;

/// Runs one subcommand against the configured data file, printing to `out`.
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    let data_file = config.data_file();
    let storage = LocalStorage::new(config.base_path());
    let mut store = RaceResultsStore::new(storage);

    // add 可以建立新的資料檔，其他指令需要既有資料
    let data_exists = Path::new(config.base_path()).join(data_file).exists();
    if data_exists || !matches!(config.command, Command::Add { .. }) {
        store.try_load_from_file(data_file)?;
    } else {
        tracing::info!("📄 {} does not exist yet, starting empty", data_file);
    }

    match &config.command {
        Command::Show { participant, sport } => {
            let time = store
                .get_time_for_participant(participant, sport)
                .ok_or_else(|| RaceError::NotFoundError {
                    what: format!("{} in {}", participant, sport),
                })?;
            writeln!(out, "{}", time)?;
        }
        Command::Total { participant } => {
            writeln!(out, "{}", store.get_total_time_for_participant(participant))?;
        }
        Command::Add {
            participant,
            sport,
            time,
        } => {
            store.add_race_result(RaceResult::new(participant.as_str(), sport.as_str(), *time));
            store.save_to_file(data_file)?;
            writeln!(out, "✅ Recorded {} {} {}", participant, sport, time)?;
            writeln!(
                out,
                "   Total for {}: {}",
                participant,
                store.get_total_time_for_participant(participant)
            )?;
        }
        Command::List => {
            for result in store.results() {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    result.participant_id, result.sport_type, result.duration
                )?;
            }
        }
        Command::Leaderboard { sport } => {
            let board = store.leaderboard(sport);
            if board.is_empty() {
                return Err(RaceError::NotFoundError {
                    what: format!("sport {}", sport),
                });
            }
            for (rank, result) in board.iter().enumerate() {
                writeln!(out, "{:>3}. {}\t{}", rank + 1, result.participant_id, result.duration)?;
            }
        }
        Command::Standings => {
            for (rank, standing) in store.standings().iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}. {}\t{}\t({} results)",
                    rank + 1,
                    standing.participant_id,
                    standing.total,
                    standing.results
                )?;
            }
        }
        Command::Gap {
            participant,
            reference,
            sport,
        } => {
            let gap = store
                .time_gap(participant, reference, sport)
                .ok_or_else(|| RaceError::NotFoundError {
                    what: format!("{} or {} in {}", participant, reference, sport),
                })??;
            writeln!(out, "+{}", gap)?;
        }
        Command::Export { standings, .. } => {
            let path = config.resolve_export_path()?;
            if *standings {
                store.export_standings_csv(&path)?;
            } else {
                store.export_csv(&path)?;
            }
            writeln!(out, "📁 Exported to {}", path)?;
        }
    }

    Ok(())
}

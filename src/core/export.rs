use crate::core::{RaceResult, Standing};
use crate::utils::error::{RaceError, Result};
use std::io;

pub fn to_csv(results: &[RaceResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["participant_id", "sport_type", "duration_seconds", "duration"])?;

    for result in results {
        writer.write_record([
            result.participant_id.as_str(),
            result.sport_type.as_str(),
            result.duration.total_seconds().to_string().as_str(),
            result.duration.to_string().as_str(),
        ])?;
    }

    finish(writer)
}

pub fn standings_to_csv(standings: &[Standing]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["rank", "participant_id", "results", "total_seconds", "total"])?;

    for (index, standing) in standings.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string().as_str(),
            standing.participant_id.as_str(),
            standing.results.to_string().as_str(),
            standing.total.total_seconds().to_string().as_str(),
            standing.total.to_string().as_str(),
        ])?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = writer
        .into_inner()
        .map_err(|e| RaceError::IoError(e.into_error()))?;
    String::from_utf8(data)
        .map_err(|e| RaceError::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))
}

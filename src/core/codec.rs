use crate::core::{RaceRecord, RaceResult};
use crate::utils::error::Result;

/// Parses a JSON array of race records.
pub fn decode_records(data: &[u8]) -> Result<Vec<RaceResult>> {
    let records: Vec<RaceRecord> = serde_json::from_slice(data)?;
    Ok(records.into_iter().map(RaceResult::from).collect())
}

/// Pretty-printed JSON array, in the order given.
pub fn encode_records(results: &[RaceResult]) -> Result<Vec<u8>> {
    let records: Vec<RaceRecord> = results.iter().map(RaceRecord::from).collect();
    let mut data = serde_json::to_vec_pretty(&records)?;
    data.push(b'\n');
    Ok(data)
}

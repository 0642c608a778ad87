//! Hands simulated trajectories to external plotting tools as `.csv` files

use std::path::Path;
use serde::Serialize;
use crate::error::NeuronSimulationError;


/// Writes every row to a `.csv` file at `path` with a header row, returns the 
/// number of rows written
pub fn write_csv<P: AsRef<Path>, T: Serialize, I: IntoIterator<Item = T>>(
    path: P,
    rows: I,
) -> Result<usize, NeuronSimulationError> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;

    log::info!("wrote {} rows to {}", count, path.as_ref().display());

    Ok(count)
}

/// Spike count at a given input level of a rate curve
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateRow {
    pub current: usize,
    pub spikes: usize,
}

/// Pairs every spike count with the input level that produced it
pub fn rate_rows(rates: &[usize]) -> impl Iterator<Item = RateRow> + '_ {
    rates.iter()
        .enumerate()
        .map(|(current, spikes)| RateRow { current, spikes: *spikes })
}

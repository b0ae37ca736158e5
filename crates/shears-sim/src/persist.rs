//! Binary persistence.
//!
//! A simulation is written with `bincode`. Everything except the
//! telemetry bus survives the round trip.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use shears_types::{ShearsError, ShearsResult};

use crate::simulation::Simulation;

impl Simulation {
    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> ShearsResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ShearsError::Serialization(e.to_string()))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> ShearsResult<Self> {
        bincode::deserialize(data).map_err(|e| ShearsError::Serialization(e.to_string()))
    }

    /// Writes the simulation to `path`, replacing any existing file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> ShearsResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)
            .map_err(|e| ShearsError::Serialization(e.to_string()))?;
        writer.flush()?;
        tracing::info!(path = %path.display(), steps = self.steps(), "simulation written");
        Ok(())
    }

    /// Reads a simulation written by [`write_to_file`](Self::write_to_file).
    pub fn read_from_file(path: impl AsRef<Path>) -> ShearsResult<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let sim: Simulation = bincode::deserialize_from(reader)
            .map_err(|e| ShearsError::Serialization(e.to_string()))?;
        tracing::info!(path = %path.display(), steps = sim.steps(), "simulation read");
        Ok(sim)
    }
}

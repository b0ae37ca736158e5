//! Goal metrics.
//!
//! Every metric follows the same convention: higher is better.

use serde::{Deserialize, Serialize};
use shears_mesh::ClothMesh;

/// What `score()` measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMetric {
    /// Negated maximum height of any cloth particle above the floor.
    #[default]
    Flatness,
    /// Negated sum of heights above the floor.
    SummedFlatness,
    /// Cut constraints touching an outline particle, minus cut
    /// constraints between two interior particles.
    CutAccuracy,
}

impl ScoreMetric {
    /// Evaluates the metric on `mesh` with the floor at `floor_z`.
    pub fn evaluate(self, mesh: &ClothMesh, floor_z: f32) -> f64 {
        match self {
            ScoreMetric::Flatness => -max_height(mesh, floor_z),
            ScoreMetric::SummedFlatness => -summed_height(mesh, floor_z),
            ScoreMetric::CutAccuracy => cut_accuracy(mesh),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScoreMetric::Flatness => "flatness",
            ScoreMetric::SummedFlatness => "summed_flatness",
            ScoreMetric::CutAccuracy => "cut_accuracy",
        }
    }
}

fn heights(mesh: &ClothMesh, floor_z: f32) -> impl Iterator<Item = f64> + '_ {
    mesh.particles()
        .iter()
        .filter(|p| p.is_member())
        .map(move |p| f64::from(p.position.z - floor_z).max(0.0))
}

fn max_height(mesh: &ClothMesh, floor_z: f32) -> f64 {
    heights(mesh, floor_z).fold(0.0, f64::max)
}

fn summed_height(mesh: &ClothMesh, floor_z: f32) -> f64 {
    heights(mesh, floor_z).sum()
}

fn cut_accuracy(mesh: &ClothMesh) -> f64 {
    let particles = mesh.particles();
    let mut hits = 0i64;
    let mut misses = 0i64;
    for c in mesh.constraints().iter().filter(|c| !c.is_active()) {
        if particles[c.a.index()].is_shape() || particles[c.b.index()].is_shape() {
            hits += 1;
        } else {
            misses += 1;
        }
    }
    (hits - misses) as f64
}

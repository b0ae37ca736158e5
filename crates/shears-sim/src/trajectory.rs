//! Cutting trajectories.
//!
//! A trajectory is an ordered list of planar points. The simulation only
//! carries it for external consumers (a scripted cutter or a policy).

/// `points` samples evenly spaced around a circle, starting on the +X axis.
pub fn circle(center: [f32; 2], radius: f32, points: usize) -> Vec<[f32; 2]> {
    let step = std::f32::consts::TAU / points.max(1) as f32;
    (0..points)
        .map(|i| {
            let theta = step * i as f32;
            [
                center[0] + radius * theta.cos(),
                center[1] + radius * theta.sin(),
            ]
        })
        .collect()
}

/// The default trajectory: 100 points on a circle of radius 150 around
/// (300, 300).
pub fn default_trajectory() -> Vec<[f32; 2]> {
    circle([300.0, 300.0], 150.0, 100)
}

/// Concatenates the parts of a multi-part trajectory in order.
pub fn flatten<I, P>(parts: I) -> Vec<[f32; 2]>
where
    I: IntoIterator<Item = P>,
    P: IntoIterator<Item = [f32; 2]>,
{
    parts.into_iter().flatten().collect()
}

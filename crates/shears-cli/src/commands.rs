//! CLI command implementations.

use shears_interact::MouseButton;
use shears_sim::{Simulation, SimulationConfig};
use shears_solver::{SolverConfig, StepReport};
use shears_telemetry::{EventBus, TracingSink};
use shears_types::ShearsResult;

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn load_config(path: &str) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Builds a simulation whose events go to the `tracing` subscriber.
fn traced_simulation(config: &SimulationConfig) -> ShearsResult<Simulation> {
    let bus = EventBus::new().with_sink(Box::new(TracingSink::new()));
    Ok(Simulation::new(config)?.with_event_bus(bus))
}

/// Delivers what is left on the bus and logs its counters.
fn finish_telemetry(sim: &mut Simulation) {
    if let Some(mut bus) = sim.take_event_bus() {
        let stats = bus.finish();
        tracing::info!(
            delivered = stats.delivered,
            dropped = stats.dropped,
            "telemetry finished"
        );
    }
}

fn print_summary(sim: &Simulation, last: &StepReport) {
    let mesh = sim.cloth().mesh();
    println!("Particles:    {}", mesh.particle_count());
    println!(
        "Constraints:  {} ({} cut)",
        mesh.constraint_count(),
        mesh.cut_count()
    );
    println!("Steps:        {}", sim.steps());
    println!("Correction:   {:.6e}", last.correction);
    println!("Score:        {:.4} ({})", sim.score(), sim.cloth().metric().name());
    println!("Out of bounds: {}", sim.out_of_bounds());
}

/// Run a simulation from a config file.
pub fn run(config_path: &str, steps: u32, output: Option<&str>) -> CliResult {
    println!("Shears Simulation");
    println!("─────────────────");
    println!("Config: {config_path}");
    println!();

    let config = load_config(config_path)?;
    let mut sim = traced_simulation(&config)?;
    sim.reset()?;
    tracing::info!(settle = config.settle_iterations, "cloth settled");

    let mut last = StepReport::default();
    for _ in 0..steps {
        last = sim.step()?;
    }
    finish_telemetry(&mut sim);
    print_summary(&sim, &last);

    if let Some(path) = output {
        sim.write_to_file(path)?;
        println!();
        println!("Simulation written to: {path}");
    }
    Ok(())
}

/// The circle cloth demo.
///
/// Each step runs six cloth updates. Grasps the far corner and, every ten
/// steps, lifts it for the first 50 steps, pulls it diagonally back until
/// step 200, then lets go.
pub fn demo(steps: u32, cut: bool) -> CliResult {
    println!("Shears Demo");
    println!("═══════════");
    println!();

    let mut config = SimulationConfig::circle_cut();
    config.solver = SolverConfig {
        elasticity: 0.1,
        ..Default::default()
    };
    config.mouse.cutting = cut;
    config.update_iterations = 6;

    let mut sim = traced_simulation(&config)?;
    sim.reset()?;

    let corner = config.mesh.origin[0] + (config.mesh.width - 1) as f32 * config.mesh.dx;
    let tensioner = sim.pin_position(corner, corner, None)?;
    println!("Grasped ({corner}, {corner})");

    let trajectory = sim.trajectory().to_vec();
    if cut && !trajectory.is_empty() {
        let [x, y] = trajectory[0];
        sim.move_mouse(x, y);
        sim.press_mouse(MouseButton::Primary);
    }

    let mut last = StepReport::default();
    for i in 0..steps {
        if i % 10 == 0 {
            if i < 50 {
                sim.tension(tensioner, 0.0, 0.0, 0.1)?;
            } else if i < 200 {
                sim.tension(tensioner, -0.5, -0.5, 0.0)?;
            } else if sim.unpin_position(tensioner)? {
                println!("Released at step {i}");
            }
        }
        if cut {
            match trajectory.get(i as usize) {
                Some(&[x, y]) => sim.move_mouse(x, y),
                None => sim.release_mouse(),
            }
        }
        last = sim.step()?;
        if i % 100 == 0 {
            println!("Iteration {i}: correction {:.4e}", last.correction);
        }
    }

    finish_telemetry(&mut sim);
    println!();
    print_summary(&sim, &last);
    Ok(())
}

/// Inspect a persisted simulation.
pub fn inspect(path: &str) -> CliResult {
    println!("Shears Inspector");
    println!("────────────────");
    println!();

    let sim = Simulation::read_from_file(path)?;
    let mesh = sim.cloth().mesh();

    println!("Grid:         {} x {}", mesh.width, mesh.height);
    println!("Particles:    {}", mesh.particle_count());
    println!(
        "Constraints:  {} active, {} cut",
        mesh.active_constraint_count(),
        mesh.cut_count()
    );
    println!("Steps:        {}", sim.steps());
    println!("Settled:      {}", sim.snapshot().is_some());
    println!(
        "Tensioners:   {} pinned",
        sim.cloth().tensioners().iter().filter(|t| t.is_pinned()).count()
    );

    let (min_z, max_z) = mesh
        .particles()
        .iter()
        .filter(|p| p.is_member())
        .map(|p| p.position.z)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), z| {
            (lo.min(z), hi.max(z))
        });
    if min_z <= max_z {
        println!("Z range:      [{:.4}, {:.4}]", min_z, max_z);
    }
    println!("Score:        {:.4} ({})", sim.score(), sim.cloth().metric().name());

    Ok(())
}

/// Validate a simulation config.
pub fn validate(path: &str) -> CliResult {
    println!("Shears Validator");
    println!("────────────────");
    println!();
    println!("Validating config: {path}");

    let config = load_config(path)?;
    println!(
        "✅ Config is valid ({} x {} grid, {} settle iterations).",
        config.mesh.width, config.mesh.height, config.settle_iterations
    );
    Ok(())
}

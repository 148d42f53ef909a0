// Copyright 2017 Matthew Plant. This file is part of Debris.
//
// Debris is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Debris is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with Debris. If not, see <http://www.gnu.org/licenses/>.

use std::env;
use std::io::{self, BufRead, Write};
use std::time;

use anyhow::{bail, Context, Result};
use log::info;

use debris::*;

/// Twenty simulated seconds at the default timestep.
const DEFAULT_STEPS: u64 = 4_000;

fn read_letters() -> Result<String> {
    println!("Please input letters");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read letters from stdin")?;
    match line.split_whitespace().next() {
        Some(word) => Ok(word.to_string()),
        None => bail!("no letters given"),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config_path = args.next();
    let steps = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid step count {:?}", s))?,
        None => DEFAULT_STEPS,
    };

    let letters = read_letters()?;
    let mut config = match config_path {
        Some(ref path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => SimulationConfig::for_letters(&letters),
    };
    if config.letters != letters {
        let depth = 0.08 * letters.chars().count() as f32;
        config.spawn.nozzle_extent.1 = depth;
        config.letters = letters;
    }

    let mut sim = Simulation::new(config)?;
    let start = time::Instant::now();
    let spawned = sim.run(steps)?;
    let elapsed = start.elapsed();
    info!("ran {} steps in {} ms", steps, elapsed.as_millis());

    println!(
        "{:.2}s simulated for {:?}: {} particles spawned, {} live (cap {})",
        sim.time(),
        sim.config().letters,
        spawned,
        sim.generator.len(),
        sim.generator.population_cap()
    );
    println!("\nDemo finished");
    Ok(())
}

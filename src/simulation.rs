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

use log::info;
use rand::rngs::StdRng;

use crate::config::{Controls, SimulationConfig};
use crate::debris::{DebrisGenerator, TickReport};
use crate::error::Result;
use crate::physics::Material;
use crate::random::RngSource;
use crate::registry::World;
use crate::scene::{assemble_container, Container};

/// Number of steps between population reports.
const REPORT_INTERVAL: u64 = 200;

/// A world, its container and a debris generator driven at a fixed timestep.
pub struct Simulation {
    pub world: World,
    pub generator: DebrisGenerator,
    pub controls: Controls,
    container: Container,
    config: SimulationConfig,
    rng: RngSource<StdRng>,
    steps: u64,
    paused: bool,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut world = match config.max_bodies {
            Some(max) => World::with_capacity(config.gravity, max),
            None => World::new(config.gravity),
        };
        let container = assemble_container(&mut world, config.letters.chars().count(), Material::CONCRETE)?;
        let rng = match config.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        info!(
            "simulation for {:?}: nozzle {:?}, cap {}, dt {}s",
            config.letters, config.spawn.nozzle_extent, config.population_cap, config.timestep
        );
        Ok(Simulation {
            world,
            generator: DebrisGenerator::new(config.population_cap),
            controls: Controls::from_config(&config.spawn),
            container,
            config,
            rng,
            steps: 0,
            paused: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Simulated seconds elapsed.
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.config.timestep as f64
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn pause(&mut self) {
        self.set_paused(true);
    }

    pub fn resume(&mut self) {
        self.set_paused(false);
    }

    /// Change the population cap; excess particles go on the next step.
    pub fn set_population_cap(&mut self, cap: usize) {
        self.config.population_cap = cap;
        self.generator.set_population_cap(cap);
    }

    /// Advance the world by one timestep, then spawn and purge debris.
    ///
    /// While paused the world still steps but no debris is created or removed.
    pub fn step(&mut self) -> Result<TickReport> {
        let dt = self.config.timestep;
        self.world.step(dt);
        self.steps += 1;
        if self.paused {
            return Ok(TickReport::default());
        }
        self.controls.apply(&mut self.config.spawn);
        let report = self.generator.tick(&self.config.spawn, dt, &mut self.world, &mut self.rng)?;
        if self.steps % REPORT_INTERVAL == 0 {
            info!(
                "t = {:.3}s: {} debris live, {} bodies total",
                self.time(),
                self.generator.len(),
                self.world.len()
            );
        }
        Ok(report)
    }

    /// Run a number of steps, returning how many particles were spawned.
    pub fn run(&mut self, steps: u64) -> Result<usize> {
        let mut spawned = 0;
        for _ in 0..steps {
            spawned += self.step()?.spawned.len();
        }
        Ok(spawned)
    }
}

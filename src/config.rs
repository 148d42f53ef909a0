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

use std::fs;
use std::path::Path;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::physics::Material;
use crate::registry::GRAVITY;

/// Per-tick spawn parameters.
///
/// The generator reads this fresh every tick, so it may be changed between
/// ticks by whatever owns it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub particle_radius: f32,
    pub density: f32,
    /// Width (x) and depth (z) of the nozzle.
    pub nozzle_extent: (f32, f32),
    /// Height of the nozzle above the floor.
    pub nozzle_height: f32,
    /// Particles per second. Negative rates are treated as zero.
    pub spawn_rate: f32,
    /// Vertical gap between particles spawned in the same tick.
    pub stack_spacing: f32,
    pub material: Material,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            particle_radius: 0.01,
            density: 3.0,
            nozzle_extent: (0.5, 0.08),
            nozzle_height: 1.05,
            spawn_rate: 100.0,
            stack_spacing: 0.005,
            material: Material::DEBRIS,
        }
    }
}

impl SpawnConfig {
    /// The spawn rate with negative and NaN values clamped to zero.
    pub fn effective_rate(&self) -> f32 {
        if self.spawn_rate > 0.0 {
            self.spawn_rate
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.particle_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "particle_radius must be positive, got {}",
                self.particle_radius
            )));
        }
        if !(self.density > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        let (width, depth) = self.nozzle_extent;
        if !(width > 0.0 && depth > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "nozzle_extent must be positive, got ({}, {})",
                width, depth
            )));
        }
        Ok(())
    }
}

/// Everything needed to set up and drive a Simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// The word whose length sizes the container and nozzle.
    pub letters: String,
    pub spawn: SpawnConfig,
    pub population_cap: usize,
    /// Fixed step length in seconds.
    pub timestep: f32,
    pub gravity: Vector3<f32>,
    /// Seed for the random source. Entropy is used when absent.
    pub seed: Option<u64>,
    /// Upper bound on bodies in the world, static included.
    pub max_bodies: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig::for_letters("A")
    }
}

impl SimulationConfig {
    /// The demo setup sized for a word of the given length.
    pub fn for_letters(letters: &str) -> Self {
        let n = letters.chars().count().max(1) as f32;
        SimulationConfig {
            letters: letters.to_string(),
            spawn: SpawnConfig {
                nozzle_extent: (0.5, 0.08 * n),
                ..SpawnConfig::default()
            },
            population_cap: 300,
            timestep: 0.005,
            gravity: GRAVITY,
            seed: None,
            max_bodies: None,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        SimulationConfig::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.spawn.validate()?;
        if !(self.timestep > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        Ok(())
    }
}

/// Operator controls for the spawn parameters.
///
/// Stands in for the flow and size sliders of an interactive front end. The
/// positions are clamped to the slider ranges. `apply` only writes a value
/// into the SpawnConfig once its slider has been moved, so a configured rate
/// outside the slider range is kept until the operator touches flow.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    flow: f32,
    particle_size: f32,
    flow_moved: bool,
    size_moved: bool,
}

impl Controls {
    pub const MAX_FLOW: f32 = 300.0;
    pub const MAX_PARTICLE_SIZE: f32 = 1.0;

    pub fn new() -> Self {
        Controls {
            flow: Controls::MAX_FLOW / 2.0,
            particle_size: 0.01,
            flow_moved: false,
            size_moved: false,
        }
    }

    /// Controls positioned at the values already in the config. Nothing is
    /// marked as moved.
    pub fn from_config(config: &SpawnConfig) -> Self {
        Controls {
            flow: config.effective_rate().min(Controls::MAX_FLOW),
            particle_size: clamp_size(config.particle_radius),
            flow_moved: false,
            size_moved: false,
        }
    }

    pub fn flow(&self) -> f32 {
        self.flow
    }

    pub fn particle_size(&self) -> f32 {
        self.particle_size
    }

    pub fn set_flow(&mut self, pos: f32) {
        self.flow = if pos > 0.0 { pos.min(Controls::MAX_FLOW) } else { 0.0 };
        self.flow_moved = true;
    }

    pub fn set_particle_size(&mut self, size: f32) {
        self.particle_size = clamp_size(size);
        self.size_moved = true;
    }

    /// Writes the moved sliders into the config and clears their moved state.
    pub fn apply(&mut self, config: &mut SpawnConfig) {
        if self.flow_moved {
            config.spawn_rate = self.flow;
            self.flow_moved = false;
        }
        if self.size_moved {
            config.particle_radius = self.particle_size;
            self.size_moved = false;
        }
    }
}

/// Zero is not a valid radius, so the slider bottoms out just above it.
fn clamp_size(size: f32) -> f32 {
    if size > 0.0 {
        size.min(Controls::MAX_PARTICLE_SIZE)
    } else {
        0.001
    }
}

impl Default for Controls {
    fn default() -> Self {
        Controls::new()
    }
}

#[cfg(test)]
mod tests {
    mod config {
        use crate::config::*;
        use crate::error::Error;

        #[test]
        fn test_for_letters() {
            let config = SimulationConfig::for_letters("ABCDE");
            assert_eq!(config.spawn.nozzle_extent.0, 0.5);
            assert!((config.spawn.nozzle_extent.1 - 0.4).abs() < 1e-6);
            assert_eq!(config.population_cap, 300);
            assert_eq!(config.timestep, 0.005);
            assert_eq!(config.spawn.spawn_rate, 100.0);
            assert_eq!(config.spawn.particle_radius, 0.01);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_effective_rate() {
            let mut spawn = SpawnConfig::default();
            spawn.spawn_rate = -20.0;
            assert_eq!(spawn.effective_rate(), 0.0);
            spawn.spawn_rate = std::f32::NAN;
            assert_eq!(spawn.effective_rate(), 0.0);
            spawn.spawn_rate = 42.0;
            assert_eq!(spawn.effective_rate(), 42.0);
        }

        #[test]
        fn test_json() {
            let config = SimulationConfig::from_json_str(
                r#"{
                    "letters": "HI",
                    "population_cap": 50,
                    "seed": 9,
                    "spawn": { "spawn_rate": 250.0, "particle_radius": 0.02 }
                }"#,
            )
            .unwrap();
            assert_eq!(config.letters, "HI");
            assert_eq!(config.population_cap, 50);
            assert_eq!(config.seed, Some(9));
            assert_eq!(config.spawn.spawn_rate, 250.0);
            assert_eq!(config.spawn.particle_radius, 0.02);
            // Unspecified fields keep their defaults.
            assert_eq!(config.spawn.density, 3.0);
            assert_eq!(config.timestep, 0.005);

            let roundtrip = serde_json::to_string(&config).unwrap();
            assert_eq!(SimulationConfig::from_json_str(&roundtrip).unwrap(), config);
        }

        #[test]
        fn test_invalid() {
            match SimulationConfig::from_json_str(r#"{ "spawn": { "density": 0.0 } }"#) {
                Err(Error::InvalidConfig(msg)) => assert!(msg.contains("density")),
                other => panic!("expected InvalidConfig, got {:?}", other),
            }
            match SimulationConfig::from_json_str("{ not json") {
                Err(Error::Json(_)) => {}
                other => panic!("expected Json error, got {:?}", other),
            }
        }

        #[test]
        fn test_controls() {
            let mut controls = Controls::new();
            assert_eq!(controls.flow(), 150.0);
            controls.set_flow(1000.0);
            assert_eq!(controls.flow(), Controls::MAX_FLOW);
            controls.set_flow(-3.0);
            assert_eq!(controls.flow(), 0.0);
            controls.set_particle_size(5.0);
            assert_eq!(controls.particle_size(), 1.0);
            controls.set_particle_size(0.0);
            assert!(controls.particle_size() > 0.0);

            let mut spawn = SpawnConfig::default();
            controls.set_flow(40.0);
            controls.set_particle_size(0.05);
            controls.apply(&mut spawn);
            assert_eq!(spawn.spawn_rate, 40.0);
            assert_eq!(spawn.particle_radius, 0.05);
            assert_eq!(Controls::from_config(&spawn).flow(), 40.0);
        }

        #[test]
        fn test_untouched_controls_keep_config() {
            let mut spawn = SpawnConfig::default();
            spawn.spawn_rate = 1000.0;
            let mut controls = Controls::from_config(&spawn);
            assert_eq!(controls.flow(), Controls::MAX_FLOW);
            controls.apply(&mut spawn);
            assert_eq!(spawn.spawn_rate, 1000.0);

            spawn.spawn_rate = 37.5;
            let mut controls = Controls::from_config(&spawn);
            assert_eq!(controls.flow(), 37.5);
            controls.apply(&mut spawn);
            assert_eq!(spawn.spawn_rate, 37.5);

            // Moving only the size slider leaves the rate alone.
            controls.set_particle_size(0.03);
            controls.apply(&mut spawn);
            assert_eq!(spawn.spawn_rate, 37.5);
            assert_eq!(spawn.particle_radius, 0.03);

            // A later change to the config is not overwritten by a stale slider.
            spawn.particle_radius = 0.04;
            controls.apply(&mut spawn);
            assert_eq!(spawn.particle_radius, 0.04);
        }
    }
}

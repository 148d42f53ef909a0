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

//! Rate-driven spawning of debris particles with a bounded live population.

use std::collections::VecDeque;

use cgmath::{Point3, Vector3};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::config::SpawnConfig;
use crate::error::Result;
use crate::geom::Sphere;
use crate::physics::{MassProperties, Material};
use crate::pool::Handle;
use crate::random::RandomSource;
use crate::registry::EntityRegistry;

/// Decide how many particles to create over an interval of dt seconds.
///
/// The fractional part of `dt * rate` is resolved with a single Bernoulli
/// draw, so the expected count is exactly `dt * rate`. Negative or NaN
/// inputs count as zero. No draw is made when the product has no fractional
/// part.
pub fn spawn_count<R: RandomSource + ?Sized>(dt: f32, rate: f32, rng: &mut R) -> usize {
    let dt = if dt > 0.0 { dt } else { 0.0 };
    let rate = if rate > 0.0 { rate } else { 0.0 };
    let exact = dt * rate;
    if !exact.is_finite() || exact == 0.0 {
        return 0;
    }
    let whole = exact.floor();
    let frac = exact - whole;
    let mut n = whole as usize;
    if frac > 0.0 && rng.uniform01() < frac {
        n += 1;
    }
    n
}

/// Everything the registry needs to create one particle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub shape: Sphere,
    pub material: Material,
    pub mass: MassProperties,
    pub position: Point3<f32>,
}

/// Lay out n particles inside the nozzle.
///
/// The nozzle is centered on the y axis. Each particle draws its x offset and
/// then its z offset; the i-th particle of the tick is raised by
/// `i * stack_spacing` so particles of one tick never start coincident.
pub fn plan_spawns<R: RandomSource + ?Sized>(
    config: &SpawnConfig,
    n: usize,
    rng: &mut R,
) -> SmallVec<[SpawnRequest; 8]> {
    let (width, depth) = config.nozzle_extent;
    let origin = Point3::new(-0.5 * width, 0.0, -0.5 * depth);
    let shape = Sphere { c: Point3::new(0.0, 0.0, 0.0), r: config.particle_radius };
    let mass = MassProperties::sphere(config.particle_radius, config.density);
    (0..n)
        .map(|i| {
            let ux = rng.uniform01();
            let uz = rng.uniform01();
            let offset = Vector3::new(
                ux * width,
                config.nozzle_height + i as f32 * config.stack_spacing,
                uz * depth,
            );
            SpawnRequest {
                shape,
                material: config.material,
                mass,
                position: origin + offset,
            }
        })
        .collect()
}

/// Handles created and destroyed during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub spawned: SmallVec<[Handle; 8]>,
    pub evicted: SmallVec<[Handle; 8]>,
}

/// Spawns debris each tick and keeps at most `cap` of them alive.
///
/// Live particles are kept oldest first. Once the population exceeds the cap,
/// particles are removed from the registry in the order they were created.
pub struct DebrisGenerator {
    live: VecDeque<Handle>,
    cap: usize,
}

impl DebrisGenerator {
    pub fn new(cap: usize) -> Self {
        DebrisGenerator {
            live: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn population_cap(&self) -> usize {
        self.cap
    }

    /// Change the cap. A lower cap takes effect on the next eviction.
    pub fn set_population_cap(&mut self, cap: usize) {
        self.cap = cap;
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live particles, oldest first.
    pub fn live(&self) -> impl Iterator<Item = Handle> + '_ {
        self.live.iter().cloned()
    }

    /// Spawn for an interval of dt seconds and then evict down to the cap.
    ///
    /// A registry failure is returned as is. Particles inserted before the
    /// failure stay tracked, so the generator never loses a handle it owns.
    pub fn tick<W, R>(
        &mut self,
        config: &SpawnConfig,
        dt: f32,
        registry: &mut W,
        rng: &mut R,
    ) -> Result<TickReport>
    where
        W: EntityRegistry + ?Sized,
        R: RandomSource + ?Sized,
    {
        let n = spawn_count(dt, config.effective_rate(), rng);
        let mut report = TickReport::default();
        for req in plan_spawns(config, n, rng) {
            let handle = registry.insert_dynamic_body(req.shape, req.material, req.mass, req.position)?;
            trace!("spawned debris {} at {:?}", handle, req.position);
            self.live.push_back(handle);
            report.spawned.push(handle);
        }
        report.evicted = self.evict(registry)?;
        if n > 0 || !report.evicted.is_empty() {
            debug!(
                "debris tick: {} spawned, {} evicted, {} live",
                report.spawned.len(),
                report.evicted.len(),
                self.live.len()
            );
        }
        Ok(report)
    }

    /// Remove the oldest particles until the population is within the cap.
    pub fn evict<W>(&mut self, registry: &mut W) -> Result<SmallVec<[Handle; 8]>>
    where
        W: EntityRegistry + ?Sized,
    {
        let mut evicted = SmallVec::new();
        while self.live.len() > self.cap {
            let oldest = match self.live.front() {
                Some(&h) => h,
                None => break,
            };
            registry.remove_body(oldest)?;
            self.live.pop_front();
            evicted.push(oldest);
        }
        Ok(evicted)
    }

    /// Remove every live particle from the registry.
    pub fn clear<W>(&mut self, registry: &mut W) -> Result<usize>
    where
        W: EntityRegistry + ?Sized,
    {
        let mut removed = 0;
        while let Some(&oldest) = self.live.front() {
            registry.remove_body(oldest)?;
            self.live.pop_front();
            removed += 1;
        }
        Ok(removed)
    }
}

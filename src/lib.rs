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

//! Falling debris for rigid-body particle demos.
//!
//! # Overview
//!
//! A `DebrisGenerator` is stepped once per simulation tick. Each tick it:
//!
//! - decides how many particles to create from the elapsed time and a target
//!   rate, carrying the fractional remainder with a single random draw so the
//!   long run average matches the rate exactly,
//! - places them at random inside a nozzle volume and inserts them into an
//!   `EntityRegistry`,
//! - removes the oldest particles once the live population exceeds its cap.
//!
//! The registry is a trait. `World` is the provided implementation: a pool of
//! rigid bodies integrated under gravity. Contact resolution is not performed
//! here and belongs to whichever engine owns the bodies.
//!
//! `Simulation` ties a `World`, a container of static walls and a generator
//! together under a fixed timestep.

pub extern crate cgmath;

mod config;
pub use config::*;

mod debris;
pub use debris::*;

mod error;
pub use error::*;

mod geom;
pub use geom::*;

mod physics;
pub use physics::*;

mod pool;
pub use pool::*;

mod random;
pub use random::*;

mod registry;
pub use registry::*;

mod scene;
pub use scene::*;

mod simulation;
pub use simulation::*;

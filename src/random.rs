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

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of independent uniform samples.
pub trait RandomSource {
    /// Returns a value in [0, 1).
    fn uniform01(&mut self) -> f32;
}

/// Adapts any `rand` generator into a RandomSource.
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }
}

impl RngSource<StdRng> {
    /// A reproducible source.
    pub fn seeded(seed: u64) -> Self {
        RngSource::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RngSource::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform01(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

impl<'a, S: RandomSource + ?Sized> RandomSource for &'a mut S {
    fn uniform01(&mut self) -> f32 {
        (**self).uniform01()
    }
}

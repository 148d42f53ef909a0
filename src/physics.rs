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

use std::f32;

use cgmath::{Point3, Vector3, Zero};
use serde::{Deserialize, Serialize};

use crate::geom::*;

/// Surface properties handed to the registry along with a body's shape.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// We simplify friction in this case to simply be a ratio of the normal
    /// force applied tangentially to an object during collision.
    pub friction: f32,
    /// Restitution is a measure of how much kinetic energy is retained in a
    /// collision. 100% of kinetic energy retention corresponds to a coefficient
    /// of one.
    pub restitution: f32,
}

impl Material {
    /// The material debris particles are created with.
    pub const DEBRIS: Material = Material { friction: 0.2, restitution: 0.8 };

    /// Concrete used for the container walls and floor.
    pub const CONCRETE: Material = Material { friction: 0.6, restitution: 0.0 };
}

impl Default for Material {
    fn default() -> Self {
        Material::DEBRIS
    }
}

/// Mass of a body along with a scalar inertia hint.
///
/// The hint is `r² · m`. Registries that derive inertia from the shape are
/// free to ignore it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    pub mass: f32,
    pub inertia_hint: f32,
}

impl MassProperties {
    /// Mass properties of a solid sphere of the given radius and density.
    pub fn sphere(radius: f32, density: f32) -> Self {
        let mass = Sphere { c: Point3::new(0.0, 0.0, 0.0), r: radius }.volume() * density;
        MassProperties {
            mass,
            inertia_hint: radius * radius * mass,
        }
    }
}

/// The geometry a body is made of.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Sphere(Sphere),
    Box(AABB),
}

impl From<Sphere> for Component {
    fn from(s: Sphere) -> Self {
        Component::Sphere(s)
    }
}

impl From<AABB> for Component {
    fn from(b: AABB) -> Self {
        Component::Box(b)
    }
}

impl Component {
    pub fn center(&self) -> Point3<f32> {
        match self {
            &Component::Sphere(s) => s.center(),
            &Component::Box(b) => b.center(),
        }
    }

    pub fn set_pos(&mut self, p: Point3<f32>) {
        match self {
            &mut Component::Sphere(ref mut s) => s.set_pos(p),
            &mut Component::Box(ref mut b) => b.set_pos(p),
        }
    }
}

/// A physical body held by a registry.
///
/// Static bodies carry an inverse mass of zero and are never integrated.
#[derive(Clone, Debug)]
pub struct RigidBody {
    pub component: Component,
    pub material: Material,
    pub inv_mass: f32,
    pub inertia_hint: f32,
    pub v: Vector3<f32>,
    pub force: Vector3<f32>,
}

impl RigidBody {
    /// Construct a dynamic body subject to a constant world acceleration.
    pub fn new_dynamic(
        component: Component,
        material: Material,
        mass: MassProperties,
        world_accel: Vector3<f32>,
    ) -> Self {
        RigidBody {
            component,
            material,
            inv_mass: 1.0 / mass.mass,
            inertia_hint: mass.inertia_hint,
            v: Vector3::zero(),
            force: world_accel * mass.mass,
        }
    }

    /// Construct an immovable body.
    pub fn new_static(component: Component, material: Material) -> Self {
        RigidBody {
            component,
            material,
            inv_mass: 0.0,
            inertia_hint: 0.0,
            v: Vector3::zero(),
            force: Vector3::zero(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn mass(&self) -> f32 {
        if self.is_static() {
            f32::INFINITY
        } else {
            1.0 / self.inv_mass
        }
    }

    pub fn pos(&self) -> Point3<f32> {
        self.component.center()
    }

    /// Integrate the body over the timestep with semi-implicit Euler.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }
        self.v += self.force * self.inv_mass * dt;
        let p = self.pos() + self.v * dt;
        self.component.set_pos(p);
    }
}

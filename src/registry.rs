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

use cgmath::{Point3, Vector3};
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::geom::*;
use crate::physics::*;
use crate::pool::*;

/// The owner of body lifetimes and placement.
///
/// Bodies are referred to only by the Handle returned on insertion. A handle
/// that has been removed is dead; removing it again is an error.
pub trait EntityRegistry {
    /// Insert a dynamic sphere at `initial_pose`.
    fn insert_dynamic_body(
        &mut self,
        shape: Sphere,
        material: Material,
        mass: MassProperties,
        initial_pose: Point3<f32>,
    ) -> Result<Handle>;

    /// Remove a body previously returned by `insert_dynamic_body`.
    fn remove_body(&mut self, handle: Handle) -> Result<()>;
}

/// Standard earth gravity along -y.
pub const GRAVITY: Vector3<f32> = Vector3 { x: 0.0, y: -9.81, z: 0.0 };

/// A collection of rigid bodies advanced under a uniform acceleration.
///
/// Contact resolution is left to whatever engine drives the World; `step`
/// only integrates dynamic bodies.
pub struct World {
    bodies: Pool<RigidBody>,
    gravity: Vector3<f32>,
    capacity: Option<usize>,
    dynamic: usize,
}

impl World {
    pub fn new(gravity: Vector3<f32>) -> Self {
        World {
            bodies: Pool::new(),
            gravity,
            capacity: None,
            dynamic: 0,
        }
    }

    /// A World that refuses insertions past `capacity` bodies.
    pub fn with_capacity(gravity: Vector3<f32>, capacity: usize) -> Self {
        World {
            bodies: Pool::with_capacity(capacity),
            gravity,
            capacity: Some(capacity),
            dynamic: 0,
        }
    }

    pub fn gravity(&self) -> Vector3<f32> {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector3<f32>) {
        self.gravity = gravity;
        for (_, body) in self.bodies.iter_mut() {
            if !body.is_static() {
                body.force = gravity * body.mass();
            }
        }
    }

    /// Total number of bodies, static included.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of dynamic bodies.
    pub fn dynamic_len(&self) -> usize {
        self.dynamic
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn body(&self, handle: Handle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (Handle, &RigidBody)> + '_ {
        self.bodies.iter()
    }

    /// Insert an immovable body.
    pub fn insert_static_body(&mut self, component: Component, material: Material) -> Result<Handle> {
        self.insert(RigidBody::new_static(component, material))
    }

    /// Advance every dynamic body by dt.
    pub fn step(&mut self, dt: f32) {
        for (_, body) in self.bodies.iter_mut() {
            body.integrate(dt);
        }
        debug!("stepped {} dynamic bodies by {}s", self.dynamic, dt);
    }

    fn insert(&mut self, body: RigidBody) -> Result<Handle> {
        if let Some(capacity) = self.capacity {
            if self.bodies.len() >= capacity {
                return Err(Error::RegistryFull { capacity });
            }
        }
        if !body.is_static() {
            self.dynamic += 1;
        }
        let handle = self.bodies.push(body);
        trace!("inserted body {}", handle);
        Ok(handle)
    }
}

impl Default for World {
    fn default() -> Self {
        World::new(GRAVITY)
    }
}

impl EntityRegistry for World {
    fn insert_dynamic_body(
        &mut self,
        shape: Sphere,
        material: Material,
        mass: MassProperties,
        initial_pose: Point3<f32>,
    ) -> Result<Handle> {
        let mut component = Component::from(shape);
        component.set_pos(initial_pose);
        self.insert(RigidBody::new_dynamic(component, material, mass, self.gravity))
    }

    fn remove_body(&mut self, handle: Handle) -> Result<()> {
        let body = self.bodies.remove(handle).ok_or(Error::UnknownBody(handle))?;
        if !body.is_static() {
            self.dynamic -= 1;
        }
        trace!("removed body {}", handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    mod registry {
        use cgmath::{Point3, Vector3};

        use crate::error::Error;
        use crate::geom::*;
        use crate::physics::*;
        use crate::registry::*;

        fn ball() -> Sphere {
            Sphere { c: Point3::new(0.0, 0.0, 0.0), r: 0.01 }
        }

        #[test]
        fn test_insert_and_remove() {
            let mut world = World::default();
            let floor = world
                .insert_static_body(
                    Component::from(AABB::from_size(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.1, 1.0))),
                    Material::CONCRETE,
                )
                .unwrap();
            let h = world
                .insert_dynamic_body(ball(), Material::DEBRIS, MassProperties::sphere(0.01, 3.0), Point3::new(0.1, 1.0, 0.2))
                .unwrap();

            assert_eq!(world.len(), 2);
            assert_eq!(world.dynamic_len(), 1);
            assert_eq!(world.body(h).unwrap().pos(), Point3::new(0.1, 1.0, 0.2));
            assert_eq!(world.body(h).unwrap().material, Material::DEBRIS);
            // The registry keeps the inertia hint it was handed.
            assert_eq!(world.body(h).unwrap().inertia_hint, MassProperties::sphere(0.01, 3.0).inertia_hint);

            world.remove_body(h).unwrap();
            assert_eq!(world.dynamic_len(), 0);
            assert!(world.contains(floor));
            match world.remove_body(h) {
                Err(Error::UnknownBody(stale)) => assert_eq!(stale, h),
                other => panic!("expected UnknownBody, got {:?}", other),
            }
        }

        #[test]
        fn test_capacity() {
            let mut world = World::with_capacity(GRAVITY, 2);
            let props = MassProperties::sphere(0.01, 3.0);
            world.insert_dynamic_body(ball(), Material::DEBRIS, props, Point3::new(0.0, 0.0, 0.0)).unwrap();
            world.insert_dynamic_body(ball(), Material::DEBRIS, props, Point3::new(0.0, 0.0, 0.0)).unwrap();
            match world.insert_dynamic_body(ball(), Material::DEBRIS, props, Point3::new(0.0, 0.0, 0.0)) {
                Err(Error::RegistryFull { capacity }) => assert_eq!(capacity, 2),
                other => panic!("expected RegistryFull, got {:?}", other),
            }
            assert_eq!(world.len(), 2);
        }

        #[test]
        fn test_step_applies_gravity() {
            let mut world = World::new(Vector3::new(0.0, -10.0, 0.0));
            let h = world
                .insert_dynamic_body(ball(), Material::DEBRIS, MassProperties::sphere(0.01, 3.0), Point3::new(0.0, 1.0, 0.0))
                .unwrap();
            world.step(0.1);
            let body = world.body(h).unwrap();
            assert!((body.v.y + 1.0).abs() < 1e-4);
            assert!((body.pos().y - 0.9).abs() < 1e-4);

            world.set_gravity(Vector3::new(0.0, 0.0, 0.0));
            let v = world.body(h).unwrap().v;
            world.step(0.1);
            assert_eq!(world.body(h).unwrap().v, v);
        }
    }
}

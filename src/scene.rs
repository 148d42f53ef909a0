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
use log::debug;

use crate::error::Result;
use crate::geom::AABB;
use crate::physics::{Component, Material};
use crate::pool::Handle;
use crate::registry::World;

/// Handles of the static bodies making up the open-topped container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Container {
    pub floor: Handle,
    pub walls: [Handle; 4],
}

/// The boxes of the container, floor first.
///
/// x is depth, y is height and z is width. The container is one unit deep and
/// half a unit of width per letter.
pub fn container_boxes(letters_len: usize) -> [AABB; 5] {
    let width = 0.5 * letters_len.max(1) as f32;
    [
        AABB::from_size(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.1, width)),
        AABB::from_size(Point3::new(-0.5, 0.5, 0.0), Vector3::new(0.1, 1.0, width)),
        AABB::from_size(Point3::new(0.5, 0.5, 0.0), Vector3::new(0.1, 1.0, width)),
        AABB::from_size(Point3::new(0.0, 0.5, 0.5 * width), Vector3::new(1.0, 1.0, 0.1)),
        AABB::from_size(Point3::new(0.0, 0.5, -0.5 * width), Vector3::new(1.0, 1.0, 0.1)),
    ]
}

/// Insert the floor and four walls into the world.
pub fn assemble_container(world: &mut World, letters_len: usize, material: Material) -> Result<Container> {
    let boxes = container_boxes(letters_len);
    let floor = world.insert_static_body(Component::from(boxes[0]), material)?;
    let mut walls = [floor; 4];
    for (wall, b) in walls.iter_mut().zip(boxes[1..].iter()) {
        *wall = world.insert_static_body(Component::from(*b), material)?;
    }
    debug!("assembled container for {} letters", letters_len);
    Ok(Container { floor, walls })
}

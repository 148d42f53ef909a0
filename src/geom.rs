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
use std::ops::{Add, AddAssign, Sub, SubAssign};

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// An Axis Aligned Bounding Box.
///
/// AABBs are closed boxes aligned to the axes of the coordinate system. AABBs
/// are described by a point and three half lengths.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub c: Point3<f32>,
    pub r: Vector3<f32>,
}

impl AABB {
    /// Construct an AABB from full side lengths rather than half lengths.
    pub fn from_size(c: Point3<f32>, size: Vector3<f32>) -> Self {
        AABB { c, r: size * 0.5 }
    }
}

/// A sphere is represented by a center point and a radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub c: Point3<f32>,
    pub r: f32,
}

/// A type that occupies space and can be given a volume.
pub trait Volumetric {
    fn volume(&self) -> f32;
}

impl Volumetric for Sphere {
    fn volume(&self) -> f32 {
        4.0 / 3.0 * f32::consts::PI * self.r * self.r * self.r
    }
}

impl Volumetric for AABB {
    fn volume(&self) -> f32 {
        8.0 * self.r.x * self.r.y * self.r.z
    }
}

/// A type that has a position and can be moved.
pub trait Shape
    : Copy
    + Add<Vector3<f32>, Output = Self>
    + Sub<Vector3<f32>, Output = Self>
    + AddAssign<Vector3<f32>>
    + SubAssign<Vector3<f32>>
{
    /// The center of the shape.
    fn center(&self) -> Point3<f32>;

    /// Move the shape so that its center lies at p.
    fn set_pos(&mut self, p: Point3<f32>) {
        let disp = p - self.center();
        *self += disp;
    }
}

macro_rules! impl_shape {
    (
        $type:ty, $pos:ident
    ) => {
        impl Add<Vector3<f32>> for $type {
            type Output = Self;

            fn add(self, v: Vector3<f32>) -> Self {
                let mut s = self;
                s.$pos += v;
                s
            }
        }

        impl Sub<Vector3<f32>> for $type {
            type Output = Self;

            fn sub(self, v: Vector3<f32>) -> Self {
                let mut s = self;
                s.$pos += -v;
                s
            }
        }

        impl AddAssign<Vector3<f32>> for $type {
            fn add_assign(&mut self, v: Vector3<f32>) {
                self.$pos += v;
            }
        }

        impl SubAssign<Vector3<f32>> for $type {
            fn sub_assign(&mut self, v: Vector3<f32>) {
                self.$pos += -v;
            }
        }

        impl Shape for $type {
            fn center(&self) -> Point3<f32> {
                self.$pos
            }
        }
    };
}

impl_shape!(Sphere, c);
impl_shape!(AABB, c);

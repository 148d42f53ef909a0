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

use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};

/// An opaque reference to an entry of a Pool.
///
/// A Handle stays valid until the entry it names is removed. Slots are reused
/// after removal, but every reuse bumps the slot's generation, so a stale
/// Handle never aliases the newer entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Internal storage type used by Pool.
enum Slot<T> {
    Free {
        generation: u32,
        next_free: Option<u32>,
    },
    Occupied {
        generation: u32,
        item: T,
    },
}

/// Growable array type that allows items to be removed and inserted without
/// changing the handles of other entries.
pub struct Pool<T> {
    len: usize,
    free_list: Option<u32>,
    slots: Vec<Slot<T>>,
}

impl<T> Pool<T> {
    /// Create an empty Pool.
    pub fn new() -> Self {
        Pool {
            len: 0,
            free_list: None,
            slots: Vec::new(),
        }
    }

    /// Create an empty Pool large enough to fit cap items.
    pub fn with_capacity(cap: usize) -> Self {
        Pool {
            len: 0,
            free_list: None,
            slots: Vec::with_capacity(cap),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Push a new item to the Pool. Attempts to use spots left empty from
    /// removed items before performing a heap allocation.
    pub fn push(&mut self, item: T) -> Handle {
        self.len += 1;
        if let Some(free) = self.free_list {
            let slot = &mut self.slots[free as usize];
            let (generation, next_free) = match *slot {
                Slot::Free { generation, next_free } => (generation, next_free),
                Slot::Occupied { .. } => unreachable!(),
            };
            self.free_list = next_free;
            *slot = Slot::Occupied { generation, item };
            Handle { index: free, generation }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot::Occupied { generation: 0, item });
            Handle { index, generation: 0 }
        }
    }

    /// Removes the entry named by the handle and returns it. Returns None if
    /// the handle is stale or was never issued by this Pool.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }
        let freed = Slot::Free {
            generation: handle.generation.wrapping_add(1),
            next_free: self.free_list,
        };
        match mem::replace(&mut self.slots[handle.index as usize], freed) {
            Slot::Occupied { item, .. } => {
                self.free_list = Some(handle.index);
                self.len -= 1;
                Some(item)
            }
            Slot::Free { .. } => unreachable!(),
        }
    }

    /// Determines if the handle refers to a live entry.
    pub fn contains(&self, handle: Handle) -> bool {
        match self.slots.get(handle.index as usize) {
            Some(&Slot::Occupied { generation, .. }) => generation == handle.generation,
            _ => false,
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index as usize) {
            Some(&Slot::Occupied { generation, ref item }) if generation == handle.generation => Some(item),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index as usize) {
            Some(&mut Slot::Occupied { generation, ref mut item }) if generation == handle.generation => Some(item),
            _ => None,
        }
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (Handle, &'a T)> + 'a {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            &Slot::Occupied { generation, ref item } => {
                Some((Handle { index: i as u32, generation }, item))
            }
            _ => None,
        })
    }

    pub fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (Handle, &'a mut T)> + 'a {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| match slot {
            &mut Slot::Occupied { generation, ref mut item } => {
                Some((Handle { index: i as u32, generation }, item))
            }
            _ => None,
        })
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Pool::new()
    }
}

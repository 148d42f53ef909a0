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

use std::io;

use thiserror::Error;

use crate::pool::Handle;

/// Errors surfaced by registries, the generator and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    #[error("registry is full: capacity of {capacity} bodies reached")]
    RegistryFull { capacity: usize },

    #[error("no live body for handle {0}")]
    UnknownBody(Handle),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration")]
    Io(#[from] io::Error),

    #[error("failed to parse configuration")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

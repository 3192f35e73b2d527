// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Positions relative to a directed edge.

/// A position on or beside a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    On,
    Left,
    Right,
}

impl Position {
    pub const fn index(self) -> usize {
        match self {
            Position::On => 0,
            Position::Left => 1,
            Position::Right => 2,
        }
    }

    /// Left and right swap; `On` stays.
    pub const fn opposite(self) -> Self {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
            Position::On => Position::On,
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octant codes and octant sets.
//!
//! An [`Octant`] is a 3-bit code assembled from three "low/high" comparisons
//! against a node's midpoint: bit 2 is X, bit 1 is Y, bit 0 is Z. The code
//! doubles as the index into a node's child array, so
//!
//! | code | octant    |
//! |------|-----------|
//! | 0    | −X −Y −Z  |
//! | 1    | −X −Y +Z  |
//! | 2    | −X +Y −Z  |
//! | 3    | −X +Y +Z  |
//! | 4    | +X −Y −Z  |
//! | 5    | +X −Y +Z  |
//! | 6    | +X +Y −Z  |
//! | 7    | +X +Y +Z  |

use glam::Vec3;

/// One of the eight children of a split node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Octant(u8);

impl Octant {
    /// All octants in child-array order.
    pub const ALL: [Self; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    /// Build an octant from the high/low side on each axis.
    pub const fn from_axes(x_high: bool, y_high: bool, z_high: bool) -> Self {
        Self(((x_high as u8) << 2) | ((y_high as u8) << 1) | (z_high as u8))
    }

    /// The octant of `mid` that `p` falls into.
    ///
    /// A coordinate equal to the midpoint goes to the low side, so every point
    /// maps to exactly one octant even on a dividing plane.
    pub fn containing(mid: Vec3, p: Vec3) -> Self {
        Self::from_axes(p.x > mid.x, p.y > mid.y, p.z > mid.z)
    }

    /// The high/low side on each axis.
    pub const fn axes(self) -> (bool, bool, bool) {
        (self.0 & 0b100 != 0, self.0 & 0b010 != 0, self.0 & 0b001 != 0)
    }

    /// Index into a child array.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// A set of octants, one bit per [`Octant`] code.
    ///
    /// Constants are named low (`L`) or high (`H`) per axis in X, Y, Z order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Octants: u8 {
        /// −X −Y −Z
        const LLL = 1 << 0;
        /// −X −Y +Z
        const LLH = 1 << 1;
        /// −X +Y −Z
        const LHL = 1 << 2;
        /// −X +Y +Z
        const LHH = 1 << 3;
        /// +X −Y −Z
        const HLL = 1 << 4;
        /// +X −Y +Z
        const HLH = 1 << 5;
        /// +X +Y −Z
        const HHL = 1 << 6;
        /// +X +Y +Z
        const HHH = 1 << 7;
    }
}

impl Octants {
    /// Collect the octants for which `f` returns true.
    pub fn from_fn(mut f: impl FnMut(Octant) -> bool) -> Self {
        Octant::ALL
            .into_iter()
            .filter(|&o| f(o))
            .fold(Self::empty(), |acc, o| acc | Self::from(o))
    }

    /// Whether the set holds `octant`.
    pub fn has(self, octant: Octant) -> bool {
        self.contains(Self::from(octant))
    }

    /// Iterate the octants in the set in child-array order.
    pub fn octants(self) -> impl Iterator<Item = Octant> {
        Octant::ALL.into_iter().filter(move |&o| self.has(o))
    }
}

impl From<Octant> for Octants {
    fn from(octant: Octant) -> Self {
        Self::from_bits_retain(1 << octant.0)
    }
}

//! Player seats and per-seat data storage.
//!
//! ## Seat
//!
//! A duel always has exactly two seats. The challenger owns the game object
//! and sits in `Seat::One`; whoever accepts the challenge sits in `Seat::Two`.
//!
//! ## SeatMap
//!
//! Fixed two-slot storage indexed by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two player slots of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// `player_1` on chain and in the backend.
    One,
    /// `player_2` on chain and in the backend.
    Two,
}

impl Seat {
    /// Both seats, in order.
    pub const ALL: [Seat; 2] = [Seat::One, Seat::Two];

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// True for `Seat::One`. Move calls take this as their `is_player_1` flag.
    #[must_use]
    pub const fn is_player_1(self) -> bool {
        matches!(self, Seat::One)
    }

    /// 0-based slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::One => f.write_str("player_1"),
            Seat::Two => f.write_str("player_2"),
        }
    }
}

/// Per-seat data storage.
///
/// ```
/// use card_duel_client::core::{Seat, SeatMap};
///
/// let mut life = SeatMap::with_value(20);
/// life[Seat::Two] = 15;
/// assert_eq!(life[Seat::One], 20);
/// assert_eq!(life[Seat::Two], 15);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; 2],
}

impl<T> SeatMap<T> {
    /// Create a map from explicit values for both seats.
    pub fn new(one: T, two: T) -> Self {
        Self { data: [one, two] }
    }

    /// Create a map with values from a factory function.
    pub fn from_fn(mut factory: impl FnMut(Seat) -> T) -> Self {
        Self::new(factory(Seat::One), factory(Seat::Two))
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Seat, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        Seat::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Transform every entry.
    pub fn map<U>(self, mut f: impl FnMut(Seat, T) -> U) -> SeatMap<U> {
        let [one, two] = self.data;
        SeatMap::new(f(Seat::One, one), f(Seat::Two, two))
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}

//! Fluid phases and per-phase triples.
//!
//! All raw rate tables store their columns in the order gas, oil, water.

use std::ops::{Index, IndexMut};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Phase {
    Gas,
    Oil,
    Water,
}

impl Phase {
    /// All phases in table column order.
    pub const ALL: [Phase; 3] = [Phase::Gas, Phase::Oil, Phase::Water];

    /// Column of this phase within a group of three rate columns.
    pub fn column(&self) -> usize {
        match self {
            Phase::Gas => 0,
            Phase::Oil => 1,
            Phase::Water => 2,
        }
    }
}

/// One value per phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Phases<T> {
    pub gas: T,
    pub oil: T,
    pub water: T,
}

impl<T> Phases<T> {
    /// Build a triple by evaluating `f` for each phase, in column order.
    pub fn from_fn<F>(mut f: F) -> Phases<T>
    where
        F: FnMut(Phase) -> T,
    {
        Phases {
            gas: f(Phase::Gas),
            oil: f(Phase::Oil),
            water: f(Phase::Water),
        }
    }

    /// Like [`Phases::from_fn`] but stops at the first error.
    pub fn try_from_fn<F, E>(mut f: F) -> Result<Phases<T>, E>
    where
        F: FnMut(Phase) -> Result<T, E>,
    {
        Ok(Phases {
            gas: f(Phase::Gas)?,
            oil: f(Phase::Oil)?,
            water: f(Phase::Water)?,
        })
    }

    pub fn map<U, F>(&self, mut f: F) -> Phases<U>
    where
        F: FnMut(Phase, &T) -> U,
    {
        Phases {
            gas: f(Phase::Gas, &self.gas),
            oil: f(Phase::Oil, &self.oil),
            water: f(Phase::Water, &self.water),
        }
    }
}

impl<T> Index<Phase> for Phases<T> {
    type Output = T;

    fn index(&self, phase: Phase) -> &T {
        match phase {
            Phase::Gas => &self.gas,
            Phase::Oil => &self.oil,
            Phase::Water => &self.water,
        }
    }
}

impl<T> IndexMut<Phase> for Phases<T> {
    fn index_mut(&mut self, phase: Phase) -> &mut T {
        match phase {
            Phase::Gas => &mut self.gas,
            Phase::Oil => &mut self.oil,
            Phase::Water => &mut self.water,
        }
    }
}

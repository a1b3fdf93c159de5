//! Where dice faces come from.

use std::collections::VecDeque;

use super::DiceError;

/// Supplies one face at a time.
///
/// Implementations return a face in `1..=sides`.
pub trait DiceSource: Send {
    fn draw(&mut self, sides: u32) -> Result<u32, DiceError>;
}

impl<S: DiceSource + ?Sized> DiceSource for &mut S {
    fn draw(&mut self, sides: u32) -> Result<u32, DiceError> {
        (**self).draw(sides)
    }
}

impl<S: DiceSource + ?Sized> DiceSource for Box<S> {
    fn draw(&mut self, sides: u32) -> Result<u32, DiceError> {
        (**self).draw(sides)
    }
}

/// Seeded PCG-XSH-RR stream.
///
/// Deterministic: the same seed always yields the same faces, which makes a
/// seeded session replayable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgDice {
    state: u64,
}

impl PcgDice {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let state = self.state;
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl DiceSource for PcgDice {
    fn draw(&mut self, sides: u32) -> Result<u32, DiceError> {
        if sides == 0 {
            return Err(DiceError::InvalidDice { count: 1, sides: 0 });
        }
        Ok((self.next_u32() % sides) + 1)
    }
}

/// Pre-recorded faces, handed out in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    pub fn push(&mut self, face: u32) {
        self.faces.push_back(face);
    }

    /// Faces not drawn yet.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn draw(&mut self, sides: u32) -> Result<u32, DiceError> {
        let face = self.faces.pop_front().ok_or(DiceError::SourceExhausted)?;
        if face == 0 || face > sides {
            return Err(DiceError::FaceOutOfRange { face, sides });
        }
        Ok(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_and_in_range() {
        let mut a = PcgDice::new(42);
        let mut b = PcgDice::new(42);
        for _ in 0..200 {
            let face = a.draw(6).unwrap();
            assert!((1..=6).contains(&face));
            assert_eq!(face, b.draw(6).unwrap());
        }
    }

    #[test]
    fn scripted_faces_are_checked_against_sides() {
        let mut dice = ScriptedDice::new([3, 9]);
        assert_eq!(dice.draw(6), Ok(3));
        assert_eq!(dice.draw(6), Err(DiceError::FaceOutOfRange { face: 9, sides: 6 }));
        assert_eq!(dice.draw(6), Err(DiceError::SourceExhausted));
    }
}

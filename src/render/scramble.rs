use std::iter::FusedIterator;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const SPECIAL: &str = "!@#$%^&*()-_=+[]{};:,.<>/?~";

/// Successive approximations of a target string that "decrypt" into it.
///
/// Characters are revealed left to right, one every `speed` steps; unrevealed
/// positions show random characters and whitespace is never scrambled. The
/// sequence is finite and its last element is the target itself.
pub struct TextScramble {
    target: Vec<char>,
    alphabet: Vec<char>,
    speed: usize,
    step: usize,
    rng: StdRng,
}

impl TextScramble {
    #[must_use]
    pub fn new(target: &str, speed: usize, include_special: bool) -> Self {
        Self::with_rng(target, speed, include_special, StdRng::from_entropy())
    }

    /// Same as [`TextScramble::new`] with a reproducible RNG.
    #[must_use]
    pub fn with_seed(target: &str, speed: usize, include_special: bool, seed: u64) -> Self {
        Self::with_rng(target, speed, include_special, StdRng::seed_from_u64(seed))
    }

    fn with_rng(target: &str, speed: usize, include_special: bool, rng: StdRng) -> Self {
        let mut alphabet: Vec<char> = ALPHANUMERIC.chars().collect();
        if include_special {
            alphabet.extend(SPECIAL.chars());
        }
        Self {
            target: target.chars().collect(),
            alphabet,
            speed: speed.max(1),
            step: 0,
            rng,
        }
    }

    fn last_step(&self) -> usize {
        self.target.len() * self.speed
    }
}

impl Iterator for TextScramble {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.step > self.last_step() {
            return None;
        }
        let revealed = self.step / self.speed;
        let Self {
            target,
            alphabet,
            rng,
            ..
        } = self;
        let line = target
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i < revealed || c.is_whitespace() {
                    c
                } else {
                    alphabet.choose(rng).copied().unwrap_or(c)
                }
            })
            .collect();
        self.step += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last_step() + 1).saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TextScramble {}

impl FusedIterator for TextScramble {}

//! Candidate code generation

use rand::distributions::{Distribution, Uniform};

use super::alphabet::Alphabet;

/// Source of candidate short codes
///
/// Implementations are shared by every concurrent minting call.
pub trait CandidateSource: Send + Sync {
    fn next_candidate(&self) -> String;
}

/// Draws `length` symbols uniformly at random from an alphabet
///
/// Uses the thread-local generator, which is a CSPRNG seeded from the OS,
/// so codes are not predictable from earlier codes.
#[derive(Clone, Debug)]
pub struct RandomCandidates {
    alphabet: Alphabet,
    length: usize,
    index: Uniform<usize>,
}

impl RandomCandidates {
    pub fn new(alphabet: Alphabet, length: usize) -> Self {
        let index = Uniform::new(0, alphabet.len());
        Self {
            alphabet,
            length,
            index,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl CandidateSource for RandomCandidates {
    fn next_candidate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .filter_map(|_| self.alphabet.symbol(self.index.sample(&mut rng)))
            .collect()
    }
}

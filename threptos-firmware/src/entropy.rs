//! Entropy from the RP2040 ring oscillator
//!
//! One word is drawn per laid egg, so throughput does not matter and the
//! ROSC's modest quality is plenty.

use embassy_rp::clocks::RoscRng;

use threptos_core::traits::Entropy;

pub struct HwEntropy {
    rng: RoscRng,
}

impl HwEntropy {
    pub fn new() -> Self {
        Self { rng: RoscRng }
    }
}

impl Entropy for HwEntropy {
    fn next_u32(&mut self) -> u32 {
        let mut word = [0u8; 4];
        self.rng.blocking_fill_bytes(&mut word);
        u32::from_le_bytes(word)
    }
}

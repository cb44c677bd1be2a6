use rand_core::{CryptoRng, Error, RngCore};
use sha3::{
    Shake256, Shake256Reader,
    digest::{ExtendableOutput, Update, XofReader},
};

/// Deterministic random number generator reading from SHAKE256 absorbed on a
/// seed. Only meant for reproducible benchmarks and tests.
pub struct DRNG {
    reader: Shake256Reader,
}

impl DRNG {
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut shake = Shake256::default();
        shake.update(seed);
        Self {
            reader: shake.finalize_xof(),
        }
    }
}

impl RngCore for DRNG {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.reader.read(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.reader.read(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.reader.read(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for DRNG {}

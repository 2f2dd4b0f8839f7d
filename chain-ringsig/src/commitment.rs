use crate::gang::{GroupElement, Scalar};

/// Domain separation seed of the default common reference string.
const DEFAULT_CRS_SEED: &[u8] = b"chain-ringsig commitment key h";

/// Common reference string: the Pedersen commitment key `h`, a second
/// generator whose discrete logarithm with respect to `G` nobody knows.
/// Prover and verifier must agree on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crs {
    pub(crate) h: GroupElement,
}

impl Crs {
    /// Generate a commitment key from a seed. This function hashes the
    /// input `buffer`, and creates a group element out of the hash.
    pub fn from_hash(buffer: &[u8]) -> Self {
        Crs {
            h: GroupElement::from_hash(buffer),
        }
    }

    pub fn to_bytes(&self) -> [u8; GroupElement::BYTES_LEN] {
        self.h.to_bytes()
    }

    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        Some(Crs {
            h: GroupElement::from_bytes(buf)?,
        })
    }

    /// Return the commitment `value·h + randomness·G`
    pub fn commit(&self, value: &Scalar, randomness: &Scalar) -> GroupElement {
        &self.h * value + GroupElement::generator() * randomness
    }

    /// Commitment to a single bit, `randomness·G` plus `h` when the bit is set
    pub fn commit_bit(&self, bit: bool, randomness: &Scalar) -> GroupElement {
        self.commit(&Scalar::from(bit), randomness)
    }
}

impl Default for Crs {
    fn default() -> Self {
        Crs::from_hash(DEFAULT_CRS_SEED)
    }
}

//! ElGamal-style encryption of the signer's public key to the revocation
//! authority.
//!
//! `C1 = u·G + m·h`, `C2 = u·rpk + pk`, where `m` is the committed flag bit.
//! The first component doubles as a Pedersen commitment to `m` under
//! randomness `u`, which is what the flag sub-proof of the signature is
//! about.

use crate::commitment::Crs;
use crate::gang::{GroupElement, Scalar};
use crate::keys::{PublicKey, RevocationPublicKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevocationCiphertext {
    pub(crate) c1: GroupElement,
    pub(crate) c2: GroupElement,
}

impl RevocationCiphertext {
    pub const BYTES_LEN: usize = GroupElement::BYTES_LEN * 2;

    pub(crate) fn new(
        crs: &Crs,
        revocation_key: &RevocationPublicKey,
        signer: &PublicKey,
        flag: bool,
        u: &Scalar,
    ) -> Self {
        RevocationCiphertext {
            c1: crs.commit_bit(flag, u),
            c2: revocation_key.0 * u + signer.0,
        }
    }

    pub fn c1(&self) -> &GroupElement {
        &self.c1
    }

    pub fn c2(&self) -> &GroupElement {
        &self.c2
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        let mut buf = [0u8; Self::BYTES_LEN];
        buf[..GroupElement::BYTES_LEN].copy_from_slice(&self.c1.to_bytes());
        buf[GroupElement::BYTES_LEN..].copy_from_slice(&self.c2.to_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::BYTES_LEN {
            return None;
        }
        Some(RevocationCiphertext {
            c1: GroupElement::from_bytes(&bytes[..GroupElement::BYTES_LEN])?,
            c2: GroupElement::from_bytes(&bytes[GroupElement::BYTES_LEN..])?,
        })
    }
}

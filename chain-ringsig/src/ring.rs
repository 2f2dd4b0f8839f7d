use crate::bits::bit_width;
use crate::error::RingSigError;
use crate::gang::GroupElement;
use crate::keys::PublicKey;

const LINKING_BASE_DOMAIN: &[u8] = b"chain-ringsig linking base";

/// An ordered set of ring member public keys. Positions matter: the bits of a
/// member's index are what the membership proof commits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    members: Vec<PublicKey>,
}

impl Ring {
    /// A ring needs at least two members.
    pub fn new(members: Vec<PublicKey>) -> Result<Self, RingSigError> {
        if members.len() < 2 {
            return Err(RingSigError::RingTooSmall(members.len()));
        }
        Ok(Ring { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `ceil(log2(len))`, the number of bits used to write a member index.
    pub fn bits(&self) -> usize {
        bit_width(self.members.len())
    }

    pub fn members(&self) -> &[PublicKey] {
        &self.members
    }

    pub fn get(&self, index: usize) -> Option<&PublicKey> {
        self.members.get(index)
    }

    pub fn position(&self, public_key: &PublicKey) -> Option<usize> {
        self.members.iter().position(|pk| pk == public_key)
    }

    pub(crate) fn points(&self) -> impl Iterator<Item = GroupElement> + '_ {
        self.members.iter().map(|pk| pk.0)
    }

    /// Base point `E` of the linking tag, hashed from the whole ring so that
    /// every member shares it and the verifier can recompute it.
    pub fn linking_base(&self) -> GroupElement {
        let mut buffer =
            Vec::with_capacity(LINKING_BASE_DOMAIN.len() + 8 + self.len() * PublicKey::BYTES_LEN);
        buffer.extend_from_slice(LINKING_BASE_DOMAIN);
        buffer.extend_from_slice(&(self.len() as u64).to_be_bytes());
        for pk in &self.members {
            buffer.extend_from_slice(&pk.to_bytes());
        }
        GroupElement::from_hash(&buffer)
    }
}

/// Shape of one signing operation: ring size, index width and the signer's
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingContext {
    size: usize,
    bits: usize,
    signer: usize,
}

impl RingContext {
    pub fn new(size: usize, signer: usize) -> Result<Self, RingSigError> {
        if size < 2 {
            return Err(RingSigError::RingTooSmall(size));
        }
        if signer >= size {
            return Err(RingSigError::SignerIndexOutOfRange {
                index: signer,
                size,
            });
        }
        Ok(RingContext {
            size,
            bits: bit_width(size),
            signer,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn signer(&self) -> usize {
        self.signer
    }
}

//! Linkability. The tag `T = sk·E` only depends on the secret key and on the
//! ring (through `E`), so two signatures by one key over one ring carry the
//! same tag.

use crate::gang::GroupElement;
use crate::signature::RingSignature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkingTag(pub(crate) GroupElement);

impl LinkingTag {
    pub const BYTES_LEN: usize = GroupElement::BYTES_LEN;

    pub fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        GroupElement::from_bytes(bytes).map(LinkingTag)
    }
}

/// Encodes the relationship of two signatures over the same ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Both signatures were produced with the same secret key.
    Linked,
    /// The signatures were produced with different secret keys.
    Independent,
}

/// Compare the tags of two signatures. Only meaningful when both signatures
/// verify against the same ring.
pub fn link(a: &RingSignature, b: &RingSignature) -> Link {
    if a.tag() == b.tag() {
        Link::Linked
    } else {
        Link::Independent
    }
}

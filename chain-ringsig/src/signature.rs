//! Structures sent by the signer to the verifier, and their byte encoding.
//!
//! Encoding: a fixed header `T, C1, C2, cAlpha, cBeta, zd, zd3, ff, zAlpha,
//! zBeta` followed by one record per bit position
//! `cl, ca, cb, cd, cd2, cd3, f, za, zb`. The number of bit positions is
//! recovered from the total length.

use crate::encryption::RevocationCiphertext;
use crate::error::RingSigError;
use crate::gang::{GroupElement, Scalar};
use crate::tag::LinkingTag;

/// Per-bit commitments of the membership proof: the bit `l_j` of the signer
/// index (`cl`), the blinding value `a_j` (`ca`) and the cross term
/// `l_j·a_j` (`cb`).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BitAnnouncement {
    pub(crate) cl: GroupElement,
    pub(crate) ca: GroupElement,
    pub(crate) cb: GroupElement,
}

/// Commitments to the `k`-th polynomial coefficients, combined against the
/// ring keys (`cd`), the linking tag (`cd2`) and the revocation differences
/// (`cd3`).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CoefficientAnnouncement {
    pub(crate) cd: GroupElement,
    pub(crate) cd2: GroupElement,
    pub(crate) cd3: GroupElement,
}

/// Commitments of the flag sub-proof.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FlagAnnouncement {
    pub(crate) c_alpha: GroupElement,
    pub(crate) c_beta: GroupElement,
}

/// Per-bit responses.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BitResponse {
    pub(crate) f: Scalar,
    pub(crate) za: Scalar,
    pub(crate) zb: Scalar,
}

/// Responses of the flag sub-proof.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FlagResponse {
    pub(crate) ff: Scalar,
    pub(crate) z_alpha: Scalar,
    pub(crate) z_beta: Scalar,
}

/// A linkable, traceable ring signature. Its size grows with the logarithm of
/// the ring size.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RingSignature {
    pub(crate) tag: LinkingTag,
    pub(crate) ciphertext: RevocationCiphertext,
    pub(crate) bits: Vec<BitAnnouncement>,
    pub(crate) coefficients: Vec<CoefficientAnnouncement>,
    pub(crate) flag: FlagAnnouncement,
    pub(crate) responses: Vec<BitResponse>,
    pub(crate) zd: Scalar,
    pub(crate) zd3: Scalar,
    pub(crate) flag_response: FlagResponse,
}

const POINT: usize = GroupElement::BYTES_LEN;
const SCALAR: usize = Scalar::BYTES_LEN;

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], RingSigError> {
        if self.buf.len() < n {
            return Err(RingSigError::DecodingFailure(format!(
                "expected {} more bytes, {} left",
                n,
                self.buf.len()
            )));
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn point(&mut self) -> Result<GroupElement, RingSigError> {
        GroupElement::from_bytes(self.take(POINT)?)
            .ok_or_else(|| RingSigError::DecodingFailure("invalid group element".to_string()))
    }

    fn scalar(&mut self) -> Result<Scalar, RingSigError> {
        Scalar::from_bytes(self.take(SCALAR)?)
            .ok_or_else(|| RingSigError::DecodingFailure("non-canonical scalar".to_string()))
    }
}

impl RingSignature {
    const HEADER_LEN: usize = 5 * POINT + 5 * SCALAR;
    const RECORD_LEN: usize = 6 * POINT + 3 * SCALAR;

    /// Number of bit positions, `n`.
    pub fn bits(&self) -> usize {
        self.bits.len()
    }

    pub fn tag(&self) -> &LinkingTag {
        &self.tag
    }

    pub fn revocation_ciphertext(&self) -> &RevocationCiphertext {
        &self.ciphertext
    }

    /// Size in bytes of the encoding of a signature with `bits` bit positions
    pub fn encoded_len(bits: usize) -> usize {
        Self::HEADER_LEN + bits * Self::RECORD_LEN
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::encoded_len(self.bits()));
        for p in [
            &self.tag.0,
            &self.ciphertext.c1,
            &self.ciphertext.c2,
            &self.flag.c_alpha,
            &self.flag.c_beta,
        ] {
            buf.extend_from_slice(&p.to_bytes());
        }
        for s in [
            &self.zd,
            &self.zd3,
            &self.flag_response.ff,
            &self.flag_response.z_alpha,
            &self.flag_response.z_beta,
        ] {
            buf.extend_from_slice(&s.to_bytes());
        }
        for ((b, c), r) in self
            .bits
            .iter()
            .zip(self.coefficients.iter())
            .zip(self.responses.iter())
        {
            for p in [&b.cl, &b.ca, &b.cb, &c.cd, &c.cd2, &c.cd3] {
                buf.extend_from_slice(&p.to_bytes());
            }
            for s in [&r.f, &r.za, &r.zb] {
                buf.extend_from_slice(&s.to_bytes());
            }
        }
        debug_assert_eq!(buf.len(), Self::encoded_len(self.bits()));
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RingSigError> {
        if bytes.len() <= Self::HEADER_LEN || (bytes.len() - Self::HEADER_LEN) % Self::RECORD_LEN != 0
        {
            return Err(RingSigError::DecodingFailure(format!(
                "invalid ring signature length {}",
                bytes.len()
            )));
        }
        let n = (bytes.len() - Self::HEADER_LEN) / Self::RECORD_LEN;
        let mut r = Reader { buf: bytes };

        let tag = LinkingTag(r.point()?);
        let ciphertext = RevocationCiphertext {
            c1: r.point()?,
            c2: r.point()?,
        };
        let flag = FlagAnnouncement {
            c_alpha: r.point()?,
            c_beta: r.point()?,
        };
        let zd = r.scalar()?;
        let zd3 = r.scalar()?;
        let flag_response = FlagResponse {
            ff: r.scalar()?,
            z_alpha: r.scalar()?,
            z_beta: r.scalar()?,
        };

        let mut bits = Vec::with_capacity(n);
        let mut coefficients = Vec::with_capacity(n);
        let mut responses = Vec::with_capacity(n);
        for _ in 0..n {
            bits.push(BitAnnouncement {
                cl: r.point()?,
                ca: r.point()?,
                cb: r.point()?,
            });
            coefficients.push(CoefficientAnnouncement {
                cd: r.point()?,
                cd2: r.point()?,
                cd3: r.point()?,
            });
            responses.push(BitResponse {
                f: r.scalar()?,
                za: r.scalar()?,
                zb: r.scalar()?,
            });
        }

        Ok(RingSignature {
            tag,
            ciphertext,
            bits,
            coefficients,
            flag,
            responses,
            zd,
            zd3,
            flag_response,
        })
    }
}

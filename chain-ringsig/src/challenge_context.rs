use cryptoxide::digest::Digest;
use cryptoxide::sha2::Sha256;

use crate::commitment::Crs;
use crate::encryption::RevocationCiphertext;
use crate::gang::{GroupElement, Scalar};
use crate::keys::RevocationPublicKey;
use crate::ring::Ring;
use crate::signature::{BitAnnouncement, CoefficientAnnouncement, FlagAnnouncement};
use crate::tag::LinkingTag;

/// Fiat-Shamir transcript of the ring signature.
///
/// The statement goes in first, in this order: `G ‖ T ‖ C1 ‖ C2`, then the
/// commitment key `h`, the linking base `E`, the revocation key, the ring
/// and the message. The prover's first move follows: per bit `cl, ca, cb`,
/// per coefficient `cd, cd2, cd3`, then `cAlpha, cBeta`. Points use their
/// canonical 32-byte encoding; lengths are big-endian `u64`.
pub(crate) struct ChallengeContext(Sha256);

impl ChallengeContext {
    /// Initialise the challenge context with the full statement
    pub(crate) fn new(
        crs: &Crs,
        ring: &Ring,
        revocation_key: &RevocationPublicKey,
        tag: &LinkingTag,
        ciphertext: &RevocationCiphertext,
        message: &[u8],
    ) -> Self {
        let mut ctx = Sha256::new();
        ctx.input(&GroupElement::generator().to_bytes());
        ctx.input(&tag.to_bytes());
        ctx.input(&ciphertext.c1.to_bytes());
        ctx.input(&ciphertext.c2.to_bytes());

        ctx.input(&crs.to_bytes());
        ctx.input(&ring.linking_base().to_bytes());
        ctx.input(&revocation_key.to_bytes());
        ctx.input(&(ring.len() as u64).to_be_bytes());
        for pk in ring.members() {
            ctx.input(&pk.to_bytes());
        }
        ctx.input(&(message.len() as u64).to_be_bytes());
        ctx.input(message);

        ChallengeContext(ctx)
    }

    /// Generation of the challenge `x`, after the prover's first move is
    /// "sent". The digest is read as a big-endian integer reduced modulo the
    /// group order.
    pub(crate) fn challenge(
        mut self,
        bits: &[BitAnnouncement],
        coefficients: &[CoefficientAnnouncement],
        flag: &FlagAnnouncement,
    ) -> Scalar {
        for b in bits {
            self.0.input(&b.cl.to_bytes());
            self.0.input(&b.ca.to_bytes());
            self.0.input(&b.cb.to_bytes());
        }
        for c in coefficients {
            self.0.input(&c.cd.to_bytes());
            self.0.input(&c.cd2.to_bytes());
            self.0.input(&c.cd3.to_bytes());
        }
        self.0.input(&flag.c_alpha.to_bytes());
        self.0.input(&flag.c_beta.to_bytes());

        let mut digest = [0u8; 32];
        self.0.result(&mut digest);
        let x = Scalar::from_be_bytes_mod_order(&digest);
        tracing::trace!(bits = bits.len(), "derived fiat-shamir challenge");
        x
    }
}

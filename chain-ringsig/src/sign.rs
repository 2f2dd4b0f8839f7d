//! Signing: the prover side of the three coupled sigma protocols
//! (membership, linking tag, revocation ciphertext) and the flag sub-proof,
//! made non-interactive with a single Fiat-Shamir challenge.
//!
//! For a ring of `N` keys, `n = ceil(log2 N)` and signer index `l`:
//!
//! * `cl_j = r_j·G + l_j·h`, `ca_j = a_j·h + s_j·G`, `cb_j = t_j·G + l_j·a_j·h`
//! * `cd_k = ρ_k·G + Σ_i p_{i,k}·pk_i`
//! * `cd2_k = ρ_k·E + (Σ_i p_{i,k})·T`
//! * `cd3_k = ρ_k·rpk + Σ_i p_{i,k}·(C2 − pk_i)`
//! * `cAlpha = α·h + β·G`, `cBeta = α·m·h + γ·G`
//!
//! and after the challenge `x`:
//!
//! * `f_j = l_j·x + a_j`, `za_j = r_j·x + s_j`, `zb_j = r_j·(x − f_j) + t_j`
//! * `zd = sk·x^n − Σ_k ρ_k·x^k`, `zd3 = u·x^n − Σ_k ρ_k·x^k`
//! * `ff = m·x + α`, `zAlpha = u·x + β`, `zBeta = u·(x − ff) + γ`
#![allow(clippy::many_single_char_names)]

use rand_core::{CryptoRng, RngCore};
use rayon::prelude::*;

use crate::bits::binrep;
use crate::challenge_context::ChallengeContext;
use crate::coefficients::CoefficientMatrix;
use crate::commitment::Crs;
use crate::encryption::RevocationCiphertext;
use crate::error::RingSigError;
use crate::gang::{GroupElement, Scalar};
use crate::keys::{RevocationPublicKey, SecretKey};
use crate::ring::{Ring, RingContext};
use crate::signature::{
    BitAnnouncement, BitResponse, CoefficientAnnouncement, FlagAnnouncement, FlagResponse,
    RingSignature,
};
use crate::tag::LinkingTag;

/// Signing configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignOptions {
    /// The bit `m` committed in the first component of the revocation
    /// ciphertext. Only the revocation authority learns it, through
    /// `RevocationSecretKey::trace`.
    pub flag: bool,
}

/// Randomness of one bit position, used for the hiding property.
struct BlindingRandomness {
    r: Scalar,
    s: Scalar,
    t: Scalar,
    a: Scalar,
}

impl BlindingRandomness {
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, rand_core::Error> {
        Ok(BlindingRandomness {
            r: Scalar::try_random(rng)?,
            s: Scalar::try_random(rng)?,
            t: Scalar::try_random(rng)?,
            a: Scalar::try_random(rng)?,
        })
    }

    fn announce(&self, crs: &Crs, bit: bool) -> BitAnnouncement {
        // commit index bit: 0 or 1
        let cl = crs.commit_bit(bit, &self.r);
        // commit a
        let ca = crs.commit(&self.a, &self.s);
        // commit bit * a => 0 or a
        let cb = if bit {
            crs.commit(&self.a, &self.t)
        } else {
            GroupElement::generator() * self.t
        };
        BitAnnouncement { cl, ca, cb }
    }

    fn gen_response(&self, challenge: &Scalar, bit: bool) -> BitResponse {
        let f = Scalar::from(bit) * challenge + self.a;
        let za = self.r * challenge + self.s;
        let zb = self.r * (challenge - f) + self.t;
        BitResponse { f, za, zb }
    }
}

/// Randomness of the flag sub-proof.
struct FlagRandomness {
    alpha: Scalar,
    beta: Scalar,
    gamma: Scalar,
}

impl FlagRandomness {
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, rand_core::Error> {
        Ok(FlagRandomness {
            alpha: Scalar::try_random(rng)?,
            beta: Scalar::try_random(rng)?,
            gamma: Scalar::try_random(rng)?,
        })
    }

    fn announce(&self, crs: &Crs, flag: bool) -> FlagAnnouncement {
        FlagAnnouncement {
            c_alpha: crs.commit(&self.alpha, &self.beta),
            c_beta: crs.commit(&(self.alpha * Scalar::from(flag)), &self.gamma),
        }
    }

    fn gen_response(&self, challenge: &Scalar, flag: bool, u: &Scalar) -> FlagResponse {
        let ff = Scalar::from(flag) * challenge + self.alpha;
        let z_alpha = u * challenge + self.beta;
        let z_beta = u * (challenge - ff) + self.gamma;
        FlagResponse { ff, z_alpha, z_beta }
    }
}

/// Commitments to the polynomial coefficients of degree `k`, one per `k`,
/// computed independently of each other.
fn announce_coefficients(
    ring: &Ring,
    matrix: &CoefficientMatrix,
    rho: &[Scalar],
    linking_base: &GroupElement,
    tag: &LinkingTag,
    revocation_key: &RevocationPublicKey,
    ciphertext: &RevocationCiphertext,
) -> Vec<CoefficientAnnouncement> {
    let columns = matrix.columns();
    rho.par_iter()
        .zip(columns.par_iter())
        .map(|(rho_k, column)| {
            let cd = GroupElement::generator() * rho_k
                + GroupElement::vartime_multiscalar_multiplication(
                    column.iter().copied(),
                    ring.points(),
                );
            let cd2 = linking_base * rho_k + tag.0 * Scalar::sum(column.iter().copied());
            let cd3 = revocation_key.0 * rho_k
                + GroupElement::vartime_multiscalar_multiplication(
                    column.iter().copied(),
                    ring.points().map(|pk| ciphertext.c2 - pk),
                );
            CoefficientAnnouncement { cd, cd2, cd3 }
        })
        .collect()
}

/// Sign `message` as the member at position `signer` of `ring`.
///
/// `secret_key` is not checked against `ring[signer]`: a mismatching key
/// yields a signature that does not verify. The only runtime failure once
/// the ring shape is valid is the random source giving up.
#[allow(clippy::too_many_arguments)]
pub fn sign<R: RngCore + CryptoRng>(
    rng: &mut R,
    crs: &Crs,
    ring: &Ring,
    signer: usize,
    secret_key: &SecretKey,
    revocation_key: &RevocationPublicKey,
    message: &[u8],
    options: SignOptions,
) -> Result<RingSignature, RingSigError> {
    let ctx = RingContext::new(ring.len(), signer)?;
    let n = ctx.bits();
    let signer_bits = binrep(signer, n)?;
    let signer_key = ring.members()[signer];

    let blinding = (0..n)
        .map(|_| BlindingRandomness::random(rng))
        .collect::<Result<Vec<_>, _>>()?;
    let rho = (0..n)
        .map(|_| Scalar::try_random(rng))
        .collect::<Result<Vec<_>, _>>()?;
    let u = Scalar::try_random(rng)?;
    let flag_randomness = FlagRandomness::random(rng)?;

    let linking_base = ring.linking_base();
    let tag = LinkingTag(linking_base * secret_key.0);
    let ciphertext =
        RevocationCiphertext::new(crs, revocation_key, &signer_key, options.flag, &u);

    let a: Vec<Scalar> = blinding.iter().map(|b| b.a).collect();
    let matrix = CoefficientMatrix::generate(&ctx, &a)?;

    // Generate cl, ca, cb commitments
    let bits: Vec<BitAnnouncement> = blinding
        .iter()
        .zip(signer_bits.iter())
        .map(|(abcd, bit)| abcd.announce(crs, *bit))
        .collect();
    let coefficients = announce_coefficients(
        ring,
        &matrix,
        &rho,
        &linking_base,
        &tag,
        revocation_key,
        &ciphertext,
    );
    let flag = flag_randomness.announce(crs, options.flag);

    let x = ChallengeContext::new(crs, ring, revocation_key, &tag, &ciphertext, message)
        .challenge(&bits, &coefficients, &flag);

    let responses = blinding
        .iter()
        .zip(signer_bits.iter())
        .map(|(abcd, bit)| abcd.gen_response(&x, *bit))
        .collect();

    let x_n = x.power(n);
    let rho_sum = Scalar::sum(rho.iter().zip(x.powers(n)).map(|(rho_k, x_k)| rho_k * x_k));
    let zd = secret_key.0 * x_n - rho_sum;
    let zd3 = u * x_n - rho_sum;
    let flag_response = flag_randomness.gen_response(&x, options.flag, &u);

    tracing::debug!(ring_size = ring.len(), bits = n, "produced ring signature");

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{Keypair, RevocationKeypair};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    /// Random source that always reports a failure.
    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.iter_mut().for_each(|b| *b = 0)
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new("entropy source exhausted"))
        }
    }

    impl CryptoRng for FailingRng {}

    fn setup(r: &mut ChaCha20Rng, size: usize) -> (Vec<Keypair>, Ring, RevocationKeypair) {
        let members: Vec<Keypair> = (0..size).map(|_| Keypair::generate(r)).collect();
        let ring = Ring::new(members.iter().map(|kp| kp.public_key).collect()).unwrap();
        (members, ring, RevocationKeypair::generate(r))
    }

    #[test]
    fn entropy_failure_aborts() {
        let mut r = ChaCha20Rng::from_seed([0u8; 32]);
        let crs = Crs::default();
        let (members, ring, authority) = setup(&mut r, 4);

        let result = sign(
            &mut FailingRng,
            &crs,
            &ring,
            1,
            &members[1].secret_key,
            &authority.public_key,
            b"message",
            SignOptions::default(),
        );
        assert!(matches!(result, Err(RingSigError::EntropyFailure(_))));
    }

    #[test]
    fn signer_out_of_range() {
        let mut r = ChaCha20Rng::from_seed([1u8; 32]);
        let crs = Crs::default();
        let (members, ring, authority) = setup(&mut r, 3);

        let result = sign(
            &mut r,
            &crs,
            &ring,
            3,
            &members[2].secret_key,
            &authority.public_key,
            b"message",
            SignOptions::default(),
        );
        assert!(matches!(
            result,
            Err(RingSigError::SignerIndexOutOfRange { index: 3, size: 3 })
        ));
    }

    #[test]
    fn shape_and_randomisation() {
        let mut r = ChaCha20Rng::from_seed([2u8; 32]);
        let crs = Crs::default();
        let (members, ring, authority) = setup(&mut r, 5);
        let sign_once = |r: &mut ChaCha20Rng| {
            sign(
                r,
                &crs,
                &ring,
                4,
                &members[4].secret_key,
                &authority.public_key,
                b"message",
                SignOptions::default(),
            )
            .unwrap()
        };

        let s1 = sign_once(&mut r);
        let s2 = sign_once(&mut r);
        assert_eq!(s1.bits(), 3);
        assert_eq!(s1.coefficients.len(), 3);
        assert_eq!(s1.responses.len(), 3);
        // same key and ring: same tag, fresh randomness everywhere else
        assert_eq!(s1.tag(), s2.tag());
        assert_ne!(s1.revocation_ciphertext(), s2.revocation_ciphertext());
        assert_ne!(s1.zd, s2.zd);

        // a seeded rng reproduces the signature
        let s3 = sign_once(&mut ChaCha20Rng::from_seed([9u8; 32]));
        let s4 = sign_once(&mut ChaCha20Rng::from_seed([9u8; 32]));
        assert_eq!(s3, s4);
    }
}

//! Verification of a ring signature.
//!
//! With `P_i(x) = Π_j (f_j if bit j of i is set, else x − f_j)`, the verifier
//! checks for every bit position `j`
//!
//! * `x·cl_j + ca_j = f_j·h + za_j·G`
//! * `(x − f_j)·cl_j + cb_j = zb_j·G`
//!
//! and globally
//!
//! * `Σ_i P_i·pk_i − Σ_k x^k·cd_k = zd·G`
//! * `(Σ_i P_i)·T − Σ_k x^k·cd2_k = zd·E`
//! * `Σ_i P_i·(C2 − pk_i) − Σ_k x^k·cd3_k = zd3·rpk`
//! * `x·C1 + cAlpha = ff·h + zAlpha·G`
//! * `(x − ff)·C1 + cBeta = zBeta·G`
//!
//! All equations are evaluated, and every failing one is reported.

use rayon::prelude::*;
use std::fmt;

use crate::bits::binrep;
use crate::challenge_context::ChallengeContext;
use crate::commitment::Crs;
use crate::error::RingSigError;
use crate::gang::{GroupElement, Scalar};
use crate::keys::RevocationPublicKey;
use crate::ring::Ring;
use crate::signature::{BitResponse, RingSignature};

/// Identifies one verification equation. Bit positions are 1-indexed from the
/// most significant bit of the signer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equation {
    /// `cl_j` commits to the same bit the response `f_j` opens.
    BitCommitment { bit: usize },
    /// The committed index bit is 0 or 1.
    BitProduct { bit: usize },
    /// The signer owns one of the ring keys.
    Membership,
    /// The linking tag was produced with the same secret key.
    Linkability,
    /// The revocation ciphertext encrypts the signer's ring key.
    Revocation,
    /// `cAlpha` opens consistently with `C1`.
    FlagCommitment,
    /// The flag committed in `C1` is 0 or 1.
    FlagProduct,
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equation::BitCommitment { bit } => write!(f, "bit commitment (bit {})", bit),
            Equation::BitProduct { bit } => write!(f, "bit product (bit {})", bit),
            Equation::Membership => write!(f, "membership"),
            Equation::Linkability => write!(f, "linkability"),
            Equation::Revocation => write!(f, "revocation"),
            Equation::FlagCommitment => write!(f, "flag commitment"),
            Equation::FlagProduct => write!(f, "flag product"),
        }
    }
}

/// Outcome of evaluating every verification equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    failed: Vec<Equation>,
}

impl VerificationReport {
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// Failing equations, per-bit ones first in bit order.
    pub fn failed_equations(&self) -> &[Equation] {
        &self.failed
    }

    pub fn into_result(self) -> Result<(), RingSigError> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(RingSigError::VerificationFailure(self.failed))
        }
    }
}

/// `P_i(x)` for every ring member.
fn member_products(
    ring_size: usize,
    bits: usize,
    responses: &[BitResponse],
    x: &Scalar,
) -> Result<Vec<Scalar>, RingSigError> {
    (0..ring_size)
        .into_par_iter()
        .map(|i| -> Result<Scalar, RingSigError> {
            let idx = binrep(i, bits)?;
            Ok(idx
                .iter()
                .zip(responses.iter())
                .fold(Scalar::one(), |acc, (ij, r)| {
                    let m = if *ij { r.f } else { x - r.f };
                    acc * m
                }))
        })
        .collect()
}

/// Evaluate all equations of `signature` over `ring` and `message`.
///
/// Fails only when the signature shape does not match the ring: one
/// announcement, coefficient commitment and response per bit of the ring
/// width.
pub fn verify_detailed(
    crs: &Crs,
    ring: &Ring,
    revocation_key: &RevocationPublicKey,
    message: &[u8],
    signature: &RingSignature,
) -> Result<VerificationReport, RingSigError> {
    let n = ring.bits();
    for got in [
        signature.bits.len(),
        signature.coefficients.len(),
        signature.responses.len(),
    ] {
        if got != n {
            return Err(RingSigError::ShapeMismatch { expected: n, got });
        }
    }

    let x = ChallengeContext::new(
        crs,
        ring,
        revocation_key,
        &signature.tag,
        &signature.ciphertext,
        message,
    )
    .challenge(&signature.bits, &signature.coefficients, &signature.flag);

    let g = GroupElement::generator();
    let mut failed = Vec::new();

    // check commitments are 0 / 1
    let per_bit: Vec<(bool, bool)> = signature
        .bits
        .par_iter()
        .zip(signature.responses.par_iter())
        .map(|(b, r)| {
            let commitment = b.cl * x + b.ca == crs.commit(&r.f, &r.za);
            let product = b.cl * (x - r.f) + b.cb == g * r.zb;
            (commitment, product)
        })
        .collect();
    for (j, (commitment, product)) in per_bit.into_iter().enumerate() {
        if !commitment {
            failed.push(Equation::BitCommitment { bit: j + 1 });
        }
        if !product {
            failed.push(Equation::BitProduct { bit: j + 1 });
        }
    }

    // check the three one-out-of-many relations
    let products = member_products(ring.len(), n, &signature.responses, &x)?;
    let x_pows = x.powers(n);
    let coefficient_sum = |points: Vec<GroupElement>| {
        GroupElement::vartime_multiscalar_multiplication(x_pows.iter().copied(), points)
    };
    let cds = coefficient_sum(signature.coefficients.iter().map(|c| c.cd).collect());
    let cd2s = coefficient_sum(signature.coefficients.iter().map(|c| c.cd2).collect());
    let cd3s = coefficient_sum(signature.coefficients.iter().map(|c| c.cd3).collect());

    let tag = signature.tag.0;
    let c2 = signature.ciphertext.c2;

    let membership =
        GroupElement::vartime_multiscalar_multiplication(products.iter().copied(), ring.points())
            - cds;
    if membership != g * signature.zd {
        failed.push(Equation::Membership);
    }

    let linkability = tag * Scalar::sum(products.iter().copied()) - cd2s;
    if linkability != ring.linking_base() * signature.zd {
        failed.push(Equation::Linkability);
    }

    let revocation = GroupElement::vartime_multiscalar_multiplication(
        products.iter().copied(),
        ring.points().map(|pk| c2 - pk),
    ) - cd3s;
    if revocation != revocation_key.0 * signature.zd3 {
        failed.push(Equation::Revocation);
    }

    // check the committed flag is 0 / 1
    let c1 = signature.ciphertext.c1;
    let fr = &signature.flag_response;
    if c1 * x + signature.flag.c_alpha != crs.commit(&fr.ff, &fr.z_alpha) {
        failed.push(Equation::FlagCommitment);
    }
    if c1 * (x - fr.ff) + signature.flag.c_beta != g * fr.z_beta {
        failed.push(Equation::FlagProduct);
    }

    for equation in &failed {
        tracing::warn!(%equation, "ring signature equation does not hold");
    }
    tracing::debug!(
        ring_size = ring.len(),
        bits = n,
        valid = failed.is_empty(),
        "verified ring signature"
    );

    Ok(VerificationReport { failed })
}

/// `true` iff every equation holds. A signature whose shape does not match
/// the ring is rejected.
pub fn verify(
    crs: &Crs,
    ring: &Ring,
    revocation_key: &RevocationPublicKey,
    message: &[u8],
    signature: &RingSignature,
) -> bool {
    match verify_detailed(crs, ring, revocation_key, message, signature) {
        Ok(report) => report.is_valid(),
        Err(err) => {
            tracing::debug!(%err, "rejected ring signature");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{Keypair, RevocationKeypair};
    use crate::sign::{sign, SignOptions};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    const MESSAGE: &[u8] = b"Example of a message. This could be a transaction id";

    struct Fixture {
        crs: Crs,
        members: Vec<Keypair>,
        ring: Ring,
        authority: RevocationKeypair,
    }

    impl Fixture {
        fn new(r: &mut ChaCha20Rng, size: usize) -> Self {
            let members: Vec<Keypair> = (0..size).map(|_| Keypair::generate(r)).collect();
            let ring = Ring::new(members.iter().map(|kp| kp.public_key).collect()).unwrap();
            Fixture {
                crs: Crs::from_hash(b"Example of a shared string"),
                members,
                ring,
                authority: RevocationKeypair::generate(r),
            }
        }

        fn sign_with(
            &self,
            r: &mut ChaCha20Rng,
            signer: usize,
            secret_key: &crate::keys::SecretKey,
            options: SignOptions,
        ) -> RingSignature {
            sign(
                r,
                &self.crs,
                &self.ring,
                signer,
                secret_key,
                &self.authority.public_key,
                MESSAGE,
                options,
            )
            .unwrap()
        }

        fn sign(&self, r: &mut ChaCha20Rng, signer: usize) -> RingSignature {
            self.sign_with(
                r,
                signer,
                &self.members[signer].secret_key,
                SignOptions::default(),
            )
        }

        fn failed(&self, signature: &RingSignature) -> Vec<Equation> {
            verify_detailed(
                &self.crs,
                &self.ring,
                &self.authority.public_key,
                MESSAGE,
                signature,
            )
            .unwrap()
            .failed_equations()
            .to_vec()
        }

        fn verify(&self, signature: &RingSignature) -> bool {
            verify(
                &self.crs,
                &self.ring,
                &self.authority.public_key,
                MESSAGE,
                signature,
            )
        }
    }

    #[test]
    fn sign_verify_every_position() {
        let mut r = ChaCha20Rng::from_seed([0u8; 32]);
        for size in [2usize, 3, 4, 5, 7, 8, 9] {
            let f = Fixture::new(&mut r, size);
            for signer in 0..size {
                let signature = f.sign(&mut r, signer);
                assert_eq!(signature.bits(), f.ring.bits());
                assert!(f.verify(&signature), "size {} signer {}", size, signer);
            }
        }
    }

    #[test]
    fn sign_verify_with_flag() {
        let mut r = ChaCha20Rng::from_seed([1u8; 32]);
        let f = Fixture::new(&mut r, 6);
        let signature = f.sign_with(
            &mut r,
            5,
            &f.members[5].secret_key,
            SignOptions { flag: true },
        );
        assert!(f.failed(&signature).is_empty());
    }

    #[test]
    fn four_members_corrupted_zd() {
        // N = 4, n = 2, l = 1
        let mut r = ChaCha20Rng::from_seed([2u8; 32]);
        let f = Fixture::new(&mut r, 4);
        let mut signature = f.sign(&mut r, 1);
        assert_eq!(signature.bits(), 2);
        assert!(f.verify(&signature));

        // zd is shared by the membership and the linkability relations
        signature.zd = signature.zd + Scalar::one();
        assert!(!f.verify(&signature));
        assert_eq!(
            f.failed(&signature),
            vec![Equation::Membership, Equation::Linkability]
        );

        let report = verify_detailed(
            &f.crs,
            &f.ring,
            &f.authority.public_key,
            MESSAGE,
            &signature,
        )
        .unwrap();
        assert!(!report.is_valid());
        match report.into_result() {
            Err(RingSigError::VerificationFailure(failed)) => {
                assert!(failed.contains(&Equation::Membership))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn corrupted_zd3() {
        let mut r = ChaCha20Rng::from_seed([3u8; 32]);
        let f = Fixture::new(&mut r, 4);
        let mut signature = f.sign(&mut r, 1);
        signature.zd3 = signature.zd3 + Scalar::one();
        assert_eq!(f.failed(&signature), vec![Equation::Revocation]);
    }

    #[test]
    fn corrupted_bit_responses() {
        let mut r = ChaCha20Rng::from_seed([4u8; 32]);
        let f = Fixture::new(&mut r, 5);
        let signature = f.sign(&mut r, 2);

        let mut za = signature.clone();
        za.responses[1].za = za.responses[1].za + Scalar::one();
        assert_eq!(f.failed(&za), vec![Equation::BitCommitment { bit: 2 }]);

        let mut zb = signature.clone();
        zb.responses[0].zb = zb.responses[0].zb + Scalar::one();
        assert_eq!(f.failed(&zb), vec![Equation::BitProduct { bit: 1 }]);

        let mut resp_f = signature;
        resp_f.responses[2].f = resp_f.responses[2].f + Scalar::one();
        let failed = f.failed(&resp_f);
        assert!(failed.contains(&Equation::BitCommitment { bit: 3 }));
        assert!(failed.contains(&Equation::BitProduct { bit: 3 }));
        assert!(failed.contains(&Equation::Membership));
        assert!(failed.contains(&Equation::Linkability));
        assert!(failed.contains(&Equation::Revocation));
    }

    #[test]
    fn corrupted_flag_responses() {
        let mut r = ChaCha20Rng::from_seed([5u8; 32]);
        let f = Fixture::new(&mut r, 3);
        let signature = f.sign(&mut r, 0);

        let mut ff = signature.clone();
        ff.flag_response.ff = ff.flag_response.ff + Scalar::one();
        assert_eq!(
            f.failed(&ff),
            vec![Equation::FlagCommitment, Equation::FlagProduct]
        );

        let mut z_alpha = signature.clone();
        z_alpha.flag_response.z_alpha = z_alpha.flag_response.z_alpha + Scalar::one();
        assert_eq!(f.failed(&z_alpha), vec![Equation::FlagCommitment]);

        let mut z_beta = signature;
        z_beta.flag_response.z_beta = z_beta.flag_response.z_beta + Scalar::one();
        assert_eq!(f.failed(&z_beta), vec![Equation::FlagProduct]);
    }

    #[test]
    fn tampered_announcements_change_the_challenge() {
        let mut r = ChaCha20Rng::from_seed([6u8; 32]);
        let f = Fixture::new(&mut r, 4);
        let signature = f.sign(&mut r, 3);
        let g = GroupElement::generator();

        let mut cl = signature.clone();
        cl.bits[0].cl = cl.bits[0].cl + g;
        assert!(!f.verify(&cl));

        let mut cd2 = signature.clone();
        cd2.coefficients[1].cd2 = cd2.coefficients[1].cd2 + g;
        assert!(!f.verify(&cd2));

        let mut c_beta = signature.clone();
        c_beta.flag.c_beta = c_beta.flag.c_beta + g;
        assert!(!f.verify(&c_beta));

        let mut tag = signature.clone();
        tag.tag.0 = tag.tag.0 + g;
        assert!(!f.verify(&tag));

        let mut c2 = signature;
        c2.ciphertext.c2 = c2.ciphertext.c2 + g;
        assert!(!f.verify(&c2));
    }

    #[test]
    fn wrong_secret_key_fails_membership_only() {
        let mut r = ChaCha20Rng::from_seed([7u8; 32]);
        let f = Fixture::new(&mut r, 4);
        let outsider = Keypair::generate(&mut r);
        let signature =
            f.sign_with(&mut r, 1, &outsider.secret_key, SignOptions::default());
        assert_eq!(f.failed(&signature), vec![Equation::Membership]);
    }

    #[test]
    fn flipped_index_bit_fails_membership_only() {
        let mut r = ChaCha20Rng::from_seed([8u8; 32]);
        let f = Fixture::new(&mut r, 8);
        let l = 5;
        for position in 0..f.ring.bits() {
            let flipped = l ^ (1 << position);
            let signature = f.sign_with(
                &mut r,
                flipped,
                &f.members[l].secret_key,
                SignOptions::default(),
            );
            assert_eq!(f.failed(&signature), vec![Equation::Membership]);
        }
    }

    #[test]
    fn statement_is_bound() {
        let mut r = ChaCha20Rng::from_seed([9u8; 32]);
        let f = Fixture::new(&mut r, 4);
        let signature = f.sign(&mut r, 2);

        assert!(!verify(
            &f.crs,
            &f.ring,
            &f.authority.public_key,
            b"another message",
            &signature
        ));

        let other_authority = RevocationKeypair::generate(&mut r);
        assert!(!verify(
            &f.crs,
            &f.ring,
            &other_authority.public_key,
            MESSAGE,
            &signature
        ));

        let other_ring = Fixture::new(&mut r, 4).ring;
        assert!(!verify(
            &f.crs,
            &other_ring,
            &f.authority.public_key,
            MESSAGE,
            &signature
        ));

        assert!(!verify(
            &Crs::default(),
            &f.ring,
            &f.authority.public_key,
            MESSAGE,
            &signature
        ));
    }

    #[test]
    fn shape_mismatch() {
        let mut r = ChaCha20Rng::from_seed([10u8; 32]);
        let small = Fixture::new(&mut r, 4);
        let large = Fixture::new(&mut r, 8);
        let signature = small.sign(&mut r, 0);

        let result = verify_detailed(
            &small.crs,
            &large.ring,
            &small.authority.public_key,
            MESSAGE,
            &signature,
        );
        assert!(matches!(
            result,
            Err(RingSigError::ShapeMismatch {
                expected: 3,
                got: 2
            })
        ));
        assert!(!verify(
            &small.crs,
            &large.ring,
            &small.authority.public_key,
            MESSAGE,
            &signature
        ));

        let mut truncated = signature;
        truncated.responses.pop();
        assert!(matches!(
            verify_detailed(
                &small.crs,
                &small.ring,
                &small.authority.public_key,
                MESSAGE,
                &truncated,
            ),
            Err(RingSigError::ShapeMismatch {
                expected: 2,
                got: 1
            })
        ));
    }
}

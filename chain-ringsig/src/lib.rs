//! Linkable and traceable ring signatures over Ristretto255.
//!
//! A member of a ring of public keys signs a message without revealing which
//! key is theirs. Two signatures by the same key over the same ring share a
//! linking tag, and a revocation authority holding its secret key can open the
//! signer's identity from the ciphertext every signature carries. Signatures
//! grow with the logarithm of the ring size (one-out-of-many proofs).
//!
//! ```
//! use chain_ringsig::{sign, verify, Crs, Keypair, RevocationKeypair, Ring, SignOptions};
//! use rand_core::OsRng;
//!
//! let mut rng = OsRng;
//! let crs = Crs::default();
//! let members: Vec<Keypair> = (0..5).map(|_| Keypair::generate(&mut rng)).collect();
//! let ring = Ring::new(members.iter().map(|kp| kp.public_key).collect()).unwrap();
//! let authority = RevocationKeypair::generate(&mut rng);
//!
//! let signature = sign(
//!     &mut rng,
//!     &crs,
//!     &ring,
//!     3,
//!     &members[3].secret_key,
//!     &authority.public_key,
//!     b"hello",
//!     SignOptions::default(),
//! )
//! .unwrap();
//!
//! assert!(verify(&crs, &ring, &authority.public_key, b"hello", &signature));
//! let traced = authority.secret_key.trace(&crs, &ring, &signature).unwrap();
//! assert_eq!(traced.index, 3);
//! ```

#[macro_use]
mod macros;
pub mod bits;
mod challenge_context;
pub mod coefficients;
mod commitment;
mod encryption;
mod error;
mod gang;
mod keys;
mod math;
mod ring;
mod sign;
mod signature;
mod tag;
mod verification;

pub use crate::{
    commitment::Crs,
    encryption::RevocationCiphertext,
    error::{BitIndexError, RingSigError},
    gang::{GroupElement, Scalar},
    keys::{
        Keypair, PublicKey, RevocationKeypair, RevocationPublicKey, RevocationSecretKey,
        SecretKey, Traced,
    },
    math::Polynomial,
    ring::{Ring, RingContext},
    sign::{sign, SignOptions},
    signature::{
        BitAnnouncement, BitResponse, CoefficientAnnouncement, FlagAnnouncement, FlagResponse,
        RingSignature,
    },
    tag::{link, Link, LinkingTag},
    verification::{verify, verify_detailed, Equation, VerificationReport},
};

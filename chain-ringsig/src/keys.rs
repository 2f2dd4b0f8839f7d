use crate::commitment::Crs;
use crate::encryption::RevocationCiphertext;
use crate::gang::{GroupElement, Scalar};
use crate::ring::Ring;
use crate::signature::RingSignature;
use rand_core::{CryptoRng, RngCore};

/// Ring member secret key
#[derive(Clone)]
pub struct SecretKey(pub(crate) Scalar);

/// Ring member public key, `sk·G`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub(crate) GroupElement);

/// A ring member key pair. `public_key = secret_key·G` holds by construction.
#[derive(Clone)]
pub struct Keypair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl SecretKey {
    pub const BYTES_LEN: usize = Scalar::BYTES_LEN;

    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        SecretKey(Scalar::random(rng))
    }

    pub fn to_public(&self) -> PublicKey {
        PublicKey(GroupElement::generator() * self.0)
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Scalar::from_bytes(bytes).map(SecretKey)
    }
}

impl PublicKey {
    pub const BYTES_LEN: usize = GroupElement::BYTES_LEN;

    pub fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        GroupElement::from_bytes(bytes).map(PublicKey)
    }

    pub fn as_point(&self) -> &GroupElement {
        &self.0
    }
}

impl Keypair {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Keypair::from_secret_key(SecretKey::generate(rng))
    }

    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secret_key.to_public();
        Keypair {
            secret_key,
            public_key,
        }
    }
}

/// Secret key of the revocation authority, able to open the revocation
/// ciphertext embedded in every signature.
#[derive(Clone)]
pub struct RevocationSecretKey(pub(crate) Scalar);

/// Public key of the revocation authority, the encryption key of the
/// revocation ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevocationPublicKey(pub(crate) GroupElement);

#[derive(Clone)]
pub struct RevocationKeypair {
    pub secret_key: RevocationSecretKey,
    pub public_key: RevocationPublicKey,
}

/// Result of tracing a signature back to its signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traced {
    /// Position of the signer in the ring
    pub index: usize,
    pub public_key: PublicKey,
    /// The bit committed in the first ciphertext component
    pub flag: bool,
}

impl RevocationSecretKey {
    pub const BYTES_LEN: usize = Scalar::BYTES_LEN;

    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        RevocationSecretKey(Scalar::random(rng))
    }

    pub fn to_public(&self) -> RevocationPublicKey {
        RevocationPublicKey(GroupElement::generator() * self.0)
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Scalar::from_bytes(bytes).map(RevocationSecretKey)
    }

    /// `C2 − sk·C1`. This is the signer's public key only when the committed
    /// flag is unset; use `trace` to recover the signer in every case.
    pub fn open(&self, ciphertext: &RevocationCiphertext) -> GroupElement {
        ciphertext.c2 - ciphertext.c1 * self.0
    }

    /// Recover the position of the real signer of `signature` in `ring`.
    ///
    /// With the flag set, `C1` also carries `h`, so the opening is off by
    /// `sk·h`; both candidates are looked up. Returns `None` when neither
    /// candidate is a member of the ring, which cannot happen for a signature
    /// that verifies against `ring`.
    pub fn trace(&self, crs: &Crs, ring: &Ring, signature: &RingSignature) -> Option<Traced> {
        let opened = self.open(signature.revocation_ciphertext());
        let candidates = [(opened, false), (opened + crs.h * self.0, true)];

        candidates.iter().find_map(|(candidate, flag)| {
            ring.position(&PublicKey(*candidate)).map(|index| Traced {
                index,
                public_key: PublicKey(*candidate),
                flag: *flag,
            })
        })
    }
}

impl RevocationPublicKey {
    pub const BYTES_LEN: usize = GroupElement::BYTES_LEN;

    pub fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        GroupElement::from_bytes(bytes).map(RevocationPublicKey)
    }

    pub fn as_point(&self) -> &GroupElement {
        &self.0
    }
}

impl RevocationKeypair {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let secret_key = RevocationSecretKey::generate(rng);
        let public_key = secret_key.to_public();
        RevocationKeypair {
            secret_key,
            public_key,
        }
    }
}

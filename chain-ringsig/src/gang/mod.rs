//! Group primitives. Everything above this module only sees `Scalar` and
//! `GroupElement`, so the curve backend stays swappable.

mod ristretto255;

pub use self::ristretto255::{GroupElement, Scalar};

//! Coefficients of the per-member polynomials of the one-out-of-many proof.
//!
//! For ring member `i` and signer `l`, bit position `j` contributes the
//! linear factor `f_{j,i_j}(x)` where `f_{j,1}(x) = l_j·x + a_j` and
//! `f_{j,0}(x) = (1 − l_j)·x − a_j`. Their product `p_i(x)` has degree `n`
//! exactly when `i = l`, with leading coefficient 1, and degree below `n`
//! otherwise. Only the `n` low-degree coefficients are kept: the verifier
//! supplies the `x^n` term itself.

use rayon::prelude::*;

use crate::bits::binrep;
use crate::error::BitIndexError;
use crate::gang::Scalar;
use crate::math::Polynomial;
use crate::ring::RingContext;

/// `p[i][k]`: coefficient of `x^k` in the polynomial of ring member `i`,
/// `k < n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoefficientMatrix {
    rows: Vec<Vec<Scalar>>,
    bits: usize,
}

/// The two linear factors `(f_{j,0}, f_{j,1})` of every bit position.
fn linear_factors(signer_bits: &[bool], blinding: &[Scalar]) -> Vec<(Polynomial, Polynomial)> {
    let degree = signer_bits.len();
    signer_bits
        .iter()
        .zip(blinding.iter())
        .map(|(lj, aj)| {
            let z1 = Polynomial::new(degree).set2(*aj, (*lj).into());
            let z0 = Polynomial::new(degree).set2(aj.negate(), (!lj).into());
            (z0, z1)
        })
        .collect()
}

/// Full (untruncated) polynomials `p_i(x)` for every ring member.
pub(crate) fn generate_polys(
    ctx: &RingContext,
    blinding: &[Scalar],
) -> Result<Vec<Polynomial>, BitIndexError> {
    let bits = ctx.bits();
    if blinding.len() != bits {
        return Err(BitIndexError::WidthMismatch {
            expected: bits,
            got: blinding.len(),
        });
    }

    let signer_bits = binrep(ctx.signer(), bits)?;
    let factors = linear_factors(&signer_bits, blinding);

    (0..ctx.size())
        .into_par_iter()
        .map(|i| -> Result<Polynomial, BitIndexError> {
            let idx = binrep(i, bits)?;
            Ok(idx
                .iter()
                .zip(factors.iter())
                .fold(Polynomial::one(), |acc, (ij, (z0, z1))| {
                    if *ij {
                        acc * z1
                    } else {
                        acc * z0
                    }
                }))
        })
        .collect()
}

impl CoefficientMatrix {
    /// Build the matrix from the ring shape and the `n` blinding scalars
    /// `a_1..a_n`. Fails with `WidthMismatch` unless `blinding` holds exactly
    /// `ctx.bits()` scalars.
    pub fn generate(ctx: &RingContext, blinding: &[Scalar]) -> Result<Self, BitIndexError> {
        let bits = ctx.bits();
        let rows = generate_polys(ctx, blinding)?
            .iter()
            .map(|p| p.truncated(bits))
            .collect();
        Ok(CoefficientMatrix { rows, bits })
    }

    /// Number of ring members
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of coefficients per member, `n`
    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn row(&self, i: usize) -> Option<&[Scalar]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    /// Column `k` across all members: `p[0][k], ..., p[N-1][k]`. `None` when
    /// `k >= bits()`.
    pub fn column(&self, k: usize) -> Option<Vec<Scalar>> {
        if k >= self.bits {
            return None;
        }
        Some(self.rows.iter().map(|row| row[k]).collect())
    }

    /// `Σ_i p[i][k]`
    pub fn column_sum(&self, k: usize) -> Option<Scalar> {
        self.column(k).map(|c| Scalar::sum(c.into_iter()))
    }

    /// All `n` columns, in degree order.
    pub fn columns(&self) -> Vec<Vec<Scalar>> {
        (0..self.bits)
            .map(|k| self.rows.iter().map(|row| row[k]).collect())
            .collect()
    }
}

use crate::gang::Scalar;
use std::ops::Mul;

/// A polynomial over the scalar field, coefficients stored in ascending
/// degree order: `elements[k]` multiplies `x^k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    elements: Vec<Scalar>,
}

impl Polynomial {
    /// The zero polynomial, with room reserved for `capacity + 1`
    /// coefficients.
    pub fn new(capacity: usize) -> Self {
        let mut elements = Vec::with_capacity(capacity + 1);
        elements.push(Scalar::zero());
        Polynomial { elements }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Polynomial {
            elements: vec![Scalar::one()],
        }
    }

    /// Set this polynomial to `x0 + x1 * x`.
    pub fn set2(mut self, x0: Scalar, x1: Scalar) -> Self {
        self.elements.clear();
        self.elements.push(x0);
        self.elements.push(x1);
        self
    }

    /// Number of stored coefficients.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Coefficient of `x^k`, zero past the stored coefficients.
    pub fn get_coefficient_at(&self, k: usize) -> Scalar {
        self.elements.get(k).copied().unwrap_or_else(Scalar::zero)
    }

    /// Evaluate at `x` with Horner's rule.
    pub fn evaluate(&self, x: &Scalar) -> Scalar {
        self.elements
            .iter()
            .rev()
            .fold(Scalar::zero(), |acc, c| acc * x + c)
    }

    /// Exactly `n` coefficients: everything of degree `n` and above is
    /// dropped, missing low-degree coefficients are zero.
    pub fn truncated(&self, n: usize) -> Vec<Scalar> {
        (0..n).map(|k| self.get_coefficient_at(k)).collect()
    }
}

impl<'a, 'b> Mul<&'b Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &'b Polynomial) -> Polynomial {
        if self.elements.is_empty() || rhs.elements.is_empty() {
            return Polynomial::new(0);
        }
        let mut elements = vec![Scalar::zero(); self.elements.len() + rhs.elements.len() - 1];
        for (i, a) in self.elements.iter().enumerate() {
            for (j, b) in rhs.elements.iter().enumerate() {
                elements[i + j] = elements[i + j] + a * b;
            }
        }
        Polynomial { elements }
    }
}

std_ops_gen!(Polynomial, Mul, Polynomial, Polynomial, mul);

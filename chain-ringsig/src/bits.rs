//! Binary representation of ring indices. Bit positions are 1-indexed from
//! the most significant bit of the value zero-padded to `width` bits.

use crate::error::BitIndexError;

/// Smallest `n` such that `2^n >= size`.
pub fn bit_width(size: usize) -> usize {
    match size {
        0 | 1 => 0,
        _ => (usize::BITS - (size - 1).leading_zeros()) as usize,
    }
}

fn check_value(value: usize, width: usize) -> Result<(), BitIndexError> {
    if width < usize::BITS as usize && value >> width != 0 {
        return Err(BitIndexError::ValueTooWide { value, width });
    }
    Ok(())
}

/// Bit `position` of `value` written with `width` bits.
pub fn bit(value: usize, width: usize, position: usize) -> Result<bool, BitIndexError> {
    if position == 0 || position > width {
        return Err(BitIndexError::PositionOutOfRange { position, width });
    }
    check_value(value, width)?;
    Ok((value >> (width - position)) & 1 == 1)
}

/// All `width` bits of `value`, most significant first.
pub fn binrep(value: usize, width: usize) -> Result<Vec<bool>, BitIndexError> {
    check_value(value, width)?;
    Ok((1..=width)
        .map(|position| (value >> (width - position)) & 1 == 1)
        .collect())
}

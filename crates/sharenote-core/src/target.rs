//! 256-bit hash targets and the compact nBits difficulty codec.
//!
//! A note's target is `floor(2^(256 - bits))`: smaller target, harder note.
//! The fractional bit component is applied through 48-bit fixed-point
//! scaling so cent-level differences stay exact. The compact codec packs a
//! target into the 4-byte exponent/mantissa form used by Bitcoin's `nBits`
//! field: `[exponent (1 byte)][mantissa (3 bytes)]`, target = mantissa *
//! 256^(exponent - 3).

use primitive_types::U256;

use crate::error::SharenoteError;
use crate::note::{ensure_note, NoteInput, Sharenote};

/// Fixed-point precision used when applying the fractional bit component.
const FRACTIONAL_PRECISION_BITS: u32 = 48;

/// The 256-bit integer target for a note: `floor(2^(256 - bits))`.
///
/// Fails once the whole-bit component exceeds 256 (the target space
/// underflows). The zero note saturates to `U256::MAX`.
pub fn target_for(note: impl Into<NoteInput>) -> Result<U256, SharenoteError> {
    let resolved = ensure_note(note)?;
    let integer_bits = resolved.bits().floor() as i64;
    let base_exponent = 256 - integer_bits;
    if base_exponent < 0 {
        return Err(SharenoteError::TargetUnderflow);
    }
    let exponent = base_exponent as u32;

    let fractional = resolved.bits() - integer_bits as f64;
    let scale = (-fractional).exp2();
    let scale_factor = (scale * (1u64 << FRACTIONAL_PRECISION_BITS) as f64).round() as u64;

    // 2^256 itself does not fit; only the zero note (and float-noise
    // neighbours) reach this case.
    if exponent == 256 && scale_factor >= (1u64 << FRACTIONAL_PRECISION_BITS) {
        return Ok(U256::MAX);
    }

    let target = if exponent >= FRACTIONAL_PRECISION_BITS {
        U256::from(scale_factor) << (exponent - FRACTIONAL_PRECISION_BITS) as usize
    } else {
        U256::from(scale_factor >> (FRACTIONAL_PRECISION_BITS - exponent))
    };
    Ok(target)
}

/// The target as 64 lowercase hex characters, big-endian.
pub fn target_hex(note: impl Into<NoteInput>) -> Result<String, SharenoteError> {
    let target = target_for(note)?;
    Ok(hex::encode(target.to_big_endian()))
}

/// Decode a compact `nBits` hex string (8 hex chars, optional `0x`) into the
/// note whose target it encodes.
pub fn nbits_to_sharenote(nbits: &str) -> Result<Sharenote, SharenoteError> {
    let lowered = nbits.to_lowercase();
    let cleaned = lowered.strip_prefix("0x").unwrap_or(&lowered).trim();
    if cleaned.len() != 8 {
        return Err(SharenoteError::NBitsLength);
    }
    let raw = hex::decode(cleaned).map_err(|_| SharenoteError::NBitsHex(cleaned.to_string()))?;
    let value = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);

    let exponent = (value >> 24) as i32;
    let mantissa = value & 0x00FF_FFFF;
    if mantissa == 0 {
        return Err(SharenoteError::NBitsZeroMantissa);
    }
    let log2_target = f64::from(mantissa).log2() + 8.0 * f64::from(exponent - 3);
    let bits = 256.0 - log2_target;
    Sharenote::from_bits(bits)
}

/// Encode a note as a compact `nBits` hex string.
///
/// The mantissa keeps its high bit clear (the compact form treats it as a
/// sign bit): when set, the mantissa shifts down a byte and the exponent
/// grows by one.
pub fn sharenote_to_nbits(note: impl Into<NoteInput>) -> Result<String, SharenoteError> {
    let target = target_for(note)?;
    let bytes = target.to_big_endian();

    let first_nonzero = bytes.iter().position(|&b| b != 0);
    let compact = match first_nonzero {
        None => 0u32,
        Some(start) => {
            let exponent = (32 - start) as u32;
            let mut mantissa: u32 = u32::from(bytes[start]) << 16;
            if start + 1 < 32 {
                mantissa |= u32::from(bytes[start + 1]) << 8;
            }
            if start + 2 < 32 {
                mantissa |= u32::from(bytes[start + 2]);
            }
            if mantissa & 0x0080_0000 != 0 {
                ((exponent + 1) << 24) | (mantissa >> 8)
            } else {
                (exponent << 24) | (mantissa & 0x007F_FFFF)
            }
        }
    };
    Ok(format!("{:08x}", compact))
}

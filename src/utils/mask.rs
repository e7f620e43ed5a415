use crate::utils::error::MaskError;

/// Per-dimension flag set, bit `i` is the flag for dimension `i`
pub type Bitmask = u32;

pub const MAX_MASK_FLAGS: u32 = Bitmask::BITS;

/// Decode a comma tolerant mask string such as `"1,0,1"` into a bitmask.
///
/// Commas are skipped without consuming a bit position, `'1'` sets the current
/// bit and `'0'` only advances it. Hardware code relies on these exact bit
/// positions, so `"1,,0,1"` and `"101"` both decode to `0b101`.
pub fn decode_mask(text: &str) -> Result<Bitmask, MaskError> {
    let mut result: Bitmask = 0;
    let mut idx: u32 = 0;

    for (position, character) in text.char_indices() {
        let set = match character {
            ',' => continue,
            '1' => true,
            '0' => false,
            _ => {
                return Err(MaskError::InvalidCharacter {
                    character,
                    position,
                });
            }
        };

        if idx >= MAX_MASK_FLAGS {
            return Err(MaskError::TooManyFlags {
                limit: MAX_MASK_FLAGS,
            });
        }

        if set {
            result |= 1 << idx;
        }
        idx += 1;
    }

    Ok(result)
}

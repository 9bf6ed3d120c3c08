/*!
 * Serde helper functions for skip_serializing_if
 */

/// Skip serializing if u64 is zero
pub fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

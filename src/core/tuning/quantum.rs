//! `Win32PrioritySeparation` bit arithmetic.
//!
//! The registry value packs three scheduler knobs into one DWORD. Backends read
//! the current value, flip one bit and write it back.

/// Foreground boost bit.
pub const FOREGROUND_BOOST: u32 = 0x01;
/// Variable quantum bit.
pub const VARIABLE_QUANTUM: u32 = 0x02;
/// Long quantum bit.
pub const LONG_QUANTUM: u32 = 0x10;

/// Value assumed when the registry value cannot be read.
pub const FALLBACK_SEPARATION: u32 = 2;

/// Return `current` (or the fallback) with `bit` set or cleared.
pub fn with_flag(current: Option<u32>, bit: u32, enable: bool) -> u32 {
    let value = current.unwrap_or(FALLBACK_SEPARATION);
    if enable {
        value | bit
    } else {
        value & !bit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear_bits() {
        assert_eq!(with_flag(Some(0x26), FOREGROUND_BOOST, true), 0x27);
        assert_eq!(with_flag(Some(0x27), FOREGROUND_BOOST, false), 0x26);
        assert_eq!(with_flag(Some(0x02), LONG_QUANTUM, true), 0x12);
        assert_eq!(with_flag(Some(0x12), VARIABLE_QUANTUM, false), 0x10);
    }

    #[test]
    fn test_unreadable_value_uses_fallback() {
        assert_eq!(with_flag(None, FOREGROUND_BOOST, true), 0x03);
        assert_eq!(with_flag(None, VARIABLE_QUANTUM, false), 0x00);
    }

    #[test]
    fn test_idempotent() {
        let once = with_flag(Some(0x18), LONG_QUANTUM, true);
        assert_eq!(with_flag(Some(once), LONG_QUANTUM, true), once);
    }
}

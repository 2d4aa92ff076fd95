//! ABI version stamp for wacro plugin modules.
//!
//! Linking this crate into a module leaves the ABI version in two places:
//! a `wacro_abi` metadata section holding the raw 4-byte word, and the exported
//! symbol [`WACRO_ABI_VERSION`]. Tools can read the former without executing anything,
//! code linked into the same binary can read the latter directly.
//!
//! A plugin crate that references nothing else from here still has to pull it in:
//! ```ignore
//! extern crate wacro_abi;
//! ```

// A macro rather than a constant so it can be used inside #[link_section] and asm templates.
#[macro_export]
macro_rules! section_name {
    () => {
        "wacro_abi"
    };
}

/// Current ABI version. Bump when the binary contract between plugins and their host changes.
pub const ABI_VERSION: u32 = 1;

/// Name of the metadata section carrying the stamp.
pub const SECTION_NAME: &str = section_name!();

/// Exact payload of the metadata section.
pub const STAMP_BYTES: [u8; 4] = ABI_VERSION.to_ne_bytes();

/// The ABI version as a linkable symbol.
#[no_mangle]
pub static WACRO_ABI_VERSION: u32 = ABI_VERSION;

// rustc turns #[link_section] statics into custom sections on wasm, which are never
// part of linear memory. The ordinary data-section route would not give us that elsewhere.
#[cfg(target_family = "wasm")]
#[used]
#[link_section = section_name!()]
static WACRO_ABI_STAMP: [u8; 4] = STAMP_BYTES;

// empty flags: no SHF_ALLOC, so the section is never mapped at load time
#[cfg(all(
    any(target_os = "linux", target_os = "android"),
    any(
        target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64", target_arch = "riscv64",
        target_arch = "loongarch64", target_arch = "s390x",
    ),
))]
core::arch::global_asm!(
    concat!(".pushsection ", section_name!(), ",\"\",@progbits"),
    ".4byte {version}",
    ".popsection",
    version = const ABI_VERSION,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_is_one_word() {
        assert_eq!(4, STAMP_BYTES.len());
        assert_eq!(ABI_VERSION, u32::from_ne_bytes(STAMP_BYTES));
    }

    #[test]
    fn symbol_matches_constant() {
        assert_eq!(ABI_VERSION, WACRO_ABI_VERSION);
    }

    #[test]
    fn version_one_byte_layout() {
        assert_eq!(1, ABI_VERSION);
        if cfg!(target_endian = "little") {
            assert_eq!([1, 0, 0, 0], STAMP_BYTES);
        } else {
            assert_eq!([0, 0, 0, 1], STAMP_BYTES);
        }
    }

    #[test]
    fn section_name_is_fixed() {
        assert_eq!("wacro_abi", SECTION_NAME);
    }
}

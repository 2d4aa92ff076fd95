//! Inspection of wacro ABI stamps in compiled plugin modules
//!
//! The stamp itself is emitted by the `wacro-abi` crate. This crate reads it back:
//! from the `wacro_abi` custom section of WebAssembly modules ([`stamp`]),
//! from the `wacro_abi` section of native objects and libraries ([`native`]),
//! or from the exported `WACRO_ABI_VERSION` symbol of native libraries ([`symbol`]).

pub use error::{WacroError,Result};
pub use stamp::{AbiStamp, CustomSectionInfo, custom_sections, read_stamp, read_stamp_file, require_stamp};
pub use native::{native_section, read_native_stamp, NativeSectionInfo};
pub use symbol::{linked_abi_version, StampedLibrary};
pub use wacro_abi::{ABI_VERSION, SECTION_NAME, STAMP_BYTES};

pub mod native;
pub mod stamp;
pub mod symbol;
mod error;

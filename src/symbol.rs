//! Reading the linkable `WACRO_ABI_VERSION` constant from native libraries.
//!
//! Opening a library runs its loader-level initializers, but nothing here calls into it;
//! the exported static is only read.

use std::path::{Path, PathBuf};

use dlopen2::wrapper::Container;
use dlopen2::wrapper::WrapperApi;

use crate::error;

#[derive(dlopen2_derive::WrapperApi)]
pub struct AbiSymbolBindings<'a> {
    #[dlopen2_name = "WACRO_ABI_VERSION"]
    abi_version: &'a u32,
}

pub struct StampedLibrary {
    path: PathBuf,
    abi_version: u32,
}

impl StampedLibrary {

    pub fn open<P: AsRef<Path>>(libname: P) -> error::Result<Self> {
        let path = libname.as_ref().canonicalize()?;
        log::debug!("Opening library: '{}'", path.display());
        let api: Container<AbiSymbolBindings> = unsafe { Container::load(&path) }?;
        let abi_version = *api.abi_version();
        log::debug!("WACRO_ABI_VERSION: {abi_version}");
        Ok(Self { path, abi_version })
    }

    pub fn abi_version(&self) -> u32 {
        self.abi_version
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn check(&self, expected: u32) -> error::Result<()> {
        error::check_version(expected, self.abi_version)
    }
}

extern "C" {
    #[link_name = "WACRO_ABI_VERSION"]
    static LINKED_ABI_VERSION: u32;
}

/// Reads the stamp symbol the way any other unit linked into this binary would, by name.
pub fn linked_abi_version() -> u32 {
    unsafe { LINKED_ABI_VERSION }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use crate::error::WacroError;
    use super::{linked_abi_version, StampedLibrary};

    #[test]
    fn linked_symbol_matches_constant() {
        assert_eq!(wacro_abi::ABI_VERSION, linked_abi_version());
        assert_eq!(wacro_abi::WACRO_ABI_VERSION, linked_abi_version());
    }

    #[test]
    fn missing_library() {
        let result = StampedLibrary::open("does/not/exist/libplugin.so");
        assert!(matches!(result, Err(WacroError::IoError(_))));
    }

    #[test]
    fn not_a_library() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a shared object").unwrap();
        let result = StampedLibrary::open(file.path());
        assert!(matches!(result, Err(WacroError::DlOpenError(_))));
    }
}

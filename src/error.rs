use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, WacroError>;

#[derive(ThisError,Debug)]
pub enum WacroError {
    #[error("IO Error")]
    IoError(#[from] std::io::Error),
    #[error("Not a valid WebAssembly module")]
    WasmError(#[from] wasmparser::BinaryReaderError),
    #[error("Not a readable object file")]
    ObjectError(#[from] object::Error),
    #[error("DlOpen Error")]
    DlOpenError(#[from] dlopen2::Error),
    #[error("No '{}' custom section", wacro_abi::SECTION_NAME)]
    MissingSection,
    #[error("Duplicate '{}' custom section at offsets {first} and {second}", wacro_abi::SECTION_NAME)]
    DuplicateSection { first: usize, second: usize },
    #[error("ABI stamp must be 4 bytes, found {0}")]
    InvalidSectionSize(usize),
    #[error("'{}' section is mapped into memory at load time", wacro_abi::SECTION_NAME)]
    LoadedSection,
    #[error("ABI version mismatch: expected {expected}, found {found}")]
    AbiMismatch { expected: u32, found: u32 },
}

pub(crate) fn check_version(expected: u32, found: u32) -> Result<()> {
    if found != expected {
        return Err(WacroError::AbiMismatch { expected, found });
    }
    Ok(())
}

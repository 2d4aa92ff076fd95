//! Reading the ABI stamp out of compiled WebAssembly modules, without instantiating them.
//!
use std::path::Path;

use wasmparser::{Parser, Payload};
use wacro_abi::SECTION_NAME;

use crate::error::{self, Result, WacroError};
use crate::native;

/// Decoded content of a `wacro_abi` custom section.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub struct AbiStamp {
    pub version: u32,
    /// File offset of the 4-byte payload
    pub offset: usize,
}

impl AbiStamp {
    pub fn check(&self, expected: u32) -> Result<()> {
        error::check_version(expected, self.version)
    }
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct CustomSectionInfo {
    pub name: String,
    pub offset: usize,
    pub size: usize,
}

/// Finds the ABI stamp, if the module carries one.
pub fn read_stamp(wasm: &[u8]) -> Result<Option<AbiStamp>> {
    let mut found: Option<AbiStamp> = None;
    for payload in Parser::new(0).parse_all(wasm) {
        let reader = match payload? {
            Payload::CustomSection(reader) if reader.name() == SECTION_NAME => reader,
            _ => continue,
        };
        let offset = reader.data_offset();
        log::trace!("'{SECTION_NAME}' section at offset {offset}");
        if let Some(first) = found {
            return Err(WacroError::DuplicateSection { first: first.offset, second: offset });
        }
        let data = reader.data();
        let bytes: [u8; 4] = data.try_into()
            .map_err(|_| WacroError::InvalidSectionSize(data.len()))?;
        // wasm is little-endian, whatever the host is
        found = Some(AbiStamp { version: u32::from_le_bytes(bytes), offset });
    }
    Ok(found)
}

pub fn require_stamp(wasm: &[u8]) -> Result<AbiStamp> {
    read_stamp(wasm)?.ok_or(WacroError::MissingSection)
}

const WASM_MAGIC: &[u8] = b"\0asm";

/// Reads the stamp of a wasm module, or of a native object/library when the file is not wasm.
pub fn read_stamp_file<P: AsRef<Path>>(path: P) -> Result<Option<AbiStamp>> {
    let path = path.as_ref();
    log::debug!("Reading module: '{}'", path.display());
    let data = std::fs::read(path)?;
    if data.starts_with(WASM_MAGIC) {
        read_stamp(&data)
    } else {
        native::read_native_stamp(&data)
    }
}

/// Lists every custom section in module order.
pub fn custom_sections(wasm: &[u8]) -> Result<Vec<CustomSectionInfo>> {
    let mut sections = Vec::new();
    for payload in Parser::new(0).parse_all(wasm) {
        if let Payload::CustomSection(reader) = payload? {
            sections.push(CustomSectionInfo {
                name: reader.name().to_string(),
                offset: reader.data_offset(),
                size: reader.data().len(),
            });
        }
    }
    Ok(sections)
}

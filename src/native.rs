//! Reading the ABI stamp out of native object files and shared libraries, without loading them.
//!
use object::{Object, ObjectSection, SectionFlags};
use wacro_abi::SECTION_NAME;

use crate::error::{Result, WacroError};
use crate::stamp::AbiStamp;

#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub struct NativeSectionInfo {
    /// File offset of the section payload
    pub offset: usize,
    pub size: usize,
    /// Whether the loader maps the section into the process image
    pub loaded: bool,
}

pub fn native_section(data: &[u8], name: &str) -> Result<Option<NativeSectionInfo>> {
    let file = object::File::parse(data)?;
    let section = match file.section_by_name(name) {
        Some(section) => section,
        None => return Ok(None),
    };
    let (offset, size) = section.file_range().unwrap_or((0, 0));
    Ok(Some(NativeSectionInfo {
        offset: offset as usize,
        size: size as usize,
        loaded: is_loaded(section.flags()),
    }))
}

/// Finds the ABI stamp in an ELF/COFF/Mach-O file. The word is decoded in the file's byte order.
pub fn read_native_stamp(data: &[u8]) -> Result<Option<AbiStamp>> {
    let file = object::File::parse(data)?;
    let section = match file.section_by_name(SECTION_NAME) {
        Some(section) => section,
        None => return Ok(None),
    };
    if is_loaded(section.flags()) {
        return Err(WacroError::LoadedSection);
    }
    let payload = section.data()?;
    let bytes: [u8; 4] = payload.try_into()
        .map_err(|_| WacroError::InvalidSectionSize(payload.len()))?;
    let version = if file.is_little_endian() {
        u32::from_le_bytes(bytes)
    } else {
        u32::from_be_bytes(bytes)
    };
    let offset = section.file_range().map(|(offset, _)| offset as usize).unwrap_or(0);
    log::trace!("'{SECTION_NAME}' section at offset {offset}");
    Ok(Some(AbiStamp { version, offset }))
}

fn is_loaded(flags: SectionFlags) -> bool {
    match flags {
        SectionFlags::Elf { sh_flags } => sh_flags & u64::from(object::elf::SHF_ALLOC) != 0,
        SectionFlags::Coff { characteristics } => characteristics & object::pe::IMAGE_SCN_MEM_DISCARDABLE == 0,
        // Mach-O sections always live in a segment
        _ => true,
    }
}

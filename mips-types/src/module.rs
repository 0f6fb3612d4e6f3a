use std::io;
use std::io::{Read, Write};

/// Magic bytes at the start of every object file
pub const MIPS_MAGIC: [u8; 4] = *b"MIPS";
/// The only object format version this toolchain produces or accepts
pub const MIPS_VERSION: u8 = 1;

pub const SEGMENT_TEXT: u8 = 0;
pub const SEGMENT_DATA: u8 = 1;

/// A MIPS object module: header, section headers, and section payloads.
///
/// Header metadata is little-endian on disk; the instruction payload is a
/// packed sequence of big-endian words and is carried through untouched.
#[derive(Debug, Default)]
pub struct MipsModule {
    pub header: MipsModuleHeader,
    pub sections: Vec<MipsSection>,
}

/// The 8-byte module header
#[derive(Debug)]
pub struct MipsModuleHeader {
    /// Must be `MIPS_MAGIC`
    pub magic: [u8; 4],
    /// Written as 0; readers treat the payload as big-endian regardless
    pub endianness: u8,
    /// Must be `MIPS_VERSION`
    pub version: u8,
    pub section_count: u8,
}

#[derive(Debug)]
pub struct MipsSection {
    pub header: MipsSectionHeader,
    pub data: Vec<u8>,
}

/// A 12-byte section header: segment byte, 3 bytes of padding, offset, size
#[derive(Copy, Clone, Debug)]
pub struct MipsSectionHeader {
    pub segment: u8,
    pub offset: u32,
    pub size: u32,
}

impl Default for MipsModuleHeader {
    fn default() -> Self {
        Self {
            magic: MIPS_MAGIC,
            endianness: 0,
            version: MIPS_VERSION,
            section_count: 0,
        }
    }
}

impl MipsModule {
    /// Build a single-section module holding the given text payload
    pub fn from_text(binary: Vec<u8>) -> Self {
        Self {
            header: MipsModuleHeader {
                section_count: 1,
                ..MipsModuleHeader::default()
            },
            sections: vec![MipsSection {
                header: MipsSectionHeader {
                    segment: SEGMENT_TEXT,
                    offset: 0,
                    size: binary.len() as u32,
                },
                data: binary,
            }],
        }
    }

    /// Parse the input as a MIPS object module
    pub fn parse<R: Read>(input: &mut R) -> io::Result<Self> {
        let header = MipsModuleHeader::parse(input)?;

        let section_headers = (0..header.section_count)
            .map(|_| MipsSectionHeader::parse(input))
            .collect::<io::Result<Vec<_>>>()?;

        // Payloads follow the section header table, in table order
        let sections = section_headers
            .into_iter()
            .map(|section_header| {
                let mut data = vec![0; section_header.size as usize];
                input.read_exact(&mut data)?;

                Ok(MipsSection {
                    header: section_header,
                    data,
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        Ok(Self { header, sections })
    }

    /// Write the module
    pub fn write<W: Write>(&self, output: &mut W) -> io::Result<()> {
        self.header.write(output)?;

        for section in &self.sections {
            section.header.write(output)?;
        }

        for section in &self.sections {
            output.write_all(&section.data)?;
        }

        Ok(())
    }

    /// Get the first text section, if the module has one
    pub fn text_section(&self) -> Option<&MipsSection> {
        self.sections
            .iter()
            .find(|section| section.header.segment == SEGMENT_TEXT)
    }
}

impl MipsModuleHeader {
    /// Parse the input as a module header
    pub fn parse<R: Read>(input: &mut R) -> io::Result<Self> {
        let mut magic = [0; 4];
        input.read_exact(&mut magic)?;

        if magic != MIPS_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid magic number",
            ));
        }

        let endianness = read_u8(input)?;
        let version = read_u8(input)?;

        if version != MIPS_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Unknown version number",
            ));
        }

        let section_count = read_u8(input)?;

        // Skip past the padding byte
        read_u8(input)?;

        Ok(Self {
            magic,
            endianness,
            version,
            section_count,
        })
    }

    /// Write the module header
    pub fn write<W: Write>(&self, output: &mut W) -> io::Result<()> {
        output.write_all(&self.magic)?;
        output.write_all(&[self.endianness, self.version, self.section_count, 0])?;

        Ok(())
    }
}

impl MipsSectionHeader {
    /// Parse the input as a section header
    pub fn parse<R: Read>(input: &mut R) -> io::Result<Self> {
        let segment = read_u8(input)?;

        // Skip past the three bytes of padding
        read_u8(input)?;
        read_u8(input)?;
        read_u8(input)?;

        Ok(Self {
            segment,
            offset: read_u32(input)?,
            size: read_u32(input)?,
        })
    }

    /// Write the section header
    pub fn write<W: Write>(&self, output: &mut W) -> io::Result<()> {
        output.write_all(&[self.segment, 0, 0, 0])?;
        output.write_all(&self.offset.to_le_bytes())?;
        output.write_all(&self.size.to_le_bytes())?;

        Ok(())
    }
}

fn read_u8<R: Read>(input: &mut R) -> io::Result<u8> {
    let mut bytes = [0; 1];
    input.read_exact(&mut bytes)?;
    Ok(bytes[0])
}

fn read_u32<R: Read>(input: &mut R) -> io::Result<u32> {
    let mut bytes = [0; 4];
    input.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn module_round_trip() {
        let payload = vec![0x01, 0x2A, 0x40, 0x20, 0xDE, 0xAD, 0xBE, 0xEF];
        let module = MipsModule::from_text(payload.clone());

        let mut bytes = Vec::new();
        module.write(&mut bytes).unwrap();

        // 8-byte header + one 12-byte section header + payload
        assert_eq!(bytes.len(), 8 + 12 + payload.len());
        assert_eq!(&bytes[0..4], b"MIPS");

        let parsed = MipsModule::parse(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(parsed.header.version, MIPS_VERSION);
        assert_eq!(parsed.header.section_count, 1);

        let text = parsed.text_section().unwrap();
        assert_eq!(text.header.segment, SEGMENT_TEXT);
        assert_eq!(text.header.offset, 0);
        assert_eq!(text.header.size, payload.len() as u32);
        assert_eq!(text.data, payload);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = Vec::new();
        MipsModule::from_text(vec![0; 4]).write(&mut bytes).unwrap();
        bytes[0] = b'X';

        let error = MipsModule::parse(&mut Cursor::new(bytes)).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = Vec::new();
        MipsModule::from_text(vec![0; 4]).write(&mut bytes).unwrap();
        bytes[5] = 2;

        let error = MipsModule::parse(&mut Cursor::new(bytes)).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut bytes = Vec::new();
        MipsModule::from_text(vec![0; 16]).write(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 4);

        assert!(MipsModule::parse(&mut Cursor::new(bytes)).is_err());
    }
}

use serde::Serialize;

use crate::core::bit_coder::{ByteReader, ReaderErr};


#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("Not a Draco file")]
    NotADracoFile,
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("Unknown encoder method id: {0}")]
    UnknownEncoderMethod(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EncoderMethod {
    Sequential,
    Edgebreaker,
}

impl EncoderMethod {
    #[inline]
    pub fn read_from<R>(reader: &mut R) -> Result<Self, Err>
        where R: ByteReader
    {
        match reader.read_u8()? {
            0 => Ok(EncoderMethod::Sequential),
            1 => Ok(EncoderMethod::Edgebreaker),
            id => Err(Err::UnknownEncoderMethod(id)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Header {
    pub version_major: u8,
    pub version_minor: u8,
    /// Raw encoder type. `0` is a point cloud and `1` a triangular mesh; see
    /// [`GeometryType::from_id`](crate::core::geometry::GeometryType::from_id).
    pub encoder_type: u8,
    pub encoding_method: EncoderMethod,
    pub contains_metadata: bool,
}

const MAGIC: &[u8; 5] = b"DRACO";
const METADATA_FLAG_MASK: u16 = 0x8000;

pub fn decode_header<W>(reader: &mut W) -> Result<Header, Err>
where
    W: ByteReader,
{
    // Read the draco string
    for &expected in MAGIC {
        match reader.read_u8() {
            Ok(b) if b == expected => {},
            _ => return Err(Err::NotADracoFile),
        }
    }

    // Read the version
    let version_major = reader.read_u8()?;
    let version_minor = reader.read_u8()?;

    // Read the encoder type
    let encoder_type = reader.read_u8()?;

    // Read the encoding method
    let encoding_method = EncoderMethod::read_from(reader)?;

    let flags = reader.read_u16()?;

    let contains_metadata = flags & METADATA_FLAG_MASK != 0;

    Ok (
        Header {
            version_major,
            version_minor,
            encoder_type,
            encoding_method,
            contains_metadata,
        }
    )
}

/// Parses the header at the start of `data`.
pub fn read_header(data: &[u8]) -> Result<Header, Err> {
    decode_header(&mut data.iter().copied())
}


#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A Draco 2.2 header followed by a few payload bytes.
    pub(crate) fn header_bytes(encoder_type: u8, method: u8, flags: u16) -> Vec<u8> {
        let mut out = b"DRACO".to_vec();
        out.extend_from_slice(&[2, 2, encoder_type, method]);
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&[0xAB, 0xCD]);
        out
    }

    #[test]
    fn mesh_header() {
        let header = read_header(&header_bytes(1, 1, 0)).unwrap();
        assert_eq!(header.version_major, 2);
        assert_eq!(header.version_minor, 2);
        assert_eq!(header.encoder_type, 1);
        assert_eq!(header.encoding_method, EncoderMethod::Edgebreaker);
        assert!(!header.contains_metadata);
    }

    #[test]
    fn point_cloud_header_with_metadata() {
        let header = read_header(&header_bytes(0, 0, 0x8000)).unwrap();
        assert_eq!(header.encoder_type, 0);
        assert_eq!(header.encoding_method, EncoderMethod::Sequential);
        assert!(header.contains_metadata);
    }

    #[test]
    fn wrong_magic() {
        let mut data = header_bytes(1, 1, 0);
        data[0] = b'd';
        assert!(matches!(read_header(&data), Err(Err::NotADracoFile)));
        assert!(matches!(read_header(b"DRA"), Err(Err::NotADracoFile)));
    }

    #[test]
    fn truncated_header() {
        let data = header_bytes(1, 1, 0);
        assert!(matches!(read_header(&data[..9]), Err(Err::NotEnoughData(ReaderErr::NotEnoughData))));
    }

    #[test]
    fn unknown_method() {
        let data = header_bytes(1, 5, 0);
        assert!(matches!(read_header(&data), Err(Err::UnknownEncoderMethod(5))));
    }
}

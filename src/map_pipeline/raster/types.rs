//! Bitmap header layouts
//!
//! Minimal uncompressed 24-bit bitmap metadata: the 14-byte file header and
//! the 40-byte info header, serialized little-endian field by field.

/// 14-byte bitmap file header.
///
/// The size field counts 4 bytes per pixel on top of the 54 header bytes,
/// matching the layout contract of the original map files even though the
/// pixel stream itself is 3 bytes per cell.
#[derive(Debug, Clone, Copy)]
pub struct BmpFileHeader {
    file_size: u32,
}

impl BmpFileHeader {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            file_size: 54 + 4 * width * height,
        }
    }

    pub fn to_bytes(self) -> [u8; 14] {
        let mut bytes = [0u8; 14];
        bytes[0..2].copy_from_slice(b"BM");
        bytes[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        // reserved bytes stay zero
        bytes[10..14].copy_from_slice(&54u32.to_le_bytes());
        bytes
    }
}

/// 40-byte bitmap info header: one color plane, 24 bits per pixel, no
/// compression, no color table. Resolutions scale a 1000 base unit by the
/// aspect ratio reduced through the gcd of the dimensions.
#[derive(Debug, Clone, Copy)]
pub struct BmpInfoHeader {
    width: i32,
    height: i32,
    horizontal_resolution: i32,
    vertical_resolution: i32,
}

impl BmpInfoHeader {
    pub fn new(width: u32, height: u32) -> Self {
        let divisor = gcd(width, height);
        Self {
            width: width as i32,
            height: height as i32,
            horizontal_resolution: 1000 * (width / divisor) as i32,
            vertical_resolution: 1000 * (height / divisor) as i32,
        }
    }

    pub fn to_bytes(self) -> [u8; 40] {
        let mut bytes = [0u8; 40];
        bytes[0..4].copy_from_slice(&40u32.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.width.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.height.to_le_bytes());
        bytes[12..14].copy_from_slice(&1u16.to_le_bytes());
        bytes[14..16].copy_from_slice(&24u16.to_le_bytes());
        // compression, raw data size
        bytes[16..20].copy_from_slice(&0u32.to_le_bytes());
        bytes[20..24].copy_from_slice(&0u32.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.horizontal_resolution.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.vertical_resolution.to_le_bytes());
        // color table entries, important colors
        bytes[32..36].copy_from_slice(&0u32.to_le_bytes());
        bytes[36..40].copy_from_slice(&0u32.to_le_bytes());
        bytes
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_header_layout() {
        let bytes = BmpFileHeader::new(4, 4).to_bytes();
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(u32::from_le_bytes(bytes[2..6].try_into().unwrap()), 54 + 4 * 16);
        assert_eq!(u32::from_le_bytes(bytes[6..10].try_into().unwrap()), 0);
        assert_eq!(u32::from_le_bytes(bytes[10..14].try_into().unwrap()), 54);
    }

    #[test]
    fn info_header_layout() {
        let bytes = BmpInfoHeader::new(8, 4).to_bytes();
        assert_eq!(u32::from_le_bytes(bytes[0..4].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(bytes[4..8].try_into().unwrap()), 8);
        assert_eq!(i32::from_le_bytes(bytes[8..12].try_into().unwrap()), 4);
        assert_eq!(u16::from_le_bytes(bytes[12..14].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[14..16].try_into().unwrap()), 24);
        // gcd(8, 4) = 4: resolutions 2000 x 1000
        assert_eq!(i32::from_le_bytes(bytes[24..28].try_into().unwrap()), 2000);
        assert_eq!(i32::from_le_bytes(bytes[28..32].try_into().unwrap()), 1000);
    }
}

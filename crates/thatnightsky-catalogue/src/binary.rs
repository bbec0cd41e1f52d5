//! Packed binary star catalogue
//!
//! Layout (little-endian):
//!
//! ```text
//! magic   [u8; 8]  "TNSCAT01"
//! count   u32
//! records count × { id: u32, ra_deg: f64, dec_deg: f64, magnitude: f32 }
//! ```
//!
//! Each record is 24 bytes. The file must end exactly after the last record.

use std::fs;
use std::path::Path;
use thatnightsky_core::error::{NightSkyError, Result};
use thatnightsky_core::models::CatalogueStar;

/// File signature
pub const MAGIC: &[u8; 8] = b"TNSCAT01";

/// Bytes per star record
pub const RECORD_SIZE: usize = 24;

const HEADER_SIZE: usize = MAGIC.len() + 4;

/// Read a binary catalogue file
pub fn read_binary_catalogue(path: &Path) -> Result<Vec<CatalogueStar>> {
    let bytes = fs::read(path).map_err(|e| NightSkyError::catalogue(path, e.to_string()))?;
    decode(&bytes).map_err(|reason| NightSkyError::catalogue(path, reason))
}

/// Write a binary catalogue file
pub fn write_binary_catalogue(path: &Path, stars: &[CatalogueStar]) -> Result<()> {
    let bytes = encode(stars).map_err(|reason| NightSkyError::catalogue(path, reason))?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Encode stars into the binary layout
pub fn encode(stars: &[CatalogueStar]) -> std::result::Result<Vec<u8>, String> {
    let count = u32::try_from(stars.len())
        .map_err(|_| format!("too many stars for one file: {}", stars.len()))?;

    let mut out = Vec::with_capacity(HEADER_SIZE + stars.len() * RECORD_SIZE);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&count.to_le_bytes());
    for star in stars {
        out.extend_from_slice(&star.id.0.to_le_bytes());
        out.extend_from_slice(&star.ra_deg.to_le_bytes());
        out.extend_from_slice(&star.dec_deg.to_le_bytes());
        out.extend_from_slice(&(star.magnitude as f32).to_le_bytes());
    }
    Ok(out)
}

/// Decode the binary layout
pub fn decode(bytes: &[u8]) -> std::result::Result<Vec<CatalogueStar>, String> {
    let mut reader = Reader { bytes, offset: 0 };

    let magic = reader.take(MAGIC.len())?;
    if magic != MAGIC {
        return Err(format!(
            "bad magic {:?}, expected {:?}",
            String::from_utf8_lossy(magic),
            "TNSCAT01"
        ));
    }

    let count = reader.u32()? as usize;
    let expected = count
        .checked_mul(RECORD_SIZE)
        .and_then(|n| n.checked_add(HEADER_SIZE))
        .ok_or_else(|| format!("record count {} overflows", count))?;
    if bytes.len() < expected {
        return Err(format!(
            "short read: header announces {} records ({} bytes) but file has {} bytes",
            count,
            expected,
            bytes.len()
        ));
    }
    if bytes.len() > expected {
        return Err(format!("{} trailing bytes after {} records", bytes.len() - expected, count));
    }

    let mut stars = Vec::with_capacity(count);
    for _ in 0..count {
        let id = reader.u32()?;
        let ra = reader.f64()?;
        let dec = reader.f64()?;
        let mag = reader.f32()?;
        stars.push(CatalogueStar::new(id, ra, dec, f64::from(mag)));
    }
    Ok(stars)
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> std::result::Result<&'a [u8], String> {
        let end = self.offset + len;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or_else(|| format!("short read at byte {}", self.offset))?;
        self.offset = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> std::result::Result<[u8; N], String> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn u32(&mut self) -> std::result::Result<u32, String> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn f32(&mut self) -> std::result::Result<f32, String> {
        Ok(f32::from_le_bytes(self.array()?))
    }

    fn f64(&mut self) -> std::result::Result<f64, String> {
        Ok(f64::from_le_bytes(self.array()?))
    }
}

//! Recorrido de chunks PNG hasta `IEND`.

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const IEND_CHUNK_TYPE: &[u8; 4] = b"IEND";

const CHUNK_HEADER_LEN: usize = 8;
const CHUNK_CRC_LEN: usize = 4;

/// Desplazamiento justo después del CRC de `IEND`, o `None` si no se alcanza.
pub fn locate_end(data: &[u8]) -> Option<usize> {
    if !data.starts_with(&PNG_SIGNATURE) {
        return None;
    }

    let mut offset = PNG_SIGNATURE.len();
    while offset.checked_add(CHUNK_HEADER_LEN)? <= data.len() {
        let length = u32::from_be_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]) as usize;
        let chunk_type = &data[offset + 4..offset + 8];

        let next_offset = offset
            .checked_add(CHUNK_HEADER_LEN)?
            .checked_add(length)?
            .checked_add(CHUNK_CRC_LEN)?;

        if chunk_type == IEND_CHUNK_TYPE {
            return Some(next_offset);
        }

        offset = next_offset;
    }

    None
}

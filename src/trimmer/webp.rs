//! Longitud declarada en la cabecera RIFF de WebP.

pub const RIFF_SIGNATURE: &[u8; 4] = b"RIFF";
const RIFF_HEADER_LEN: usize = 8;

/// El tamaño RIFF excluye los 8 bytes de cabecera. Nunca se rellena: si el
/// archivo es más corto que lo declarado, el desplazamiento queda fuera del
/// buffer y se conserva intacto.
pub fn locate_end(data: &[u8]) -> Option<usize> {
    if data.len() < RIFF_HEADER_LEN || !data.starts_with(RIFF_SIGNATURE) {
        return None;
    }

    let declared = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
    declared.checked_add(RIFF_HEADER_LEN)
}

//! Fin de flujo GIF: último byte de trailer.

pub const GIF_TRAILER: u8 = 0x3B;

pub fn locate_end(data: &[u8]) -> Option<usize> {
    data.iter()
        .rposition(|&byte| byte == GIF_TRAILER)
        .map(|pos| pos + 1)
}

//! Fin de flujo JPEG.
//!
//! JPEG no declara su longitud, así que se toma la última aparición del
//! marcador EOI. Un EOI falso al principio no oculta datos posteriores, pero
//! contenedores con varias imágenes (MPF) pueden recortarse de más.

use super::rfind;

pub const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

pub fn locate_end(data: &[u8]) -> Option<usize> {
    rfind(data, &JPEG_EOI).map(|pos| pos + JPEG_EOI.len())
}

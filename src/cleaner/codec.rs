//! Frontera con el códec de imágenes.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::error::UnsupportedErrorKind;
use image::{ColorType, DynamicImage, ImageError, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::Cursor;

use crate::error::CodecError;

/// Calidad de recompresión para JPEG.
pub const JPEG_QUALITY: u8 = 95;

/// Píxeles decodificados y el formato que el códec detectó en el contenido.
pub struct Decoded {
    pub image: DynamicImage,
    pub format: Option<ImageFormat>,
}

/// Decodifica bytes a píxeles y los vuelve a codificar sin metadata.
pub trait ImageCodec {
    fn decode(&self, data: &[u8]) -> Result<Decoded, CodecError>;

    fn encode(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, CodecError>;
}

/// Implementación basada en el crate `image` (y `jpeg-encoder` para JPEG), que
/// nunca copia EXIF, ICC ni XMP al codificar.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateCodec;

impl ImageCodec for ImageCrateCodec {
    fn decode(&self, data: &[u8]) -> Result<Decoded, CodecError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        let format = reader.format().ok_or(CodecError::Unidentifiable)?;

        // Decodificar la imagen completa hace aflorar los archivos truncados.
        let image = reader.decode().map_err(|error| match error {
            ImageError::Unsupported(ref unsupported)
                if matches!(unsupported.kind(), UnsupportedErrorKind::Format(_)) =>
            {
                CodecError::Unidentifiable
            }
            other => CodecError::Decode(other.to_string()),
        })?;

        Ok(Decoded {
            image,
            format: Some(format),
        })
    }

    fn encode(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, CodecError> {
        if format == ImageFormat::Jpeg {
            return encode_jpeg(image, true);
        }

        let mut buffer = Cursor::new(Vec::new());

        let result = match format {
            ImageFormat::Png => {
                let encoder = PngEncoder::new_with_quality(
                    &mut buffer,
                    CompressionType::Best,
                    FilterType::Adaptive,
                );
                image.write_with_encoder(encoder)
            }
            other => image.write_to(&mut buffer, other),
        };

        result.map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

/// Codifica en JPEG a calidad [`JPEG_QUALITY`]. Con `optimize_huffman` las
/// tablas de Huffman se calculan a partir de la propia imagen en lugar de
/// usar las estándar.
pub(super) fn encode_jpeg(
    image: &DynamicImage,
    optimize_huffman: bool,
) -> Result<Vec<u8>, CodecError> {
    let image = jpeg_compatible(image);
    let too_large = || {
        CodecError::Encode(format!(
            "dimensiones {}x{} fuera del límite de JPEG",
            image.width(),
            image.height()
        ))
    };
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;
    let color = match image.color() {
        ColorType::L8 => jpeg_encoder::ColorType::Luma,
        _ => jpeg_encoder::ColorType::Rgb,
    };

    let mut output = Vec::new();
    let mut encoder = jpeg_encoder::Encoder::new(&mut output, JPEG_QUALITY);
    encoder.set_optimized_huffman_tables(optimize_huffman);
    encoder
        .encode(image.as_bytes(), width, height, color)
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    Ok(output)
}

/// JPEG no admite canal alfa ni 16 bits por canal.
fn jpeg_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(image),
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8()))
        }
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}

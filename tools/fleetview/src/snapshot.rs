//! Turn a graphics plane into pixels.

use fleet::platform::emulated::Variant;
use image::{imageops, Rgb, RgbImage};

/// Colour set 0 of the base hardware's PMODE 3: green, yellow, blue, red.
const CSS0: [Rgb<u8>; 4] = [
    Rgb([0, 255, 0]),
    Rgb([255, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([255, 0, 0]),
];

const BASE_WIDTH: u32 = 128;
const BASE_HEIGHT: u32 = 192;
const ENHANCED_WIDTH: u32 = 320;
const ENHANCED_HEIGHT: u32 = 200;

/// Decode a 6-bit `R1 G1 B1 R0 G0 B0` colour register value.
pub fn rgb6(value: u8) -> Rgb<u8> {
    let channel = |hi: u8, lo: u8| {
        let level = ((value >> hi) & 1) << 1 | ((value >> lo) & 1);
        level * 85
    };
    Rgb([channel(5, 2), channel(4, 1), channel(3, 0)])
}

/// Render `plane` as the given hardware would show it, each pixel
/// repeated `scale` times in both directions.
pub fn render(plane: &[u8], variant: Variant, palette: &[u8; 16], scale: u32) -> RgbImage {
    let image = match variant {
        Variant::Base => RgbImage::from_fn(BASE_WIDTH, BASE_HEIGHT, |x, y| {
            let byte = plane[(y * BASE_WIDTH / 4 + x / 4) as usize];
            let shift = 6 - 2 * (x % 4);
            CSS0[((byte >> shift) & 0b11) as usize]
        }),
        Variant::Enhanced => {
            let colors = palette.map(rgb6);
            RgbImage::from_fn(ENHANCED_WIDTH, ENHANCED_HEIGHT, |x, y| {
                let byte = plane[(y * ENHANCED_WIDTH / 2 + x / 2) as usize];
                let index = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                colors[index as usize]
            })
        }
    };
    if scale <= 1 {
        return image;
    }
    imageops::resize(
        &image,
        image.width() * scale,
        image.height() * scale,
        imageops::FilterType::Nearest,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_bit_colours() {
        assert_eq!(rgb6(0), Rgb([0, 0, 0]));
        assert_eq!(rgb6(63), Rgb([255, 255, 255]));
        assert_eq!(rgb6(0b100_100), Rgb([255, 0, 0]));
        assert_eq!(rgb6(0b000_111), Rgb([85, 85, 85]));
        assert_eq!(rgb6(0b111_000), Rgb([170, 170, 170]));
    }

    #[test]
    fn base_pixels_read_msb_first() {
        let mut plane = vec![0u8; 6144];
        plane[0] = 0b00_01_10_11;
        let image = render(&plane, Variant::Base, &[0; 16], 1);
        assert_eq!(image.dimensions(), (128, 192));
        assert_eq!(*image.get_pixel(0, 0), CSS0[0]);
        assert_eq!(*image.get_pixel(1, 0), CSS0[1]);
        assert_eq!(*image.get_pixel(3, 0), CSS0[3]);
    }

    #[test]
    fn enhanced_pixels_use_the_palette() {
        let mut plane = vec![0u8; 32000];
        plane[160] = 0x1F;
        let mut palette = [0u8; 16];
        palette[1] = 63;
        let image = render(&plane, Variant::Enhanced, &palette, 2);
        assert_eq!(image.dimensions(), (640, 400));
        assert_eq!(*image.get_pixel(0, 2), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(2, 2), Rgb([0, 0, 0]));
    }
}

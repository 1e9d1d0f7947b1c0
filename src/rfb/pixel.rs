use crate::ui::Rgb;
use anyhow::Context;
use byteorder::ByteOrder;
use byteorder::BE;
use byteorder::LE;
use bytes::BufMut;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;

/// Client-negotiated pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    pub bits_per_pixel: u8,
    pub depth: u8,
    pub big_endian: bool,
    pub true_color: bool,
    pub red_max: u16,
    pub green_max: u16,
    pub blue_max: u16,
    pub red_shift: u8,
    pub green_shift: u8,
    pub blue_shift: u8,
}

/// 32 bpp, depth 24, big-endian true colour with one byte per channel.
impl Default for PixelFormat {
    fn default() -> Self {
        Self {
            bits_per_pixel: 32,
            depth: 24,
            big_endian: true,
            true_color: true,
            red_max: 255,
            green_max: 255,
            blue_max: 255,
            red_shift: 24,
            green_shift: 16,
            blue_shift: 8,
        }
    }
}

impl PixelFormat {
    /// Wire size of a PIXEL_FORMAT structure, padding included.
    pub const SIZE: usize = 16;

    pub async fn read<R: AsyncRead + Unpin>(r: &mut R) -> anyhow::Result<Self> {
        let mut buf = [0u8; Self::SIZE];
        r.read_exact(&mut buf).await.context("read pixel format")?;
        let format = Self {
            bits_per_pixel: buf[0],
            depth: buf[1],
            big_endian: buf[2] != 0,
            true_color: buf[3] != 0,
            red_max: BE::read_u16(&buf[4..6]),
            green_max: BE::read_u16(&buf[6..8]),
            blue_max: BE::read_u16(&buf[8..10]),
            red_shift: buf[10],
            green_shift: buf[11],
            blue_shift: buf[12],
        };
        match format.bits_per_pixel {
            8 | 16 | 32 => Ok(format),
            bpp => anyhow::bail!("unsupported bits per pixel {}", bpp),
        }
    }
    pub fn put(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.bits_per_pixel);
        buf.put_u8(self.depth);
        buf.put_u8(self.big_endian as u8);
        buf.put_u8(self.true_color as u8);
        buf.put_u16(self.red_max);
        buf.put_u16(self.green_max);
        buf.put_u16(self.blue_max);
        buf.put_u8(self.red_shift);
        buf.put_u8(self.green_shift);
        buf.put_u8(self.blue_shift);
        buf.put_bytes(0, 3);
    }
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel / 8)
    }
    /// Packs a colour into a pixel value, scaling each channel to its max.
    pub fn pack(&self, Rgb(r, g, b): Rgb) -> u32 {
        fn channel(value: u8, max: u16, shift: u8) -> u32 {
            let scaled = u32::from(value) * u32::from(max) / 255;
            scaled.checked_shl(u32::from(shift)).unwrap_or(0)
        }
        channel(r, self.red_max, self.red_shift)
            | channel(g, self.green_max, self.green_shift)
            | channel(b, self.blue_max, self.blue_shift)
    }
    /// Raw-encodes row-major pixels in this format.
    pub fn encode(&self, pixels: &[Rgb]) -> Vec<u8> {
        let size = self.bytes_per_pixel();
        let mut out = vec![0u8; pixels.len() * size];
        for (chunk, pixel) in out.chunks_exact_mut(size).zip(pixels) {
            let value = self.pack(*pixel);
            match (size, self.big_endian) {
                (1, _) => chunk[0] = value as u8,
                (2, true) => BE::write_u16(chunk, value as u16),
                (2, false) => LE::write_u16(chunk, value as u16),
                (_, true) => BE::write_u32(chunk, value),
                (_, false) => LE::write_u32(chunk, value),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb565(big_endian: bool) -> PixelFormat {
        PixelFormat {
            bits_per_pixel: 16,
            depth: 16,
            big_endian,
            true_color: true,
            red_max: 31,
            green_max: 63,
            blue_max: 31,
            red_shift: 11,
            green_shift: 5,
            blue_shift: 0,
        }
    }

    #[test]
    fn default_format_is_big_endian_rgbx() {
        let bytes = PixelFormat::default().encode(&[Rgb(0x12, 0x34, 0x56)]);
        assert_eq!(bytes, vec![0x12, 0x34, 0x56, 0x00]);
    }
    #[test]
    fn little_endian_reverses_bytes() {
        let format = PixelFormat {
            big_endian: false,
            ..PixelFormat::default()
        };
        let bytes = format.encode(&[Rgb(0x12, 0x34, 0x56)]);
        assert_eq!(bytes, vec![0x00, 0x56, 0x34, 0x12]);
    }
    #[test]
    fn channels_scale_to_max() {
        assert_eq!(rgb565(true).pack(Rgb::WHITE), 0xffff);
        assert_eq!(rgb565(true).pack(Rgb(0xff, 0, 0)), 0xf800);
        assert_eq!(rgb565(false).encode(&[Rgb(0, 0, 0xff)]), vec![0x1f, 0x00]);
    }
    #[test]
    fn eight_bit_bgr233() {
        let format = PixelFormat {
            bits_per_pixel: 8,
            depth: 8,
            big_endian: false,
            true_color: true,
            red_max: 7,
            green_max: 7,
            blue_max: 3,
            red_shift: 0,
            green_shift: 3,
            blue_shift: 6,
        };
        let bytes = format.encode(&[Rgb::WHITE, Rgb::BLACK]);
        assert_eq!(bytes, vec![0xff, 0x00]);
    }
    #[tokio::test]
    async fn wire_format_survives_put_and_read() {
        let mut buf = bytes::BytesMut::new();
        rgb565(false).put(&mut buf);
        assert_eq!(buf.len(), PixelFormat::SIZE);
        let read = PixelFormat::read(&mut &buf[..]).await.unwrap();
        assert_eq!(read, rgb565(false));
    }
    #[tokio::test]
    async fn odd_bit_depths_are_refused() {
        let mut buf = bytes::BytesMut::new();
        PixelFormat {
            bits_per_pixel: 24,
            ..PixelFormat::default()
        }
        .put(&mut buf);
        assert!(PixelFormat::read(&mut &buf[..]).await.is_err());
    }
}

use super::*;
use crate::ui::Pointer;
use crate::ui::Rect;
use anyhow::Context;
use bytes::BufMut;
use bytes::BytesMut;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;

/// Raw pixel encoding, the only one this server sends.
pub const ENCODING_RAW: i32 = 0;

/// Client-to-server messages of RFB 3.3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    SetPixelFormat(PixelFormat),
    SetEncodings(Vec<i32>),
    FramebufferUpdateRequest { incremental: bool, area: Rect },
    KeyEvent { down: bool, key: u32 },
    PointerEvent(Pointer),
    /// Clipboard text is read past and dropped; only its length is kept.
    ClientCutText { len: u32 },
}

impl ClientMessage {
    pub async fn read<R: AsyncRead + Unpin>(r: &mut R) -> anyhow::Result<Self> {
        let kind = r.read_u8().await.context("read message type")?;
        match kind {
            0 => {
                skip(r, 3).await.context("read SetPixelFormat")?;
                let format = PixelFormat::read(r).await.context("read SetPixelFormat")?;
                Ok(Self::SetPixelFormat(format))
            }
            2 => {
                skip(r, 1).await.context("read SetEncodings")?;
                let n = r.read_u16().await.context("read SetEncodings")?;
                let mut encodings = Vec::with_capacity(usize::from(n));
                for _ in 0..n {
                    encodings.push(r.read_i32().await.context("read SetEncodings")?);
                }
                Ok(Self::SetEncodings(encodings))
            }
            3 => {
                let mut buf = [0u8; 9];
                r.read_exact(&mut buf)
                    .await
                    .context("read FramebufferUpdateRequest")?;
                let word = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);
                Ok(Self::FramebufferUpdateRequest {
                    incremental: buf[0] != 0,
                    area: Rect::from((word(1), word(3), word(5), word(7))),
                })
            }
            4 => {
                let down = r.read_u8().await.context("read KeyEvent")? != 0;
                skip(r, 2).await.context("read KeyEvent")?;
                let key = r.read_u32().await.context("read KeyEvent")?;
                Ok(Self::KeyEvent { down, key })
            }
            5 => {
                let buttons = r.read_u8().await.context("read PointerEvent")?;
                let x = r.read_u16().await.context("read PointerEvent")?;
                let y = r.read_u16().await.context("read PointerEvent")?;
                Ok(Self::PointerEvent(Pointer {
                    x: i32::from(x),
                    y: i32::from(y),
                    buttons,
                }))
            }
            6 => {
                skip(r, 3).await.context("read ClientCutText")?;
                let len = r.read_u32().await.context("read ClientCutText")?;
                let mut text = (&mut *r).take(u64::from(len));
                let read = tokio::io::copy(&mut text, &mut tokio::io::sink())
                    .await
                    .context("read ClientCutText")?;
                if read != u64::from(len) {
                    anyhow::bail!(
                        "read ClientCutText: stream ended after {} of {} bytes",
                        read,
                        len
                    );
                }
                Ok(Self::ClientCutText { len })
            }
            kind => anyhow::bail!("received unrecognized message type {}", kind),
        }
    }
}

async fn skip<R: AsyncRead + Unpin>(r: &mut R, n: usize) -> std::io::Result<()> {
    let mut pad = [0u8; 4];
    r.read_exact(&mut pad[..n]).await.map(|_| ())
}

/// ServerInit: framebuffer size, pixel format and desktop name.
pub fn server_init(width: u16, height: u16, format: &PixelFormat, name: &str) -> BytesMut {
    let mut buf = BytesMut::with_capacity(4 + PixelFormat::SIZE + 4 + name.len());
    buf.put_u16(width);
    buf.put_u16(height);
    format.put(&mut buf);
    buf.put_u32(name.len() as u32);
    buf.put_slice(name.as_bytes());
    buf
}

/// FramebufferUpdate with no rectangles.
pub fn empty_update() -> BytesMut {
    let mut buf = BytesMut::with_capacity(4);
    buf.put_u8(0);
    buf.put_u8(0);
    buf.put_u16(0);
    buf
}

/// FramebufferUpdate carrying one raw-encoded rectangle.
pub fn framebuffer_update(area: Rect, pixels: &[u8]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(4 + 12 + pixels.len());
    buf.put_u8(0);
    buf.put_u8(0);
    buf.put_u16(1);
    buf.put_u16(area.x0 as u16);
    buf.put_u16(area.y0 as u16);
    buf.put_u16(area.width() as u16);
    buf.put_u16(area.height() as u16);
    buf.put_i32(ENCODING_RAW);
    buf.put_slice(pixels);
    buf
}

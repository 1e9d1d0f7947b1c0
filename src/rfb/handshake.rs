use super::*;
use crate::DESKTOP_NAME;
use crate::UI_HEIGHT;
use crate::UI_WIDTH;
use anyhow::Context;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;

/// ProtocolVersion for RFB 3.3.
pub const VERSION: &[u8; 12] = b"RFB 003.003\n";
/// VNC authentication. Stock macOS clients refuse to connect without it.
pub const SECURITY_VNC: u32 = 2;
/// VNC authentication result: OK.
pub const SECURITY_OK: u32 = 0;

/// Runs the RFB 3.3 opening exchange up to and including ServerInit.
/// Any password is accepted. Returns the initial pixel format.
pub async fn handshake<S>(stream: &mut S) -> anyhow::Result<PixelFormat>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream
        .write_all(VERSION)
        .await
        .context("write ProtocolVersion")?;
    let mut version = [0u8; 12];
    stream
        .read_exact(&mut version)
        .await
        .context("read ProtocolVersion")?;
    if &version != VERSION {
        anyhow::bail!(
            "only version 3.3 is supported, but client requested {:?}",
            String::from_utf8_lossy(&version).trim_end()
        );
    }
    stream
        .write_u32(SECURITY_VNC)
        .await
        .context("write VNC auth scheme")?;
    stream
        .write_all(&[0u8; 16])
        .await
        .context("write VNC auth challenge")?;
    let mut response = [0u8; 16];
    stream
        .read_exact(&mut response)
        .await
        .context("read VNC auth response")?;
    stream
        .write_u32(SECURITY_OK)
        .await
        .context("write VNC auth result")?;
    let shared = stream.read_u8().await.context("read ClientInit")?;
    log::debug!("[rfb] client init (shared {})", shared != 0);
    let format = PixelFormat::default();
    stream
        .write_all(&server_init(UI_WIDTH, UI_HEIGHT, &format, DESKTOP_NAME))
        .await
        .context("write ServerInit")?;
    stream.flush().await.context("flush ServerInit")?;
    Ok(format)
}

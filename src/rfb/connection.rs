use super::*;
use crate::UI_HEIGHT;
use crate::UI_WIDTH;
use crate::session::Session;
use crate::ui::Rect;
use crate::ui::Screen;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::io::BufWriter;
use tokio::time::Instant;

/// Everything a client can ask to see.
const FRAMEBUFFER: Rect = Rect::new(0, 0, UI_WIDTH as i32, UI_HEIGHT as i32);

/// Drives one client from handshake until the stream ends or errors.
/// The player joins after a successful handshake and leaves when this
/// returns, whatever the reason.
pub async fn serve<S>(mut stream: S, session: Arc<Session>, frame: Duration) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut format = handshake(&mut stream).await?;
    let mut screen = Screen::enter(session);
    log::info!("[rfb] player {} connected", screen.handle());
    let (reader, writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut writer = BufWriter::new(writer);
    let mut next = Instant::now();
    loop {
        match ClientMessage::read(&mut reader).await? {
            ClientMessage::SetPixelFormat(f) => {
                log::debug!("[rfb] player {} pixel format {:?}", screen.handle(), f);
                format = f;
            }
            ClientMessage::SetEncodings(_) => {}
            ClientMessage::FramebufferUpdateRequest { area, .. } => {
                let update = match area.intersect(&FRAMEBUFFER) {
                    Some(area) => {
                        framebuffer_update(area, &format.encode(screen.render(area).pixels()))
                    }
                    None => empty_update(),
                };
                tokio::time::sleep_until(next).await;
                writer
                    .write_all(&update)
                    .await
                    .context("write FramebufferUpdate")?;
                writer.flush().await.context("flush FramebufferUpdate")?;
                next = Instant::now() + frame;
            }
            ClientMessage::KeyEvent { .. } => {}
            ClientMessage::PointerEvent(pointer) => screen.pointer(pointer),
            ClientMessage::ClientCutText { .. } => {}
        }
    }
}

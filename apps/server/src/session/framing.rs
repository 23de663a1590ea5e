//! Wire framing: every message is a 4-byte big-endian length prefix
//! followed by a UTF-8 body, which is `LengthDelimitedCodec`'s default
//! frame layout.
//!
//! Server-to-client bodies lead with a channel tag and a fixed
//! delimiter so a dumb client can tell prompts from broadcasts;
//! client-to-server bodies are bare text.

use bytes::{Bytes, BytesMut};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

use crate::error::AppError;

/// Separator between the channel tag and the payload.
pub const CHANNEL_DELIMITER: &str = "$_$_$";

/// Whether a message demands a reply or is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Turn-gated prompt; the addressed player must reply.
    Demand,
    /// Broadcast; no reply expected.
    Info,
}

impl Channel {
    pub fn tag(self) -> char {
        match self {
            Channel::Demand => '1',
            Channel::Info => '0',
        }
    }
}

pub type Transport = Framed<TcpStream, LengthDelimitedCodec>;

/// Wrap a raw stream in the length-delimited transport.
pub fn transport(stream: TcpStream) -> Transport {
    Framed::new(stream, LengthDelimitedCodec::new())
}

/// Encode a server-to-client message body.
pub fn encode(channel: Channel, text: &str) -> Bytes {
    Bytes::from(format!("{}{}{}", channel.tag(), CHANNEL_DELIMITER, text))
}

/// Decode a client reply: bare UTF-8 text, surrounding whitespace
/// trimmed.
pub fn decode_reply(frame: BytesMut) -> Result<String, AppError> {
    let text = std::str::from_utf8(&frame)
        .map_err(|_| AppError::protocol("reply is not valid UTF-8"))?;
    Ok(text.trim().to_owned())
}

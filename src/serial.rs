/*!
    words over a host serial device, using [serial2_tokio]

    the operating system driver does the framing, only the word packing layer is applied here.
*/

use serial2_tokio::{SerialPort, CharSize, StopBits};
use tokio::io::{AsyncRead, AsyncWrite, AsyncReadExt, AsyncWriteExt};
use thiserror::Error;
use log::*;
use std::{
    path::Path,
    time::Duration,
    };

use crate::{
    config::{ByteOrder, LineSettings, Parity, Resync},
    error::ConfigError,
    packer::WordAssembler,
    word::Word,
    };


/// failure of a serial word port
#[derive(Error, Debug)]
pub enum SerialError {
    #[error("problem with serial device")]
    Bus(std::io::Error),
    #[error("no data arrived in expected time")]
    Timeout,
}
impl From<std::io::Error> for SerialError {
    fn from(error: std::io::Error) -> Self {
        Self::Bus(error)
    }
}

/// open a serial device in raw mode with 8 data bits, 1 stop bit and the given baud rate and parity
pub fn open(path: impl AsRef<Path>, line: &LineSettings) -> Result<SerialPort, std::io::Error> {
    SerialPort::open(path, |mut settings: serial2_tokio::Settings| {
        settings.set_raw();
        settings.set_baud_rate(line.baud)?;
        settings.set_char_size(CharSize::Bits8);
        settings.set_stop_bits(StopBits::One);
        settings.set_parity(match line.parity {
            Parity::None => serial2_tokio::Parity::None,
            Parity::Even => serial2_tokio::Parity::Even,
            Parity::Odd => serial2_tokio::Parity::Odd,
        });
        Ok(settings)
    })
}

/**
    sends and receives words of `K` bytes on a serial device

    `P` is normally the [SerialPort] returned by [open], any tokio byte stream works the same.
*/
pub struct SerialWords<P, W, const K: usize> {
    port: P,
    order: ByteOrder,
    assembler: WordAssembler<W, K>,
    /// maximum time between two bytes of a word
    timeout: Duration,
}
impl<P, W: Word, const K: usize> SerialWords<P, W, K>
where P: AsyncRead + AsyncWrite + Unpin
{
    pub fn new(port: P, order: ByteOrder, resync: Resync) -> Result<Self, ConfigError> {
        Ok(Self {
            port,
            order,
            assembler: WordAssembler::new(order, resync)?,
            timeout: Duration::from_millis(100),
        })
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn into_inner(self) -> P {self.port}

    pub async fn send(&mut self, word: W) -> Result<(), SerialError> {
        let mut bytes = [0; K];
        word.split(self.order, &mut bytes);
        self.port.write_all(&bytes).await?;
        Ok(())
    }
    /**
        wait for a complete word

        a read error drops the word being received according to the resynchronization policy. A timeout in the middle of a word drops it without skipping anything after, since the peer stopped sending it.
    */
    pub async fn receive(&mut self) -> Result<W, SerialError> {
        let mut byte = [0; 1];
        loop {
            let read = match tokio::time::timeout(self.timeout, self.port.read_exact(&mut byte)).await {
                Ok(read) => read,
                // a silent line is normal between words
                Err(_) if self.assembler.count() == 0 => {
                    self.assembler.reset();
                    continue
                },
                Err(_) => {
                    let lost = self.assembler.reset();
                    warn!("serial line silent, word dropped after {} bytes", lost);
                    return Err(SerialError::Timeout)
                },
            };
            if let Err(error) = read {
                if let Some(lost) = self.assembler.discard() {
                    warn!("serial read failed, word discarded after {} bytes: {}", lost, error);
                }
                return Err(error.into())
            }
            if let Some(word) = self.assembler.push(byte[0])
                {return Ok(word)}
        }
    }
}

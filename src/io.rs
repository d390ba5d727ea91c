/*!
    words over a hardware uart

    here the framing is done by the peripheral, which is seen as an [embedded_io_async] byte stream. Only the word packing layer is applied, with the same byte order and resynchronization rules as the [Transceiver](crate::transceiver::Transceiver).
*/

use embedded_io_async::{Read, Write, ReadExactError};
use log::*;
use thiserror::Error;

use crate::{
    config::{ByteOrder, Resync},
    error::ConfigError,
    packer::WordAssembler,
    word::Word,
    };


/// failure of a word port
#[derive(Error, Debug)]
pub enum PortError<E> {
    /// the peripheral reported an error, typically a framing or parity error
    #[error("uart bus failure: {0:?}")]
    Bus(E),
    /// the byte stream ended
    #[error("end of stream on uart bus")]
    Eof,
}
impl<E> From<ReadExactError<E>> for PortError<E> {
    fn from(error: ReadExactError<E>) -> Self {
        match error {
            ReadExactError::UnexpectedEof => Self::Eof,
            ReadExactError::Other(io) => Self::Bus(io),
        }
    }
}

/// sends and receives words of `K` bytes on an async uart
pub struct WordPort<B, W, const K: usize> {
    bus: B,
    order: ByteOrder,
    assembler: WordAssembler<W, K>,
    discarded: u32,
}
impl<B: Read + Write, W: Word, const K: usize> WordPort<B, W, K> {
    pub fn new(bus: B, order: ByteOrder, resync: Resync) -> Result<Self, ConfigError> {
        Ok(Self {
            bus,
            order,
            assembler: WordAssembler::new(order, resync)?,
            discarded: 0,
        })
    }
    /// number of words lost on bus errors
    pub fn discarded(&self) -> u32 {self.discarded}
    pub fn into_inner(self) -> B {self.bus}

    /// write all bytes of a word
    pub async fn send(&mut self, word: W) -> Result<(), PortError<B::Error>> {
        let mut bytes = [0; K];
        word.split(self.order, &mut bytes);
        self.bus.write_all(&bytes).await .map_err(PortError::Bus)?;
        Ok(())
    }
    /**
        wait for a complete word

        a bus error drops the word being received and is returned, the next call starts a fresh word according to the resynchronization policy
    */
    pub async fn receive(&mut self) -> Result<W, PortError<B::Error>> {
        let mut byte = [0; 1];
        loop {
            if let Err(error) = self.bus.read_exact(&mut byte).await {
                if let Some(lost) = self.assembler.discard() {
                    self.discarded = self.discarded.saturating_add(1);
                    warn!("uart read failed, word discarded after {} bytes", lost);
                }
                return Err(error.into())
            }
            if let Some(word) = self.assembler.push(byte[0])
                {return Ok(word)}
        }
    }
}

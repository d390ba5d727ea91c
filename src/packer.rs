/*!
    word packing layer between the byte oriented uart and the word oriented user

    [WordAssembler] is the receive side and [WordSplitter] the transmit side, they share nothing and each is owned by its own direction.
*/

use core::marker::PhantomData;
use log::*;

use crate::{
    config::{ByteOrder, Resync},
    error::{ConfigError, TxBusy},
    tx::Transmitter,
    word::Word,
    };


/// check `K` frames are exactly what a word of type `W` needs
pub fn check_width<W: Word, const K: usize>() -> Result<(), ConfigError> {
    if K != W::BYTES
        {return Err(ConfigError::WidthMismatch {bytes: K, width: W::WIDTH})}
    Ok(())
}

/**
    accumulate received bytes into words of `K` bytes

    partial words are never visible outside. A frame error drops the partial word, what follows depends on the [Resync] policy.
*/
#[derive(Clone, Debug)]
pub struct WordAssembler<W, const K: usize> {
    order: ByteOrder,
    resync: Resync,
    buffer: heapless::Vec<u8, K>,
    /// byte slots of a corrupted word still to be dropped
    skip: usize,
    word: PhantomData<W>,
}
impl<W: Word, const K: usize> WordAssembler<W, K> {
    pub fn new(order: ByteOrder, resync: Resync) -> Result<Self, ConfigError> {
        check_width::<W, K>()?;
        Ok(Self {
            order,
            resync,
            buffer: heapless::Vec::new(),
            skip: 0,
            word: PhantomData,
        })
    }
    /// number of bytes of the word being assembled
    pub fn count(&self) -> usize {self.buffer.len()}

    /// take a received byte, return a word when it is complete
    pub fn push(&mut self, byte: u8) -> Option<W> {
        if self.skip != 0 {
            self.skip -= 1;
            trace!("skip {:#04x} from corrupted word", byte);
            return None
        }
        if let Err(byte) = self.buffer.push(byte) {
            warn!("word buffer overflow, dropping {:#04x}", byte);
            return None
        }
        if ! self.buffer.is_full()
            {return None}
        let word = W::join(self.order, &self.buffer);
        self.buffer.clear();
        debug!("word ready {:?}", word);
        Some(word)
    }
    /**
        drop the word being assembled after a frame error

        return the number of bytes lost, or `None` when the corrupted frame belongs to a word already being skipped
    */
    pub fn discard(&mut self) -> Option<usize> {
        if self.skip != 0 {
            self.skip -= 1;
            trace!("corrupted frame in skipped word");
            return None
        }
        let lost = self.buffer.len();
        self.buffer.clear();
        // the corrupted frame takes one slot of the word
        if self.resync == Resync::SkipWord
            {self.skip = K - lost - 1}
        debug!("word discarded after {} bytes", lost);
        Some(lost)
    }
    /// drop the word being assembled when the peer stopped sending it, nothing is skipped afterwards
    pub fn reset(&mut self) -> usize {
        let lost = self.buffer.len();
        self.buffer.clear();
        self.skip = 0;
        lost
    }
}

/**
    split words into `K` bytes and feed them to a transmitter one at a time

    a byte is only submitted while the transmitter is idle, a refused submission is retried on next feed.
*/
#[derive(Clone, Debug)]
pub struct WordSplitter<W, const K: usize> {
    order: ByteOrder,
    queue: heapless::Deque<u8, K>,
    /// bytes submitted to the transmitter and not yet done
    outstanding: usize,
    /// a word is loaded and not fully sent
    busy: bool,
    word: PhantomData<W>,
}
impl<W: Word, const K: usize> WordSplitter<W, K> {
    pub fn new(order: ByteOrder) -> Result<Self, ConfigError> {
        check_width::<W, K>()?;
        Ok(Self {
            order,
            queue: heapless::Deque::new(),
            outstanding: 0,
            busy: false,
            word: PhantomData,
        })
    }
    /// true if a new word can be loaded
    pub fn is_idle(&self) -> bool {!self.busy}
    /// bytes of the current word not yet submitted
    pub fn pending(&self) -> usize {self.queue.len()}

    /// start sending a word, refused while the previous one is not sent
    pub fn load(&mut self, word: W) -> Result<(), TxBusy> {
        if self.busy
            {return Err(TxBusy)}
        let mut bytes = [0; K];
        word.split(self.order, &mut bytes);
        for byte in bytes {
            self.queue.push_back(byte) .map_err(|_| TxBusy)?;
        }
        debug!("word loaded {:?}", word);
        self.busy = true;
        Ok(())
    }
    /// submit the next byte if the transmitter is ready for it
    pub fn feed(&mut self, tx: &mut Transmitter) {
        if ! tx.is_idle()
            {return}
        let Some(&byte) = self.queue.front()
            else {return};
        match tx.submit(byte) {
            Ok(()) => {
                self.queue.pop_front();
                self.outstanding += 1;
            },
            Err(TxBusy) => trace!("transmitter busy, retry {:#04x}", byte),
        }
    }
    /// account for a finished frame, return true when it was the last byte of the word
    pub fn complete(&mut self) -> bool {
        if self.outstanding == 0
            {return false}
        self.outstanding -= 1;
        if self.outstanding != 0 || ! self.queue.is_empty()
            {return false}
        self.busy = false;
        true
    }
}

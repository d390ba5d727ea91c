use log::*;
use bilge::prelude::u40;

use crate::{
    baud::BaudGenerator,
    config::TransceiverConfig,
    error::{ConfigError, FrameError, TxBusy},
    packer::{WordAssembler, WordSplitter, check_width},
    rx::{Receiver, RxEvent},
    tx::Transmitter,
    word::Word,
    };


/// something that happened during a clock cycle
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event<W> {
    /// a frame was received correctly
    ByteReady(u8),
    /// a frame was received with its stop bit low
    FramingError,
    /// a frame was received with a wrong parity bit
    ParityError,
    /// the word being received was dropped after a frame error, `bytes` were already received
    WordDiscarded { bytes: usize },
    /// all bytes of a word were received
    WordReady(W),
    /// a frame was sent
    TxDone,
    /// all bytes of a word were sent
    WordSent,
}

/// events of one cycle, in the order they happened
pub type Events<W> = heapless::Vec<Event<W>, 4>;

/// counters of everything that went through a transceiver since its creation
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub bytes_received: u32,
    pub bytes_sent: u32,
    pub framing_errors: u32,
    pub parity_errors: u32,
    pub words_received: u32,
    pub words_discarded: u32,
    pub words_sent: u32,
}

/**
    a full duplex word transceiver on one line pair

    the receive and transmit paths share nothing but the reference clock driving [Self::clock]. The transmitter follows the transceiver's free running baud generator, while the receiver runs its own, aligned on each incoming frame.

    only two instantiations exist, see [Transceiver16] and [Transceiver40]
*/
#[derive(Clone, Debug)]
pub struct Transceiver<W, const K: usize> {
    config: TransceiverConfig,
    baud: BaudGenerator,
    rx: Receiver,
    tx: Transmitter,
    assembler: WordAssembler<W, K>,
    splitter: WordSplitter<W, K>,
    stats: Stats,
}
/// 16 bit words in 2 frames
pub type Transceiver16 = Transceiver<u16, 2>;
/// 40 bit words in 5 frames
pub type Transceiver40 = Transceiver<u40, 5>;

impl<W: Word, const K: usize> Transceiver<W, K> {
    /// check the configuration and build all components
    pub fn new(config: TransceiverConfig) -> Result<Self, ConfigError> {
        config.check_shape()?;
        if config.bytes != K || config.width != W::WIDTH
            {return Err(ConfigError::WidthMismatch {bytes: config.bytes, width: config.width})}
        check_width::<W, K>()?;

        let new = Self {
            config,
            baud: BaudGenerator::new(&config.line)?,
            rx: Receiver::new(&config.line)?,
            tx: Transmitter::new(config.line.parity),
            assembler: WordAssembler::new(config.order, config.resync)?,
            splitter: WordSplitter::new(config.order)?,
            stats: Stats::default(),
        };
        debug!("transceiver of {} bits words, {} cycles per bit", W::WIDTH, new.baud.period());
        Ok(new)
    }
    pub fn config(&self) -> &TransceiverConfig {&self.config}
    pub fn stats(&self) -> &Stats {&self.stats}
    pub fn receiver(&self) -> &Receiver {&self.rx}
    pub fn transmitter(&self) -> &Transmitter {&self.tx}
    /// number of bytes of the word being received
    pub fn received_bytes(&self) -> usize {self.assembler.count()}
    /// bytes of the word being sent that are not submitted yet
    pub fn pending_bytes(&self) -> usize {self.splitter.pending()}
    /// true if a word can be sent
    pub fn can_send(&self) -> bool {self.splitter.is_idle()}
    /// level currently driven on the transmit line
    pub fn tx_line(&self) -> bool {self.tx.line()}

    /// start sending a word, refused while the previous one is not completely sent
    pub fn send(&mut self, word: W) -> Result<(), TxBusy> {
        self.splitter.load(word)?;
        self.splitter.feed(&mut self.tx);
        Ok(())
    }

    /// advance one reference clock cycle, with `rx_line` the current level of the receive line
    pub fn clock(&mut self, rx_line: bool) -> Events<W> {
        let mut events = Events::new();

        let tick = self.baud.step();
        if self.tx.step(tick) {
            self.stats.bytes_sent = self.stats.bytes_sent.saturating_add(1);
            emit(&mut events, Event::TxDone);
            if self.splitter.complete() {
                self.stats.words_sent = self.stats.words_sent.saturating_add(1);
                emit(&mut events, Event::WordSent);
            }
        }
        self.splitter.feed(&mut self.tx);

        match self.rx.step(rx_line) {
            Some(RxEvent::ByteReady(byte)) => {
                self.stats.bytes_received = self.stats.bytes_received.saturating_add(1);
                emit(&mut events, Event::ByteReady(byte));
                if let Some(word) = self.assembler.push(byte) {
                    self.stats.words_received = self.stats.words_received.saturating_add(1);
                    emit(&mut events, Event::WordReady(word));
                }
            },
            Some(RxEvent::Error(error)) => {
                match error {
                    FrameError::Framing => {
                        self.stats.framing_errors = self.stats.framing_errors.saturating_add(1);
                        emit(&mut events, Event::FramingError);
                    },
                    FrameError::Parity => {
                        self.stats.parity_errors = self.stats.parity_errors.saturating_add(1);
                        emit(&mut events, Event::ParityError);
                    },
                }
                if let Some(bytes) = self.assembler.discard() {
                    self.stats.words_discarded = self.stats.words_discarded.saturating_add(1);
                    emit(&mut events, Event::WordDiscarded {bytes});
                }
            },
            None => {},
        }
        events
    }
}

fn emit<W: Word>(events: &mut Events<W>, event: Event<W>) {
    if let Err(event) = events.push(event) {
        warn!("too many events in one cycle, lost {:?}", event);
    }
}

use log::*;

use crate::{
    baud::Tick,
    config::Parity,
    error::TxBusy,
    frame::FrameBits,
    };


/// bit currently driven on the line
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TxState {
    Idle,
    SendingStart,
    /// data bit of the given rank, LSB first
    SendingBits(u8),
    SendingParity,
    SendingStop,
}
impl TxState {
    /// state following this one after a tick
    fn next(self, parity: Parity) -> Self {
        match self {
            TxState::Idle => TxState::Idle,
            TxState::SendingStart => TxState::SendingBits(0),
            TxState::SendingBits(bit) if bit < 7 => TxState::SendingBits(bit + 1),
            TxState::SendingBits(_) if parity.enabled() => TxState::SendingParity,
            TxState::SendingBits(_) | TxState::SendingParity => TxState::SendingStop,
            TxState::SendingStop => TxState::Idle,
        }
    }
    /// rank of this bit in the frame
    fn position(self, parity: Parity) -> u8 {
        match self {
            TxState::SendingStart => 0,
            TxState::SendingBits(bit) => 1 + bit,
            TxState::SendingParity => 9,
            TxState::SendingStop | TxState::Idle => if parity.enabled() {10} else {9},
        }
    }
}

/**
    uart transmitter serializing one byte per frame

    the transmitter only changes its line level on ticks, each bit lasting exactly one tick. A submitted byte starts on the next tick.
*/
#[derive(Clone, Debug)]
pub struct Transmitter {
    parity: Parity,
    state: TxState,
    /// frame submitted and waiting for next tick
    pending: Option<FrameBits>,
    frame: FrameBits,
    line: bool,
}
impl Transmitter {
    pub fn new(parity: Parity) -> Self {
        Self {
            parity,
            state: TxState::Idle,
            pending: None,
            frame: FrameBits::new(0, parity),
            line: true,
        }
    }
    pub fn state(&self) -> TxState {self.state}
    /// true if a byte can be submitted
    pub fn is_idle(&self) -> bool {
        self.state == TxState::Idle && self.pending.is_none()
    }
    /// current level driven on the line
    pub fn line(&self) -> bool {self.line}

    /// request transmission of a byte, refused if a frame is already in progress
    pub fn submit(&mut self, byte: u8) -> Result<(), TxBusy> {
        if ! self.is_idle()
            {return Err(TxBusy)}
        trace!("submit {:#04x}", byte);
        self.pending = Some(FrameBits::new(byte, self.parity));
        Ok(())
    }

    /// advance one reference clock cycle, return true when a frame has just been completed
    pub fn step(&mut self, tick: Option<Tick>) -> bool {
        if tick.is_none()
            {return false}
        let done = self.state == TxState::SendingStop;
        self.state = match self.state {
            TxState::Idle => match self.pending.take() {
                Some(frame) => {
                    self.frame = frame;
                    TxState::SendingStart
                },
                None => TxState::Idle,
            },
            state => state.next(self.parity),
        };
        self.line = self.state == TxState::Idle
            || self.frame.level(self.state.position(self.parity));
        done
    }
}

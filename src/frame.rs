/*!
    bit layout of a uart frame

    bits are listed from first to last on the line, which is also least to most significant in the packed integer
*/

use bilge::prelude::*;

use crate::{
    config::Parity,
    error::FrameError,
    };


/// frame without parity: 1 start bit, 8 data bits LSB first, 1 stop bit
#[bitsize(10)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq)]
pub struct Frame {
    /// always low on a valid frame
    pub start: bool,
    pub data: u8,
    /// always high on a valid frame
    pub stop: bool,
}

/// frame with a parity bit between the data and stop bits
#[bitsize(11)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq)]
pub struct ParityFrame {
    pub start: bool,
    pub data: u8,
    pub parity: bool,
    pub stop: bool,
}

/// line levels of one frame, ready to be shifted out
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBits {
    bits: u16,
    len: u8,
}
impl FrameBits {
    /// valid frame carrying `data`
    pub fn new(data: u8, parity: Parity) -> Self {
        match parity.bit(data) {
            None => Self {
                bits: u10::from(Frame::new(false, data, true)).value(),
                len: 10,
            },
            Some(bit) => Self {
                bits: u11::from(ParityFrame::new(false, data, bit, true)).value(),
                len: 11,
            },
        }
    }
    /// same frame with its stop bit pulled low
    pub fn without_stop(self) -> Self {
        Self {
            bits: self.bits & !(1 << (self.len - 1)),
            len: self.len,
        }
    }
    /// number of bits in the frame
    pub fn len(&self) -> u8 {self.len}
    /// line level at the given bit position, positions after the frame are idle high
    pub fn level(&self, position: u8) -> bool {
        position >= self.len || self.bits >> position & 1 != 0
    }
    /// all line levels of the frame in order
    pub fn levels(self) -> impl Iterator<Item=bool> {
        (0 .. self.len) .map(move |position| self.level(position))
    }
}

/**
    extract the data of sampled frame bits

    `raw` holds the samples in line order starting with the start bit at position 0. The stop bit is checked first, so a frame both misaligned and with a bad parity is reported as a framing error.
*/
pub fn decode(raw: u16, parity: Parity) -> Result<u8, FrameError> {
    if parity.enabled() {
        let frame = ParityFrame::from(u11::new(raw & <u11 as bilge::Bitsized>::MAX.value()));
        if ! frame.stop()
            {return Err(FrameError::Framing)}
        if parity.bit(frame.data()) != Some(frame.parity())
            {return Err(FrameError::Parity)}
        Ok(frame.data())
    }
    else {
        let frame = Frame::from(u10::new(raw & <u10 as bilge::Bitsized>::MAX.value()));
        if ! frame.stop()
            {return Err(FrameError::Framing)}
        Ok(frame.data())
    }
}

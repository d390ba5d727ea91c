use log::*;

use crate::{
    baud::BaudGenerator,
    config::{LineSettings, Parity},
    error::{ConfigError, FrameError},
    frame,
    };


/// position of the receiver in the current frame
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RxState {
    /// waiting for a falling edge
    Idle,
    /// falling edge seen, waiting for the start bit midpoint
    StartDetected,
    /// sampling the given data bit, LSB first
    Receiving(u8),
    ParityCheck,
    StopCheck,
}

/// outcome of a frame
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RxEvent {
    ByteReady(u8),
    Error(FrameError),
}

/**
    uart receiver sampling a logical line

    the receiver has its own [BaudGenerator], re-phased on every start edge so that each bit is sampled at its midpoint whatever the phase of the peer transmitter.
    Once a start bit is confirmed, the frame always runs to completion.

    A start bit is only detected on a falling edge. A frame sent right after a low stop bit therefore goes unseen, the line must return high before the next frame can be received.
*/
#[derive(Clone, Debug)]
pub struct Receiver {
    baud: BaudGenerator,
    parity: Parity,
    state: RxState,
    /// level seen on previous step, for edge detection
    last: bool,
    /// samples of the current frame in line order
    raw: u16,
}
impl Receiver {
    pub fn new(line: &LineSettings) -> Result<Self, ConfigError> {
        Ok(Self::with_generator(BaudGenerator::new(line)?, line.parity))
    }
    pub(crate) fn with_generator(baud: BaudGenerator, parity: Parity) -> Self {
        Self {
            baud,
            parity,
            state: RxState::Idle,
            last: true,
            raw: 0,
        }
    }
    pub fn state(&self) -> RxState {self.state}

    /// advance one reference clock cycle with the current line level
    pub fn step(&mut self, line: bool) -> Option<RxEvent> {
        let mut event = None;
        match self.state {
            RxState::Idle => {
                if self.last && !line {
                    self.raw = 0;
                    self.baud.align(self.baud.half_period());
                    self.state = RxState::StartDetected;
                }
            },
            state => if self.baud.step().is_some() {
                event = self.sample(state, line);
            },
        }
        self.last = line;
        event
    }

    fn sample(&mut self, state: RxState, line: bool) -> Option<RxEvent> {
        let position = match state {
            RxState::Idle => return None,
            RxState::StartDetected => 0,
            RxState::Receiving(bit) => 1 + bit,
            RxState::ParityCheck => 9,
            RxState::StopCheck => if self.parity.enabled() {10} else {9},
        };
        self.raw |= u16::from(line) << position;

        self.state = match state {
            RxState::StartDetected if line => {
                trace!("glitch on start bit");
                RxState::Idle
            },
            RxState::StartDetected => RxState::Receiving(0),
            RxState::Receiving(bit) if bit < 7 => RxState::Receiving(bit + 1),
            RxState::Receiving(_) if self.parity.enabled() => RxState::ParityCheck,
            RxState::Receiving(_) | RxState::ParityCheck => RxState::StopCheck,
            RxState::Idle | RxState::StopCheck => RxState::Idle,
        };
        if state != RxState::StopCheck
            {return None}

        Some(match frame::decode(self.raw, self.parity) {
            Ok(byte) => RxEvent::ByteReady(byte),
            Err(error) => {
                debug!("frame dropped: {} (raw {:#05x})", error, self.raw);
                RxEvent::Error(error)
            },
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::{vec, vec::Vec};
    use crate::frame::FrameBits;

    const PERIOD: u32 = 8;

    fn receiver(parity: Parity) -> Receiver {
        Receiver::with_generator(BaudGenerator::with_period(PERIOD), parity)
    }
    /// feed bit levels, each held for a full period, and collect events
    fn feed(rx: &mut Receiver, levels: impl IntoIterator<Item=bool>) -> Vec<RxEvent> {
        levels.into_iter()
            .flat_map(|level| core::iter::repeat_n(level, PERIOD as usize))
            .filter_map(|level| rx.step(level))
            .collect()
    }

    #[test]
    fn single_byte() {
        let mut rx = receiver(Parity::None);
        let mut line = vec![true; 3];
        line.extend(FrameBits::new(0x5a, Parity::None).levels());
        assert_eq!(feed(&mut rx, line), [RxEvent::ByteReady(0x5a)]);
        assert_eq!(rx.state(), RxState::Idle);
    }

    #[test]
    fn back_to_back() {
        let mut rx = receiver(Parity::Even);
        let line = [0x00, 0xff, 0x81].into_iter()
            .flat_map(|byte| FrameBits::new(byte, Parity::Even).levels());
        assert_eq!(feed(&mut rx, line), [
            RxEvent::ByteReady(0x00),
            RxEvent::ByteReady(0xff),
            RxEvent::ByteReady(0x81),
            ]);
    }

    #[test]
    fn framing_error() {
        let mut rx = receiver(Parity::None);
        let line = FrameBits::new(0x12, Parity::None).without_stop().levels()
            .chain([true])
            .chain(FrameBits::new(0x34, Parity::None).levels());
        assert_eq!(feed(&mut rx, line), [
            RxEvent::Error(FrameError::Framing),
            RxEvent::ByteReady(0x34),
            ]);
    }

    #[test]
    fn frame_after_low_stop_is_unseen() {
        let mut rx = receiver(Parity::None);
        // no idle bit between the corrupted frame and the next start bit
        let line = FrameBits::new(0x12, Parity::None).without_stop().levels()
            .chain(FrameBits::new(0x34, Parity::None).levels())
            .chain([true; 6]);
        let events = feed(&mut rx, line);
        assert_eq!(events[0], RxEvent::Error(FrameError::Framing));
        assert!(!events.contains(&RxEvent::ByteReady(0x34)));
    }

    #[test]
    fn glitch_is_ignored() {
        let mut rx = receiver(Parity::None);
        let mut events = Vec::new();
        for level in [true, false, false, true, true, true, true, true, true, true, true] {
            events.extend(rx.step(level));
        }
        assert!(events.is_empty());
        assert_eq!(rx.state(), RxState::Idle);
    }

    #[test]
    fn stuck_low_line_stays_idle() {
        let mut rx = receiver(Parity::None);
        // one framing error for the first apparent frame, then nothing
        let events = feed(&mut rx, [false; 40]);
        assert_eq!(events, [RxEvent::Error(FrameError::Framing)]);
        assert_eq!(rx.state(), RxState::Idle);
    }
}

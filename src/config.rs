/*!
    setup parameters of a transceiver

    all of these are consumed once when building the components, nothing here can be renegotiated at runtime.
*/

use crate::error::ConfigError;


/// electrical-independent settings of one serial line
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineSettings {
    /// reference clock frequency in Hz, one simulation step is one cycle of this clock
    pub clock: u32,
    /// bit rate of the line
    pub baud: u32,
    /// optional parity bit inserted between data and stop bits
    pub parity: Parity,
}
impl Default for LineSettings {
    fn default() -> Self {
        Self {
            clock: 16_000_000,
            baud: 115_200,
            parity: Parity::None,
        }
    }
}
impl LineSettings {
    pub fn with_clock(mut self, clock: u32) -> Self {self.clock = clock; self}
    pub fn with_baud(mut self, baud: u32) -> Self {self.baud = baud; self}
    pub fn with_parity(mut self, parity: Parity) -> Self {self.parity = parity; self}

    /// number of reference clock cycles per bit, rounded to nearest
    pub fn period(&self) -> Result<u32, ConfigError> {
        let error = ConfigError::BaudRate {clock: self.clock, baud: self.baud};
        if self.baud == 0 || self.baud >= self.clock
            {return Err(error)}
        let period = (u64::from(self.clock) + u64::from(self.baud / 2)) / u64::from(self.baud);
        // midpoint sampling needs at least a half period of one cycle
        if period < 2
            {return Err(error)}
        u32::try_from(period) .map_err(|_| error)
    }
}

/// parity bit policy of a frame
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Parity {
    #[default]
    None,
    /// parity bit set when the data has an odd number of ones
    Even,
    /// parity bit set when the data has an even number of ones
    Odd,
}
impl Parity {
    /// parity bit to send along `data`, if any
    pub fn bit(self, data: u8) -> Option<bool> {
        let odd = data.count_ones() % 2 == 1;
        match self {
            Parity::None => None,
            Parity::Even => Some(odd),
            Parity::Odd => Some(!odd),
        }
    }
    pub fn enabled(self) -> bool {
        self != Parity::None
    }
}

/// order in which the bytes of a word are put on the line
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// first byte on the line is the least significant
    #[default]
    Little,
    /// first byte on the line is the most significant
    Big,
}

/// what to do with the bytes following a corrupted frame
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Resync {
    /// next good byte starts a fresh word
    #[default]
    Immediate,
    /**
        the corrupted frame is counted as a byte slot of the lost word, and the remaining slots of that word are dropped too

        this keeps word alignment when the peer keeps sending whole words
    */
    SkipWord,
}

/// complete configuration of a transceiver instance
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransceiverConfig {
    pub line: LineSettings,
    /// number of frames per word
    pub bytes: usize,
    /// number of bits per word
    pub width: u32,
    pub order: ByteOrder,
    pub resync: Resync,
}
impl Default for TransceiverConfig {
    fn default() -> Self {
        Self {
            line: LineSettings::default(),
            bytes: 2,
            width: 16,
            order: ByteOrder::Little,
            resync: Resync::Immediate,
        }
    }
}
impl TransceiverConfig {
    /// default configuration for the 5 bytes, 40 bits variant
    pub fn wide() -> Self {
        Self {bytes: 5, width: 40, .. Default::default()}
    }
    pub fn with_line(mut self, line: LineSettings) -> Self {self.line = line; self}
    pub fn with_clock(mut self, clock: u32) -> Self {self.line.clock = clock; self}
    pub fn with_baud(mut self, baud: u32) -> Self {self.line.baud = baud; self}
    pub fn with_parity(mut self, parity: Parity) -> Self {self.line.parity = parity; self}
    pub fn with_shape(mut self, bytes: usize, width: u32) -> Self {
        self.bytes = bytes;
        self.width = width;
        self
    }
    pub fn with_order(mut self, order: ByteOrder) -> Self {self.order = order; self}
    pub fn with_resync(mut self, resync: Resync) -> Self {self.resync = resync; self}

    /// check the word shape is one of the supported architecture variants
    pub fn check_shape(&self) -> Result<(), ConfigError> {
        match (self.bytes, self.width) {
            (2, 16) | (5, 40) => Ok(()),
            (bytes, width) => Err(ConfigError::WordShape {bytes, width}),
        }
    }
}

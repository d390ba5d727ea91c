use thiserror::Error;


/// misconfiguration detected when setting up a transceiver, nothing is instantiated
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// the baud rate cannot be derived from the reference clock with at least 2 cycles per bit
    #[error("baud rate {baud} cannot be generated from a {clock} Hz reference clock")]
    BaudRate { clock: u32, baud: u32 },
    /// the byte count and word width are not one of the supported pairs (2, 16) and (5, 40)
    #[error("unsupported word shape: {bytes} bytes for {width} bits")]
    WordShape { bytes: usize, width: u32 },
    /// the configured shape does not match the word type of the instance
    #[error("word of {width} bits cannot be packed in {bytes} bytes")]
    WidthMismatch { bytes: usize, width: u32 },
}

/// error reported by the receiver for a single frame, the byte is lost
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// stop bit sampled low
    #[error("stop bit sampled low")]
    Framing,
    /// parity bit does not match the data bits
    #[error("parity mismatch")]
    Parity,
}

/// a frame or word is already in progress, the submission must be retried later
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("transmitter busy")]
pub struct TxBusy;

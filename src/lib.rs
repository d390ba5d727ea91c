/*!
    uart transceiver model carrying wide words as sequences of standard 8 bit frames

    the crate is layered from the line up:

    - [baud] divides a reference clock down to the bit rate
    - [rx] and [tx] are the bit level state machines of one frame
    - [packer] splits words into bytes and assembles bytes into words
    - [transceiver] binds all of them to one line pair, and [link] wires two transceivers together

    every component is a synchronous state machine advanced once per reference clock cycle, nothing is shared between the receive and transmit directions.
*/
#![no_std]
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
pub mod error;
pub mod baud;
pub mod frame;
pub mod rx;
pub mod tx;
pub mod word;
pub mod packer;
pub mod transceiver;
pub mod link;
#[cfg(feature = "io")]
pub mod io;
#[cfg(feature = "serial")]
pub mod serial;

pub use bilge::prelude::u40;
pub use config::{TransceiverConfig, LineSettings, Parity, ByteOrder, Resync};
pub use error::{ConfigError, FrameError, TxBusy};
pub use transceiver::{Transceiver, Transceiver16, Transceiver40, Event, Events, Stats};
pub use link::{Link, Direction};
pub use word::Word;

use std::vec::Vec;

use uartword::{
    frame::FrameBits,
    word::Word,
    *,
    };


/// reference clock cycles per bit in these tests
const PERIOD: usize = 8;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> TransceiverConfig {
    TransceiverConfig::default().with_clock(800).with_baud(100)
}

/// line levels for the given frames, each bit held one period, with some idle before
fn stimulus(frames: impl IntoIterator<Item=FrameBits>) -> Vec<bool> {
    let mut bits = Vec::from([true; 2]);
    bits.extend(frames.into_iter().flat_map(|frame| frame.levels()));
    bits.extend([true; 2]);
    bits.into_iter()
        .flat_map(|level| std::iter::repeat_n(level, PERIOD))
        .collect()
}

fn frames(bytes: &[u8]) -> impl Iterator<Item=FrameBits> + '_ {
    bytes.iter().map(|&byte| FrameBits::new(byte, Parity::None))
}

/// clock a transceiver through the given receive levels, collecting all events
fn drive<W: Word, const K: usize>(uart: &mut Transceiver<W, K>, levels: Vec<bool>) -> Vec<Event<W>> {
    levels.into_iter()
        .flat_map(|level| uart.clock(level))
        .collect()
}

fn words<W: Word>(events: &[Event<W>]) -> Vec<W> {
    events.iter()
        .filter_map(|event| match event {
            Event::WordReady(word) => Some(*word),
            _ => None,
        })
        .collect()
}


#[test]
fn word_16_little_endian() {
    init();
    let mut uart = Transceiver16::new(config()).unwrap();
    let events = drive(&mut uart, stimulus(frames(&[0x34, 0x12])));
    assert_eq!(events, [
        Event::ByteReady(0x34),
        Event::ByteReady(0x12),
        Event::WordReady(0x1234),
        ]);
}

#[test]
fn word_40_both_orders() {
    init();
    let bytes = [0x01, 0x02, 0x03, 0x04, 0x05];

    let mut uart = Transceiver40::new(TransceiverConfig::wide().with_clock(800).with_baud(100)).unwrap();
    let events = drive(&mut uart, stimulus(frames(&bytes)));
    assert_eq!(words(&events), [u40::new(0x05_0403_0201)]);

    let mut uart = Transceiver40::new(TransceiverConfig::wide()
        .with_clock(800)
        .with_baud(100)
        .with_order(ByteOrder::Big)
        ).unwrap();
    let events = drive(&mut uart, stimulus(frames(&bytes)));
    assert_eq!(words(&events), [u40::new(0x01_0203_0405)]);
}

#[test]
fn framing_error_after_first_byte() {
    init();
    let mut uart = Transceiver16::new(config()).unwrap();
    let line = stimulus([
        FrameBits::new(0x34, Parity::None),
        FrameBits::new(0x12, Parity::None).without_stop(),
        ]);
    let events = drive(&mut uart, line);
    assert_eq!(events, [
        Event::ByteReady(0x34),
        Event::FramingError,
        Event::WordDiscarded {bytes: 1},
        ]);
    assert_eq!(uart.received_bytes(), 0);
    assert_eq!(uart.stats().framing_errors, 1);
    assert_eq!(uart.stats().words_discarded, 1);
    assert_eq!(uart.stats().words_received, 0);
}

#[test]
fn fresh_word_after_framing_error() {
    init();
    let mut uart = Transceiver16::new(config()).unwrap();
    // the start bit of 0xff directly follows the low stop bit, there is no falling edge so this frame is lost too
    let line = stimulus([
        FrameBits::new(0x34, Parity::None),
        FrameBits::new(0x12, Parity::None).without_stop(),
        FrameBits::new(0xff, Parity::None),
        FrameBits::new(0xcd, Parity::None),
        FrameBits::new(0xab, Parity::None),
        ]);
    let events = drive(&mut uart, line);
    assert_eq!(words(&events), [0xabcd]);
    assert_eq!(uart.received_bytes(), 0);
    assert_eq!(uart.stats().bytes_received, 3);
}

#[test]
fn parity_error_discards_word() {
    init();
    let config = config().with_parity(Parity::Odd);
    let mut uart = Transceiver16::new(config).unwrap();
    let line = stimulus([
        FrameBits::new(0x34, Parity::Odd),
        FrameBits::new(0x12, Parity::Even),
        FrameBits::new(0x78, Parity::Odd),
        FrameBits::new(0x56, Parity::Odd),
        ]);
    let events = drive(&mut uart, line);
    assert!(events.contains(&Event::ParityError));
    assert!(events.contains(&Event::WordDiscarded {bytes: 1}));
    assert_eq!(words(&events), [0x5678]);
    assert_eq!(uart.stats().parity_errors, 1);
}

#[test]
fn skipped_word_counted_once() {
    init();
    let config = TransceiverConfig::wide()
        .with_clock(800)
        .with_baud(100)
        .with_parity(Parity::Odd)
        .with_resync(Resync::SkipWord);
    let mut uart = Transceiver40::new(config).unwrap();
    // second and fourth frames of the first word are corrupted
    let line = stimulus([
        FrameBits::new(0x01, Parity::Odd),
        FrameBits::new(0x02, Parity::Even),
        FrameBits::new(0x03, Parity::Odd),
        FrameBits::new(0x04, Parity::Even),
        FrameBits::new(0x05, Parity::Odd),
        ].into_iter().chain(
        [0x11, 0x12, 0x13, 0x14, 0x15].map(|byte| FrameBits::new(byte, Parity::Odd))
        ));
    let events = drive(&mut uart, line);
    assert_eq!(events[.. 6], [
        Event::ByteReady(0x01),
        Event::ParityError,
        Event::WordDiscarded {bytes: 1},
        Event::ByteReady(0x03),
        Event::ParityError,
        Event::ByteReady(0x05),
        ]);
    assert_eq!(words(&events), [u40::new(0x15_1413_1211)]);
    assert_eq!(uart.stats().parity_errors, 2);
    assert_eq!(uart.stats().words_discarded, 1);
}

#[test]
fn idle_line_produces_nothing() {
    init();
    let mut uart = Transceiver40::new(TransceiverConfig::wide()).unwrap();
    for _ in 0 .. 10_000 {
        assert!(uart.clock(true).is_empty());
    }
    assert_eq!(*uart.stats(), Stats::default());
}

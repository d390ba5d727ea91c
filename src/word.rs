/*!
    logical words carried by the transceiver

    only two widths exist: 16 bits packed in 2 frames and 40 bits packed in 5 frames.
*/

use core::fmt::Debug;
use packbytes::{FromBytes, ToBytes, ByteArray};
use bilge::prelude::*;

use crate::config::ByteOrder;


mod sealed {
    pub trait Sealed {}
    impl Sealed for u16 {}
    impl Sealed for super::u40 {}
}

/// a fixed width integer that can be split into bytes and rebuilt from them
pub trait Word: Copy + Debug + PartialEq + sealed::Sealed {
    /// number of significant bits
    const WIDTH: u32;
    /// number of bytes, hence frames, per word
    const BYTES: usize;

    /// write the bytes of the word in line order, `dst` must be [Self::BYTES] long
    fn split(self, order: ByteOrder, dst: &mut [u8]);
    /// rebuild a word from bytes in line order, `src` must be [Self::BYTES] long
    fn join(order: ByteOrder, src: &[u8]) -> Self;
}

impl Word for u16 {
    const WIDTH: u32 = 16;
    const BYTES: usize = <<u16 as ToBytes>::Bytes as ByteArray>::SIZE;

    fn split(self, order: ByteOrder, dst: &mut [u8]) {
        let bytes = match order {
            ByteOrder::Little => <u16 as ToBytes>::to_le_bytes(self),
            ByteOrder::Big => <u16 as ToBytes>::to_be_bytes(self),
        };
        dst.copy_from_slice(bytes.as_ref());
    }
    fn join(order: ByteOrder, src: &[u8]) -> Self {
        let mut bytes = <u16 as FromBytes>::Bytes::zeroed();
        bytes.as_mut().copy_from_slice(src);
        match order {
            ByteOrder::Little => <u16 as FromBytes>::from_le_bytes(bytes),
            ByteOrder::Big => <u16 as FromBytes>::from_be_bytes(bytes),
        }
    }
}

// packed in the low bytes of a u64
impl Word for u40 {
    const WIDTH: u32 = 40;
    const BYTES: usize = 5;

    fn split(self, order: ByteOrder, dst: &mut [u8]) {
        let bytes = <u64 as ToBytes>::to_le_bytes(self.value());
        dst.copy_from_slice(&bytes[.. Self::BYTES]);
        if order == ByteOrder::Big {
            dst.reverse();
        }
    }
    fn join(order: ByteOrder, src: &[u8]) -> Self {
        let mut bytes = [0u8; 8];
        let low = &mut bytes[.. Self::BYTES];
        low.copy_from_slice(src);
        if order == ByteOrder::Big {
            low.reverse();
        }
        // the 3 upper bytes are zero so the value always fits
        u40::new(<u64 as FromBytes>::from_le_bytes(bytes))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_u16() {
        let mut bytes = [0; 2];
        0x1234u16.split(ByteOrder::Little, &mut bytes);
        assert_eq!(bytes, [0x34, 0x12]);
        0x1234u16.split(ByteOrder::Big, &mut bytes);
        assert_eq!(bytes, [0x12, 0x34]);
    }

    #[test]
    fn join_u40() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(u40::join(ByteOrder::Little, &bytes), u40::new(0x05_0403_0201));
        assert_eq!(u40::join(ByteOrder::Big, &bytes), u40::new(0x01_0203_0405));
    }

    #[test]
    fn extremes_u40() {
        let mut bytes = [0; 5];
        for order in [ByteOrder::Little, ByteOrder::Big] {
            for word in [u40::new(0), u40::new(0xff_ffff_ffff), u40::new(0x80_0000_0001)] {
                word.split(order, &mut bytes);
                assert_eq!(u40::join(order, &bytes), word);
            }
        }
        u40::new(0xff_ffff_ffff).split(ByteOrder::Big, &mut bytes);
        assert_eq!(bytes, [0xff; 5]);
    }
}

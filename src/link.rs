/*!
    two transceivers wired to each other, each one's transmit line driving the other's receive line

    faults can be injected on either direction by forcing the line level for some cycles.
*/

use log::*;

use crate::{
    transceiver::{Transceiver, Events},
    word::Word,
    };


/// one direction of the link
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

#[derive(Copy, Clone, Debug)]
struct Fault {
    level: bool,
    remaining: u32,
}

/// a directly connected pair of transceivers
#[derive(Clone, Debug)]
pub struct Link<W, const K: usize> {
    left: Transceiver<W, K>,
    right: Transceiver<W, K>,
    faults: [Option<Fault>; 2],
    cycle: u64,
}
impl<W: Word, const K: usize> Link<W, K> {
    pub fn new(left: Transceiver<W, K>, right: Transceiver<W, K>) -> Self {
        Self {
            left,
            right,
            faults: [None; 2],
            cycle: 0,
        }
    }
    pub fn left(&self) -> &Transceiver<W, K> {&self.left}
    pub fn right(&self) -> &Transceiver<W, K> {&self.right}
    pub fn left_mut(&mut self) -> &mut Transceiver<W, K> {&mut self.left}
    pub fn right_mut(&mut self) -> &mut Transceiver<W, K> {&mut self.right}
    /// number of cycles run so far
    pub fn cycle(&self) -> u64 {self.cycle}

    /// hold the line of the given direction at `level` for the next `cycles` cycles, whatever the transmitter drives
    pub fn force(&mut self, direction: Direction, level: bool, cycles: u32) {
        debug!("forcing {:?} line {} for {} cycles at cycle {}",
            direction, if level {"high"} else {"low"}, cycles, self.cycle);
        self.faults[direction as usize] = (cycles != 0).then_some(Fault {level, remaining: cycles});
    }

    /// advance both transceivers by one cycle, return the events of (left, right)
    pub fn step(&mut self) -> (Events<W>, Events<W>) {
        // lines are sampled before clocking, which makes one cycle of propagation delay
        let to_right = self.wire(Direction::LeftToRight, self.left.tx_line());
        let to_left = self.wire(Direction::RightToLeft, self.right.tx_line());
        let events = (self.left.clock(to_left), self.right.clock(to_right));
        self.cycle += 1;
        events
    }

    fn wire(&mut self, direction: Direction, driven: bool) -> bool {
        let index = direction as usize;
        let Some(fault) = self.faults[index].as_mut()
            else {return driven};
        fault.remaining -= 1;
        let level = fault.level;
        if fault.remaining == 0 {
            self.faults[index] = None;
        }
        level
    }
}

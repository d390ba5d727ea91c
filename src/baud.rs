use crate::{
    config::LineSettings,
    error::ConfigError,
    };


/// one bit period elapsed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tick;

/**
    divides the reference clock down to the baud rate

    each call to [Self::step] is one reference clock cycle, and a [Tick] is yielded once every [Self::period] cycles.
    Several generators can run with the same period but independent phases, see [Self::align]
*/
#[derive(Clone, Debug)]
pub struct BaudGenerator {
    period: u32,
    count: u32,
}
impl BaudGenerator {
    pub fn new(line: &LineSettings) -> Result<Self, ConfigError> {
        Ok(Self::with_period(line.period()?))
    }
    pub(crate) const fn with_period(period: u32) -> Self {
        Self {period, count: 0}
    }
    /// number of reference clock cycles per bit
    pub const fn period(&self) -> u32 {self.period}
    /// number of reference clock cycles from a bit edge to its midpoint
    pub const fn half_period(&self) -> u32 {self.period / 2}

    /// advance by one reference clock cycle
    pub fn step(&mut self) -> Option<Tick> {
        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
            Some(Tick)
        }
        else {None}
    }
    /// shift the phase so that the next tick happens after `remaining` steps
    pub fn align(&mut self, remaining: u32) {
        self.count = self.period - remaining.clamp(1, self.period);
    }
}

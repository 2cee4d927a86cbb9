//! Test doubles for the hardware seams. Every double can share a [`Journal`]
//! so tests can assert on the order in which the seams were driven.

use std::{cell::RefCell, collections::VecDeque, convert::Infallible, rc::Rc};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin},
};

use crate::{
    config::{FREQUENCY_OFFSET, MARKER_OFFSET, RECORD_MARKER},
    pacing::Heartbeat,
    record_log::{FlashArea, ERASED, SLOT_LEN},
    store::NvMemory,
    tone::{on_compare_match, ToneTimer},
};

pub const WINDOW_ELAPSED: &str = "observation window elapsed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Armed(u8),
    Disarmed,
    Started,
    Fed,
    Slept { ns: u64 },
    Read { offset: u32, len: usize },
    Wrote { offset: u32, len: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn count(&self, wanted: Event) -> usize {
        self.0.borrow().iter().filter(|e| **e == wanted).count()
    }

    pub fn armed(&self) -> Vec<u8> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Armed(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn slept_ms(&self) -> u64 {
        self.0
            .borrow()
            .iter()
            .map(|e| match e {
                Event::Slept { ns } => *ns,
                _ => 0,
            })
            .sum::<u64>()
            / 1_000_000
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Debug, Default)]
pub struct MockLine {
    high: bool,
}

impl MockLine {
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for MockLine {
    type Error = Infallible;
}

impl OutputPin for MockLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for MockLine {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

/// Tone timer whose compare-match "interrupt" fires on [`MockTimer::tick`].
#[derive(Debug, Default)]
pub struct MockTimer {
    journal: Journal,
    divisor: Option<u8>,
    pub line: MockLine,
}

impl MockTimer {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Default::default()
        }
    }

    pub fn tick(&mut self) {
        on_compare_match(self.is_armed(), &mut self.line);
    }

    pub fn is_armed(&self) -> bool {
        self.divisor.is_some()
    }

    pub fn divisor(&self) -> Option<u8> {
        self.divisor
    }
}

impl ToneTimer for MockTimer {
    fn arm(&mut self, divisor: u8) {
        self.divisor = Some(divisor);
        self.journal.push(Event::Armed(divisor));
    }

    fn disarm(&mut self) {
        self.divisor = None;
        self.line.high = false;
        self.journal.push(Event::Disarmed);
    }
}

/// Signal line that replays a list of levels, then holds the last one.
#[derive(Debug)]
pub struct MockSignal {
    levels: VecDeque<bool>,
    last: bool,
}

impl MockSignal {
    /// `true` is a high (idle) level.
    pub fn levels(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
            last: true,
        }
    }

    pub fn held(high: bool) -> Self {
        Self {
            levels: VecDeque::new(),
            last: high,
        }
    }
}

impl ErrorType for MockSignal {
    type Error = Infallible;
}

impl InputPin for MockSignal {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if let Some(level) = self.levels.pop_front() {
            self.last = level;
        }
        Ok(self.last)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Debug, Default)]
pub struct MockDelay {
    journal: Journal,
}

impl MockDelay {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.journal.push(Event::Slept { ns: u64::from(ns) });
    }

    fn delay_us(&mut self, us: u32) {
        self.journal.push(Event::Slept {
            ns: u64::from(us) * 1_000,
        });
    }

    fn delay_ms(&mut self, ms: u32) {
        self.journal.push(Event::Slept {
            ns: u64::from(ms) * 1_000_000,
        });
    }
}

/// Heartbeat that panics with [`WINDOW_ELAPSED`] once `limit` feeds have
/// happened, which is how tests bound the never-returning loops.
#[derive(Debug, Default)]
pub struct MockWatchdog {
    journal: Journal,
    limit: Option<usize>,
    feeds: usize,
}

impl MockWatchdog {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Default::default()
        }
    }

    pub fn with_limit(journal: &Journal, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new(journal)
        }
    }

    pub fn feeds(&self) -> usize {
        self.feeds
    }
}

impl Heartbeat for MockWatchdog {
    fn start(&mut self) {
        self.journal.push(Event::Started);
    }

    fn feed(&mut self) {
        self.feeds += 1;
        self.journal.push(Event::Fed);
        if self.limit.is_some_and(|limit| self.feeds >= limit) {
            panic!("{}", WINDOW_ELAPSED);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockMemoryError;

/// Erased (all 0xFF) record storage.
#[derive(Debug)]
pub struct MockMemory {
    journal: Journal,
    pub bytes: [u8; 8],
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MockMemory {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            bytes: [0xFF; 8],
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Storage holding a committed record for `hz`.
    pub fn with_record(journal: &Journal, hz: u16) -> Self {
        let mut memory = Self::new(journal);
        memory.poke(hz, RECORD_MARKER);
        memory
    }

    pub fn poke(&mut self, hz: u16, marker: u8) {
        let at = FREQUENCY_OFFSET as usize;
        self.bytes[at..at + 2].copy_from_slice(&hz.to_le_bytes());
        self.bytes[MARKER_OFFSET as usize] = marker;
    }
}

impl NvMemory for MockMemory {
    type Error = MockMemoryError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.journal.push(Event::Read {
            offset,
            len: bytes.len(),
        });
        if self.fail_reads {
            return Err(MockMemoryError);
        }
        let at = offset as usize;
        bytes.copy_from_slice(&self.bytes[at..at + bytes.len()]);
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        self.journal.push(Event::Wrote {
            offset,
            len: bytes.len(),
        });
        if self.fail_writes {
            return Err(MockMemoryError);
        }
        let at = offset as usize;
        self.bytes[at..at + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFlashError;

/// Flash area of whole slots. Programming can only clear bits.
#[derive(Debug)]
pub struct MockFlash {
    bytes: Vec<u8>,
    pub erases: usize,
}

impl MockFlash {
    pub fn new(slots: usize) -> Self {
        Self {
            bytes: vec![ERASED; slots * SLOT_LEN],
            erases: 0,
        }
    }
}

impl FlashArea for MockFlash {
    type Error = MockFlashError;

    fn contents(&self) -> &[u8] {
        &self.bytes
    }

    fn erase(&mut self) -> Result<(), Self::Error> {
        self.bytes.fill(ERASED);
        self.erases += 1;
        Ok(())
    }

    fn program(&mut self, offset: usize, bytes: &[u8]) -> Result<(), Self::Error> {
        let cells = self
            .bytes
            .get_mut(offset..offset + bytes.len())
            .ok_or(MockFlashError)?;
        for (cell, byte) in cells.iter_mut().zip(bytes) {
            *cell &= byte;
        }
        Ok(())
    }
}

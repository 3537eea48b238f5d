//! Host-side fakes shared by the unit tests
//!
//! Everything hangs off a [`Bench`]: a simulated clock that only advances
//! when something sleeps, plus an ordered trace of hardware interactions.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin, StatefulOutputPin};
use embedded_io::{ErrorKind, ErrorType, Read, Seek, SeekFrom};
use pixreel_hal::{Clock, DisplaySink, Watchdog, MATRIX_ROWS};

use crate::frame::{Frame, FRAME_SIZE};
use crate::stream::SliceSource;

/// One recorded hardware interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    Feed,
    ButtonRead,
    Sleep(u32),
    Show(Frame),
}

/// Simulated time plus interaction log
pub struct Bench {
    now_us: Cell<u64>,
    trace: RefCell<Vec<Trace>>,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            now_us: Cell::new(0),
            trace: RefCell::new(Vec::new()),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_us.get() / 1_000
    }

    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }

    pub fn record(&self, entry: Trace) {
        self.trace.borrow_mut().push(entry);
    }

    pub fn trace(&self) -> Vec<Trace> {
        self.trace.borrow().clone()
    }

    pub fn clear_trace(&self) {
        self.trace.borrow_mut().clear();
    }

    /// Frames latched on the display, in order
    pub fn shown(&self) -> Vec<Frame> {
        self.trace
            .borrow()
            .iter()
            .filter_map(|t| match t {
                Trace::Show(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    /// Sleep durations, in order
    pub fn sleeps(&self) -> Vec<u32> {
        self.trace
            .borrow()
            .iter()
            .filter_map(|t| match t {
                Trace::Sleep(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub fn feeds(&self) -> usize {
        self.trace
            .borrow()
            .iter()
            .filter(|t| matches!(t, Trace::Feed))
            .count()
    }
}

/// Clock reading the bench time
pub struct SimClock<'a>(pub &'a Bench);

impl Clock for SimClock<'_> {
    fn now_ms(&self) -> u64 {
        self.0.now_ms()
    }
}

/// Delay that advances the bench time instead of waiting
pub struct SimDelay<'a>(pub &'a Bench);

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance_us(u64::from(ns).div_ceil(1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.record(Trace::Sleep(ms));
        self.0.advance_us(u64::from(ms) * 1_000);
    }
}

/// Pull-up button wired active-low, held down during scripted windows
pub struct ScriptedButton<'a> {
    bench: &'a Bench,
    /// `[start, end)` windows in bench milliseconds
    held: Vec<(u64, u64)>,
}

impl<'a> ScriptedButton<'a> {
    pub fn new(bench: &'a Bench) -> Self {
        Self {
            bench,
            held: Vec::new(),
        }
    }

    pub fn hold(mut self, start_ms: u64, end_ms: u64) -> Self {
        self.held.push((start_ms, end_ms));
        self
    }

    fn pressed(&self) -> bool {
        let now = self.bench.now_ms();
        self.held.iter().any(|&(start, end)| now >= start && now < end)
    }
}

impl PinErrorType for ScriptedButton<'_> {
    type Error = Infallible;
}

impl InputPin for ScriptedButton<'_> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        self.bench.record(Trace::ButtonRead);
        Ok(!self.pressed())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.bench.record(Trace::ButtonRead);
        Ok(self.pressed())
    }
}

/// Display that logs every latched buffer
pub struct RecordingDisplay<'a> {
    bench: &'a Bench,
    staged: [u8; MATRIX_ROWS],
    pub fail_commits: bool,
}

impl<'a> RecordingDisplay<'a> {
    pub fn new(bench: &'a Bench) -> Self {
        Self {
            bench,
            staged: [0; MATRIX_ROWS],
            fail_commits: false,
        }
    }
}

impl DisplaySink for RecordingDisplay<'_> {
    type Error = ();

    fn set_row(&mut self, index: usize, bits: u8) {
        if let Some(row) = self.staged.get_mut(index) {
            *row = bits;
        }
    }

    fn commit(&mut self) -> Result<(), ()> {
        if self.fail_commits {
            return Err(());
        }
        self.bench.record(Trace::Show(Frame::new(self.staged)));
        Ok(())
    }
}

/// Watchdog that logs feeds
pub struct CountingWatchdog<'a>(pub &'a Bench);

impl Watchdog for CountingWatchdog<'_> {
    fn feed(&mut self) {
        self.0.record(Trace::Feed);
    }
}

/// Busy LED
#[derive(Default)]
pub struct FakeLed {
    pub on: bool,
    pub toggles: u32,
}

impl PinErrorType for FakeLed {
    type Error = Infallible;
}

impl OutputPin for FakeLed {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.on = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.on = true;
        Ok(())
    }
}

impl StatefulOutputPin for FakeLed {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.on)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.on)
    }

    fn toggle(&mut self) -> Result<(), Infallible> {
        self.on = !self.on;
        self.toggles += 1;
        Ok(())
    }
}

/// Frame source that can be unplugged through a shared switch
pub struct FlakySource<'a> {
    inner: SliceSource<'a>,
    online: &'a Cell<bool>,
}

impl<'a> FlakySource<'a> {
    pub fn new(data: &'a [u8], online: &'a Cell<bool>) -> Self {
        Self {
            inner: SliceSource::new(data),
            online,
        }
    }
}

impl ErrorType for FlakySource<'_> {
    type Error = ErrorKind;
}

impl Read for FlakySource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        if !self.online.get() {
            return Err(ErrorKind::NotConnected);
        }
        self.inner.read(buf)
    }
}

impl Seek for FlakySource<'_> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ErrorKind> {
        if !self.online.get() {
            return Err(ErrorKind::NotConnected);
        }
        self.inner.seek(pos)
    }
}

/// `count` frames where every row of frame `i` holds `i + 1`
pub fn frames_bytes<const N: usize>(count: usize) -> [u8; N] {
    assert_eq!(N, count * FRAME_SIZE);
    let mut data = [0u8; N];
    for (i, record) in data.chunks_mut(FRAME_SIZE).enumerate() {
        record.fill(i as u8 + 1);
    }
    data
}

/// The frame `frames_bytes` puts at `index`
pub fn numbered_frame(index: u8) -> Frame {
    Frame::new([index + 1; FRAME_SIZE])
}

//! Per-frame capture of register writes and start-of-frame register state.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::engine::{EngineKind, EngineMask};
use crate::layout::layout_table;

/// `draw_index` of writes issued outside any draw call.
pub const NO_DRAW: i64 = -1;

/// One observed register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub engine: EngineKind,
    pub method: u32,
    pub arg: u32,
    /// Nanoseconds since the frame began.
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default = "no_draw")]
    pub draw_index: i64,
}

fn no_draw() -> i64 {
    NO_DRAW
}

/// One engine's register file as it stood when a frame began.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSnapshot {
    registers: BTreeMap<u32, u32>,
}

impl FrameSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a dense register file: `values[i]` is the register at offset `i`.
    pub fn from_values(values: &[u32]) -> Self {
        (0u32..).zip(values.iter().copied()).collect()
    }

    pub fn insert(&mut self, offset: u32, value: u32) {
        self.registers.insert(offset, value);
    }

    pub fn get(&self, offset: u32) -> Option<u32> {
        self.registers.get(&offset).copied()
    }

    /// `(offset, value)` pairs in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.registers.iter().map(|(offset, value)| (*offset, *value))
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}

impl FromIterator<(u32, u32)> for FrameSnapshot {
    fn from_iter<T: IntoIterator<Item = (u32, u32)>>(iter: T) -> Self {
        Self {
            registers: iter.into_iter().collect(),
        }
    }
}

/// Source of full register-file reads, implemented by whatever emulates the engines.
pub trait RegisterFile {
    /// Current value of every register of `engine`.
    fn snapshot(&self, engine: EngineKind) -> FrameSnapshot;
}

/// Plain in-memory register files for all engines, sized from their layouts.
#[derive(Debug, Clone)]
pub struct RegisterFileImage {
    files: [Vec<u32>; 5],
}

impl RegisterFileImage {
    pub fn new() -> Self {
        Self {
            files: EngineKind::ALL.map(|engine| vec![0; layout_table(engine).register_count() as usize]),
        }
    }

    /// Stores `value` at `offset`. Returns `false` when the offset is past the register file.
    pub fn write(&mut self, engine: EngineKind, offset: u32, value: u32) -> bool {
        match self.files[engine.index()].get_mut(offset as usize) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn read(&self, engine: EngineKind, offset: u32) -> Option<u32> {
        self.files[engine.index()].get(offset as usize).copied()
    }
}

impl Default for RegisterFileImage {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile for RegisterFileImage {
    fn snapshot(&self, engine: EngineKind) -> FrameSnapshot {
        FrameSnapshot::from_values(&self.files[engine.index()])
    }
}

/// Everything captured for one frame; input to [`crate::diff::build_results`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedFrame {
    pub frame_number: u64,
    /// Writes in emission order.
    pub log: Vec<RecordEntry>,
    /// Start-of-frame state of every enabled engine.
    pub snapshots: BTreeMap<EngineKind, FrameSnapshot>,
}

#[derive(Debug)]
struct OpenFrame {
    frame: CapturedFrame,
    started: Instant,
}

/// Capture session: one open frame at a time.
///
/// Recording must happen on the thread that drives command execution so that the log keeps
/// emission order. Calling [`FrameRecorder::begin_frame`] while a frame is open, or recording
/// or ending without one, panics.
#[derive(Debug)]
pub struct FrameRecorder {
    engines: EngineMask,
    open: Option<OpenFrame>,
    frames_pending: u32,
}

impl Default for FrameRecorder {
    fn default() -> Self {
        Self::new(EngineMask::default())
    }
}

impl FrameRecorder {
    pub fn new(engines: EngineMask) -> Self {
        Self {
            engines,
            open: None,
            frames_pending: 0,
        }
    }

    pub fn engines(&self) -> EngineMask {
        self.engines
    }

    pub fn is_frame_open(&self) -> bool {
        self.open.is_some()
    }

    /// Whether a frame is open or further frames have been requested with [`Self::arm`].
    pub fn is_capturing(&self) -> bool {
        self.open.is_some() || self.frames_pending > 0
    }

    /// Snapshots every enabled engine and opens a new frame.
    pub fn begin_frame<R>(&mut self, frame_number: u64, registers: &R)
    where
        R: RegisterFile + ?Sized,
    {
        if let Some(open) = &self.open {
            panic!(
                "begin_frame({frame_number}) called while frame {} is still open",
                open.frame.frame_number
            );
        }

        let snapshots = self
            .engines
            .engines()
            .map(|engine| (engine, registers.snapshot(engine)))
            .collect();

        debug!(frame = frame_number, engines = ?self.engines, "frame capture started");
        self.open = Some(OpenFrame {
            frame: CapturedFrame {
                frame_number,
                log: Vec::new(),
                snapshots,
            },
            started: Instant::now(),
        });
    }

    /// Appends a write stamped with the time elapsed since the frame began.
    pub fn record_write(&mut self, engine: EngineKind, method: u32, arg: u32, draw_index: i64) {
        let timestamp = match &self.open {
            Some(open) => u64::try_from(open.started.elapsed().as_nanos()).unwrap_or(u64::MAX),
            None => panic!("record_write to {engine} 0x{method:04X} with no open frame"),
        };
        self.record_write_at(engine, method, arg, timestamp, draw_index);
    }

    /// Appends a write with a caller-supplied timestamp. Writes to disabled engines are dropped.
    pub fn record_write_at(
        &mut self,
        engine: EngineKind,
        method: u32,
        arg: u32,
        timestamp: u64,
        draw_index: i64,
    ) {
        let Some(open) = self.open.as_mut() else {
            panic!("record_write to {engine} 0x{method:04X} with no open frame");
        };
        if !self.engines.contains_engine(engine) {
            return;
        }

        trace!(%engine, method, arg, draw_index, "register write");
        open.frame.log.push(RecordEntry {
            engine,
            method,
            arg,
            timestamp,
            draw_index,
        });
    }

    /// Closes the open frame and hands over its log and snapshots.
    pub fn end_frame(&mut self) -> CapturedFrame {
        let Some(open) = self.open.take() else {
            panic!("end_frame called with no open frame");
        };
        info!(
            frame = open.frame.frame_number,
            writes = open.frame.log.len(),
            "frame capture finished"
        );
        open.frame
    }

    /// Drops the open frame, if any, along with its log. Returns whether one was open.
    pub fn abandon_frame(&mut self) -> bool {
        match self.open.take() {
            Some(open) => {
                debug!(
                    frame = open.frame.frame_number,
                    writes = open.frame.log.len(),
                    "frame capture abandoned"
                );
                true
            }
            None => false,
        }
    }

    /// Requests capture of the next `frames` frames, starting at the next frame boundary.
    pub fn arm(&mut self, frames: u32) {
        self.frames_pending = frames;
    }

    /// Frame-boundary hook: finishes the open frame (if any) and opens the next requested one.
    pub fn on_frame_boundary<R>(&mut self, frame_number: u64, registers: &R) -> Option<CapturedFrame>
    where
        R: RegisterFile + ?Sized,
    {
        let finished = self.open.is_some().then(|| self.end_frame());
        if self.frames_pending > 0 {
            self.frames_pending -= 1;
            self.begin_frame(frame_number, registers);
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> RegisterFileImage {
        let mut image = RegisterFileImage::new();
        assert!(image.write(EngineKind::Maxwell3d, 0x202, 1280));
        assert!(image.write(EngineKind::Fermi2d, 0x86, 640));
        image
    }

    #[test]
    fn snapshots_only_enabled_engines() {
        let mut recorder = FrameRecorder::new(EngineMask::MAXWELL_3D);
        recorder.begin_frame(7, &image());
        let frame = recorder.end_frame();

        assert_eq!(frame.frame_number, 7);
        assert_eq!(frame.snapshots.keys().copied().collect::<Vec<_>>(), vec![EngineKind::Maxwell3d]);
        let snapshot = &frame.snapshots[&EngineKind::Maxwell3d];
        assert_eq!(snapshot.len(), layout_table(EngineKind::Maxwell3d).register_count() as usize);
        assert_eq!(snapshot.get(0x202), Some(1280));
    }

    #[test]
    fn log_keeps_emission_order_and_drops_disabled_engines() {
        let mut recorder = FrameRecorder::new(EngineMask::MAXWELL_3D | EngineMask::MAXWELL_DMA);
        recorder.begin_frame(0, &image());
        recorder.record_write_at(EngineKind::Maxwell3d, 0x202, 2, 10, NO_DRAW);
        recorder.record_write_at(EngineKind::Fermi2d, 0x86, 3, 11, NO_DRAW);
        recorder.record_write_at(EngineKind::MaxwellDma, 0x104, 4, 12, 0);
        recorder.record_write_at(EngineKind::Maxwell3d, 0x202, 2, 13, 0);
        let frame = recorder.end_frame();

        let summary: Vec<_> = frame
            .log
            .iter()
            .map(|e| (e.engine, e.method, e.timestamp, e.draw_index))
            .collect();
        assert_eq!(
            summary,
            vec![
                (EngineKind::Maxwell3d, 0x202, 10, NO_DRAW),
                (EngineKind::MaxwellDma, 0x104, 12, 0),
                (EngineKind::Maxwell3d, 0x202, 13, 0),
            ]
        );
    }

    #[test]
    fn empty_mask_records_nothing() {
        let mut recorder = FrameRecorder::new(EngineMask::empty());
        recorder.begin_frame(0, &image());
        recorder.record_write(EngineKind::Maxwell3d, 0x202, 1, NO_DRAW);
        let frame = recorder.end_frame();
        assert!(frame.log.is_empty());
        assert!(frame.snapshots.is_empty());
    }

    #[test]
    #[should_panic(expected = "still open")]
    fn nested_begin_panics() {
        let mut recorder = FrameRecorder::default();
        recorder.begin_frame(0, &image());
        recorder.begin_frame(1, &image());
    }

    #[test]
    #[should_panic(expected = "no open frame")]
    fn write_without_frame_panics() {
        let mut recorder = FrameRecorder::default();
        recorder.record_write(EngineKind::Maxwell3d, 0x202, 1, NO_DRAW);
    }

    #[test]
    #[should_panic(expected = "no open frame")]
    fn end_without_frame_panics() {
        FrameRecorder::default().end_frame();
    }

    #[test]
    fn abandon_discards_and_allows_a_new_frame() {
        let mut recorder = FrameRecorder::default();
        assert!(!recorder.abandon_frame());
        recorder.begin_frame(0, &image());
        recorder.record_write_at(EngineKind::Maxwell3d, 0x202, 1, 0, NO_DRAW);
        assert!(recorder.abandon_frame());
        assert!(!recorder.is_frame_open());

        recorder.begin_frame(1, &image());
        assert!(recorder.end_frame().log.is_empty());
    }

    #[test]
    fn armed_recorder_captures_requested_frames() {
        let image = image();
        let mut recorder = FrameRecorder::default();
        assert!(recorder.on_frame_boundary(0, &image).is_none());
        assert!(!recorder.is_capturing());

        recorder.arm(2);
        assert!(recorder.is_capturing());
        assert!(recorder.on_frame_boundary(1, &image).is_none());
        recorder.record_write_at(EngineKind::Maxwell3d, 0x202, 1, 0, NO_DRAW);

        let first = recorder.on_frame_boundary(2, &image).unwrap();
        assert_eq!((first.frame_number, first.log.len()), (1, 1));
        assert!(recorder.is_capturing());

        let second = recorder.on_frame_boundary(3, &image).unwrap();
        assert_eq!((second.frame_number, second.log.len()), (2, 0));
        assert!(!recorder.is_capturing());
        assert!(recorder.on_frame_boundary(4, &image).is_none());
    }

    #[test]
    fn register_file_image_rejects_out_of_range_writes() {
        let mut image = RegisterFileImage::new();
        let count = layout_table(EngineKind::KeplerInlineToMemory).register_count();
        assert!(!image.write(EngineKind::KeplerInlineToMemory, count, 1));
        assert_eq!(image.read(EngineKind::KeplerInlineToMemory, count), None);
        assert_eq!(image.read(EngineKind::KeplerInlineToMemory, 0), Some(0));
    }
}

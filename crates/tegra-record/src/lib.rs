//! GPU register-write trace decoding.
//!
//! A [`FrameRecorder`] captures the raw register writes issued to the command engines during a
//! frame, together with each engine's register file at frame start. [`build_results`] turns a
//! [`CapturedFrame`] into human-readable results:
//!
//! - [`resolve`]: flat offset -> layout row plus structure instance and array element
//! - [`expand`]: resolved row -> field names (one per packed sub-field)
//! - [`decode`]: raw value -> rendered value, driven by per-engine [`DecodeTable`]s
//! - [`FrameResults`]: writes grouped by draw (`changed`) and inherited state (`unchanged`)
//!
//! [`report`] renders results as plain text and [`Filter`] narrows flattened rows.

mod capture;
mod config;
mod decode;
mod diff;
mod engine;
pub mod enums;
mod filter;
mod layout;
mod names;
mod recorder;
pub mod report;
mod resolve;
mod tables;

pub use capture::{CaptureFile, CaptureFileError, CaptureFrame, EngineSnapshot};
pub use config::{ConfigError, RecordConfig};
pub use decode::{
    decode, decode_table, hex_fallback, DecodeTable, DecodeTableError, EnumTable, FieldDecode,
    FieldFormat, Render,
};
pub use diff::{
    build_results, build_results_with, DecodedResult, DrawGroup, FrameResults, RegisterTables,
    ResultRow,
};
pub use engine::{EngineKind, EngineMask, UnknownEngineName};
pub use filter::{Column, Filter};
pub use layout::{
    layout_table, GroupSpan, LayoutError, LayoutTable, MethodDescriptor, StructLayout,
    ELEMENT_INDEX_TOKEN, STRUCT_INDEX_TOKEN, UNKNOWN_PREFIX,
};
pub use names::{expand, expand_fields};
pub use recorder::{
    CapturedFrame, FrameRecorder, FrameSnapshot, RecordEntry, RegisterFile, RegisterFileImage,
    NO_DRAW,
};
pub use resolve::{resolve, resolve_in, Resolution};

//! Built-in register layouts and decode rules, one module per engine.
//!
//! Tables are split into segments so register blocks shared by several engines (the inline
//! upload registers) are written once; segments are concatenated when the engine's
//! [`LayoutTable`](crate::layout::LayoutTable) is built.

use crate::decode::{FieldDecode, FieldFormat, Render};
use crate::engine::EngineKind;
use crate::layout::MethodDescriptor;

mod fermi_2d;
mod kepler_compute;
mod kepler_memory;
mod maxwell_3d;
mod maxwell_dma;

pub struct EngineTables {
    pub methods: &'static [&'static [MethodDescriptor]],
    pub fields: &'static [&'static [FieldDecode]],
    pub register_count: u32,
    pub macro_start: Option<u32>,
}

impl EngineTables {
    pub fn method_rows(&self) -> Vec<MethodDescriptor> {
        self.methods.iter().flat_map(|s| s.iter().copied()).collect()
    }

    pub fn field_rows(&self) -> Vec<FieldDecode> {
        self.fields.iter().flat_map(|s| s.iter().copied()).collect()
    }
}

pub fn engine_tables(engine: EngineKind) -> &'static EngineTables {
    match engine {
        EngineKind::Fermi2d => &fermi_2d::TABLES,
        EngineKind::Maxwell3d => &maxwell_3d::TABLES,
        EngineKind::KeplerCompute => &kepler_compute::TABLES,
        EngineKind::KeplerInlineToMemory => &kepler_memory::TABLES,
        EngineKind::MaxwellDma => &maxwell_dma::TABLES,
    }
}

pub(crate) const HEX: FieldFormat = FieldFormat::whole(Render::Hex);
pub(crate) const DEC: FieldFormat = FieldFormat::whole(Render::Dec);
pub(crate) const BOOL: FieldFormat = FieldFormat::whole(Render::Bool);
pub(crate) const F32: FieldFormat = FieldFormat::whole(Render::F32);

/// Inline upload block (`0x60..0x6E`), shared by the 3D, compute and inline-to-memory engines.
pub(crate) const UPLOAD_METHODS: &[MethodDescriptor] = &[
    MethodDescriptor::scalar(0x60, "upload.line_length_in"),
    MethodDescriptor::scalar(0x61, "upload.line_count"),
    MethodDescriptor::scalar(0x62, "upload.dest.address_high"),
    MethodDescriptor::scalar(0x63, "upload.dest.address_low"),
    MethodDescriptor::scalar(0x64, "upload.dest.pitch"),
    MethodDescriptor::scalar(0x65, "upload.dest.block_width"),
    MethodDescriptor::scalar(0x65, "upload.dest.block_height"),
    MethodDescriptor::scalar(0x65, "upload.dest.block_depth"),
    MethodDescriptor::scalar(0x66, "upload.dest.width"),
    MethodDescriptor::scalar(0x67, "upload.dest.height"),
    MethodDescriptor::scalar(0x68, "upload.dest.depth"),
    MethodDescriptor::scalar(0x69, "upload.dest.z"),
    MethodDescriptor::scalar(0x6A, "upload.dest.x"),
    MethodDescriptor::scalar(0x6B, "upload.dest.y"),
    MethodDescriptor::scalar(0x6C, "exec_upload.linear"),
    MethodDescriptor::scalar(0x6D, "data_upload"),
];

pub(crate) const UPLOAD_FIELDS: &[FieldDecode] = &[
    FieldDecode::new(0x60, &[DEC]),
    FieldDecode::new(0x61, &[DEC]),
    FieldDecode::new(0x62, &[HEX]),
    FieldDecode::new(0x63, &[HEX]),
    FieldDecode::new(0x64, &[DEC]),
    FieldDecode::new(
        0x65,
        &[
            FieldFormat::bits(0, 4, Render::Dec),
            FieldFormat::bits(4, 4, Render::Dec),
            FieldFormat::bits(8, 4, Render::Dec),
        ],
    ),
    FieldDecode::new(0x66, &[DEC]),
    FieldDecode::new(0x67, &[DEC]),
    FieldDecode::new(0x68, &[DEC]),
    FieldDecode::new(0x69, &[DEC]),
    FieldDecode::new(0x6A, &[DEC]),
    FieldDecode::new(0x6B, &[DEC]),
    FieldDecode::new(0x6C, &[FieldFormat::flag(0)]),
];

//! 2D engine (`FERMI2D`).

use super::{EngineTables, DEC, HEX};
use crate::decode::{FieldDecode, FieldFormat, Render};
use crate::enums;
use crate::layout::MethodDescriptor as M;

pub(super) const REGISTER_COUNT: u32 = 0x258;

const METHODS: &[M] = &[
    M::scalar(0x80, "dst.format"),
    M::scalar(0x81, "dst.linear"),
    M::scalar(0x82, "dst.block_width"),
    M::scalar(0x82, "dst.block_height"),
    M::scalar(0x82, "dst.block_depth"),
    M::scalar(0x83, "dst.depth"),
    M::scalar(0x84, "dst.layer"),
    M::scalar(0x85, "dst.pitch"),
    M::scalar(0x86, "dst.width"),
    M::scalar(0x87, "dst.height"),
    M::scalar(0x88, "dst.address_high"),
    M::scalar(0x89, "dst.address_low"),
    M::scalar(0x8C, "src.format"),
    M::scalar(0x8D, "src.linear"),
    M::scalar(0x8E, "src.block_width"),
    M::scalar(0x8E, "src.block_height"),
    M::scalar(0x8E, "src.block_depth"),
    M::scalar(0x8F, "src.depth"),
    M::scalar(0x90, "src.layer"),
    M::scalar(0x91, "src.pitch"),
    M::scalar(0x92, "src.width"),
    M::scalar(0x93, "src.height"),
    M::scalar(0x94, "src.address_high"),
    M::scalar(0x95, "src.address_low"),
    M::scalar(0xAB, "operation"),
    M::scalar(0x223, "blit_control.origin"),
    M::scalar(0x223, "blit_control.filter"),
    M::scalar(0x22C, "blit_dst_x"),
    M::scalar(0x22D, "blit_dst_y"),
    M::scalar(0x22E, "blit_dst_width"),
    M::scalar(0x22F, "blit_dst_height"),
    M::scalar(0x230, "blit_du_dx_fract"),
    M::scalar(0x231, "blit_du_dx_int"),
    M::scalar(0x232, "blit_dv_dy_fract"),
    M::scalar(0x233, "blit_dv_dy_int"),
    M::scalar(0x234, "blit_src_x0_fract"),
    M::scalar(0x235, "blit_src_x0_int"),
    M::scalar(0x236, "blit_src_y0_fract"),
    M::scalar(0x237, "blit_src_y0_int"),
];

const BLOCK_DIMENSIONS: &[FieldFormat] = &[
    FieldFormat::bits(0, 4, Render::Dec),
    FieldFormat::bits(4, 4, Render::Dec),
    FieldFormat::bits(8, 4, Render::Dec),
];

const FIELDS: &[FieldDecode] = &[
    FieldDecode::new(
        0x80,
        &const {[FieldFormat::whole(Render::Enum(&enums::SURFACE_FORMAT))]},
    ),
    FieldDecode::new(
        0x81,
        &const {[FieldFormat::whole(Render::Enum(&enums::MEMORY_LAYOUT))]},
    ),
    FieldDecode::new(0x82, BLOCK_DIMENSIONS),
    FieldDecode::new(0x83, &[DEC]),
    FieldDecode::new(0x84, &[DEC]),
    FieldDecode::new(0x85, &[DEC]),
    FieldDecode::new(0x86, &[DEC]),
    FieldDecode::new(0x87, &[DEC]),
    FieldDecode::new(0x88, &[HEX]),
    FieldDecode::new(0x89, &[HEX]),
    FieldDecode::new(
        0x8C,
        &const {[FieldFormat::whole(Render::Enum(&enums::SURFACE_FORMAT))]},
    ),
    FieldDecode::new(
        0x8D,
        &const {[FieldFormat::whole(Render::Enum(&enums::MEMORY_LAYOUT))]},
    ),
    FieldDecode::new(0x8E, BLOCK_DIMENSIONS),
    FieldDecode::new(0x8F, &[DEC]),
    FieldDecode::new(0x90, &[DEC]),
    FieldDecode::new(0x91, &[DEC]),
    FieldDecode::new(0x92, &[DEC]),
    FieldDecode::new(0x93, &[DEC]),
    FieldDecode::new(0x94, &[HEX]),
    FieldDecode::new(0x95, &[HEX]),
    FieldDecode::new(
        0xAB,
        &const {[FieldFormat::whole(Render::Enum(&enums::FERMI_OPERATION))]},
    ),
    FieldDecode::new(
        0x223,
        &const {[
            FieldFormat::bits(0, 1, Render::Enum(&enums::FERMI_ORIGIN)),
            FieldFormat::bits(4, 1, Render::Enum(&enums::FERMI_FILTER)),
        ]},
    ),
    FieldDecode::new(0x22C, &[DEC]),
    FieldDecode::new(0x22D, &[DEC]),
    FieldDecode::new(0x22E, &[DEC]),
    FieldDecode::new(0x22F, &[DEC]),
    FieldDecode::new(0x230, &[DEC]),
    FieldDecode::new(0x231, &[DEC]),
    FieldDecode::new(0x232, &[DEC]),
    FieldDecode::new(0x233, &[DEC]),
    FieldDecode::new(0x234, &[DEC]),
    FieldDecode::new(0x235, &[DEC]),
    FieldDecode::new(0x236, &[DEC]),
    FieldDecode::new(0x237, &[DEC]),
];

pub(super) static TABLES: EngineTables = EngineTables {
    methods: &[METHODS],
    fields: &[FIELDS],
    register_count: REGISTER_COUNT,
    macro_start: None,
};

//! Copy engine (`MAXWDMA`).

use super::{EngineTables, DEC, HEX};
use crate::decode::{FieldDecode, FieldFormat, Render};
use crate::enums;
use crate::layout::MethodDescriptor as M;

pub(super) const REGISTER_COUNT: u32 = 0x1D6;

const METHODS: &[M] = &[
    M::scalar(0xC0, "launch_dma.data_transfer_type"),
    M::scalar(0xC0, "launch_dma.flush_enable"),
    M::scalar(0xC0, "launch_dma.semaphore_type"),
    M::scalar(0xC0, "launch_dma.interrupt_type"),
    M::scalar(0xC0, "launch_dma.src_memory_layout"),
    M::scalar(0xC0, "launch_dma.dst_memory_layout"),
    M::scalar(0xC0, "launch_dma.multi_line_enable"),
    M::scalar(0xC0, "launch_dma.remap_enable"),
    M::scalar(0x100, "offset_in_high"),
    M::scalar(0x101, "offset_in_low"),
    M::scalar(0x102, "offset_out_high"),
    M::scalar(0x103, "offset_out_low"),
    M::scalar(0x104, "pitch_in"),
    M::scalar(0x105, "pitch_out"),
    M::scalar(0x106, "line_length_in"),
    M::scalar(0x107, "line_count"),
    M::scalar(0x1C0, "remap_const.a"),
    M::scalar(0x1C1, "remap_const.b"),
    M::scalar(0x1C2, "remap_components.dst_x"),
    M::scalar(0x1C2, "remap_components.dst_y"),
    M::scalar(0x1C2, "remap_components.dst_z"),
    M::scalar(0x1C2, "remap_components.dst_w"),
    M::scalar(0x1C2, "remap_components.component_size_minus_one"),
    M::scalar(0x1C2, "remap_components.num_src_components_minus_one"),
    M::scalar(0x1C2, "remap_components.num_dst_components_minus_one"),
    M::scalar(0x1C3, "dst_params.block_size.width"),
    M::scalar(0x1C3, "dst_params.block_size.height"),
    M::scalar(0x1C3, "dst_params.block_size.depth"),
    M::scalar(0x1C4, "dst_params.width"),
    M::scalar(0x1C5, "dst_params.height"),
    M::scalar(0x1C6, "dst_params.depth"),
    M::scalar(0x1C7, "dst_params.layer"),
    M::scalar(0x1C8, "dst_params.origin.x"),
    M::scalar(0x1C8, "dst_params.origin.y"),
    M::scalar(0x1CA, "src_params.block_size.width"),
    M::scalar(0x1CA, "src_params.block_size.height"),
    M::scalar(0x1CA, "src_params.block_size.depth"),
    M::scalar(0x1CB, "src_params.width"),
    M::scalar(0x1CC, "src_params.height"),
    M::scalar(0x1CD, "src_params.depth"),
    M::scalar(0x1CE, "src_params.layer"),
    M::scalar(0x1CF, "src_params.origin.x"),
    M::scalar(0x1CF, "src_params.origin.y"),
];

const BLOCK_SIZE: &[FieldFormat] = &[
    FieldFormat::bits(0, 4, Render::Dec),
    FieldFormat::bits(4, 4, Render::Dec),
    FieldFormat::bits(8, 4, Render::Dec),
];

const ORIGIN: &[FieldFormat] = &[
    FieldFormat::bits(0, 16, Render::Dec),
    FieldFormat::bits(16, 16, Render::Dec),
];

const FIELDS: &[FieldDecode] = &[
    FieldDecode::new(
        0xC0,
        &const {[
            FieldFormat::bits(0, 2, Render::Enum(&enums::DMA_TRANSFER_TYPE)),
            FieldFormat::flag(2),
            FieldFormat::bits(3, 2, Render::Enum(&enums::DMA_SEMAPHORE_TYPE)),
            FieldFormat::bits(5, 2, Render::Enum(&enums::DMA_INTERRUPT_TYPE)),
            FieldFormat::bits(7, 1, Render::Enum(&enums::MEMORY_LAYOUT)),
            FieldFormat::bits(8, 1, Render::Enum(&enums::MEMORY_LAYOUT)),
            FieldFormat::flag(9),
            FieldFormat::flag(10),
        ]},
    ),
    FieldDecode::new(0x100, &[HEX]),
    FieldDecode::new(0x101, &[HEX]),
    FieldDecode::new(0x102, &[HEX]),
    FieldDecode::new(0x103, &[HEX]),
    FieldDecode::new(0x104, &[DEC]),
    FieldDecode::new(0x105, &[DEC]),
    FieldDecode::new(0x106, &[DEC]),
    FieldDecode::new(0x107, &[DEC]),
    FieldDecode::new(0x1C0, &[HEX]),
    FieldDecode::new(0x1C1, &[HEX]),
    FieldDecode::new(
        0x1C2,
        &const {[
            FieldFormat::bits(0, 3, Render::Enum(&enums::DMA_SWIZZLE)),
            FieldFormat::bits(4, 3, Render::Enum(&enums::DMA_SWIZZLE)),
            FieldFormat::bits(8, 3, Render::Enum(&enums::DMA_SWIZZLE)),
            FieldFormat::bits(12, 3, Render::Enum(&enums::DMA_SWIZZLE)),
            FieldFormat::bits(16, 2, Render::Dec),
            FieldFormat::bits(20, 2, Render::Dec),
            FieldFormat::bits(24, 2, Render::Dec),
        ]},
    ),
    FieldDecode::new(0x1C3, BLOCK_SIZE),
    FieldDecode::new(0x1C4, &[DEC]),
    FieldDecode::new(0x1C5, &[DEC]),
    FieldDecode::new(0x1C6, &[DEC]),
    FieldDecode::new(0x1C7, &[DEC]),
    FieldDecode::new(0x1C8, ORIGIN),
    FieldDecode::new(0x1CA, BLOCK_SIZE),
    FieldDecode::new(0x1CB, &[DEC]),
    FieldDecode::new(0x1CC, &[DEC]),
    FieldDecode::new(0x1CD, &[DEC]),
    FieldDecode::new(0x1CE, &[DEC]),
    FieldDecode::new(0x1CF, ORIGIN),
];

pub(super) static TABLES: EngineTables = EngineTables {
    methods: &[METHODS],
    fields: &[FIELDS],
    register_count: REGISTER_COUNT,
    macro_start: None,
};

//! Compute engine (`KEPLERC`).

use super::{EngineTables, DEC, HEX, UPLOAD_FIELDS, UPLOAD_METHODS};
use crate::decode::FieldDecode;
use crate::layout::MethodDescriptor as M;

pub(super) const REGISTER_COUNT: u32 = 0xCF8;

const LAUNCH: &[M] = &[
    M::scalar(0xAD, "launch_desc_loc.address"),
    M::scalar(0xAF, "launch"),
    M::scalar(0x557, "tsc.address_high"),
    M::scalar(0x558, "tsc.address_low"),
    M::scalar(0x559, "tsc.limit"),
    M::scalar(0x55D, "tic.address_high"),
    M::scalar(0x55E, "tic.address_low"),
    M::scalar(0x55F, "tic.limit"),
    M::scalar(0x582, "code_loc.address_high"),
    M::scalar(0x583, "code_loc.address_low"),
    M::scalar(0x982, "tex_cb_index"),
];

const FIELDS: &[FieldDecode] = &[
    FieldDecode::new(0xAD, &[HEX]),
    FieldDecode::new(0xAF, &[HEX]),
    FieldDecode::new(0x557, &[HEX]),
    FieldDecode::new(0x558, &[HEX]),
    FieldDecode::new(0x559, &[DEC]),
    FieldDecode::new(0x55D, &[HEX]),
    FieldDecode::new(0x55E, &[HEX]),
    FieldDecode::new(0x55F, &[DEC]),
    FieldDecode::new(0x582, &[HEX]),
    FieldDecode::new(0x583, &[HEX]),
    FieldDecode::new(0x982, &[DEC]),
];

pub(super) static TABLES: EngineTables = EngineTables {
    methods: &[UPLOAD_METHODS, LAUNCH],
    fields: &[UPLOAD_FIELDS, FIELDS],
    register_count: REGISTER_COUNT,
    macro_start: None,
};

//! Inline-to-memory engine (`KEPLERI`). Only the upload block is mapped.

use super::{EngineTables, UPLOAD_FIELDS, UPLOAD_METHODS};

pub(super) const REGISTER_COUNT: u32 = 0x7F;

pub(super) static TABLES: EngineTables = EngineTables {
    methods: &[UPLOAD_METHODS],
    fields: &[UPLOAD_FIELDS],
    register_count: REGISTER_COUNT,
    macro_start: None,
};

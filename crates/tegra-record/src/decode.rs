//! Data-driven argument decoding.
//!
//! Each engine has a [`DecodeTable`] mapping a descriptor row's offset to one [`FieldFormat`]
//! per packed sub-field. Offsets without an entry render as zero-padded hexadecimal.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::engine::EngineKind;
use crate::layout::{layout_table, LayoutTable, MethodDescriptor};
use crate::tables;

/// Closed set of named constants for one register field.
#[derive(Debug)]
pub struct EnumTable {
    pub name: &'static str,
    pub values: &'static [(u32, &'static str)],
}

impl EnumTable {
    pub fn lookup(&self, value: u32) -> Option<&'static str> {
        self.values
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, name)| *name)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Render {
    Bool,
    Dec,
    Hex,
    /// Raw bits reinterpreted as IEEE-754 single precision.
    F32,
    Enum(&'static EnumTable),
}

/// How to extract and render one sub-field of a raw register value.
#[derive(Debug, Clone, Copy)]
pub struct FieldFormat {
    pub shift: u32,
    pub mask: u32,
    pub render: Render,
}

impl FieldFormat {
    /// The whole 32-bit value.
    pub const fn whole(render: Render) -> Self {
        Self {
            shift: 0,
            mask: u32::MAX,
            render,
        }
    }

    /// `width` bits starting at bit `shift`.
    pub const fn bits(shift: u32, width: u32, render: Render) -> Self {
        let mask = if width >= 32 {
            u32::MAX
        } else {
            (1u32 << width) - 1
        };
        Self { shift, mask, render }
    }

    pub const fn flag(bit: u32) -> Self {
        Self::bits(bit, 1, Render::Bool)
    }

    pub fn extract(&self, raw: u32) -> u32 {
        raw.checked_shr(self.shift).unwrap_or(0) & self.mask
    }

    pub fn render(&self, raw: u32) -> String {
        let bits = self.extract(raw);
        match self.render {
            Render::Bool => (bits != 0).to_string(),
            Render::Dec => bits.to_string(),
            Render::Hex => format!("0x{bits:X}"),
            Render::F32 => format!("{:.2}", f32::from_bits(bits)),
            Render::Enum(table) => match table.lookup(bits) {
                Some(name) => name.to_owned(),
                None => {
                    debug!(
                        table = table.name,
                        value = bits,
                        "value has no named constant; rendering raw"
                    );
                    format!("0x{bits:X}")
                }
            },
        }
    }
}

/// Formats for every sub-field of the row at `offset`, in alias order.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecode {
    pub offset: u32,
    pub formats: &'static [FieldFormat],
}

impl FieldDecode {
    pub const fn new(offset: u32, formats: &'static [FieldFormat]) -> Self {
        Self { offset, formats }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeTableError {
    #[error("decode entry for 0x{offset:04X} is listed more than once")]
    Duplicate { offset: u32 },

    #[error("decode entry for 0x{offset:04X} does not name the first row of a register")]
    NoSuchRow { offset: u32 },

    #[error("decode entry for 0x{offset:04X} lists {formats} formats but the register has {aliases} fields")]
    FieldCountMismatch {
        offset: u32,
        formats: usize,
        aliases: usize,
    },

    #[error("decode entry for 0x{offset:04X} field {field} has an empty mask or a shift past bit 31")]
    EmptyField { offset: u32, field: usize },
}

/// Per-engine decode rules, validated against the engine's layout.
#[derive(Debug)]
pub struct DecodeTable {
    fields: HashMap<u32, &'static [FieldFormat]>,
}

impl DecodeTable {
    pub fn new(entries: &[FieldDecode], layout: &LayoutTable) -> Result<Self, DecodeTableError> {
        let mut fields = HashMap::with_capacity(entries.len());
        let rows = layout.rows();

        for entry in entries {
            let offset = entry.offset;
            let start = rows.partition_point(|r| r.offset < offset);
            let aliases = rows[start..]
                .iter()
                .take_while(|r| r.offset == offset)
                .count();
            if aliases == 0 {
                return Err(DecodeTableError::NoSuchRow { offset });
            }
            if entry.formats.len() != aliases {
                return Err(DecodeTableError::FieldCountMismatch {
                    offset,
                    formats: entry.formats.len(),
                    aliases,
                });
            }
            for (field, format) in entry.formats.iter().enumerate() {
                if format.mask == 0 || format.shift > 31 {
                    return Err(DecodeTableError::EmptyField { offset, field });
                }
            }
            if fields.insert(offset, entry.formats).is_some() {
                return Err(DecodeTableError::Duplicate { offset });
            }
        }

        Ok(Self { fields })
    }

    pub fn formats(&self, offset: u32) -> Option<&'static [FieldFormat]> {
        self.fields.get(&offset).copied()
    }

    /// Renders sub-field `sub_field` of `raw` for the register described by `row`.
    pub fn decode(&self, row: &MethodDescriptor, sub_field: usize, raw: u32) -> String {
        match self.formats(row.offset).and_then(|f| f.get(sub_field)) {
            Some(format) => format.render(raw),
            None => hex_fallback(raw),
        }
    }
}

/// Generic rendering for registers without a decode rule.
pub fn hex_fallback(raw: u32) -> String {
    format!("0x{raw:08X}")
}

/// The built-in decode rules of `engine`, validated on first use.
pub fn decode_table(engine: EngineKind) -> &'static DecodeTable {
    static TABLES: [OnceLock<DecodeTable>; 5] = [
        OnceLock::new(),
        OnceLock::new(),
        OnceLock::new(),
        OnceLock::new(),
        OnceLock::new(),
    ];

    TABLES[engine.index()].get_or_init(|| {
        let builtin = tables::engine_tables(engine);
        DecodeTable::new(&builtin.field_rows(), layout_table(engine))
            .unwrap_or_else(|err| panic!("built-in {engine} decode table is malformed: {err}"))
    })
}

/// Renders sub-field `sub_field` of a write to the register described by `row`.
pub fn decode(engine: EngineKind, row: &MethodDescriptor, sub_field: usize, raw: u32) -> String {
    decode_table(engine).decode(row, sub_field, raw)
}

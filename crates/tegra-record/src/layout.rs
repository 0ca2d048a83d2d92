//! Static register-layout metadata.
//!
//! Every engine owns one [`LayoutTable`]: an offset-sorted list of [`MethodDescriptor`] rows.
//! Rows describing one logical field group (a scalar register, a simple array, or all fields of
//! a repeated structure) share the same `struct_base`/`struct_count`/`struct_size` and are
//! contiguous. Several rows may share one offset when a physical register packs more than one
//! logical sub-field.

use core::ops::Range;
use std::sync::OnceLock;

use crate::engine::EngineKind;
use crate::tables;

/// Placeholder replaced by `[struct_index]` when a row belongs to a repeated structure.
pub const STRUCT_INDEX_TOKEN: &str = "(OFFSET)";
/// Placeholder replaced by `[element_index]` when a row describes an array.
pub const ELEMENT_INDEX_TOKEN: &str = "(INDEX)";
/// Name prefix of reserved/unexplored register ranges.
pub const UNKNOWN_PREFIX: &str = "unk_";

/// One row of per-engine layout metadata. All offsets and sizes are in 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub offset: u32,
    pub elem_count: u32,
    pub elem_size: u32,
    pub struct_base: u32,
    pub struct_count: u32,
    pub struct_size: u32,
    pub name: &'static str,
}

impl MethodDescriptor {
    pub const fn new(
        offset: u32,
        elem_count: u32,
        elem_size: u32,
        struct_base: u32,
        struct_count: u32,
        struct_size: u32,
        name: &'static str,
    ) -> Self {
        Self {
            offset,
            elem_count,
            elem_size,
            struct_base,
            struct_count,
            struct_size,
            name,
        }
    }

    /// A single, non-repeated register.
    pub const fn scalar(offset: u32, name: &'static str) -> Self {
        Self::new(offset, 1, 1, offset, 1, 1, name)
    }

    /// A simple array of `count` registers, `stride` words apart.
    ///
    /// Encoded as a single structure instance spanning the whole array, so the resolver's
    /// element arithmetic needs no special case for it.
    pub const fn array(offset: u32, count: u32, stride: u32, name: &'static str) -> Self {
        Self::new(offset, count, stride, offset, 1, count * stride, name)
    }

    pub const fn is_repeated_struct(&self) -> bool {
        self.struct_count > 1
    }

    pub const fn is_array(&self) -> bool {
        self.elem_count > 1
    }

    pub fn is_unknown(&self) -> bool {
        self.name.starts_with(UNKNOWN_PREFIX)
    }

    /// Region covered by this row's whole field group.
    pub fn group_region(&self) -> Range<u64> {
        let start = u64::from(self.struct_base);
        start..start + u64::from(self.struct_count) * u64::from(self.struct_size)
    }

    fn same_group(&self, other: &MethodDescriptor) -> bool {
        self.struct_base == other.struct_base
            && self.struct_count == other.struct_count
            && self.struct_size == other.struct_size
    }
}

/// Shape of a repeated structure; builds the rows of its fields.
#[derive(Debug, Clone, Copy)]
pub struct StructLayout {
    pub base: u32,
    pub count: u32,
    pub size: u32,
}

impl StructLayout {
    pub const fn new(base: u32, count: u32, size: u32) -> Self {
        Self { base, count, size }
    }

    /// Scalar field at word `field_offset` inside each instance.
    pub const fn field(&self, field_offset: u32, name: &'static str) -> MethodDescriptor {
        MethodDescriptor::new(
            self.base + field_offset,
            1,
            1,
            self.base,
            self.count,
            self.size,
            name,
        )
    }

    /// Array field inside each instance.
    pub const fn array(
        &self,
        field_offset: u32,
        count: u32,
        stride: u32,
        name: &'static str,
    ) -> MethodDescriptor {
        MethodDescriptor::new(
            self.base + field_offset,
            count,
            stride,
            self.base,
            self.count,
            self.size,
            name,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("row {index} ({name}) has a zero count or stride")]
    ZeroSize { index: usize, name: &'static str },

    #[error("row {index} ({name}) does not fit inside its structure instance")]
    RowOutsideInstance { index: usize, name: &'static str },

    #[error("row {index} ({name}) at offset 0x{offset:04X} is out of order")]
    OutOfOrder {
        index: usize,
        name: &'static str,
        offset: u32,
    },

    #[error("group starting at row {index} ({name}) does not begin at its struct base 0x{struct_base:04X}")]
    MissingGroupBase {
        index: usize,
        name: &'static str,
        struct_base: u32,
    },

    #[error("group starting at row {index} ({name}) overlaps the previous group (ends at 0x{previous_end:04X})")]
    Overlap {
        index: usize,
        name: &'static str,
        previous_end: u64,
    },

    #[error("macro region start 0x{macro_start:04X} falls inside a group that starts before it (row {index}, {name})")]
    MacroBoundary {
        index: usize,
        name: &'static str,
        macro_start: u32,
    },
}

/// Contiguous run of rows that share one field group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpan {
    pub rows: Range<usize>,
    pub base: u32,
    pub count: u32,
    pub size: u32,
}

impl GroupSpan {
    pub fn contains(&self, offset: u32) -> bool {
        let offset = u64::from(offset);
        let start = u64::from(self.base);
        offset >= start && offset < start + u64::from(self.count) * u64::from(self.size)
    }
}

/// Validated, immutable layout of one engine's register space.
#[derive(Debug)]
pub struct LayoutTable {
    rows: Vec<MethodDescriptor>,
    groups: Vec<GroupSpan>,
    register_count: u32,
    macro_start: Option<u32>,
}

impl LayoutTable {
    /// Validates `rows` and indexes their field groups.
    ///
    /// `register_count` is the size of the engine's register file; `macro_start` marks the first
    /// offset of the macro-upload window (if the engine has one).
    pub fn new(
        rows: Vec<MethodDescriptor>,
        register_count: u32,
        macro_start: Option<u32>,
    ) -> Result<Self, LayoutError> {
        let mut groups: Vec<GroupSpan> = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let name = row.name;
            if row.elem_count == 0 || row.elem_size == 0 || row.struct_count == 0 || row.struct_size == 0
            {
                return Err(LayoutError::ZeroSize { index, name });
            }

            let field_start = u64::from(row.offset);
            let field_end = field_start + u64::from(row.elem_count) * u64::from(row.elem_size);
            let instance_end = u64::from(row.struct_base) + u64::from(row.struct_size);
            if row.offset < row.struct_base || field_end > instance_end {
                return Err(LayoutError::RowOutsideInstance { index, name });
            }

            let Some(prev) = index.checked_sub(1).map(|i| &rows[i]) else {
                groups.push(Self::open_group(index, row)?);
                continue;
            };

            if row.offset < prev.offset {
                return Err(LayoutError::OutOfOrder {
                    index,
                    name,
                    offset: row.offset,
                });
            }

            if row.same_group(prev) {
                if let Some(group) = groups.last_mut() {
                    group.rows.end = index + 1;
                }
                continue;
            }

            let previous_end = prev.group_region().end;
            if u64::from(row.struct_base) < previous_end {
                return Err(LayoutError::Overlap {
                    index,
                    name,
                    previous_end,
                });
            }
            groups.push(Self::open_group(index, row)?);
        }

        if let Some(macro_start) = macro_start {
            for group in &groups {
                let row = &rows[group.rows.start];
                if group.base < macro_start && group.contains(macro_start) {
                    return Err(LayoutError::MacroBoundary {
                        index: group.rows.start,
                        name: row.name,
                        macro_start,
                    });
                }
            }
        }

        Ok(Self {
            rows,
            groups,
            register_count,
            macro_start,
        })
    }

    fn open_group(index: usize, row: &MethodDescriptor) -> Result<GroupSpan, LayoutError> {
        if row.offset != row.struct_base {
            return Err(LayoutError::MissingGroupBase {
                index,
                name: row.name,
                struct_base: row.struct_base,
            });
        }
        Ok(GroupSpan {
            rows: index..index + 1,
            base: row.struct_base,
            count: row.struct_count,
            size: row.struct_size,
        })
    }

    pub fn rows(&self) -> &[MethodDescriptor] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&MethodDescriptor> {
        self.rows.get(index)
    }

    pub fn groups(&self) -> &[GroupSpan] {
        &self.groups
    }

    /// Number of 32-bit registers in the engine's register file.
    pub fn register_count(&self) -> u32 {
        self.register_count
    }

    pub fn macro_start(&self) -> Option<u32> {
        self.macro_start
    }

    /// Whether `offset` addresses the macro-upload window rather than a named register.
    pub fn is_macro_offset(&self, offset: u32) -> bool {
        self.macro_start.is_some_and(|start| offset >= start)
    }

    /// Group whose coverage region contains `offset`.
    pub fn group_containing(&self, offset: u32) -> Option<&GroupSpan> {
        let idx = self.groups.partition_point(|g| g.base <= offset);
        let group = self.groups.get(idx.checked_sub(1)?)?;
        group.contains(offset).then_some(group)
    }

    /// Every offset covered by some row, ascending.
    pub fn mapped_offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.groups.iter().flat_map(|g| {
            let end = g.base + g.count * g.size;
            g.base..end
        })
    }
}

/// The built-in layout of `engine`, validated on first use.
pub fn layout_table(engine: EngineKind) -> &'static LayoutTable {
    static TABLES: [OnceLock<LayoutTable>; 5] = [
        OnceLock::new(),
        OnceLock::new(),
        OnceLock::new(),
        OnceLock::new(),
        OnceLock::new(),
    ];

    TABLES[engine.index()].get_or_init(|| {
        let builtin = tables::engine_tables(engine);
        LayoutTable::new(builtin.method_rows(), builtin.register_count, builtin.macro_start)
            .unwrap_or_else(|err| panic!("built-in {engine} layout table is malformed: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_tables_validate() {
        for engine in EngineKind::ALL {
            let builtin = tables::engine_tables(engine);
            let table = LayoutTable::new(builtin.method_rows(), builtin.register_count, builtin.macro_start);
            assert!(table.is_ok(), "{engine}: {:?}", table.err());
        }
    }

    #[test]
    fn array_constructor_spans_whole_array() {
        let row = MethodDescriptor::array(0x360, 4, 1, "clear_color(INDEX)");
        assert_eq!(row.struct_base, 0x360);
        assert_eq!(row.struct_count, 1);
        assert_eq!(row.struct_size, 4);
        assert_eq!(row.group_region(), 0x360..0x364);
    }

    #[test]
    fn rejects_out_of_order_rows() {
        let rows = vec![
            MethodDescriptor::scalar(0x20, "b"),
            MethodDescriptor::scalar(0x10, "a"),
        ];
        let err = LayoutTable::new(rows, 0x40, None).unwrap_err();
        assert!(matches!(err, LayoutError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn rejects_overlapping_groups() {
        let rt = StructLayout::new(0x10, 4, 2);
        let rows = vec![
            rt.field(0, "rt(OFFSET).width"),
            MethodDescriptor::scalar(0x12, "stray"),
        ];
        let err = LayoutTable::new(rows, 0x40, None).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Overlap {
                index: 1,
                previous_end: 0x18,
                ..
            }
        ));
    }

    #[test]
    fn rejects_group_without_base_row() {
        let s = StructLayout::new(0x10, 2, 4);
        let rows = vec![s.field(1, "s(OFFSET).y")];
        let err = LayoutTable::new(rows, 0x40, None).unwrap_err();
        assert!(matches!(err, LayoutError::MissingGroupBase { struct_base: 0x10, .. }));
    }

    #[test]
    fn rejects_field_outside_instance() {
        let s = StructLayout::new(0x10, 2, 4);
        let rows = vec![s.field(0, "s(OFFSET).x"), s.array(2, 4, 1, "s(OFFSET).v(INDEX)")];
        let err = LayoutTable::new(rows, 0x40, None).unwrap_err();
        assert!(matches!(err, LayoutError::RowOutsideInstance { index: 1, .. }));
    }

    #[test]
    fn rejects_zero_stride() {
        let rows = vec![MethodDescriptor::new(0, 1, 0, 0, 1, 1, "bad")];
        assert!(matches!(
            LayoutTable::new(rows, 1, None),
            Err(LayoutError::ZeroSize { index: 0, .. })
        ));
    }

    #[test]
    fn aliases_share_one_group() {
        let rows = vec![
            MethodDescriptor::scalar(0x08, "ctl.count"),
            MethodDescriptor::scalar(0x08, "ctl.map"),
            MethodDescriptor::scalar(0x09, "next"),
        ];
        let table = LayoutTable::new(rows, 0x10, None).unwrap();
        assert_eq!(table.groups().len(), 2);
        assert_eq!(table.groups()[0].rows, 0..2);
    }

    #[test]
    fn group_lookup_respects_gaps() {
        let rows = vec![
            MethodDescriptor::scalar(0x00, "a"),
            MethodDescriptor::array(0x04, 2, 2, "b(INDEX)"),
        ];
        let table = LayoutTable::new(rows, 0x10, None).unwrap();
        assert!(table.group_containing(0x00).is_some());
        assert!(table.group_containing(0x01).is_none());
        assert_eq!(table.group_containing(0x07).map(|g| g.base), Some(0x04));
        assert!(table.group_containing(0x08).is_none());
        assert_eq!(
            table.mapped_offsets().collect::<Vec<_>>(),
            vec![0x00, 0x04, 0x05, 0x06, 0x07]
        );
    }
}

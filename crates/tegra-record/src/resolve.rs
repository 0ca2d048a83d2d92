//! Offset -> descriptor row resolution.

use crate::engine::EngineKind;
use crate::layout::{layout_table, LayoutTable, MethodDescriptor};

/// A register offset mapped onto its layout row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Index into [`LayoutTable::rows`]. Always the first row of a bitfield alias run.
    pub row_index: usize,
    pub struct_index: u32,
    pub element_index: u32,
    /// The offset that was resolved.
    pub offset: u32,
}

impl Resolution {
    /// The resolved row of `table`; `None` if this resolution came from a smaller table.
    pub fn row<'a>(&self, table: &'a LayoutTable) -> Option<&'a MethodDescriptor> {
        table.row(self.row_index)
    }
}

/// Resolves `offset` against the built-in layout of `engine`.
pub fn resolve(engine: EngineKind, offset: u32) -> Option<Resolution> {
    resolve_in(layout_table(engine), offset)
}

/// Resolves `offset` against `table`; `None` when no row covers it.
pub fn resolve_in(table: &LayoutTable, offset: u32) -> Option<Resolution> {
    let group = table.group_containing(offset)?;
    let relative = offset - group.base;
    let struct_index = relative / group.size;
    let base_offset = group.base + relative % group.size;

    let rows = &table.rows()[group.rows.clone()];
    // The group's first row sits at `group.base`, so at least one row is <= base_offset.
    let last_at_or_before = rows.partition_point(|r| r.offset <= base_offset).checked_sub(1)?;
    let row_offset = rows[last_at_or_before].offset;
    let first_alias = rows.partition_point(|r| r.offset < row_offset);
    let row = &rows[first_alias];

    Some(Resolution {
        row_index: group.rows.start + first_alias,
        struct_index,
        element_index: (base_offset - row.offset) / row.elem_size,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StructLayout;

    fn rt_table() -> LayoutTable {
        let rt = StructLayout::new(0x10, 4, 2);
        LayoutTable::new(vec![rt.field(0, "rt(OFFSET).width")], 0x20, None).unwrap()
    }

    #[test]
    fn struct_instances_fold_back_to_instance_zero() {
        let table = rt_table();
        let res = resolve_in(&table, 0x16).unwrap();
        assert_eq!(res.row_index, 0);
        assert_eq!(res.struct_index, 3);
        assert_eq!(res.element_index, 0);
    }

    #[test]
    fn unmapped_gaps_fall_back_to_preceding_row() {
        let table = rt_table();
        // Word 1 of each instance has no row of its own.
        let res = resolve_in(&table, 0x13).unwrap();
        assert_eq!(res.row_index, 0);
        assert_eq!(res.struct_index, 1);
        assert_eq!(res.element_index, 1);
    }

    #[test]
    fn offsets_outside_every_group_are_unmapped() {
        let table = rt_table();
        assert_eq!(resolve_in(&table, 0x0F), None);
        assert_eq!(resolve_in(&table, 0x18), None);
        assert_eq!(resolve_in(&table, u32::MAX), None);
    }

    #[test]
    fn simple_arrays_report_element_index() {
        let table = LayoutTable::new(
            vec![
                MethodDescriptor::scalar(0x00, "head"),
                MethodDescriptor::array(0x04, 4, 2, "color(INDEX)"),
            ],
            0x10,
            None,
        )
        .unwrap();
        for offset in 0x04..0x0C {
            let res = resolve_in(&table, offset).unwrap();
            assert_eq!(res.row_index, 1);
            assert_eq!(res.struct_index, 0);
            assert_eq!(res.element_index, (offset - 0x04) / 2);
        }
    }

    #[test]
    fn aliases_resolve_to_first_row() {
        let table = LayoutTable::new(
            vec![
                MethodDescriptor::scalar(0x00, "a"),
                MethodDescriptor::scalar(0x01, "ctl.enable"),
                MethodDescriptor::scalar(0x01, "ctl.mode"),
                MethodDescriptor::scalar(0x01, "ctl.size"),
            ],
            0x10,
            None,
        )
        .unwrap();
        assert_eq!(resolve_in(&table, 0x01).unwrap().row_index, 1);
    }

    #[test]
    fn arrays_inside_structs_use_both_indices() {
        let bind = StructLayout::new(0x100, 5, 8);
        let table = LayoutTable::new(
            vec![
                bind.array(0, 4, 1, "cb_bind(OFFSET).reserved(INDEX)"),
                bind.field(4, "cb_bind(OFFSET).valid"),
                bind.field(4, "cb_bind(OFFSET).index"),
            ],
            0x200,
            None,
        )
        .unwrap();

        let res = resolve_in(&table, 0x100 + 2 * 8 + 3).unwrap();
        assert_eq!((res.row_index, res.struct_index, res.element_index), (0, 2, 3));

        let res = resolve_in(&table, 0x100 + 4 * 8 + 4).unwrap();
        assert_eq!((res.row_index, res.struct_index, res.element_index), (1, 4, 0));
    }

    #[test]
    fn every_built_in_mapped_offset_resolves() {
        for engine in EngineKind::ALL {
            let table = layout_table(engine);
            for offset in table.mapped_offsets() {
                let res = resolve_in(table, offset);
                assert!(res.is_some(), "{engine}: 0x{offset:04X} is unmapped");
            }
        }
    }
}

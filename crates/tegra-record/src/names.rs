//! Field-name expansion for resolved registers.

use crate::layout::{LayoutTable, ELEMENT_INDEX_TOKEN, STRUCT_INDEX_TOKEN};
use crate::resolve::Resolution;

/// Names of every logical field written by one write to `resolution.offset`, in table order.
///
/// One entry per bitfield alias of the resolved row. Writes into the macro-upload window
/// expand to a single `macro[n]` name. With `hide_unknown`, reserved `unk_` rows expand to
/// nothing.
pub fn expand(table: &LayoutTable, resolution: &Resolution, hide_unknown: bool) -> Vec<String> {
    expand_fields(table, resolution, hide_unknown)
        .into_iter()
        .map(|(_, name)| name)
        .collect()
}

/// Like [`expand`], paired with each name's position in the alias run.
///
/// The position selects the sub-field format, so it is counted before `unk_` rows are hidden.
pub fn expand_fields(
    table: &LayoutTable,
    resolution: &Resolution,
    hide_unknown: bool,
) -> Vec<(usize, String)> {
    let Some(row) = resolution.row(table) else {
        return Vec::new();
    };

    if table.is_macro_offset(row.offset) {
        let index = (resolution.offset - row.struct_base) / 2;
        return vec![(0, format!("macro[{index}]"))];
    }

    table.rows()[resolution.row_index..]
        .iter()
        .take_while(|alias| alias.offset == row.offset)
        .enumerate()
        .filter(|(_, alias)| !(hide_unknown && alias.is_unknown()))
        .map(|(position, alias)| {
            let mut name = alias.name.to_owned();
            if alias.is_repeated_struct() {
                name = name.replace(STRUCT_INDEX_TOKEN, &format!("[{}]", resolution.struct_index));
            }
            if alias.is_array() {
                name = name.replace(ELEMENT_INDEX_TOKEN, &format!("[{}]", resolution.element_index));
            }
            (position, name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{MethodDescriptor, StructLayout};
    use crate::resolve::resolve_in;

    fn names(table: &LayoutTable, offset: u32, hide_unknown: bool) -> Vec<String> {
        let res = resolve_in(table, offset).unwrap();
        expand(table, &res, hide_unknown)
    }

    #[test]
    fn substitutes_struct_and_element_indices() {
        let bind = StructLayout::new(0x20, 5, 8);
        let table = LayoutTable::new(
            vec![
                MethodDescriptor::array(0x00, 4, 1, "clear_color(INDEX)"),
                bind.array(0, 4, 1, "cb_bind(OFFSET).reserved(INDEX)"),
            ],
            0x100,
            None,
        )
        .unwrap();
        assert_eq!(names(&table, 0x02, false), vec!["clear_color[2]"]);
        assert_eq!(names(&table, 0x20 + 3 * 8 + 1, false), vec!["cb_bind[3].reserved[1]"]);
    }

    #[test]
    fn aliases_expand_in_table_order() {
        let table = LayoutTable::new(
            vec![
                MethodDescriptor::scalar(0x10, "sync.point"),
                MethodDescriptor::scalar(0x10, "sync.increment"),
                MethodDescriptor::scalar(0x11, "after"),
            ],
            0x20,
            None,
        )
        .unwrap();
        assert_eq!(names(&table, 0x10, false), vec!["sync.point", "sync.increment"]);
        assert_eq!(names(&table, 0x11, false), vec!["after"]);
    }

    #[test]
    fn scalar_names_keep_tokens_they_do_not_use() {
        let table =
            LayoutTable::new(vec![MethodDescriptor::scalar(0x04, "odd(INDEX)")], 0x10, None).unwrap();
        assert_eq!(names(&table, 0x04, false), vec!["odd(INDEX)"]);
    }

    #[test]
    fn hide_unknown_suppresses_reserved_rows() {
        let table = LayoutTable::new(
            vec![
                MethodDescriptor::array(0x00, 4, 1, "unk_0000(INDEX)"),
                MethodDescriptor::scalar(0x04, "known"),
            ],
            0x10,
            None,
        )
        .unwrap();
        assert_eq!(names(&table, 0x01, false), vec!["unk_0000[1]"]);
        assert!(names(&table, 0x01, true).is_empty());
        assert_eq!(names(&table, 0x04, true), vec!["known"]);
    }

    #[test]
    fn hidden_aliases_keep_their_positions() {
        let table = LayoutTable::new(
            vec![
                MethodDescriptor::scalar(0x10, "unk_lo"),
                MethodDescriptor::scalar(0x10, "hi"),
            ],
            0x20,
            None,
        )
        .unwrap();
        let res = resolve_in(&table, 0x10).unwrap();
        assert_eq!(expand_fields(&table, &res, true), vec![(1, "hi".to_owned())]);
        assert_eq!(
            expand_fields(&table, &res, false),
            vec![(0, "unk_lo".to_owned()), (1, "hi".to_owned())]
        );
    }

    #[test]
    fn resolution_from_another_table_expands_to_nothing() {
        let big = LayoutTable::new(
            vec![
                MethodDescriptor::scalar(0x00, "a"),
                MethodDescriptor::scalar(0x01, "b"),
            ],
            0x10,
            None,
        )
        .unwrap();
        let small = LayoutTable::new(vec![MethodDescriptor::scalar(0x00, "a")], 0x10, None).unwrap();
        let res = resolve_in(&big, 0x01).unwrap();
        assert!(expand(&small, &res, false).is_empty());
    }

    #[test]
    fn macro_window_uses_word_pair_index() {
        let macros = StructLayout::new(0x40, 4, 2);
        let table = LayoutTable::new(
            vec![
                MethodDescriptor::scalar(0x00, "head"),
                macros.field(0, "macros(OFFSET).method"),
                macros.field(1, "macros(OFFSET).param"),
            ],
            0x40,
            Some(0x40),
        )
        .unwrap();
        assert_eq!(names(&table, 0x40, false), vec!["macro[0]"]);
        assert_eq!(names(&table, 0x41, false), vec!["macro[0]"]);
        assert_eq!(names(&table, 0x45, true), vec!["macro[2]"]);
        assert_eq!(names(&table, 0x00, false), vec!["head"]);
    }
}

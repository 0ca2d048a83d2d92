//! Changed/Unchanged partitioning of one captured frame.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::decode::{decode_table, hex_fallback, DecodeTable};
use crate::engine::EngineKind;
use crate::layout::{layout_table, LayoutTable, UNKNOWN_PREFIX};
use crate::names::expand_fields;
use crate::recorder::{CapturedFrame, NO_DRAW};
use crate::resolve::resolve_in;

/// Layout and decode rules used to decode one engine's registers.
#[derive(Debug, Clone, Copy)]
pub struct RegisterTables<'a> {
    pub layout: &'a LayoutTable,
    pub decode: &'a DecodeTable,
}

impl RegisterTables<'static> {
    /// The built-in tables of `engine`.
    pub fn builtin(engine: EngineKind) -> Self {
        Self {
            layout: layout_table(engine),
            decode: decode_table(engine),
        }
    }
}

/// One decoded register write (or one inherited register value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedResult {
    pub engine: EngineKind,
    pub engine_name: &'static str,
    pub method: u32,
    pub struct_index: u32,
    pub element_index: u32,
    /// `(field name, rendered value)` in table alias order.
    pub args: Vec<(String, String)>,
    pub timestamp: u64,
    pub draw_index: i64,
}

impl DecodedResult {
    /// Resolves, expands and decodes a single register value against the built-in tables.
    ///
    /// Unmapped offsets yield one `unk_XXXX` argument, unless `hide_unknown` is set, in which
    /// case they yield `None` like any other empty expansion.
    pub fn decode(
        engine: EngineKind,
        method: u32,
        arg: u32,
        timestamp: u64,
        draw_index: i64,
        hide_unknown: bool,
    ) -> Option<Self> {
        Self::decode_with(
            RegisterTables::builtin(engine),
            engine,
            method,
            arg,
            timestamp,
            draw_index,
            hide_unknown,
        )
    }

    pub fn decode_with(
        tables: RegisterTables<'_>,
        engine: EngineKind,
        method: u32,
        arg: u32,
        timestamp: u64,
        draw_index: i64,
        hide_unknown: bool,
    ) -> Option<Self> {
        let mut result = Self {
            engine,
            engine_name: engine.name(),
            method,
            struct_index: 0,
            element_index: 0,
            args: Vec::new(),
            timestamp,
            draw_index,
        };

        let Some(resolution) = resolve_in(tables.layout, method) else {
            if hide_unknown {
                return None;
            }
            debug!(%engine, method, "write to unmapped register");
            result
                .args
                .push((format!("unk_{method:04X}"), hex_fallback(arg)));
            return Some(result);
        };

        let row = resolution.row(tables.layout)?;
        let fields = expand_fields(tables.layout, &resolution, hide_unknown);
        if fields.is_empty() {
            return None;
        }

        result.struct_index = resolution.struct_index;
        result.element_index = resolution.element_index;
        result.args = fields
            .into_iter()
            .map(|(sub_field, name)| (name, tables.decode.decode(row, sub_field, arg)))
            .collect();
        Some(result)
    }

    /// One flattened row per argument.
    pub fn rows(&self, with_time: bool) -> impl Iterator<Item = ResultRow> + '_ {
        self.args.iter().map(move |(name, value)| ResultRow {
            time: if with_time {
                self.timestamp.to_string()
            } else {
                String::new()
            },
            engine: self.engine_name,
            reg: format!("0x{:04X}", self.method),
            method: name.clone(),
            argument: value.clone(),
        })
    }
}

/// Consecutive writes sharing one `draw_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawGroup {
    pub draw_index: i64,
    pub results: Vec<DecodedResult>,
}

/// Table-view row: one field of one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub time: String,
    pub engine: &'static str,
    pub reg: String,
    pub method: String,
    pub argument: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameResults {
    pub frame_number: u64,
    /// Writes made during the frame, grouped by draw in emission order.
    pub changed: Vec<DrawGroup>,
    /// Start-of-frame state of registers never written during the frame.
    pub unchanged: Vec<DecodedResult>,
}

impl FrameResults {
    pub fn draw_count(&self) -> usize {
        self.changed.len()
    }

    /// Every changed field (with its timestamp) followed by every unchanged field.
    pub fn rows(&self) -> Vec<ResultRow> {
        let changed = self
            .changed
            .iter()
            .flat_map(|group| group.results.iter())
            .flat_map(|result| result.rows(true));
        let unchanged = self.unchanged.iter().flat_map(|result| result.rows(false));
        changed.chain(unchanged).collect()
    }

    /// State inherited by the draw at position `draw_pos` of [`Self::changed`].
    ///
    /// Starts from the unchanged results, applies every write of the earlier draws, then leaves
    /// out fields the draw itself writes. `None` when `draw_pos` is out of range.
    pub fn state_at_draw(&self, draw_pos: usize, hide_unknown: bool) -> Option<Vec<ResultRow>> {
        let current = self.changed.get(draw_pos)?;

        let written_here: HashSet<(EngineKind, &str)> = current
            .results
            .iter()
            .flat_map(|r| r.args.iter().map(move |(name, _)| (r.engine, name.as_str())))
            .collect();

        let mut state: BTreeMap<(&'static str, u32, EngineKind), Vec<(String, String)>> =
            BTreeMap::new();
        for result in &self.unchanged {
            state.insert(
                (result.engine_name, result.method, result.engine),
                result.args.clone(),
            );
        }
        for result in self.changed[..draw_pos]
            .iter()
            .flat_map(|group| group.results.iter())
        {
            let fields = state
                .entry((result.engine_name, result.method, result.engine))
                .or_default();
            for (name, value) in &result.args {
                match fields.iter_mut().find(|(existing, _)| existing == name) {
                    Some(field) => field.1 = value.clone(),
                    None => fields.push((name.clone(), value.clone())),
                }
            }
        }

        let written_here = &written_here;
        let rows = state
            .into_iter()
            .flat_map(|((engine_name, method, engine), fields)| {
                fields
                    .into_iter()
                    .filter(move |(name, _)| !written_here.contains(&(engine, name.as_str())))
                    .filter(move |(name, _)| !(hide_unknown && name.starts_with(UNKNOWN_PREFIX)))
                    .map(move |(name, value)| ResultRow {
                        time: String::new(),
                        engine: engine_name,
                        reg: format!("0x{method:04X}"),
                        method: name,
                        argument: value,
                    })
            })
            .collect();
        Some(rows)
    }
}

/// Decodes one captured frame into its Changed and Unchanged partitions.
///
/// Pure function of the frame and the built-in tables; calling it twice yields equal results.
pub fn build_results(frame: &CapturedFrame) -> FrameResults {
    build_results_with(frame, RegisterTables::builtin)
}

/// [`build_results`] against caller-supplied tables, looked up per engine.
pub fn build_results_with<'t, F>(frame: &CapturedFrame, tables: F) -> FrameResults
where
    F: Fn(EngineKind) -> RegisterTables<'t>,
{
    let mut written: HashSet<(EngineKind, u32)> = HashSet::new();
    let mut changed: Vec<DrawGroup> = Vec::new();

    for entry in &frame.log {
        written.insert((entry.engine, entry.method));
        let Some(result) = DecodedResult::decode_with(
            tables(entry.engine),
            entry.engine,
            entry.method,
            entry.arg,
            entry.timestamp,
            entry.draw_index,
            false,
        ) else {
            continue;
        };

        match changed.last_mut() {
            Some(group) if group.draw_index == entry.draw_index => group.results.push(result),
            _ => changed.push(DrawGroup {
                draw_index: entry.draw_index,
                results: vec![result],
            }),
        }
    }

    let mut unchanged: Vec<DecodedResult> = Vec::new();
    for (engine, snapshot) in &frame.snapshots {
        let engine_tables = tables(*engine);
        unchanged.extend(
            snapshot
                .iter()
                .filter(|(offset, _)| !written.contains(&(*engine, *offset)))
                .filter_map(|(offset, value)| {
                    DecodedResult::decode_with(engine_tables, *engine, offset, value, 0, NO_DRAW, true)
                }),
        );
    }
    unchanged.sort_by(|a, b| (a.engine_name, a.method).cmp(&(b.engine_name, b.method)));

    debug!(
        frame = frame.frame_number,
        draws = changed.len(),
        unchanged = unchanged.len(),
        "built frame results"
    );

    FrameResults {
        frame_number: frame.frame_number,
        changed,
        unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{FieldDecode, FieldFormat, Render};
    use crate::layout::MethodDescriptor;
    use crate::recorder::{FrameSnapshot, RecordEntry};
    use pretty_assertions::assert_eq;

    fn write(engine: EngineKind, method: u32, arg: u32, draw_index: i64) -> RecordEntry {
        RecordEntry {
            engine,
            method,
            arg,
            timestamp: 0,
            draw_index,
        }
    }

    fn frame(log: Vec<RecordEntry>, snapshots: Vec<(EngineKind, FrameSnapshot)>) -> CapturedFrame {
        CapturedFrame {
            frame_number: 1,
            log,
            snapshots: snapshots.into_iter().collect(),
        }
    }

    #[test]
    fn groups_start_when_draw_index_changes() {
        let m = EngineKind::Maxwell3d;
        let results = build_results(&frame(
            vec![
                write(m, 0x202, 1, NO_DRAW),
                write(m, 0x203, 2, NO_DRAW),
                write(m, 0x202, 3, 0),
                write(m, 0x202, 4, NO_DRAW),
            ],
            vec![],
        ));
        let shape: Vec<_> = results
            .changed
            .iter()
            .map(|g| (g.draw_index, g.results.len()))
            .collect();
        assert_eq!(shape, vec![(NO_DRAW, 2), (0, 1), (NO_DRAW, 1)]);
    }

    #[test]
    fn decodes_aliased_fields_in_order() {
        let results = build_results(&frame(
            vec![write(EngineKind::Maxwell3d, 0x050, 0x0001_0007, NO_DRAW)],
            vec![],
        ));
        let result = &results.changed[0].results[0];
        assert_eq!(
            result.args,
            vec![
                ("sync_info.sync_point".to_owned(), "7".to_owned()),
                ("sync_info.increment".to_owned(), "true".to_owned()),
            ]
        );
    }

    #[test]
    fn struct_instances_carry_their_indices() {
        let results = build_results(&frame(
            vec![write(EngineKind::Maxwell3d, 0x200 + 3 * 0x10 + 2, 1920, NO_DRAW)],
            vec![],
        ));
        let result = &results.changed[0].results[0];
        assert_eq!(result.struct_index, 3);
        assert_eq!(result.args, vec![("rt[3].width".to_owned(), "1920".to_owned())]);
    }

    #[test]
    fn unmapped_writes_fall_back_to_hex() {
        let results = build_results(&frame(
            vec![write(EngineKind::Maxwell3d, 0x0D00, 0xDEAD, NO_DRAW)],
            vec![],
        ));
        assert_eq!(
            results.changed[0].results[0].args,
            vec![("unk_0D00".to_owned(), "0x0000DEAD".to_owned())]
        );
    }

    #[test]
    fn unchanged_skips_written_and_unknown_offsets() {
        let m = EngineKind::Maxwell3d;
        let snapshot: FrameSnapshot = [(0x001, 9), (0x202, 5), (0x203, 7), (0x0D00, 1)]
            .into_iter()
            .collect();
        let results = build_results(&frame(vec![write(m, 0x202, 640, NO_DRAW)], vec![(m, snapshot)]));

        assert_eq!(results.unchanged.len(), 1);
        assert_eq!(results.unchanged[0].method, 0x203);
        assert_eq!(results.unchanged[0].draw_index, NO_DRAW);
        assert_eq!(
            results.unchanged[0].args,
            vec![("rt[0].height".to_owned(), "7".to_owned())]
        );
    }

    #[test]
    fn unchanged_sorts_by_engine_name_then_offset() {
        let snapshot = |offsets: &[u32]| offsets.iter().map(|o| (*o, 0)).collect::<FrameSnapshot>();
        let results = build_results(&frame(
            vec![],
            vec![
                (EngineKind::Maxwell3d, snapshot(&[0x203, 0x202])),
                (EngineKind::Fermi2d, snapshot(&[0x86])),
                (EngineKind::MaxwellDma, snapshot(&[0x104])),
            ],
        ));
        let order: Vec<_> = results
            .unchanged
            .iter()
            .map(|r| (r.engine_name, r.method))
            .collect();
        assert_eq!(
            order,
            vec![("FERMI2D", 0x86), ("MAXWDMA", 0x104), ("MAXWELL", 0x202), ("MAXWELL", 0x203)]
        );
    }

    #[test]
    fn rows_flatten_each_argument() {
        let m = EngineKind::Maxwell3d;
        let mut entry = write(m, 0x050, 0x0001_0002, NO_DRAW);
        entry.timestamp = 42;
        let results = build_results(&frame(vec![entry], vec![]));
        let rows = results.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, "42");
        assert_eq!(rows[0].engine, "MAXWELL");
        assert_eq!(rows[0].reg, "0x0050");
        assert_eq!(rows[1].method, "sync_info.increment");
        assert_eq!(rows[1].argument, "true");
    }

    #[test]
    fn state_at_draw_applies_earlier_draws() {
        let m = EngineKind::Maxwell3d;
        let snapshot: FrameSnapshot = [(0x202, 100), (0x203, 200)].into_iter().collect();
        let results = build_results(&frame(
            vec![
                write(m, 0x35D, 3, 0),
                write(m, 0x35E, 6, 0),
                write(m, 0x35E, 9, 1),
            ],
            vec![(m, snapshot)],
        ));
        assert_eq!(results.draw_count(), 2);

        let state = results.state_at_draw(1, true).unwrap();
        let fields: Vec<_> = state
            .iter()
            .map(|r| (r.method.as_str(), r.argument.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("rt[0].width", "100"),
                ("rt[0].height", "200"),
                ("vertex_buffer.first", "3"),
            ]
        );

        let first = results.state_at_draw(0, true).unwrap();
        assert_eq!(first.len(), 2);
        assert!(results.state_at_draw(2, true).is_none());
    }

    #[test]
    fn hidden_unknown_alias_keeps_format_pairing() {
        static SPLIT: [FieldFormat; 2] = [
            FieldFormat::bits(0, 4, Render::Dec),
            FieldFormat::bits(4, 4, Render::Hex),
        ];
        let layout = LayoutTable::new(
            vec![
                MethodDescriptor::scalar(0x10, "unk_lo"),
                MethodDescriptor::scalar(0x10, "hi"),
            ],
            0x20,
            None,
        )
        .unwrap();
        let decode = DecodeTable::new(&[FieldDecode::new(0x10, &SPLIT)], &layout).unwrap();
        let tables = RegisterTables {
            layout: &layout,
            decode: &decode,
        };
        let m = EngineKind::Maxwell3d;

        let shown = DecodedResult::decode_with(tables, m, 0x10, 0xA3, 0, NO_DRAW, false).unwrap();
        assert_eq!(
            shown.args,
            vec![
                ("unk_lo".to_owned(), "3".to_owned()),
                ("hi".to_owned(), "0xA".to_owned()),
            ]
        );

        let results = build_results_with(
            &frame(vec![], vec![(m, [(0x10, 0xA3)].into_iter().collect::<FrameSnapshot>())]),
            |_| tables,
        );
        assert_eq!(
            results.unchanged[0].args,
            vec![("hi".to_owned(), "0xA".to_owned())]
        );
    }

    #[test]
    fn building_twice_is_identical() {
        let m = EngineKind::Maxwell3d;
        let snapshot = FrameSnapshot::from_values(&[0; 0x300]);
        let captured = frame(vec![write(m, 0x202, 1, 0), write(m, 0x0D00, 2, 1)], vec![(m, snapshot)]);
        assert_eq!(build_results(&captured), build_results(&captured));
    }
}

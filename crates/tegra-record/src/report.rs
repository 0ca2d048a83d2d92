//! Plain-text rendering of decoded frames for a log sink.

use core::fmt::Write as _;

use crate::diff::{DecodedResult, FrameResults};
use crate::layout::UNKNOWN_PREFIX;

/// Renders one frame: banner, `PRE STATE` (unchanged registers) and `DRAWS` (changed
/// registers grouped by draw).
pub fn render_frame(results: &FrameResults, hide_unknown: bool) -> String {
    let mut out = String::with_capacity(0x2000);

    let _ = write!(
        out,
        "\n\n========================================\n\
         ==========================FRAME {}=========================\n\
         ========================================",
        results.frame_number
    );

    out.push_str("\n\n====================\n======PRE STATE=====\n====================\n");
    for result in &results.unchanged {
        push_result(&mut out, None, result, hide_unknown);
    }

    out.push_str("\n\n====================\n======= DRAWS ======\n====================\n");
    for group in &results.changed {
        let _ = write!(out, "\n\nDraw {}\n", group.draw_index);
        for result in &group.results {
            push_result(&mut out, Some(result.timestamp), result, hide_unknown);
        }
    }

    out
}

/// Renders several frames back to back.
pub fn render_capture<'a, I>(frames: I, hide_unknown: bool) -> String
where
    I: IntoIterator<Item = &'a FrameResults>,
{
    frames
        .into_iter()
        .map(|frame| render_frame(frame, hide_unknown))
        .collect()
}

fn push_result(out: &mut String, timestamp: Option<u64>, result: &DecodedResult, hide_unknown: bool) {
    let mut args = result
        .args
        .iter()
        .filter(|(name, _)| !(hide_unknown && name.starts_with(UNKNOWN_PREFIX)))
        .peekable();
    if args.peek().is_none() {
        return;
    }

    let start = out.len();
    if let Some(timestamp) = timestamp {
        let _ = write!(out, "    {timestamp:4} ");
    } else {
        out.push_str("    ");
    }
    let _ = write!(out, "{} (0x{:04X}) ", result.engine_name, result.method);
    let indent = out.len() - start;

    for (i, (name, value)) in args.enumerate() {
        if i > 0 {
            out.extend(std::iter::repeat(' ').take(indent));
        }
        let _ = writeln!(out, "  {name} = {value}");
    }
}

//! Column filters over flattened result rows.

use crate::diff::ResultRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Time,
    Engine,
    Reg,
    Method,
    Argument,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Time,
        Column::Engine,
        Column::Reg,
        Column::Method,
        Column::Argument,
    ];

    /// Maps a `key:` prefix onto its column. Keys match when they contain the column keyword.
    fn from_key(key: &str) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        [
            ("time", Column::Time),
            ("eng", Column::Engine),
            ("reg", Column::Reg),
            ("meth", Column::Method),
            ("arg", Column::Argument),
        ]
        .into_iter()
        .find(|(keyword, _)| key.contains(keyword))
        .map(|(_, column)| column)
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn cell(self, row: &ResultRow) -> &str {
        match self {
            Column::Time => &row.time,
            Column::Engine => row.engine,
            Column::Reg => &row.reg,
            Column::Method => &row.method,
            Column::Argument => &row.argument,
        }
    }
}

/// Parsed filter text: case-insensitive substrings per column.
///
/// A row passes when any column contains any of that column's needles. An empty filter passes
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    needles: [Vec<String>; 5],
}

impl Filter {
    /// Parses whitespace-separated tokens such as `eng:maxwell reg:0x02 blend`.
    ///
    /// `time:`, `eng:`, `reg:`, `meth:` and `arg:` pick a column; bare tokens and tokens with
    /// any other prefix filter the method column.
    pub fn parse(text: &str) -> Self {
        let mut filter = Filter::default();
        for token in text.split_whitespace() {
            let (column, needle) = match token.split_once(':') {
                Some((key, value)) => match Column::from_key(key) {
                    Some(column) => (column, value),
                    None => (Column::Method, token),
                },
                None => (Column::Method, token),
            };
            if needle.is_empty() {
                continue;
            }
            filter.needles[column.index()].push(needle.to_lowercase());
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.needles.iter().all(Vec::is_empty)
    }

    pub fn needles(&self, column: Column) -> &[String] {
        &self.needles[column.index()]
    }

    pub fn matches(&self, row: &ResultRow) -> bool {
        if self.is_empty() {
            return true;
        }
        Column::ALL.into_iter().any(|column| {
            let cell = column.cell(row).to_lowercase();
            self.needles(column)
                .iter()
                .any(|needle| cell.contains(needle.as_str()))
        })
    }

    pub fn apply<'a>(&'a self, rows: &'a [ResultRow]) -> impl Iterator<Item = &'a ResultRow> + 'a {
        rows.iter().filter(move |row| self.matches(row))
    }
}

use crate::snapshot::builder::Snapshot;

/// A clamped half-open window over a snapshot's line sequence, for handing a
/// bounded amount of text to a consumer at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// The lines inside the window
    pub lines: Vec<String>,

    /// Clamped start line (inclusive)
    pub from: usize,

    /// Clamped end line (exclusive)
    pub to: usize,

    /// Total number of lines in the snapshot
    pub total: usize,
}

impl PageView {
    /// Slice `[from, to)` out of the snapshot's lines.
    ///
    /// `to == 0` or `to > total` means "to the end"; `from` is clamped to
    /// `[0, total]` and `to` never falls below `from`. Pure computation over
    /// the already-built snapshot; the page is not consulted.
    pub fn slice(snapshot: &Snapshot, from: usize, to: usize) -> Self {
        let total = snapshot.lines.len();
        let to = if to == 0 || to > total { total } else { to };
        let from = from.min(total);
        let to = to.max(from);

        Self { lines: snapshot.lines[from..to].to_vec(), from, to, total }
    }

    /// Render the window as the full textual page representation.
    ///
    /// The `url:`/`title:` header block is emitted once per retrieval, the
    /// footer reports the window extent so a caller can page through the rest.
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let mut out = String::new();
        out.push_str(&format!("url: {}\n", snapshot.page_url));
        out.push_str(&format!("title: {}\n", snapshot.page_title));
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("---\n");
        out.push_str(&format!("Showing lines {} to {} of {}", self.from, self.to, self.total));
        out
    }
}

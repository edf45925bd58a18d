//! Iterating the lines covered by a selection set.

use crate::domain::model::Selection;

/// Yield every covered line index, per selection in user order, ascending
/// within a selection. Overlapping selections re-visit their shared lines;
/// there is deliberately no set union.
///
/// A multi-line selection whose end sits at column 0 stops before its end
/// line: the caret rests before any content of that line. A single-line
/// selection always includes its line, whatever the columns.
pub fn visit_lines(selections: &[Selection]) -> impl Iterator<Item = usize> + '_ {
    selections
        .iter()
        .flat_map(|selection| selection.start().line..=last_line(selection))
}

/// Number of line visits the selection set produces.
pub fn visited_count(selections: &[Selection]) -> usize {
    visit_lines(selections).count()
}

fn last_line(selection: &Selection) -> usize {
    let start = selection.start();
    let end = selection.end();
    if start.line != end.line && end.column == 0 {
        end.line - 1
    } else {
        end.line
    }
}

use crate::cursor::Cursor;

#[derive(Debug)]
struct Entry {
    origin: usize,
    start: usize,
    end: usize,
    swapped: bool,
    saved_x: usize,
}

/// Sort cursors by position and merge overlapping/touching ones.
///
/// Touching counts as overlap when either span is a bare caret; two real selections only merge
/// when they strictly overlap. `active`/`main` are re-pointed at the survivor of any merge.
/// Returns the number of cursors merged away.
pub(crate) fn normalize_cursors(
    cursors: &mut Vec<Cursor>,
    active: &mut usize,
    main: &mut usize,
) -> usize {
    if cursors.is_empty() {
        cursors.push(Cursor::caret(0));
        *active = 0;
        *main = 0;
        return 0;
    }

    let mut entries: Vec<Entry> = cursors
        .iter()
        .enumerate()
        .map(|(origin, cursor)| {
            let anchor = cursor.sel.unwrap_or(cursor.pos);
            let swapped = cursor.pos > anchor;
            Entry {
                origin,
                start: cursor.pos.min(anchor),
                end: cursor.pos.max(anchor),
                swapped,
                saved_x: cursor.saved_x,
            }
        })
        .collect();

    // Stable: equal starts keep list order.
    entries.sort_by_key(|entry| entry.start);

    let mut target = vec![0usize; cursors.len()];
    let mut merged: Vec<Entry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(last) = merged.last_mut() {
            let bare = last.start == last.end || entry.start == entry.end;
            let overlaps = if bare {
                last.end >= entry.start
            } else {
                last.end > entry.start
            };
            if overlaps {
                last.end = last.end.max(entry.end);
                target[entry.origin] = merged.len() - 1;
                continue;
            }
        }
        target[entry.origin] = merged.len();
        merged.push(entry);
    }

    let removed = cursors.len() - merged.len();
    let last = merged.len() - 1;
    *active = target.get(*active).copied().unwrap_or(last);
    *main = target.get(*main).copied().unwrap_or(last);

    *cursors = merged
        .into_iter()
        .map(|entry| {
            let (pos, anchor) = if entry.swapped {
                (entry.end, entry.start)
            } else {
                (entry.start, entry.end)
            };
            let mut cursor = Cursor {
                pos,
                sel: Some(anchor),
                saved_x: entry.saved_x,
            };
            cursor.collapse();
            cursor
        })
        .collect();

    removed
}

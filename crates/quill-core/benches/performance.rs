use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use quill_core::{Cursor, FileState};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06}    the quick brown fox jumps over the lazy dog (quill benchmark line)\n"
        ));
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

fn bench_line_index_rebuild(c: &mut Criterion) {
    let text = large_text(10_000);
    c.bench_function("line_index/10k_lines", |b| {
        b.iter(|| {
            let state = FileState::new(black_box(&text));
            black_box(state.line_count());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_text(2_000);
    c.bench_function("typing_middle/100_writes", |b| {
        b.iter_batched(
            || {
                let mut state = FileState::new(&text);
                let middle = state.len() / 2;
                state.move_cursor(0, middle, true);
                state
            },
            |mut state| {
                for _ in 0..100 {
                    state.write("x");
                }
                black_box(state.len());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_multi_cursor_edit(c: &mut Criterion) {
    let text = large_text(500);
    c.bench_function("multi_cursor/500_cursors_indent", |b| {
        b.iter_batched(
            || {
                let mut state = FileState::new(&text);
                let cursors: Vec<Cursor> = (0..state.line_count())
                    .map(|line| Cursor::caret(state.offset_of(0, line)))
                    .collect();
                state.set_cursors(cursors, 0);
                state
            },
            |mut state| {
                state.shift_line();
                state.backspace();
                black_box(state.cursors().len());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_next(c: &mut Criterion) {
    let text = large_text(1_000);
    c.bench_function("find_next/20_occurrences", |b| {
        b.iter_batched(
            || {
                let mut state = FileState::new(&text);
                let start = state.offset_of(11, 0);
                state.set_cursors([Cursor::selection(start, start + 5)], 0);
                state
            },
            |mut state| {
                for _ in 0..20 {
                    state.find_next();
                }
                black_box(state.cursors().len());
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_line_index_rebuild,
    bench_typing_in_middle,
    bench_multi_cursor_edit,
    bench_find_next
);
criterion_main!(benches);

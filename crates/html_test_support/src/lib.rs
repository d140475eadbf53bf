use std::fmt::Write;

const MISSING: &str = "<missing>";
const CONTEXT: usize = 2;

/// Line-oriented diff for snapshot assertions: the first mismatch with a little context on
/// each side, plus the line counts.
pub fn diff_lines<E: AsRef<str>, A: AsRef<str>>(expected: &[E], actual: &[A]) -> String {
    let expected_line = |i: usize| expected.get(i).map_or(MISSING, |l| l.as_ref());
    let actual_line = |i: usize| actual.get(i).map_or(MISSING, |l| l.as_ref());
    let max = expected.len().max(actual.len());
    let mut out = String::new();

    if let Some(i) = (0..max).find(|&i| expected_line(i) != actual_line(i)) {
        let start = i.saturating_sub(CONTEXT);
        let end = (i + CONTEXT + 1).min(max);
        let _ = writeln!(
            out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for n in start..end {
            let marker = if n == i { ">" } else { " " };
            let _ = writeln!(out, "{marker} {:>4}  expected: {}", n + 1, expected_line(n));
            let _ = writeln!(out, "{marker} {:>4}    actual: {}", n + 1, actual_line(n));
        }
    }
    let _ = writeln!(
        out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

#[cfg(feature = "fixtures")]
pub mod fixtures;

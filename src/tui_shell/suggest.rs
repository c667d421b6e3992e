pub(super) fn score_match(q: &str, candidate: &str) -> i32 {
    let q = q.to_lowercase();
    let c = candidate.to_lowercase();
    if c == q {
        return 100;
    }
    if c.starts_with(&q) {
        return 50;
    }
    if c.contains(&q) {
        return 10;
    }
    0
}

/// Indices of `candidates` matching `q`, best score first; equal scores keep
/// their original order.
pub(super) fn rank_matches<'a>(q: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<usize> {
    let mut scored: Vec<(i32, usize)> = candidates
        .enumerate()
        .map(|(i, c)| (score_match(q, c), i))
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|(sa, ia), (sb, ib)| sb.cmp(sa).then_with(|| ia.cmp(ib)));
    scored.into_iter().map(|(_, i)| i).collect()
}

#[cfg(test)]
#[path = "../tests/tui_shell/suggest_tests.rs"]
mod tests;

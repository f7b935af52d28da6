use itertools::Itertools;

/// How a single reference character should be displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Untyped,
    Correct,
    Incorrect,
}

/// One character of the reference passage with its classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharMark {
    pub char: char,
    pub mark: Mark,
}

/// Classifies every character of `reference` against `input`.
///
/// The result always has one entry per reference char; typed chars beyond the
/// reference are not represented here (they only affect accuracy).
pub fn diff(reference: &str, input: &str) -> Vec<CharMark> {
    let mut typed = input.chars();

    reference
        .chars()
        .map(|expected| {
            let mark = match typed.next() {
                None => Mark::Untyped,
                Some(c) if c == expected => Mark::Correct,
                Some(_) => Mark::Incorrect,
            };
            CharMark {
                char: expected,
                mark,
            }
        })
        .collect()
}

/// Collapses consecutive equally-marked chars into `(mark, text)` runs.
pub fn runs(marks: &[CharMark]) -> Vec<(Mark, String)> {
    marks
        .iter()
        .chunk_by(|m| m.mark)
        .into_iter()
        .map(|(mark, group)| (mark, group.map(|m| m.char).collect()))
        .collect()
}

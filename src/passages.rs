/// Number of passages in one sprint
pub const PASSAGE_COUNT: usize = 2;

/// The reference texts, typed in order
pub const PASSAGES: [&str; PASSAGE_COUNT] = [
    "Technology has become an inseparable part of our lives, influencing the way we communicate, work, learn, and even think about the future of humanity.",
    "The ability to type quickly and accurately is an essential skill in the digital age, helping people save time and increase productivity in almost every field.",
];

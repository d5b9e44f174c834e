/// Id an exercise gets when first seen: lowercase, spaces become
/// underscores, everything outside `[a-z0-9_]` is dropped.
pub fn exercise_id_from_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Rest time in seconds from free text. Only the digits are kept,
/// so `"90s"` is 90 and `"2 min"` is 2. Anything unparseable is 0.
pub fn parse_rest_seconds(s: &str) -> u32 {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Leading set count of a sets description (`"3x8"` → 3, `"4 sets"` → 4).
pub fn leading_set_count(sets: &str) -> Option<u32> {
    let digits: String = sets
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok().filter(|n| *n > 0)
}

/// Visible width of a string that may contain ANSI colour escapes.
pub fn plain_len(s: &str) -> usize {
    let mut n = 0;
    let mut esc = false;
    for c in s.chars() {
        match (esc, c) {
            (true, 'm') => esc = false,
            (true, _) => {}
            (false, '\x1B') => esc = true,
            (false, _) => n += 1,
        }
    }
    n
}

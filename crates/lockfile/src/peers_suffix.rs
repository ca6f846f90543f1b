/// Find where the parenthesized peers suffix of a reference starts.
///
/// The suffix is one or more balanced groups at the very end of the reference, e.g.
/// `(@types/react@17.0.49)(react@17.0.2)` in `1.21.3(@types/react@17.0.49)(react@17.0.2)`.
/// Nested parentheses are not part of the grammar, so a reference containing them has no suffix.
pub fn index_of_peers_suffix(reference: &str) -> Option<usize> {
    if !reference.ends_with(')') {
        return None;
    }

    let bytes = reference.as_bytes();
    let mut inside_group = true;
    for index in (0..bytes.len() - 1).rev() {
        match bytes[index] {
            b'(' => inside_group = false,
            b')' if inside_group => return None,
            b')' => inside_group = true,
            _ if !inside_group => return Some(index + 1),
            _ => {}
        }
    }

    None
}

/// Remove the peers suffix of a reference, keeping only the base version or path.
///
/// Both the parenthesized suffix and the legacy `_`-separated suffix of bare versions
/// (`1.0.0_react@17.0.2`) are recognized. The result never carries a suffix, so calling
/// this function on its own output is a no-op.
pub fn without_peers_suffix(reference: &str) -> &'_ str {
    let mut current = reference;
    loop {
        let next = strip_once(current);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_once(reference: &str) -> &'_ str {
    if let Some(index) = index_of_peers_suffix(reference) {
        return &reference[..index];
    }
    if reference.starts_with(|char: char| char.is_ascii_digit()) {
        if let Some((version, _)) = reference.split_once('_') {
            return version;
        }
    }
    reference
}

use node_semver::{Range, Version};

/// Whether `version` is matched by the specifier `range`.
///
/// Specifiers that are not semver ranges (aliases, git references, `workspace:` protocols, ...)
/// only match when they are the version itself.
pub fn satisfies(version: &str, range: &str) -> bool {
    if version == range {
        return true;
    }
    let (Ok(version), Ok(range)) = (version.parse::<Version>(), range.parse::<Range>()) else {
        return false;
    };
    version.satisfies(&range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching() {
        macro_rules! case {
            ($version:expr, $range:expr => $output:expr) => {{
                let (version, range) = ($version, $range);
                eprintln!("CASE: {version:?}, {range:?}");
                assert_eq!(satisfies(version, range), $output);
            }};
        }

        case!("4.17.21", "^4.17.0" => true);
        case!("4.17.21", "4.17.21" => true);
        case!("4.17.21", "~4.16.0" => false);
        case!("18.0.0", ">=16 <19" => true);
        case!("1.0.0", "*" => true);
        case!("4.2.3", "npm:string-width@^4.2.0" => false);
        case!("0.2.1", "github:user/repo#v1" => false);
        case!("1.0.0", "workspace:*" => false);
        case!("e63c09e", "e63c09e" => true);
        case!("not-a-version", "^1.0.0" => false);
    }
}

use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render `(key, value)` pairs as aligned `KEY  value` lines.
pub fn format_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    let width = pairs
        .iter()
        .map(|(k, _)| k.as_ref().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (key, value) in pairs {
        let line = format!("{:width$}  {}", key.as_ref(), value.as_ref(), width = width);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn print_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) {
    print!("{}", format_pairs(pairs));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_values_on_longest_key() {
        let out = format_pairs(&[("DOMAIN", "example.com"), ("REDIS_HOST", "runtipi-redis")]);
        assert_eq!(
            out,
            "DOMAIN      example.com\nREDIS_HOST  runtipi-redis\n"
        );
    }

    #[test]
    fn empty_value_has_no_trailing_spaces() {
        assert_eq!(format_pairs(&[("EMPTY", "")]), "EMPTY\n");
    }

    #[test]
    fn no_pairs_is_empty() {
        assert_eq!(format_pairs::<&str, &str>(&[]), "");
    }
}

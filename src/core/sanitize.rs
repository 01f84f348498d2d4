// src/core/sanitize.rs

/// Decode the handful of entities the portals actually emit.
/// Numeric references (`&#229;`, `&#xE5;`) are decoded too; anything else is left as-is.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = match tail.find(';') {
            Some(i) if i <= 10 => i,
            _ => {
                out.push('&');
                rest = &tail[1..];
                continue;
            }
        };
        let name = &tail[1..semi];
        let decoded = match name {
            "nbsp" => Some(' '),
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric(name),
        };
        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_numeric(name: &str) -> Option<char> {
    let num = name.strip_prefix('#')?;
    let code = match num.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => num.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

/// Collapse runs of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// File-system safe stem for a user-typed programme code.
/// Keeps ASCII alphanumerics, `-` and `_`; whitespace becomes a single `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_us = false;
        } else if ch.is_whitespace() || ch == '_' {
            if !last_us {
                out.push('_');
                last_us = true;
            }
        } else if ch == '-' {
            out.push(ch);
            last_us = false;
        }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("programme") } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_named_and_numeric() {
        assert_eq!(normalize_entities("A&nbsp;&amp;&nbsp;B"), "A & B");
        assert_eq!(normalize_entities("&#197;rskurs &#xe5;"), "Årskurs å");
        assert_eq!(normalize_entities("R&D &unknown; & more"), "R&D &unknown; & more");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(normalize_ws("  Final\n  grade:\t(4) "), "Final grade: (4)");
    }

    #[test]
    fn file_stems() {
        assert_eq!(sanitize_file_stem("BME"), "BME");
        assert_eq!(sanitize_file_stem(" D / E "), "D_E");
        assert_eq!(sanitize_file_stem("../.."), "programme");
    }
}

pub mod manifest;

/// Human-readable tile label: extension stripped, `-`/`_` runs become one space.
pub fn label_for(id: &str) -> String {
    let stem = match id.rfind('.') {
        Some(dot) if dot > 0 => &id[..dot],
        _ => id,
    };

    let mut label = String::with_capacity(stem.len());
    let mut in_separator = false;
    for c in stem.chars() {
        if c == '-' || c == '_' {
            if !in_separator {
                label.push(' ');
            }
            in_separator = true;
        } else {
            label.push(c);
            in_separator = false;
        }
    }
    label
}

/// Case-insensitive substring match over labels, keeping catalog order.
pub fn filter_catalog<'a>(files: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.trim().to_lowercase();
    files
        .iter()
        .map(String::as_str)
        .filter(|file| query.is_empty() || label_for(file).to_lowercase().contains(&query))
        .collect()
}

/// Sound triggered by a digit key, counting from 1.
pub fn hotkey_target<'a>(files: &'a [String], key: &str, hotkeys: usize) -> Option<&'a str> {
    let n: usize = key.parse().ok()?;
    if n == 0 || n > hotkeys {
        return None;
    }
    files.get(n - 1).map(String::as_str)
}

/// Key hint shown on the tile at `index` of the rendered list.
pub fn hotkey_hint(index: usize, hotkeys: usize) -> String {
    if index < hotkeys {
        (index + 1).to_string()
    } else {
        String::new()
    }
}

const MAX_VISIBLE_LENGTH: usize = 200;

const SECRET_MARKERS: [&str; 5] = ["Bearer ", "api_key=", "api-key: ", "token=", "secret="];

/// Shortens and scrubs upstream payloads before they reach the logs.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let visible = if total > MAX_VISIBLE_LENGTH {
        let head: String = trimmed.chars().take(MAX_VISIBLE_LENGTH).collect();
        format!("{}... ({} chars total)", head, total)
    } else {
        trimmed.to_string()
    };

    redact_secrets(&visible)
}

fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();

    for marker in SECRET_MARKERS {
        let mut search_from = 0;
        while let Some(offset) = result[search_from..].find(marker) {
            let value_start = search_from + offset + marker.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ','))
                .map(|i| value_start + i)
                .unwrap_or(result.len());

            result.replace_range(value_start..value_end, "[REDACTED]");
            search_from = value_start + "[REDACTED]".len();
        }
    }

    result
}

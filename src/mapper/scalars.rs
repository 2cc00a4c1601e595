//! Schema type text → target-language type.

/// Result of mapping one declared property type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarMapping {
    /// Mapped type, `[]`-suffixed when repeated
    pub mapped_type: String,
    pub repeated: bool,
}

/// Map a scalar type name. Names outside the table pass through unchanged.
pub fn map_scalar(name: &str) -> &str {
    match name {
        "number" | "int" | "int32" | "int64" | "integer" | "float" | "double" | "bigint" => {
            "number"
        }
        "string" => "string",
        "boolean" | "bool" => "boolean",
        "bytes" | "Uint8Array" | "Buffer" => "Uint8Array",
        "Date" | "date" | "timestamp" | "Timestamp" => "Date",
        other => other,
    }
}

/// Map a declared type, recognizing `T[]`, `Array<T>` and `ReadonlyArray<T>` as repeated.
///
/// Only one level of repetition is unwrapped; the element type is looked up in the scalar table.
pub fn map_type(declared: &str) -> ScalarMapping {
    let declared = declared.trim();
    match element_type(declared) {
        Some(element) => {
            let mapped = map_scalar(element);
            let mapped_type = if mapped.contains(|c: char| matches!(c, '|' | '&' | ' ')) {
                format!("({mapped})[]")
            } else {
                format!("{mapped}[]")
            };
            ScalarMapping {
                mapped_type,
                repeated: true,
            }
        }
        None => ScalarMapping {
            mapped_type: map_scalar(declared).to_string(),
            repeated: false,
        },
    }
}

fn element_type(declared: &str) -> Option<&str> {
    if let Some(inner) = declared.strip_suffix("[]") {
        let inner = inner.trim();
        // `(A | B)[]`
        let inner = inner
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(inner);
        return Some(inner.trim());
    }
    ["Array<", "ReadonlyArray<"].iter().find_map(|prefix| {
        declared
            .strip_prefix(prefix)
            .and_then(|s| s.strip_suffix('>'))
            .map(str::trim)
    })
}

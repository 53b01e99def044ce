//! Per-backend SQL generation knobs.

/// The small set of per-backend SQL-generation knobs.
///
/// Each backend adapter supplies one of these; the synthesizer consults
/// it for placeholder style, identifier quoting, and whether the
/// zero-affected-rows check is meaningful at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectPolicy {
    /// Placeholders are `$1`, `$2`, … instead of `?`.
    pub positional_params: bool,
    /// Identifier quote character.
    pub quote: char,
    /// Backend stores byte arrays natively, no text encoding needed.
    pub native_byte_array: bool,
    /// Backend reports affected-row counts for mutations.
    ///
    /// Some drivers legitimately cannot, in which case an INSERT
    /// reporting zero affected rows must not be promoted to an error.
    pub reports_affected_rows: bool,
}

impl DialectPolicy {
    /// PostgreSQL: ordinal `$n` placeholders, double-quote identifiers.
    pub const POSTGRES: DialectPolicy = DialectPolicy {
        positional_params: true,
        quote: '"',
        native_byte_array: true,
        reports_affected_rows: true,
    };

    /// MySQL: `?` placeholders, backtick identifiers.
    pub const MYSQL: DialectPolicy = DialectPolicy {
        positional_params: false,
        quote: '`',
        native_byte_array: true,
        reports_affected_rows: true,
    };

    /// SQLite: `?` placeholders, double-quote identifiers.
    pub const SQLITE: DialectPolicy = DialectPolicy {
        positional_params: false,
        quote: '"',
        native_byte_array: true,
        reports_affected_rows: true,
    };

    /// Conservative ANSI fallback for backends that encode bytes as text
    /// and cannot report affected rows.
    pub const ANSI: DialectPolicy = DialectPolicy {
        positional_params: false,
        quote: '"',
        native_byte_array: false,
        reports_affected_rows: false,
    };

    /// The placeholder for the 1-based parameter `n`.
    pub fn placeholder(&self, n: usize) -> String {
        if self.positional_params {
            format!("${n}")
        } else {
            "?".to_string()
        }
    }

    /// A comma-joined placeholder list for `count` parameters.
    pub fn placeholders(&self, count: usize) -> String {
        (1..=count)
            .map(|n| self.placeholder(n))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Quote an identifier, doubling any embedded quote characters.
    pub fn quote_ident(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        out.push(self.quote);
        for c in name.chars() {
            if c == self.quote {
                out.push(self.quote);
            }
            out.push(c);
        }
        out.push(self.quote);
        out
    }
}

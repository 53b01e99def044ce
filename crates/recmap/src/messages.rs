//! Error-message catalog.
//!
//! A line-oriented resource of `<numeric-id>=<template>` entries with
//! `{0}`, `{1}`, … placeholders, embedded into the binary and parsed
//! once at startup. Malformed lines are logged and skipped; a resource
//! with no usable entries is a startup error.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::warn;

use crate::{Error, Result};

const RESOURCE: &str = include_str!("messages.txt");

static CATALOG: OnceLock<HashMap<u32, String>> = OnceLock::new();

/// Parse and install the embedded catalog. Call once at process start.
pub fn load() -> Result<()> {
    let parsed = parse(RESOURCE)?;
    let _ = CATALOG.set(parsed);
    Ok(())
}

/// Format message `id` with positional arguments.
///
/// Unknown ids, and lookups before [`load`], fall back to the bare id.
pub fn lookup(id: u32, args: &[&str]) -> String {
    let Some(catalog) = CATALOG.get() else {
        return format!("message {id}");
    };
    match catalog.get(&id) {
        Some(template) => expand(template, args),
        None => format!("message {id}"),
    }
}

fn parse(resource: &str) -> Result<HashMap<u32, String>> {
    let mut map = HashMap::new();
    for (lineno, raw) in resource.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((id, template)) => match id.trim().parse::<u32>() {
                Ok(id) => {
                    map.insert(id, template.to_string());
                }
                Err(_) => warn!(lineno = lineno + 1, line, "skipping malformed message id"),
            },
            None => warn!(lineno = lineno + 1, line, "skipping malformed catalog line"),
        }
    }
    if map.is_empty() {
        return Err(Error::MessageCatalog(
            "no usable entries in message resource".into(),
        ));
    }
    Ok(map)
}

fn expand(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (idx, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{idx}}}"), arg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_malformed_lines() {
        let map = parse("1=ok {0}\nnot a line\nxx=bad id\n# comment\n\n2=two").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1], "ok {0}");
        assert_eq!(map[&2], "two");
    }

    #[test]
    fn test_empty_resource_is_fatal() {
        assert!(matches!(
            parse("# only comments\n"),
            Err(Error::MessageCatalog(_))
        ));
    }

    #[test]
    fn test_expand_placeholders() {
        assert_eq!(
            expand("column {0} of table {1}", &["id", "albums"]),
            "column id of table albums"
        );
        assert_eq!(expand("no args", &[]), "no args");
    }

    #[test]
    fn test_embedded_resource_parses() {
        let map = parse(RESOURCE).unwrap();
        assert!(map.contains_key(&1));
    }

    #[test]
    fn test_lookup_after_load() {
        load().unwrap();
        assert_eq!(lookup(2, &["Title"]), "unknown column Title");
        assert_eq!(lookup(9999, &[]), "message 9999");
    }
}

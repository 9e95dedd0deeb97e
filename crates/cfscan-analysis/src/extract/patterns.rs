//! Compiled tag patterns, shared by every extraction call.

use once_cell::sync::Lazy;
use regex::Regex;

/// Group 1: opening-tag attributes. Group 2: block interior.
pub(crate) static QUERY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<cfquery\b([^>]*)>(.*?)</cfquery\s*>").unwrap());

pub(crate) static FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<cffunction\b([^>]*)>").unwrap());

pub(crate) static FUNCTION_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</cffunction\s*>").unwrap());

pub(crate) static COMPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<cfcomponent\b([^>]*)>").unwrap());

pub(crate) static INVOKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<cfinvoke\b([^>]*?)/?>").unwrap());

pub(crate) static INCLUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<cfinclude\b([^>]*?)/?>").unwrap());

pub(crate) static MODULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<cfmodule\b([^>]*?)/?>").unwrap());

pub(crate) static ARGUMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<cfargument\b([^>]*?)/?>").unwrap());

pub(crate) static QUERY_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<cfqueryparam\b([^>]*?)/?>").unwrap());

/// One `key="value"` or `key='value'` pair.
pub(crate) static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][\w:.\-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

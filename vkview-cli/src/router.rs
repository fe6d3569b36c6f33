//! Dispatch of option payloads to their formatters.

use std::io::Write;

use anyhow::Result;
use serde_json::Value;

use vkview_core::api::{Album, ItemsPayload};
use vkview_core::config::MenuOption;

use crate::client::ApiClient;
use crate::format::{self, Prefixes};
use crate::resolver::{self, FailureReason};

/// Fixed notice printed after the raw payload of an unrecognized method.
pub const NO_FORMATTER_NOTICE: &str = "No formatter is registered for method";

/// The closed set of known remote method tags, plus a fallback. Adding a
/// formatter means adding a variant here, so an unhandled tag is a
/// visible gap in the match below rather than a stray string branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodTag {
    Friends,
    Albums,
    Other,
}

impl MethodTag {
    pub fn of(method: &str) -> Self {
        match method {
            "friends.get" => MethodTag::Friends,
            "photos.getAlbums" => MethodTag::Albums,
            _ => MethodTag::Other,
        }
    }
}

/// Format the selected option's payload onto `out`.
///
/// The friends view re-invokes the transport through the batch resolver;
/// failed chunks are reported with their own error content before the
/// block is printed. Unrecognized methods fall back to the raw payload
/// plus [`NO_FORMATTER_NOTICE`]; no tag is an error.
pub fn route<W: Write>(
    client: &ApiClient,
    prefixes: &Prefixes,
    option: &MenuOption,
    payload: Value,
    out: &mut W,
) -> Result<()> {
    match MethodTag::of(&option.method) {
        MethodTag::Friends => {
            let friends: ItemsPayload<i64> = match serde_json::from_value(payload) {
                Ok(parsed) => parsed,
                Err(_) => {
                    writeln!(out, "{}Unexpected payload for {}", prefixes.error, option.method)?;
                    return Ok(());
                }
            };

            let ids: Vec<String> = friends.items.iter().map(ToString::to_string).collect();
            let batch = resolver::resolve_many(client, &ids)?;

            for failure in &batch.failures {
                let diagnostic = match &failure.reason {
                    FailureReason::Http(status) => format::format_http_error(prefixes, *status),
                    FailureReason::Api(error) => format::format_api_error(prefixes, error),
                };
                writeln!(out, "{diagnostic}")?;
            }

            writeln!(out, "{}", format::format_friends(prefixes, &batch.users))?;
        }
        MethodTag::Albums => {
            let albums: ItemsPayload<Album> = match serde_json::from_value(payload) {
                Ok(parsed) => parsed,
                Err(_) => {
                    writeln!(out, "{}Unexpected payload for {}", prefixes.error, option.method)?;
                    return Ok(());
                }
            };

            writeln!(out, "{}", format::format_albums(prefixes, &albums.items))?;
        }
        MethodTag::Other => {
            writeln!(out, "{payload}")?;
            writeln!(
                out,
                "{}{} \"{}\"",
                prefixes.info, NO_FORMATTER_NOTICE, option.method
            )?;
        }
    }

    Ok(())
}

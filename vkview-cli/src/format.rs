//! Output formatting for the interactive session
//!
//! Everything the operator sees is a `[INFO]: `/`[INPUT]: `/`[ERROR]: `
//! prefixed line or a fixed-width block bordered by `=`. The border width
//! of a block is the length (in characters) of its longest item line; an
//! empty block prints its header line only, with no border.

use reqwest::StatusCode;

use vkview_core::api::{Album, ApiError, UserRecord};
use vkview_core::config::MenuOption;

/// Message prefixes, passed explicitly through the call chain.
#[derive(Debug, Clone, Copy)]
pub struct Prefixes {
    pub info: &'static str,
    pub input: &'static str,
    pub error: &'static str,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self {
            info: "[INFO]: ",
            input: "[INPUT]: ",
            error: "[ERROR]: ",
        }
    }
}

/// Width of the label column in the profile block.
const LABEL_WIDTH: usize = 24;

fn display_width(line: &str) -> usize {
    line.chars().count()
}

/// Frame `lines` with `=` borders sized to the longest line. The optional
/// header goes inside the borders; with no lines at all, only the header
/// is returned.
fn bordered_block(header: Option<&str>, lines: &[String]) -> String {
    if lines.is_empty() {
        return header.unwrap_or_default().to_string();
    }

    let width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
    let border = "=".repeat(width);

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    if let Some(header) = header {
        out.push_str(header);
        out.push('\n');
    }
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&border);
    out
}

/// The three-line profile block: User ID, First name, Last name.
pub fn format_profile(prefixes: &Prefixes, user: &UserRecord) -> String {
    let lines = vec![
        format!("{:<LABEL_WIDTH$}{}", format!("{}User ID", prefixes.info), user.id),
        format!(
            "{:<LABEL_WIDTH$}{}",
            format!("{}First name", prefixes.info),
            user.first_name
        ),
        format!(
            "{:<LABEL_WIDTH$}{}",
            format!("{}Last name", prefixes.info),
            user.last_name
        ),
    ];
    bordered_block(None, &lines)
}

/// The numbered option menu, 1-based, in configuration order.
pub fn format_menu(prefixes: &Prefixes, options: &[MenuOption]) -> String {
    let mut out = format!("{}Enabled options:", prefixes.info);
    for (index, option) in options.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{}[{}] {}", prefixes.info, index + 1, option.name));
    }
    out
}

/// The enumerated friends block. Numbering covers the successfully
/// resolved records only, in aggregate order.
pub fn format_friends(prefixes: &Prefixes, friends: &[UserRecord]) -> String {
    let lines: Vec<String> = friends
        .iter()
        .enumerate()
        .map(|(index, friend)| {
            format!(
                "{}{:>6} {:<24}{:<24}(id{})",
                prefixes.info,
                format!("{}.", index + 1),
                friend.first_name,
                friend.last_name,
                friend.id
            )
        })
        .collect();

    let header = format!("{}User's friends are:", prefixes.info);
    bordered_block(Some(&header), &lines)
}

/// The enumerated photo albums block.
pub fn format_albums(prefixes: &Prefixes, albums: &[Album]) -> String {
    let lines: Vec<String> = albums
        .iter()
        .enumerate()
        .map(|(index, album)| {
            format!(
                "{}{:>4}{:<12}{:<16}{}",
                prefixes.info,
                format!("{}.\t", index + 1),
                format!("Size: {}", album.size),
                format!("id{}", album.id),
                album.title
            )
        })
        .collect();

    let header = format!("{}User's photo albums list:", prefixes.info);
    bordered_block(Some(&header), &lines)
}

/// Two diagnostic lines for a non-200 status.
pub fn format_http_error(prefixes: &Prefixes, status: StatusCode) -> String {
    format!(
        "{}Can't get a proper response\n{}Response code: {}",
        prefixes.error,
        prefixes.error,
        status.as_u16()
    )
}

/// Two diagnostic lines for an application-level error.
pub fn format_api_error(prefixes: &Prefixes, error: &ApiError) -> String {
    format!(
        "{}Code: {}\n{}Message: {}",
        prefixes.error, error.error_code, prefixes.error, error.error_msg
    )
}

//! The interactive session state machine.
//!
//! A synchronous, single-threaded read-eval-print cycle over two nested
//! loops: the outer one resolves a user identifier, the inner one serves
//! the option menu for a resolved open profile. All per-call failures are
//! handled here and never terminate the process; only transport faults
//! bubble out.

use std::io::{BufRead, Write};

use anyhow::Result;

use vkview_core::api::UserRecord;
use vkview_core::config::MenuOption;

use crate::client::{ApiClient, Reply};
use crate::format::{self, Prefixes};
use crate::router;

/// Typed at the top-level prompt to end the session.
pub const EXIT_KEYWORD: &str = "exit";

/// Validate one menu input: a pure-digit string within `[0, max]`.
/// `0` is the return-to-outer-loop sentinel.
pub fn parse_choice(raw: &str, max: usize) -> Option<usize> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse::<usize>().ok().filter(|&choice| choice <= max)
}

/// The interactive session, generic over its streams so the state
/// machine can be driven by scripted input in tests.
pub struct Session<R, W> {
    client: ApiClient,
    options: Vec<MenuOption>,
    prefixes: Prefixes,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        client: ApiClient,
        options: Vec<MenuOption>,
        prefixes: Prefixes,
        input: R,
        output: W,
    ) -> Self {
        Self {
            client,
            options,
            prefixes,
            input,
            output,
        }
    }

    /// Consume the session and hand back its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the operator types the exit keyword or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) =
                self.prompt("Enter user id/screen name (type \"exit\" to quit): ")?
            else {
                return Ok(());
            };
            if line == EXIT_KEYWORD {
                return Ok(());
            }

            if let Some(user) = self.resolve_profile(&line)? {
                self.option_loop(&user)?;
            }
        }
    }

    /// Resolve one identifier and print the profile block. Returns the
    /// user only for an open profile; every failure path prints its
    /// diagnostic and leaves the caller in the outer loop.
    fn resolve_profile(&mut self, raw_id: &str) -> Result<Option<UserRecord>> {
        let reply = self.client.resolve_users(&[raw_id.to_string()])?;

        let payload = match reply {
            Reply::Http(status) => {
                self.emit(&format::format_http_error(&self.prefixes, status))?;
                return Ok(None);
            }
            Reply::Api(error) => {
                self.emit(&format::format_api_error(&self.prefixes, &error))?;
                return Ok(None);
            }
            Reply::Payload(payload) => payload,
        };

        let users: Vec<UserRecord> = match serde_json::from_value(payload) {
            Ok(users) => users,
            Err(_) => {
                self.error("Unexpected payload for the user lookup")?;
                return Ok(None);
            }
        };

        let Some(user) = users.into_iter().next() else {
            self.error("Empty result for that identifier (id 0 refers to the calling account)")?;
            return Ok(None);
        };

        self.emit(&format::format_profile(&self.prefixes, &user))?;

        if user.is_restricted() {
            self.info("No options are available: this profile is closed or has been deleted")?;
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Serve the option menu for one resolved user until the `0`
    /// sentinel (or end of input) returns control to the outer loop.
    fn option_loop(&mut self, user: &UserRecord) -> Result<()> {
        self.emit(&format::format_menu(&self.prefixes, &self.options))?;

        loop {
            let Some(raw) = self.prompt("Type option number (use 0 to continue): ")? else {
                return Ok(());
            };

            let Some(choice) = parse_choice(&raw, self.options.len()) else {
                self.error("Incorrect input!")?;
                continue;
            };
            if choice == 0 {
                return Ok(());
            }

            let option = self.options[choice - 1].clone();
            match self.client.fetch_option(&option.method, user.id)? {
                Reply::Http(status) => {
                    self.emit(&format::format_http_error(&self.prefixes, status))?;
                }
                Reply::Api(error) => {
                    // reported only, never routed to a formatter
                    self.emit(&format::format_api_error(&self.prefixes, &error))?;
                }
                Reply::Payload(payload) => {
                    let Self {
                        client,
                        prefixes,
                        output,
                        ..
                    } = self;
                    router::route(client, prefixes, &option, payload, output)?;
                }
            }
        }
    }

    /// Print the `[INPUT]: ` prompt and read one trimmed line.
    /// Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}{}", self.prefixes.input, text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn emit(&mut self, block: &str) -> Result<()> {
        writeln!(self.output, "{block}")?;
        Ok(())
    }

    fn info(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}{}", self.prefixes.info, message)?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}{}", self.prefixes.error, message)?;
        Ok(())
    }
}

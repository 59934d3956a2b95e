//! Interactive terminal browser
//!
//! Reads one command per line and drives a [`Router`] backed by an
//! in-memory history and a [`TextRenderer`]. Detail lookups are awaited
//! before the next command is read.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::catalog::Catalog;
use crate::detail::DetailResolver;
use crate::render::TextRenderer;
use crate::router::{DetailTicket, MemoryHistory, Router};

pub const HELP: &str = "\
Commands:
  /TEXT, search TEXT   filter records (empty text shows everything)
  next, n              next page
  prev, p              previous page
  page N               go to page N
  open N|SLUG, o       open record N on this page, or by slug
  home                 back to the record list
  back, b              history back
  forward, f           history forward
  help, ?              this help
  quit, q              exit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Next,
    Previous,
    Page(usize),
    Open(String),
    Home,
    Back,
    Forward,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        if let Some(query) = line.strip_prefix('/') {
            return Command::Search(query.trim().to_string());
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "search" | "s" => Command::Search(rest.to_string()),
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "page" => match rest.parse() {
                Ok(page) => Command::Page(page),
                Err(_) => Command::Unknown(line.to_string()),
            },
            "open" | "o" if !rest.is_empty() => Command::Open(rest.to_string()),
            "home" => Command::Home,
            "back" | "b" => Command::Back,
            "forward" | "f" => Command::Forward,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// A terminal browsing session
pub struct BrowseSession<W: Write> {
    router: Router<MemoryHistory, TextRenderer<W>>,
    resolver: DetailResolver,
}

impl<W: Write> BrowseSession<W> {
    /// Start at `address` (e.g. `/` or `/#queen-jazz`) and render the first view
    pub async fn start(
        catalog: Arc<Catalog>,
        resolver: DetailResolver,
        out: W,
        address: &str,
    ) -> Self {
        let (router, ticket) = Router::start(
            catalog,
            MemoryHistory::new(address),
            TextRenderer::new(out),
            address,
        );
        let mut session = Self { router, resolver };
        session.resolve(ticket).await;
        session
    }

    pub fn router(&self) -> &Router<MemoryHistory, TextRenderer<W>> {
        &self.router
    }

    pub fn into_output(self) -> W {
        self.router.into_renderer().into_inner()
    }

    /// Run commands from `input` until `quit` or end of input
    pub async fn run<I>(&mut self, input: I) -> std::io::Result<()>
    where
        I: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if !self.execute(Command::parse(&line)).await {
                break;
            }
        }
        Ok(())
    }

    /// Apply one command; returns `false` on quit
    pub async fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Search(query) => self.router.search(&query),
            Command::Next => self.router.next_page(),
            Command::Previous => self.router.previous_page(),
            Command::Page(page) => self.router.go_to_page(page),
            Command::Open(target) => {
                let slug = self.slug_for(&target);
                let ticket = self.router.navigate_to_details(&slug);
                self.resolve(ticket).await;
            }
            Command::Home => self.router.navigate_home(),
            Command::Back => {
                let entry = self.router.history_mut().back();
                match entry {
                    Some(entry) => {
                        let ticket = self.router.handle_pop(entry.state);
                        self.resolve(ticket).await;
                    }
                    None => self.say("Already at the oldest entry"),
                }
            }
            Command::Forward => {
                let entry = self.router.history_mut().forward();
                match entry {
                    Some(entry) => {
                        let ticket = self.router.handle_pop(entry.state);
                        self.resolve(ticket).await;
                    }
                    None => self.say("Already at the newest entry"),
                }
            }
            Command::Help => self.say(HELP),
            Command::Quit => return false,
            Command::Empty => {}
            Command::Unknown(line) => self.say(&format!("Unknown command: {} (try `help`)", line)),
        }
        true
    }

    /// A number opens that row of the current page, anything else is a slug
    fn slug_for(&self, target: &str) -> String {
        if let Ok(index) = target.parse::<usize>() {
            let records = self.router.current_page_records();
            if let Some(record) = index.checked_sub(1).and_then(|i| records.get(i)) {
                return record.slug.clone();
            }
        }
        target.to_string()
    }

    async fn resolve(&mut self, ticket: Option<DetailTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        let content = self
            .resolver
            .resolve(&ticket.record.title, &ticket.record.artist)
            .await;
        self.router.complete_details(ticket, content);
    }

    fn say(&mut self, message: &str) {
        let out = self.router.renderer_mut().out_mut();
        if let Err(e) = writeln!(out, "{}\n", message) {
            warn!("Failed to write output: {}", e);
        }
    }
}

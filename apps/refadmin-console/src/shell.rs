//! Interactive shell: reads commands, routes them to the mounted view and
//! prints the re-rendered screen.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use refadmin_core::GateDecision;
use refadmin_core::session::{HOME_PATH, LOGIN_PATH};

use crate::router::{self, NavItem, Resolved};
use crate::state::AppState;
use crate::views::{self, Reply, View, split_word};

const GLOBAL_COMMANDS: &[views::CommandHelp] = &[
    ("go <path>", "Open a page, e.g. go /user-data"),
    ("nav", "Show the navigation bar"),
    ("logout", "End the session"),
    ("help", "List commands"),
    ("quit", "Leave the console"),
];

/// Redirect chains longer than this are cut off.
const MAX_REDIRECTS: usize = 4;

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit,
}

pub struct Shell {
    state: AppState,
    view: Box<dyn View>,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            view: views::mount(router::Route::Login),
        }
    }

    pub fn current_path(&self) -> &'static str {
        self.view.route().path()
    }

    /// Logged-in sessions start on the home page, others on `/`.
    pub fn start_path(&self) -> &'static str {
        if self.state.session.is_authenticated() {
            HOME_PATH
        } else {
            "/"
        }
    }

    pub async fn execute(&mut self, line: &str) -> Step {
        let (command, args) = split_word(line);
        let text = match command {
            "" => return Step::Continue(String::new()),
            "quit" | "exit" => return Step::Quit,
            "help" => self.help(),
            "nav" => self.nav_bar(),
            "go" => self.navigate(args).await,
            "logout" => {
                if let Err(e) = self.state.session.logout().await {
                    tracing::error!(error = %e, "Removing session cookie failed");
                }
                self.refresh().await
            }
            _ => {
                if !self.gate_allows().await {
                    return Step::Continue(self.navigate(LOGIN_PATH).await);
                }
                match self.view.handle(&self.state, command, args).await {
                    Reply::Updated => self.refresh().await,
                    Reply::Alert(message) => format!("{message}\n\n{}", self.refresh().await),
                    Reply::Navigate(path) => self.navigate(path).await,
                    Reply::Usage(usage) => format!("Usage: {usage}\n"),
                    Reply::Unknown => format!("Unknown command '{command}'. Type help.\n"),
                }
            }
        };
        Step::Continue(text)
    }

    /// Resolve `path`, follow redirects and the auth gate, mount the view.
    pub async fn navigate(&mut self, path: &str) -> String {
        let mut path = path.trim();
        for _ in 0..MAX_REDIRECTS {
            let route = match router::resolve(path) {
                Resolved::View(route) => route,
                Resolved::Redirect(to) => {
                    path = to;
                    continue;
                }
                Resolved::NotFound => return format!("No page at '{path}'.\n"),
            };

            if route.is_gated() {
                match self.state.session.gate().await {
                    GateDecision::Render => {}
                    GateDecision::Loading => return "Loading...\n".to_string(),
                    GateDecision::Redirect(to) => {
                        tracing::debug!(from = route.path(), to, "Gate redirect");
                        path = to;
                        continue;
                    }
                }
            }

            self.view = views::mount(route);
            self.view.enter(&self.state).await;
            tracing::debug!(path = route.path(), "View mounted");
            return self.screen();
        }
        tracing::warn!(path, "Too many redirects");
        self.screen()
    }

    async fn gate_allows(&self) -> bool {
        !self.view.route().is_gated() || self.state.session.gate().await == GateDecision::Render
    }

    /// Re-render, leaving a gated view whose session is gone.
    async fn refresh(&mut self) -> String {
        if self.gate_allows().await {
            self.screen()
        } else {
            self.navigate(LOGIN_PATH).await
        }
    }

    fn screen(&self) -> String {
        format!("{}\n{}", self.nav_bar(), self.view.render())
    }

    fn nav_bar(&self) -> String {
        let items: Vec<String> = router::nav_items(self.state.session.is_authenticated())
            .into_iter()
            .map(|item| match item {
                NavItem::Link(route) => format!("{} ({})", item.label(), route.path()),
                NavItem::Logout => format!("{} (logout)", item.label()),
            })
            .collect();
        format!("Admin Dashboard | {}\n", items.join(" | "))
    }

    fn help(&self) -> String {
        let mut out = String::from("Commands:\n");
        for (usage, about) in GLOBAL_COMMANDS.iter().chain(self.view.commands()) {
            out.push_str(&format!("  {usage:<28} {about}\n"));
        }
        out
    }

    /// Read commands from `input` until EOF or `quit`.
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let start = self.start_path();
        let screen = self.navigate(start).await;
        output.write_all(screen.as_bytes()).await?;

        let mut lines = input.lines();
        loop {
            output
                .write_all(format!("\nrefadmin:{}> ", self.current_path()).as_bytes())
                .await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.execute(&line).await {
                Step::Continue(text) => output.write_all(text.as_bytes()).await?,
                Step::Quit => break,
            }
        }

        output.write_all(b"\n").await?;
        output.flush().await
    }
}

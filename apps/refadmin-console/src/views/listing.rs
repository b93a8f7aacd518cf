//! Paginated, filterable record table shared by the referral and profile
//! pages.

use async_trait::async_trait;

use refadmin_core::ApiError;
use refadmin_core::listing::{
    ErrorPolicy, FilterField, FilterRows, ListingState, PageQuery, load_page,
};
use refadmin_core::ports::AdminApi;

use super::render::{heading, table};
use super::{CommandHelp, Reply, View, parse_position, split_word};
use crate::router::Route;
use crate::state::AppState;

const COMMANDS: &[CommandHelp] = &[
    ("next", "Next page"),
    ("prev", "Previous page"),
    ("page <n>", "Jump to page n"),
    ("filter add", "Add an empty filter row"),
    ("filter field <row> <key>", "Choose the field a row filters on"),
    ("filter value <row> <text>", "Set the value of a row"),
    ("filter rm <row>", "Remove a row"),
    ("apply", "Apply the filter rows and return to page 1"),
];

const FILTER_USAGE: &str = "filter add | filter field <row> <key> | filter value <row> <text> | filter rm <row>";

/// A record type shown by [`ListingView`].
#[async_trait]
pub trait Listed: Sized + Send + Sync + 'static {
    const ROUTE: Route;
    const TITLE: &'static str;
    const FILTERS: &'static [FilterField];
    const HEADERS: &'static [&'static str];
    const EMPTY: &'static str;
    const ERROR_POLICY: ErrorPolicy;
    const ERROR_MESSAGE: &'static str;

    /// Cells after the row number column.
    fn cells(&self) -> Vec<String>;

    async fn fetch(api: &dyn AdminApi, query: PageQuery) -> Result<Vec<Self>, ApiError>;
}

pub struct ListingView<R> {
    listing: ListingState<R>,
    rows: FilterRows,
}

impl<R: Listed> ListingView<R> {
    pub fn new() -> Self {
        Self {
            listing: ListingState::new(R::ERROR_POLICY, R::ERROR_MESSAGE),
            rows: FilterRows::new(),
        }
    }

    #[cfg(test)]
    pub fn listing(&self) -> &ListingState<R> {
        &self.listing
    }

    async fn load(&mut self, api: &dyn AdminApi) {
        load_page(&mut self.listing, |query| R::fetch(api, query)).await;
        tracing::debug!(
            view = R::TITLE,
            page = self.listing.page(),
            records = self.listing.records().len(),
            "Listing refreshed"
        );
    }

    fn edit_filters(&mut self, args: &str) -> Reply {
        let (action, rest) = split_word(args);
        match action {
            "add" => {
                self.rows.add();
                Reply::Updated
            }
            "rm" | "remove" => match parse_position(rest).and_then(|i| self.rows.remove(i)) {
                Some(_) => Reply::Updated,
                None => Reply::Alert(format!("No filter row {rest}.")),
            },
            "field" => {
                let (row, key) = split_word(rest);
                let Some(index) = parse_position(row) else {
                    return Reply::Usage(FILTER_USAGE);
                };
                if !R::FILTERS.iter().any(|f| f.key == key) {
                    let keys: Vec<&str> = R::FILTERS.iter().map(|f| f.key).collect();
                    return Reply::Alert(format!("Choose one of: {}", keys.join(", ")));
                }
                if self.rows.set_field(index, key) {
                    Reply::Updated
                } else {
                    Reply::Alert(format!("No filter row {row}."))
                }
            }
            "value" => {
                let (row, value) = split_word(rest);
                let Some(index) = parse_position(row) else {
                    return Reply::Usage(FILTER_USAGE);
                };
                if self.rows.set_value(index, value) {
                    Reply::Updated
                } else {
                    Reply::Alert(format!("No filter row {row}."))
                }
            }
            _ => Reply::Usage(FILTER_USAGE),
        }
    }

    fn label_of(key: &str) -> &str {
        R::FILTERS
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.label)
            .unwrap_or(key)
    }
}

impl<R: Listed> Default for ListingView<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Listed> View for ListingView<R> {
    fn route(&self) -> Route {
        R::ROUTE
    }

    fn commands(&self) -> &'static [CommandHelp] {
        COMMANDS
    }

    async fn enter(&mut self, state: &AppState) {
        self.load(state.api.as_ref()).await;
    }

    async fn handle(&mut self, state: &AppState, command: &str, args: &str) -> Reply {
        let refetch = match command {
            "next" => self.listing.next(),
            "prev" => self.listing.prev(),
            "page" => match args.trim().parse::<u32>() {
                Ok(page) => self.listing.go_to(page),
                Err(_) => return Reply::Usage("page <n>"),
            },
            "apply" => self.listing.apply_filters(&self.rows),
            "filter" => return self.edit_filters(args),
            _ => return Reply::Unknown,
        };
        if refetch {
            self.load(state.api.as_ref()).await;
        }
        Reply::Updated
    }

    fn render(&self) -> String {
        let mut out = heading(R::TITLE);

        if self.rows.is_empty() {
            out.push_str("Filters: none (filter add)\n");
        } else {
            out.push_str("Filters:\n");
            for (i, row) in self.rows.rows().iter().enumerate() {
                let field = if row.field.is_empty() {
                    "<field>"
                } else {
                    Self::label_of(&row.field)
                };
                out.push_str(&format!("  {}. {field} = {}\n", i + 1, row.value));
            }
        }
        if !self.listing.applied().is_empty() {
            let applied: Vec<String> = self
                .listing
                .applied()
                .iter()
                .map(|(k, v)| format!("{}={v}", Self::label_of(k)))
                .collect();
            out.push_str(&format!("Applied: {}\n", applied.join(", ")));
        }
        out.push('\n');

        if self.listing.is_loading() {
            out.push_str("Loading...\n");
        }
        if let Some(error) = self.listing.error() {
            out.push_str(&format!("! {error}\n"));
        }

        if self.listing.records().is_empty() {
            out.push_str(R::EMPTY);
            out.push('\n');
        } else {
            let mut headers = vec!["#"];
            headers.extend_from_slice(R::HEADERS);
            let rows: Vec<Vec<String>> = self
                .listing
                .records()
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    let mut cells = vec![self.listing.row_number(i).to_string()];
                    cells.extend(record.cells());
                    cells
                })
                .collect();
            out.push_str(&table(&headers, &rows));
        }

        let prev = if self.listing.can_go_prev() { "[prev]" } else { " prev " };
        let next = if self.listing.can_go_next() { "[next]" } else { " next " };
        out.push_str(&format!("\n{prev}  Page {}  {next}\n", self.listing.page()));
        out
    }
}

//! Line-oriented console front end.
//!
//! Parses one command per input line, drives [`ImaceApp`] with it and renders
//! the selected view as plain text.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use imace_app::{DeleteOutcome, ImaceApp, UploadOutcome};
use imace_core::image::InvalidPageSize;
use imace_core::view::PageLink;
use imace_core::{select, ImagePath, PageSize, ViewSelection, ViewState};

pub const HELP: &str = "\
commands:
  search [text]      set the search query (empty clears it)
  page <n>           go to browse page n
  size <n>           set the page size (12, 24, 36, 48)
  stage <path>...    stage files for upload
  unstage <i>        drop staged file i
  upload             upload the staged files
  delete             delete every image in the index
  points             load the 3D embedding points
  catalog            load the full image list
  show               print the current view
  help               print this text
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Page(u32),
    Size(PageSize),
    Stage(Vec<PathBuf>),
    Unstage(usize),
    Upload,
    Delete,
    Points,
    Catalog,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{value}` is not a valid {what}")]
    InvalidNumber { what: &'static str, value: String },

    #[error(transparent)]
    InvalidPageSize(#[from] InvalidPageSize),
}

/// Parse one input line. The search text is taken verbatim after the
/// command word and its separator.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word {
        "" => Err(CommandError::Empty),
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "page" | "p" => Ok(Command::Page(parse_number(rest, "page", "a page number")?)),
        "size" => {
            let raw: u32 = parse_number(rest, "size", "a page size")?;
            Ok(Command::Size(PageSize::try_from(raw)?))
        }
        "stage" => {
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "stage",
                    expected: "at least one path",
                });
            }
            Ok(Command::Stage(paths))
        }
        "unstage" => Ok(Command::Unstage(parse_number(
            rest,
            "unstage",
            "a staged file index",
        )?)),
        "upload" => Ok(Command::Upload),
        "delete" => Ok(Command::Delete),
        "points" => Ok(Command::Points),
        "catalog" => Ok(Command::Catalog),
        "show" | "ls" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(
    raw: &str,
    command: &'static str,
    expected: &'static str,
) -> Result<T, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        what: expected,
        value: raw.to_string(),
    })
}

/// Commands whose request chain goes over the network.
///
/// These must not block the input loop: a request that never settles would
/// otherwise freeze the console, while only its busy flag may stay stuck.
pub fn runs_in_background(command: &Command) -> bool {
    matches!(
        command,
        Command::Page(_)
            | Command::Size(_)
            | Command::Upload
            | Command::Delete
            | Command::Points
            | Command::Catalog
    )
}

/// Run `command` on a detached task and send its status line to `output`
/// once the chain has settled.
pub fn spawn_command(
    app: Arc<ImaceApp>,
    command: Command,
    output: mpsc::UnboundedSender<String>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(message) = execute(&app, command).await {
            // The printer is gone only during shutdown.
            let _ = output.send(message);
        }
    })
}

/// Run `command` against the app. Returns a status line to print, if any.
///
/// `Quit` is handled by the caller and yields nothing here.
pub async fn execute(app: &ImaceApp, command: Command) -> Option<String> {
    match command {
        Command::Search(query) => {
            app.set_search_query(query).await;
            None
        }
        Command::Page(page) => {
            app.set_browse_page(page).await;
            None
        }
        Command::Size(page_size) => {
            app.set_browse_page_size(page_size).await;
            None
        }
        Command::Stage(paths) => {
            let outcome = app.stage_files(&paths).await;
            Some(format!(
                "staged {} file(s), skipped {}",
                outcome.staged, outcome.skipped
            ))
        }
        Command::Unstage(index) => {
            if app.unstage_file(index).await {
                None
            } else {
                Some(format!("no staged file at index {index}"))
            }
        }
        Command::Upload => Some(
            match app.handle_upload().await {
                UploadOutcome::Uploaded => "upload complete",
                UploadOutcome::Skipped => "nothing to upload or upload in progress",
                UploadOutcome::Failed => "upload failed, staged files kept",
            }
            .to_string(),
        ),
        Command::Delete => Some(
            match app.handle_delete().await {
                DeleteOutcome::Deleted => "all images deleted",
                DeleteOutcome::Skipped => "delete already in progress",
                DeleteOutcome::Failed => "delete failed",
            }
            .to_string(),
        ),
        Command::Points => {
            app.refresh_image_points().await;
            let state = app.snapshot().await;
            Some(render_points(&state))
        }
        Command::Catalog => {
            app.refresh_catalog().await;
            let state = app.snapshot().await;
            Some(render_catalog(&state))
        }
        Command::Show => {
            let state = app.snapshot().await;
            Some(render_view(&state, |path| app.image_url(path)))
        }
        Command::Help => Some(HELP.to_string()),
        Command::Quit => None,
    }
}

/// Render the selected view, staged files and busy flags.
pub fn render_view(state: &ViewState, image_url: impl Fn(&ImagePath) -> String) -> String {
    let mut out = String::new();
    let selection = select(state);

    match &selection {
        ViewSelection::Search { items, total } => {
            let _ = writeln!(out, "search \"{}\": {total} result(s)", state.search_query());
            for item in items.iter() {
                let _ = writeln!(
                    out,
                    "  {:>6.2}%  {}  {}",
                    item.similarity_percent(),
                    item.path,
                    image_url(&item.path)
                );
            }
        }
        ViewSelection::Browse {
            items,
            total,
            page,
            page_size,
            total_pages,
            loading,
        } => {
            if *loading {
                let _ = writeln!(out, "browse page {page} (size {page_size}): loading...");
            } else {
                let _ = writeln!(
                    out,
                    "browse page {page}/{total_pages} (size {page_size}): {total} image(s)"
                );
            }
            for path in items.iter() {
                let _ = writeln!(out, "  {path}  {}", image_url(path));
            }
            let bar = render_page_links(&selection.page_links());
            if !bar.is_empty() {
                let _ = writeln!(out, "  {bar}");
            }
        }
    }

    if !state.staged_files().is_empty() {
        let _ = writeln!(out, "staged:");
        for (index, file) in state.staged_files().iter().enumerate() {
            let _ = writeln!(
                out,
                "  [{index}] {} ({} bytes, {})",
                file.file_name,
                file.size(),
                file.mime_type.as_deref().unwrap_or("unknown type")
            );
        }
    }

    let busy = state.busy();
    let flags: Vec<&str> = [
        (busy.is_searching, "searching"),
        (busy.is_uploading, "uploading"),
        (busy.is_deleting, "deleting"),
        (busy.is_loading_points, "loading points"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();
    if !flags.is_empty() {
        let _ = writeln!(out, "busy: {}", flags.join(", "));
    }

    out
}

/// `< 1 ... 4 [5] 6 ... 10 >`
pub fn render_page_links(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Previous { .. } => "<".to_string(),
            PageLink::Page { page, active: true } => format!("[{page}]"),
            PageLink::Page { page, .. } => page.to_string(),
            PageLink::Ellipsis => "...".to_string(),
            PageLink::Next { .. } => ">".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_points(state: &ViewState) -> String {
    match state.image_points() {
        None => "points not loaded".to_string(),
        Some(points) => {
            let mut out = format!("{} point(s)", points.len());
            for point in points {
                let kind = point
                    .thumbnail()
                    .map(|thumb| thumb.mime_type)
                    .unwrap_or_else(|_| "invalid thumbnail".to_string());
                let [x, y, z] = point.position;
                let _ = write!(out, "\n  #{} ({x:.3}, {y:.3}, {z:.3}) {kind}", point.id);
            }
            out
        }
    }
}

fn render_catalog(state: &ViewState) -> String {
    match state.catalog() {
        None => "catalog not loaded".to_string(),
        Some(paths) => {
            let mut out = format!("{} image(s) in index", paths.len());
            for path in paths {
                let _ = write!(out, "\n  {path}");
            }
            out
        }
    }
}

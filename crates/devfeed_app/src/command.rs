use devfeed_core::{Msg, PostId, Route, SortKey, ThemeId};

/// One line typed at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/text`: edit the search box. A bare `/` clears it.
    Search(String),
    Sort(SortKey),
    More,
    Tag(String),
    Home,
    /// `tags [filter]`
    Tags(Option<String>),
    Open(PostId),
    Theme(ThemeId),
    Retry,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  /text         search loaded posts (home feed)
  sort <key>    latest | popular | relevant
  more          load the next page
  tag <slug>    posts for one tag
  home          back to the home feed
  tags [text]   tag directory, optionally filtered
  open <id>     read an article
  theme <id>    ruby | ember | moss | breeze | honey | mocha
  retry         retry whatever failed
  quit";

impl Command {
    /// Messages for the core; `Help` and `Quit` are handled by the shell.
    pub fn into_msgs(self, now_ms: u64) -> Vec<Msg> {
        match self {
            Command::Search(text) => vec![Msg::SearchInput { text, now_ms }],
            Command::Sort(key) => vec![Msg::SortSelected(key)],
            Command::More => vec![Msg::LoadMoreClicked],
            Command::Tag(slug) => vec![Msg::Navigate(Route::Tag(slug))],
            Command::Home => vec![Msg::Navigate(Route::Home)],
            Command::Tags(filter) => vec![
                Msg::Navigate(Route::Tags),
                Msg::SearchInput {
                    text: filter.unwrap_or_default(),
                    now_ms,
                },
            ],
            Command::Open(id) => vec![Msg::Navigate(Route::Article(id))],
            Command::Theme(theme) => vec![Msg::ThemeSelected(theme)],
            Command::Retry => vec![Msg::RetryClicked],
            Command::Help | Command::Quit => Vec::new(),
        }
    }
}

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if let Some(text) = line.strip_prefix('/') {
        return Ok(Command::Search(text.to_string()));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "sort" => rest
            .parse()
            .map(Command::Sort)
            .map_err(|err| err.to_string()),
        "more" | "m" => Ok(Command::More),
        "tag" if !rest.is_empty() => Ok(Command::Tag(rest.to_ascii_lowercase())),
        "tag" => Err("usage: tag <slug>".to_string()),
        "home" | "h" => Ok(Command::Home),
        "tags" => Ok(Command::Tags((!rest.is_empty()).then(|| rest.to_string()))),
        "open" | "o" => rest
            .parse()
            .map(Command::Open)
            .map_err(|_| format!("not an article id: {rest:?}")),
        "theme" => rest
            .parse()
            .map(Command::Theme)
            .map_err(|err| err.to_string()),
        "retry" | "r" => Ok(Command::Retry),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command {other:?}; type help")),
    }
}

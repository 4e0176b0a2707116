//! Line-oriented listing view: parses typed commands into list events and
//! renders the result view with `tera`.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::criteria::{SortField, SortSpec};
use crate::domain::notice::{Notice, UploadFile};
use crate::domain::query::DATE_FORMAT;
use crate::domain::types::NoticeId;
use crate::dto::list::ListPageData;
use crate::forms::notice::NoticeForm;
use crate::models::config::ConfigError;
use crate::services::notice::NoticeServiceError;
use crate::services::orchestrator::{ListEvent, QueryOrchestrator};

pub const HELP: &str = "\
commands:
  type <text>            edit the keyword without searching
  search [text]          search with the typed (or given) keyword
  compose start|end      mark input-method composition
  title-only on|off      restrict the keyword to titles
  range <from|-> <to|->  filter by creation date (YYYY-MM-DD)
  sort <field>           click a sort column: createdAt, viewCount, title
  order <field,dir>      pick an exact ordering, e.g. viewCount,asc
  page <n> | next | prev navigate pages
  refresh                reload the current page
  show <id>              print a notice
  new <title> | <content> | <start> | <end> [| <file>...]
                         create a notice, times as YYYY-MM-DD HH:MM
  edit <id> | <title> | <content> | <start> | <end> [| <file>...]
                         update a notice, `-` or empty keeps a field
  delete <id>            delete a notice
  help | quit";

const LIST_TEMPLATE: &str = r#"== Notices ==  sort: {{ sort }}
search: "{{ keyword }}"{% if draft_keyword != keyword %} (typing: "{{ draft_keyword }}"){% endif %}{% if composing %} [composing]{% endif %}{% if title_only %} [title only]{% endif %}{% if from_date or to_date %} [{% if from_date %}{{ from_date }}{% endif %} ~ {% if to_date %}{{ to_date }}{% endif %}]{% endif %}
{% if status == "loading" %}Loading...
{% elif status == "failed" %}Unable to load notices. ({{ error }})
{% elif status == "empty" %}No notices found.
{% else %}{% for row in rows %}#{{ row.id }}  {{ row.title }}{% if row.has_attachment %} [file]{% endif %}  {{ row.created_at }}  views {{ row.view_count }}  by {{ row.author }}
{% endfor %}{% endif %}{% if pager %}{% if pager.has_previous %}< prev  {% endif %}{{ pager.window | join(sep=" ") }}  ({{ pager.current }} / {{ pager.total }}){% if pager.has_next %}  next >{% endif %}
{% endif %}"#;

const NOTICE_TEMPLATE: &str = r#"#{{ notice.id }} {{ notice.title }}
by {{ notice.author.name }} at {{ notice.createdAt }}, views {{ notice.viewCount }}
period: {% if notice.startAt %}{{ notice.startAt }}{% endif %} ~ {% if notice.endAt %}{{ notice.endAt }}{% endif %}

{{ notice.content }}
{% for file in notice.attachments %}  [file] {{ file.filename }} {{ file.url }}
{% endfor %}"#;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Notice(#[from] NoticeServiceError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// A single list event.
    Event(ListEvent),
    /// Several list events applied in order, e.g. edit then submit.
    Events(Vec<ListEvent>),
    Show(NoticeId),
    Create(NoticeDraft),
    Edit(NoticeId, NoticeDraft),
    Delete(NoticeId),
    Help,
    Quit,
}

/// Field values typed for `new` and `edit`. `None` keeps the form's value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub files: Vec<PathBuf>,
}

impl NoticeDraft {
    /// Writes the typed fields into `form` and attaches the read `uploads`.
    pub fn apply_to(self, form: &mut NoticeForm, uploads: Vec<UploadFile>) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(content) = self.content {
            form.content = content;
        }
        if self.start_at.is_some() {
            form.start_at = self.start_at;
        }
        if self.end_at.is_some() {
            form.end_at = self.end_at;
        }
        form.files = uploads;
    }
}

/// Reads the files named in a draft.
pub async fn read_uploads(paths: &[PathBuf]) -> std::io::Result<Vec<UploadFile>> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        uploads.push(UploadFile { filename, bytes });
    }
    Ok(uploads)
}

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

fn parse_timestamp(command: &'static str, value: &str) -> Result<NaiveDateTime, CommandError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or(CommandError::BadArgument {
            command,
            expected: "times as YYYY-MM-DD HH:MM",
        })
}

fn parse_draft(command: &'static str, segments: &[&str]) -> Result<NoticeDraft, CommandError> {
    let field = |index: usize| {
        segments
            .get(index)
            .copied()
            .filter(|value| !value.is_empty() && *value != "-")
    };

    Ok(NoticeDraft {
        title: field(0).map(str::to_string),
        content: field(1).map(str::to_string),
        start_at: field(2)
            .map(|value| parse_timestamp(command, value))
            .transpose()?,
        end_at: field(3)
            .map(|value| parse_timestamp(command, value))
            .transpose()?,
        files: segments
            .iter()
            .skip(4)
            .filter(|path| !path.is_empty())
            .map(|path| PathBuf::from(*path))
            .collect(),
    })
}

fn parse_switch(command: &'static str, value: &str) -> Result<bool, CommandError> {
    match value {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::BadArgument {
            command,
            expected: "on or off",
        }),
    }
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, CommandError> {
    if value == "-" {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CommandError::BadArgument {
            command: "range",
            expected: "dates as YYYY-MM-DD or `-`",
        })
}

fn parse_id(command: &'static str, value: &str) -> Result<NoticeId, CommandError> {
    value.parse().map_err(|_| CommandError::BadArgument {
        command,
        expected: "a positive notice id",
    })
}

/// Parses one typed line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let event = match name {
        "" | "help" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "show" => return parse_id("show", rest).map(Command::Show),
        "delete" => return parse_id("delete", rest).map(Command::Delete),
        "new" => {
            if rest.is_empty() {
                return Err(CommandError::BadArgument {
                    command: "new",
                    expected: "title | content | start | end",
                });
            }
            let segments: Vec<&str> = rest.split('|').map(str::trim).collect();
            return parse_draft("new", &segments).map(Command::Create);
        }
        "edit" => {
            let mut segments: Vec<&str> = rest.split('|').map(str::trim).collect();
            let id = parse_id("edit", segments.remove(0))?;
            return parse_draft("edit", &segments).map(|draft| Command::Edit(id, draft));
        }
        "type" => ListEvent::KeywordEdited(rest.to_string()),
        "search" if rest.is_empty() => ListEvent::SearchSubmitted,
        "search" => {
            return Ok(Command::Events(vec![
                ListEvent::KeywordEdited(rest.to_string()),
                ListEvent::SearchSubmitted,
            ]));
        }
        "compose" => match rest {
            "start" => ListEvent::CompositionStarted,
            "end" => ListEvent::CompositionEnded,
            _ => {
                return Err(CommandError::BadArgument {
                    command: "compose",
                    expected: "start or end",
                });
            }
        },
        "title-only" => ListEvent::TitleOnlyChanged(parse_switch("title-only", rest)?),
        "range" => {
            let mut bounds = rest.split_whitespace();
            let (Some(from), Some(to), None) = (bounds.next(), bounds.next(), bounds.next()) else {
                return Err(CommandError::BadArgument {
                    command: "range",
                    expected: "two bounds",
                });
            };
            ListEvent::DateRangeChanged {
                from: parse_date(from)?,
                to: parse_date(to)?,
            }
        }
        "sort" => ListEvent::SortClicked(rest.parse::<SortField>().map_err(|_| {
            CommandError::BadArgument {
                command: "sort",
                expected: "createdAt, viewCount or title",
            }
        })?),
        "order" => ListEvent::SortSelected(rest.parse::<SortSpec>().map_err(|_| {
            CommandError::BadArgument {
                command: "order",
                expected: "field,direction such as viewCount,asc",
            }
        })?),
        "page" => {
            let page = rest
                .parse::<u32>()
                .ok()
                .and_then(|page| page.checked_sub(1))
                .ok_or(CommandError::BadArgument {
                    command: "page",
                    expected: "a page number starting at 1",
                })?;
            ListEvent::PageRequested(page)
        }
        "next" => ListEvent::NextPage,
        "prev" | "previous" => ListEvent::PreviousPage,
        "refresh" => ListEvent::Refresh,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Command::Event(event))
}

/// Renders the listing and notice details as plain text.
pub struct ListRenderer {
    tera: Tera,
}

impl ListRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("list.txt", LIST_TEMPLATE),
            ("notice.txt", NOTICE_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_list(&self, state: &QueryOrchestrator) -> Result<String, tera::Error> {
        let data = ListPageData::from(state);
        let context = Context::from_serialize(&data)?;
        self.tera.render("list.txt", &context)
    }

    pub fn render_notice(&self, notice: &Notice) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("notice", notice);
        self.tera.render("notice.txt", &context)
    }
}

//! KPoEM-style TSV poem catalog.
//!
//! The file has a header row naming at least `poem_id`, `title`, `poet` and
//! `text`; other columns are ignored. One row is one paragraph. Rows sharing
//! a `poem_id` form one poem: the first row's title and poet win, the
//! trimmed paragraphs are joined with a blank line. Fields are never quoted.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use tutor_application::ports::content_catalog::{CatalogError, ContentCatalog};
use tutor_domain::ContentItem;

pub const UNTITLED: &str = "제목 없음";
pub const UNKNOWN_POET: &str = "작가 미상";

/// Catalog read from a TSV file on every `list`.
pub struct TsvContentCatalog {
    path: PathBuf,
}

impl TsvContentCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContentCatalog for TsvContentCatalog {
    async fn list(&self) -> Result<Vec<ContentItem>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Io(format!("{}: {}", self.path.display(), e)))?;
        let items = parse_tsv(&raw)?;
        info!("Loaded {} poems from {}", items.len(), self.path.display());
        Ok(items)
    }
}

struct Columns {
    id: usize,
    title: usize,
    poet: usize,
    text: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, CatalogError> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| CatalogError::Parse {
                    line: 1,
                    message: format!("missing column '{}'", name),
                })
        };
        Ok(Self {
            id: find("poem_id")?,
            title: find("title")?,
            poet: find("poet")?,
            text: find("text")?,
        })
    }
}

struct Draft {
    title: String,
    author: String,
    paragraphs: Vec<String>,
}

/// Parse catalog text into items ordered by id.
pub fn parse_tsv(raw: &str) -> Result<Vec<ContentItem>, CatalogError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.lines().enumerate();

    let Some((_, header)) = lines.next() else {
        return Ok(Vec::new());
    };
    let columns = Columns::from_header(header)?;

    let mut drafts: BTreeMap<u64, Draft> = BTreeMap::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let field = |i: usize| fields.get(i).map(|f| f.trim()).unwrap_or("");

        let id = field(columns.id)
            .parse::<u64>()
            .map_err(|e| CatalogError::Parse {
                line: index + 1,
                message: format!("invalid poem_id '{}': {}", field(columns.id), e),
            })?;

        let draft = drafts.entry(id).or_insert_with(|| Draft {
            title: or_default(field(columns.title), UNTITLED),
            author: or_default(field(columns.poet), UNKNOWN_POET),
            paragraphs: Vec::new(),
        });
        draft.paragraphs.push(field(columns.text).to_string());
    }

    Ok(drafts
        .into_iter()
        .map(|(id, draft)| {
            ContentItem::new(id, draft.title, draft.author, draft.paragraphs.join("\n\n"))
        })
        .collect())
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

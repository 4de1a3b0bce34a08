//! Generation directory names.

use chrono::{DateTime, NaiveDateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const UNTITLED: &str = "untitled";

/// Longest topic part of a directory name, in bytes.
pub const MAX_SLUG_BYTES: usize = 100;

/// Lowercase, dash-separated form of a topic, safe as a path component.
///
/// Whitespace becomes `-`, characters outside `[a-z0-9-]` are dropped, and
/// runs of dashes collapse. A topic with nothing left becomes `untitled`.
///
/// # Example
///
/// ```
/// use deckhand_storage::kebab_case;
///
/// assert_eq!(kebab_case("The Habits of Wealthy Chimpanzees"), "the-habits-of-wealthy-chimpanzees");
/// assert_eq!(kebab_case("  Pie: A  Retrospective! "), "pie-a-retrospective");
/// assert_eq!(kebab_case("???"), "untitled");
/// ```
pub fn kebab_case(topic: &str) -> String {
    let mut out = String::with_capacity(topic.len());
    for c in topic.chars() {
        let mapped = if c.is_whitespace() || c == '-' {
            '-'
        } else if c.is_ascii_alphanumeric() {
            c.to_ascii_lowercase()
        } else {
            continue;
        };
        if mapped == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(mapped);
    }

    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Directory name of one generation: `<timestamp>Z-<kebab topic>`.
///
/// The timestamp is ISO 8601 with `:` replaced by `-` so it is valid on
/// every filesystem, and it sorts lexically in creation order. The topic
/// part is cut to [`MAX_SLUG_BYTES`]; the full topic lives in `topic.txt`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use deckhand_storage::GenerationKey;
///
/// let date = Utc.with_ymd_and_hms(2024, 7, 19, 18, 4, 5).unwrap();
/// let key = GenerationKey::new(date, "Lunar Real Estate");
/// assert_eq!(key.as_str(), "2024-07-19T18-04-05.000Z-lunar-real-estate");
///
/// let parsed = GenerationKey::parse(key.as_str()).unwrap();
/// assert_eq!(parsed.date(), date);
/// assert_eq!(parsed.slug(), "lunar-real-estate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationKey {
    date: DateTime<Utc>,
    slug: String,
    name: String,
}

impl GenerationKey {
    /// Key for a generation of `topic` created at `date`.
    pub fn new(date: DateTime<Utc>, topic: &str) -> Self {
        let slug = truncate_slug(kebab_case(topic));
        let name = format!("{}Z-{}", date.format(TIMESTAMP_FORMAT), slug);
        Self { date, slug, name }
    }

    /// Recover the key from a directory name, or `None` if it is not one.
    pub fn parse(name: &str) -> Option<Self> {
        let (stamp, slug) = name.split_once("Z-")?;
        let date = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .ok()?
            .and_utc();
        Some(Self {
            date,
            slug: slug.to_string(),
            name: name.to_string(),
        })
    }

    /// The directory name.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Creation time.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Kebab-case topic part.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

fn truncate_slug(mut slug: String) -> String {
    if slug.len() <= MAX_SLUG_BYTES {
        return slug;
    }
    let mut end = MAX_SLUG_BYTES;
    while !slug.is_char_boundary(end) {
        end -= 1;
    }
    slug.truncate(end);
    let kept = slug.trim_end_matches('-').len();
    slug.truncate(kept);
    slug
}

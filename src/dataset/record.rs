use std::io::Read;

use chrono::{DateTime, NaiveDate};

use crate::foundation::error::{ReelError, ReelResult};

/// Placeholder scraped into datasets where a value was missing upstream.
pub const NO_DATA: &str = "no data";

/// Older scrapers' name for `date`.
const DATE_OF_JOIN: &str = "date_of_join";

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// One entity (player, channel, account) of a card dataset.
///
/// Only the fields the timeline and captions read are typed; everything else a dataset carries
/// is preserved in `extra` so the presentation layer can still reach it.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntityRecord {
    #[serde(default)]
    /// Display name, the card headline.
    pub name: Option<String>,
    #[serde(default)]
    /// Real name, shown under the headline.
    pub full_name: Option<String>,
    /// Join or publish date. [`EntityRecord::clean`] fills it from `date_of_join` when the
    /// row has no usable `date`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "number_or_none")]
    /// Follower count. Non-numeric values load as `None`.
    pub followers_count: Option<f64>,
    #[serde(default)]
    /// Team or channel name.
    pub team: Option<String>,
    #[serde(default)]
    /// Country label.
    pub nation: Option<String>,
    #[serde(default, deserialize_with = "roles_from_any")]
    /// Role labels. Accepts a string, a list or an object of strings.
    pub roles: Vec<String>,
    #[serde(default)]
    /// Profile image path or URL.
    pub image: Option<String>,
    #[serde(flatten)]
    /// Every other field of the row.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// Datasets carry roles as an array, a single string, or null.
fn roles_from_any<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Roles {
        Many(Vec<Option<String>>),
        One(String),
    }

    let roles: Option<Roles> = serde::Deserialize::deserialize(de)?;
    Ok(match roles {
        None => Vec::new(),
        Some(Roles::One(r)) => vec![r],
        Some(Roles::Many(rs)) => rs.into_iter().flatten().collect(),
    })
}

// Counts scraped as text ("1.2M") are treated as missing rather than rejecting the row.
fn number_or_none<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<serde_json::Value> = serde::Deserialize::deserialize(de)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|v| v.is_finite()))
}

impl EntityRecord {
    /// Cleaned display name, or `None` when the record has no usable name.
    pub fn usable_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Join (or publish) date parsed from `date`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Normalize every text field in place with [`clean_text`] and settle `date` on the first
    /// usable value of `date` or `date_of_join`.
    pub fn clean(&mut self) {
        for field in [
            &mut self.name,
            &mut self.full_name,
            &mut self.team,
            &mut self.nation,
            &mut self.image,
        ] {
            if let Some(v) = field.take() {
                let v = clean_text(&v);
                if !v.is_empty() {
                    *field = Some(v);
                }
            }
        }
        let joined = self
            .extra
            .get(DATE_OF_JOIN)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        self.date = [self.date.take(), joined]
            .into_iter()
            .flatten()
            .map(|d| d.trim().to_string())
            .find(|d| !d.is_empty() && d != NO_DATA);
        self.roles = self
            .roles
            .iter()
            .map(|r| clean_text(r))
            .filter(|r| !r.is_empty())
            .collect();
    }
}

/// Collapse whitespace runs to one space, drop `"no data"` placeholders, trim.
pub fn clean_text(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(NO_DATA, "").trim().to_string()
}

/// Parse a dataset date in any of the formats scrapers emit, or an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
}

/// Parse a JSON array of entity objects.
///
/// Rows that are not objects, fail to deserialize, or have no usable name are skipped with a
/// warning; surviving rows are cleaned. A document that is not an array is a
/// [`ReelError::Data`].
pub fn load_records(reader: impl Read) -> ReelResult<Vec<EntityRecord>> {
    let doc: serde_json::Value = serde_json::from_reader(reader)?;
    let serde_json::Value::Array(rows) = doc else {
        return Err(ReelError::data("dataset must be a JSON array of objects"));
    };

    let total = rows.len();
    let mut out = Vec::with_capacity(total);
    for (i, row) in rows.into_iter().enumerate() {
        if !row.is_object() {
            tracing::warn!(row = i, "dropping dataset row: not an object");
            continue;
        }
        let mut rec: EntityRecord = match serde_json::from_value(row) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row = i, error = %e, "dropping dataset row: malformed fields");
                continue;
            }
        };
        rec.clean();
        if rec.usable_name().is_none() {
            tracing::warn!(row = i, "dropping dataset row: missing name");
            continue;
        }
        out.push(rec);
    }

    tracing::debug!(total, kept = out.len(), "dataset loaded");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/record.rs"]
mod tests;

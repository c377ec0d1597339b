use crate::entities::Catalog;
use crate::io::ext_repr::{ExtDataset, ExtItem};
use crate::io::import::import_catalog;
use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use log::debug;
use std::str::FromStr;

/// A dataset as read from disk: an ordered list of items, each optionally tagged with a group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub items: Vec<ExtItem>,
}

impl Dataset {
    /// Distinct group values, in order of first appearance.
    pub fn groups(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|i| i.group.as_deref())
            .unique()
            .collect()
    }

    /// Builds the [`Catalog`] of one group, or of the whole dataset when `group` is `None`.
    pub fn catalog(&self, group: Option<&str>) -> Result<Catalog> {
        if let Some(g) = group {
            ensure!(
                self.items.iter().any(|i| i.group.as_deref() == Some(g)),
                "group '{}' does not occur in dataset '{}'",
                g,
                self.name
            );
        }
        import_catalog(&self.items, group)
    }

    /// Parses a dataset in CSV form.
    ///
    /// The header must contain the columns `item`, `weight`, `price` and `rating` and may
    /// contain a `city` (or `group`) column. Column names are case-insensitive, extra columns
    /// are ignored and blank lines are skipped.
    pub fn from_csv(name: impl Into<String>, text: &str) -> Result<Self> {
        // spreadsheet exports often start with a byte order mark
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
            .filter(|(_, l)| !l.trim().is_empty());

        let Some((header_nr, header)) = lines.next() else {
            bail!("dataset is empty, expected a header line");
        };
        let header = split_record(header)
            .with_context(|| format!("malformed CSV on line {header_nr}"))?;
        let columns = Columns::from_header(&header)
            .with_context(|| format!("invalid header on line {header_nr}"))?;

        let items = lines
            .map(|(nr, line)| {
                let fields = split_record(line)
                    .with_context(|| format!("malformed CSV on line {nr}"))?;
                columns
                    .ext_item(&fields)
                    .with_context(|| format!("invalid record on line {nr}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let dataset = Dataset {
            name: name.into(),
            items,
        };
        debug!(
            "[IO] parsed {} items in {} groups",
            dataset.items.len(),
            dataset.groups().len()
        );
        Ok(dataset)
    }
}

impl From<ExtDataset> for Dataset {
    fn from(ext: ExtDataset) -> Self {
        Dataset {
            name: ext.name,
            items: ext.items,
        }
    }
}

/// Positions of the relevant columns within a CSV record.
struct Columns {
    item: usize,
    weight: usize,
    price: usize,
    rating: usize,
    group: Option<usize>,
    width: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let required = |name: &str| {
            column_position(header, &[name])
                .with_context(|| format!("missing required column '{name}'"))
        };

        Ok(Columns {
            item: required("item")?,
            weight: required("weight")?,
            price: required("price")?,
            rating: required("rating")?,
            group: column_position(header, &["city", "group"]),
            width: header.len(),
        })
    }

    fn ext_item(&self, fields: &[String]) -> Result<ExtItem> {
        ensure!(
            fields.len() == self.width,
            "expected {} fields, found {}",
            self.width,
            fields.len()
        );
        let name = fields[self.item].trim();
        ensure!(!name.is_empty(), "item name is empty");

        Ok(ExtItem {
            name: name.to_string(),
            weight: parse_number(&fields[self.weight], "weight")?,
            price: parse_number(&fields[self.price], "price")?,
            rating: parse_number(&fields[self.rating], "rating")?,
            group: self
                .group
                .map(|g| fields[g].trim().to_string())
                .filter(|g| !g.is_empty()),
        })
    }
}

fn column_position(header: &[String], names: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

fn parse_number(field: &str, column: &str) -> Result<f64> {
    f64::from_str(field.trim())
        .with_context(|| format!("could not parse {column} '{}' as a number", field.trim()))
}

/// Splits a single CSV record into its fields, honouring double-quoted fields
/// (with `""` as an escaped quote).
fn split_record(line: &str) -> Result<Vec<String>> {
    let mut fields = vec![];
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            (',', false) => fields.push(std::mem::take(&mut field)),
            (c, _) => field.push(c),
        }
    }
    ensure!(!in_quotes, "unterminated quoted field");
    fields.push(field);
    Ok(fields)
}

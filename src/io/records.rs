//! Flat request records.

use crate::error::RecordError;
use crate::model::{Time, Topology};

/// Header line of the record text format.
pub const RECORD_HEADER: &str = "item,time,resource";

/// One requested timeslot: `item` asks `resource` for `time` units.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatRecord {
    /// Item name.
    pub item: String,
    /// Requested duration.
    pub time: Time,
    /// Resource name.
    pub resource: String,
}

impl FlatRecord {
    /// Creates a record.
    pub fn new(item: impl Into<String>, time: Time, resource: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            time,
            resource: resource.into(),
        }
    }
}

impl Topology {
    /// Builds a topology from records.
    ///
    /// Items and resources are created on first mention, in record order;
    /// each record appends one request to its resource's plan.
    pub fn from_records(records: &[FlatRecord]) -> Self {
        let mut builder = Topology::builder();
        for record in records {
            let item = match builder.find_item(&record.item) {
                Some(id) => id,
                None => builder.item(record.item.clone()),
            };
            let resource = match builder.find_resource(&record.resource) {
                Some(id) => id,
                None => builder.resource(record.resource.clone()),
            };
            builder.request(resource, item, record.time);
        }
        builder.build()
    }

    /// One record per planned request, resource by resource.
    ///
    /// Resources with empty plans and items never requested have no record.
    pub fn to_records(&self) -> Vec<FlatRecord> {
        self.resources()
            .iter()
            .flat_map(|resource| {
                resource.plan().iter().filter_map(move |slot| {
                    slot.item().map(|item| {
                        FlatRecord::new(self.item(item).name(), slot.duration(), resource.name())
                    })
                })
            })
            .collect()
    }
}

/// Parses the comma-separated record format.
///
/// The first non-blank line must be [`RECORD_HEADER`]. Fields are trimmed;
/// blank lines are skipped.
pub fn parse_records(text: &str) -> Result<Vec<FlatRecord>, RecordError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    match lines.next() {
        Some((_, header)) if is_header(header) => {}
        _ => return Err(RecordError::MissingHeader),
    }

    lines.map(|(line, row)| parse_row(line, row)).collect()
}

fn is_header(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    fields == ["item", "time", "resource"]
}

fn parse_row(line: usize, row: &str) -> Result<FlatRecord, RecordError> {
    let mut fields = row.split(',').map(str::trim);
    let mut next = |field: &'static str| {
        fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or(RecordError::MissingField { line, field })
    };

    let item = next("item")?;
    let time = next("time")?;
    let resource = next("resource")?;
    if fields.next().is_some() {
        return Err(RecordError::ExtraField { line });
    }

    let time = time.parse::<Time>().map_err(|_| RecordError::InvalidTime {
        line,
        value: time.to_string(),
    })?;

    Ok(FlatRecord::new(item, time, resource))
}

/// Renders records with the header line, one record per line.
///
/// Names are written unquoted, so any name that [`parse_records`] would not
/// read back unchanged is rejected.
pub fn write_records(records: &[FlatRecord]) -> Result<String, RecordError> {
    let mut out = String::from(RECORD_HEADER);
    out.push('\n');
    for record in records {
        check_name(&record.item)?;
        check_name(&record.resource)?;
        out.push_str(&format!("{},{},{}\n", record.item, record.time, record.resource));
    }
    Ok(out)
}

fn check_name(name: &str) -> Result<(), RecordError> {
    let writable = !name.is_empty()
        && name.trim() == name
        && !name.contains([',', '\n', '\r']);
    if writable {
        Ok(())
    } else {
        Err(RecordError::UnwritableName {
            name: name.to_string(),
        })
    }
}

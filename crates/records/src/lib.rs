use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use msort::Precedence;

/// One line of the input file: `id,string,integer,float`.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: i32,
    pub string_field: String,
    pub integer_field: i32,
    pub float_field: f64,
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Malformed { line: usize, reason: &'static str },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "unable to read the file: {err}"),
            Self::Malformed { line, reason } => write!(f, "line {line}: {reason}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Reads every non-empty line of `path` into a record.
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_record(&line, idx + 1)?);
    }
    Ok(records)
}

pub fn parse_record(line: &str, line_no: usize) -> Result<Record, LoadError> {
    let malformed = |reason| LoadError::Malformed {
        line: line_no,
        reason,
    };

    let mut fields = line.trim_end().splitn(4, ',');
    let mut next = |missing| fields.next().ok_or_else(|| malformed(missing));

    let id = next("missing id field")?
        .parse::<i32>()
        .map_err(|_| malformed("id field is not an integer"))?;
    let string_field = next("missing string field")?.to_string();
    let integer_field = next("missing integer field")?
        .parse::<i32>()
        .map_err(|_| malformed("integer field is not an integer"))?;
    let float_field = next("missing float field")?
        .parse::<f64>()
        .map_err(|_| malformed("float field is not a number"))?;

    Ok(Record {
        id,
        string_field,
        integer_field,
        float_field,
    })
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    Integer,
    String,
    Float,
}

pub const ALL_FIELDS: [SortField; 3] = [SortField::Integer, SortField::String, SortField::Float];

pub fn field_name(field: SortField) -> &'static str {
    match field {
        SortField::Integer => "integer",
        SortField::String => "string",
        SortField::Float => "float",
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Precedence function for sorting `&Record` arrays by one field.
pub fn comparator(field: SortField, order: SortOrder) -> fn(&&Record, &&Record) -> Precedence {
    match (field, order) {
        (SortField::Integer, SortOrder::Ascending) => by_integer_ascending,
        (SortField::Integer, SortOrder::Descending) => by_integer_descending,
        (SortField::String, SortOrder::Ascending) => by_string_ascending,
        (SortField::String, SortOrder::Descending) => by_string_descending,
        (SortField::Float, SortOrder::Ascending) => by_float_ascending,
        (SortField::Float, SortOrder::Descending) => by_float_descending,
    }
}

pub fn by_integer_ascending(a: &&Record, b: &&Record) -> Precedence {
    Precedence::ascending(a.integer_field.cmp(&b.integer_field))
}

pub fn by_integer_descending(a: &&Record, b: &&Record) -> Precedence {
    Precedence::descending(a.integer_field.cmp(&b.integer_field))
}

pub fn by_string_ascending(a: &&Record, b: &&Record) -> Precedence {
    Precedence::ascending(a.string_field.cmp(&b.string_field))
}

pub fn by_string_descending(a: &&Record, b: &&Record) -> Precedence {
    Precedence::descending(a.string_field.cmp(&b.string_field))
}

// Floats compare with `==`/`>` only: NaN never ranks higher than anything,
// so it sorts toward the front ascending and the back descending.
pub fn by_float_ascending(a: &&Record, b: &&Record) -> Precedence {
    if a.float_field == b.float_field {
        Precedence::Equal
    } else if a.float_field > b.float_field {
        Precedence::FirstHigher
    } else {
        Precedence::SecondHigher
    }
}

pub fn by_float_descending(a: &&Record, b: &&Record) -> Precedence {
    if a.float_field == b.float_field {
        Precedence::Equal
    } else if a.float_field < b.float_field {
        Precedence::FirstHigher
    } else {
        Precedence::SecondHigher
    }
}

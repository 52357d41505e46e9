//! The grammar of the `type` column: a question type, followed by the options
//! some types require (`select_one yes_no or_other`).

use serde::{Serialize, Serializer};
use snafu::prelude::*;
use std::fmt::Display;
use std::sync::OnceLock;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum FormQuestionType {
    Unknown,
    // Metadata
    Start,
    End,
    Today,
    DeviceId,
    PhoneNumber,
    Username,
    Email,
    Audit,
    StartGeopoint,
    SimSerial,
    SubscriberId,
    // Regular questions
    Integer,
    Decimal,
    Range,
    Text,
    SelectOne,
    SelectMultiple,
    SelectOneFromFile,
    SelectMultipleFromFile,
    SelectOneExternal,
    Rank,
    Note,
    Geopoint,
    Geotrace,
    Geoshape,
    Date,
    Time,
    DateTime,
    Image,
    Audio,
    BackgroundAudio,
    Video,
    File,
    Barcode,
    Calculate,
    Acknowledge,
    Hidden,
    XmlExternal,
    // Grouping
    BeginGroup,
    EndGroup,
    BeginRepeat,
    EndRepeat,
}

struct TypeEntry {
    ty: FormQuestionType,
    key: &'static str,
    synonyms: &'static [&'static str],
    undocumented: &'static [&'static str],
}

const fn entry(
    ty: FormQuestionType,
    key: &'static str,
    synonyms: &'static [&'static str],
    undocumented: &'static [&'static str],
) -> TypeEntry {
    TypeEntry {
        ty,
        key,
        synonyms,
        undocumented,
    }
}

use FormQuestionType::*;

static TYPE_TABLE: &[TypeEntry] = &[
    entry(Unknown, "unknown", &[], &[]),
    entry(Start, "start", &[], &[]),
    entry(End, "end", &[], &[]),
    entry(Today, "today", &[], &[]),
    entry(DeviceId, "deviceid", &["imei"], &[]),
    entry(PhoneNumber, "phonenumber", &["phone_number"], &[]),
    entry(Username, "username", &[], &[]),
    entry(Email, "email", &[], &[]),
    entry(Audit, "audit", &[], &[]),
    entry(StartGeopoint, "start-geopoint", &[], &[]),
    entry(SimSerial, "simserial", &[], &[]),
    entry(SubscriberId, "subscriberid", &[], &[]),
    entry(Integer, "integer", &[], &["int"]),
    entry(Decimal, "decimal", &[], &[]),
    entry(Range, "range", &[], &[]),
    entry(Text, "text", &[], &[]),
    entry(SelectOne, "select_one", &["select one"], &[]),
    entry(SelectMultiple, "select_multiple", &["select multiple"], &[]),
    entry(SelectOneFromFile, "select_one_from_file", &[], &[]),
    entry(SelectMultipleFromFile, "select_multiple_from_file", &[], &[]),
    entry(SelectOneExternal, "select_one_external", &[], &[]),
    entry(Rank, "rank", &[], &[]),
    entry(Note, "note", &[], &[]),
    entry(Geopoint, "geopoint", &["location"], &[]),
    entry(Geotrace, "geotrace", &[], &[]),
    entry(Geoshape, "geoshape", &[], &[]),
    entry(Date, "date", &[], &[]),
    entry(Time, "time", &[], &[]),
    entry(DateTime, "dateTime", &["datetime"], &[]),
    entry(Image, "image", &["photo"], &[]),
    entry(Audio, "audio", &[], &[]),
    entry(BackgroundAudio, "background-audio", &[], &[]),
    entry(Video, "video", &[], &[]),
    entry(File, "file", &[], &[]),
    entry(Barcode, "barcode", &[], &[]),
    entry(Calculate, "calculate", &[], &[]),
    entry(Acknowledge, "acknowledge", &["trigger"], &[]),
    entry(Hidden, "hidden", &[], &[]),
    entry(XmlExternal, "xml-external", &[], &[]),
    entry(BeginGroup, "begin_group", &["begin group"], &[]),
    entry(EndGroup, "end_group", &["end group"], &[]),
    entry(BeginRepeat, "begin_repeat", &[], &["begin repeat"]),
    entry(EndRepeat, "end_repeat", &[], &["end repeat"]),
];

// All the spellings of all the types, longest first.
fn spellings() -> &'static [(&'static str, FormQuestionType)] {
    static SPELLINGS: OnceLock<Vec<(&'static str, FormQuestionType)>> = OnceLock::new();
    SPELLINGS.get_or_init(|| {
        let mut res: Vec<(&'static str, FormQuestionType)> = TYPE_TABLE
            .iter()
            .flat_map(|e| {
                std::iter::once(e.key)
                    .chain(e.synonyms.iter().copied())
                    .chain(e.undocumented.iter().copied())
                    .map(move |s| (s, e.ty))
            })
            .collect();
        // Stable: ties keep the table order.
        res.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        res
    })
}

impl FormQuestionType {
    pub fn all() -> impl Iterator<Item = FormQuestionType> {
        TYPE_TABLE.iter().map(|e| e.ty)
    }

    fn entry(&self) -> &'static TypeEntry {
        // The table has one entry per variant.
        TYPE_TABLE
            .iter()
            .find(|e| e.ty == *self)
            .unwrap_or(&TYPE_TABLE[0])
    }

    pub fn to_canonical_string(&self) -> &'static str {
        self.entry().key
    }

    /// The documented alternative spellings.
    pub fn synonyms(&self) -> &'static [&'static str] {
        self.entry().synonyms
    }

    /// Parses the exact spelling of a type (canonical key or synonym).
    pub fn parse(s: &str) -> Option<FormQuestionType> {
        spellings()
            .iter()
            .find(|(spelling, _)| *spelling == s)
            .map(|(_, ty)| *ty)
    }

    /// Finds the type at the start of a `type` cell. Returns the remaining text.
    fn parse_prefix(s: &str) -> Option<(FormQuestionType, &str)> {
        spellings().iter().find_map(|(spelling, ty)| {
            if s == *spelling {
                Some((*ty, ""))
            } else {
                s.strip_prefix(spelling)
                    .and_then(|rest| rest.strip_prefix(' '))
                    .map(|rest| (*ty, rest))
            }
        })
    }

    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            Start
                | End
                | Today
                | DeviceId
                | PhoneNumber
                | Username
                | Email
                | Audit
                | StartGeopoint
                | SimSerial
                | SubscriberId
        )
    }

    /// Types that are not shown to the respondent.
    pub fn is_hidden(&self) -> bool {
        self.is_meta() || *self == Calculate
    }

    pub fn is_grouping(&self) -> bool {
        matches!(self, BeginGroup | EndGroup | BeginRepeat | EndRepeat)
    }

    pub fn is_regular(&self) -> bool {
        !self.is_meta() && !self.is_grouping() && *self != Unknown
    }

    /// Types whose answers come from a list of the choices worksheet.
    pub fn requires_selection_answers(&self) -> bool {
        matches!(self, SelectOne | SelectMultiple | Rank)
    }
}

impl Display for FormQuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl Serialize for FormQuestionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_canonical_string())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize)]
pub struct FormQuestionTypeOptions {
    #[serde(rename = "listName", skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
    #[serde(rename = "orOther", skip_serializing_if = "Option::is_none")]
    pub or_other: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct FormQuestionTypeAndOptions {
    #[serde(rename = "type")]
    pub type_: FormQuestionType,
    pub options: Option<FormQuestionTypeOptions>,
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum TypeParseError {
    #[snafu(display("The question type is empty"))]
    Empty {},
    #[snafu(display("Unknown question type \"{raw}\""))]
    UnknownType { raw: String },
    #[snafu(display("The question type \"{type_}\" requires a list name"))]
    MissingListName { type_: FormQuestionType },
    #[snafu(display("The question type \"{type_}\" requires a file name"))]
    MissingFile { type_: FormQuestionType },
}

/// Tabs become spaces, runs of spaces are collapsed.
pub fn normalize_type_string(raw: &str) -> String {
    raw.split(|c: char| c == ' ' || c == '\t')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

impl FormQuestionTypeAndOptions {
    pub fn unknown() -> FormQuestionTypeAndOptions {
        FormQuestionTypeAndOptions {
            type_: Unknown,
            options: None,
        }
    }

    pub fn parse(raw: &str) -> Result<FormQuestionTypeAndOptions, TypeParseError> {
        let input = normalize_type_string(raw);
        if input.is_empty() {
            return Err(TypeParseError::Empty {});
        }
        let (type_, rest) = match FormQuestionType::parse_prefix(&input) {
            Some(x) => x,
            None => return UnknownTypeSnafu { raw: input.clone() }.fail(),
        };
        let tokens: Vec<&str> = rest.split(' ').filter(|s| !s.is_empty()).collect();
        let options = match type_ {
            SelectOne | SelectMultiple => {
                let list_name = tokens.first().context(MissingListNameSnafu { type_ })?;
                Some(FormQuestionTypeOptions {
                    list_name: Some(list_name.to_string()),
                    or_other: Some(tokens.len() > 1 && tokens.last() == Some(&"or_other")),
                    file: None,
                })
            }
            Rank => Some(FormQuestionTypeOptions {
                list_name: Some(
                    tokens
                        .first()
                        .context(MissingListNameSnafu { type_ })?
                        .to_string(),
                ),
                ..Default::default()
            }),
            SelectOneFromFile | SelectMultipleFromFile => match tokens.first() {
                Some(f) => Some(FormQuestionTypeOptions {
                    file: Some(f.to_string()),
                    ..Default::default()
                }),
                None => return MissingFileSnafu { type_ }.fail(),
            },
            _ => None,
        };
        Ok(FormQuestionTypeAndOptions { type_, options })
    }

    pub fn list_name(&self) -> Option<&str> {
        self.options.as_ref().and_then(|o| o.list_name.as_deref())
    }
}

impl Display for FormQuestionTypeAndOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_)?;
        if let Some(opts) = &self.options {
            if let Some(l) = opts.list_name.as_ref().or(opts.file.as_ref()) {
                write!(f, " {}", l)?;
            }
            if opts.or_other == Some(true) {
                write!(f, " or_other")?;
            }
        }
        Ok(())
    }
}

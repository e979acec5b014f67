use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::UnknownFieldError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(VisitorId);

/// Timestamp layout used by the backend for `created_at`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Form,
    Records,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Tel,
    Email,
    Date,
    Multiline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Phone,
    Email,
    Date,
    Purpose,
    MeetsWhom,
    Comments,
}

impl FormField {
    /// Form order.
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Date,
        FormField::Purpose,
        FormField::MeetsWhom,
        FormField::Comments,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::Date => "date",
            FormField::Purpose => "purpose",
            FormField::MeetsWhom => "meets_whom",
            FormField::Comments => "comments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Visitor Name",
            FormField::Phone => "Phone Number",
            FormField::Email => "Email ID",
            FormField::Date => "Date",
            FormField::Purpose => "Purpose of Visit",
            FormField::MeetsWhom => "Visitor Meets Whom",
            FormField::Comments => "Comments",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Enter full name",
            FormField::Phone => "Phone Number",
            FormField::Email => "Enter email address",
            FormField::Date => "YYYY-MM-DD",
            FormField::Purpose => "Enter purpose of visit",
            FormField::MeetsWhom => "Name of person they are meeting",
            FormField::Comments => "Additional notes or special instructions...",
        }
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            FormField::Phone => InputKind::Tel,
            FormField::Email => InputKind::Email,
            FormField::Date => InputKind::Date,
            FormField::Comments => InputKind::Multiline,
            FormField::Name | FormField::Purpose | FormField::MeetsWhom => InputKind::Text,
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FormField::Comments)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FormField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// A visitor entry as stored by the backend. Only the backend assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRecord {
    pub id: VisitorId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub purpose: String,
    pub meets_whom: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl VisitorRecord {
    /// Comments worth rendering; blank and missing comments are treated alike.
    pub fn comments(&self) -> Option<&str> {
        self.comments
            .as_deref()
            .filter(|comments| !comments.trim().is_empty())
    }

    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_at
            .as_deref()
            .and_then(|raw| NaiveDateTime::parse_from_str(raw, CREATED_AT_FORMAT).ok())
    }
}

/// Unsaved form contents. Serializes to the create request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub purpose: String,
    pub meets_whom: String,
    pub comments: String,
}

impl VisitorDraft {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::Date => &self.date,
            FormField::Purpose => &self.purpose,
            FormField::MeetsWhom => &self.meets_whom,
            FormField::Comments => &self.comments,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Phone => &mut self.phone,
            FormField::Email => &mut self.email,
            FormField::Date => &mut self.date,
            FormField::Purpose => &mut self.purpose,
            FormField::MeetsWhom => &mut self.meets_whom,
            FormField::Comments => &mut self.comments,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Required fields that are blank, in form order.
    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.get(*field).trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> VisitorDraft {
        VisitorDraft {
            name: "A".into(),
            phone: "1".into(),
            email: "a@x.com".into(),
            date: "2024-01-01".into(),
            purpose: "P".into(),
            meets_whom: "B".into(),
            comments: String::new(),
        }
    }

    #[test]
    fn draft_serializes_to_create_request_body() {
        let value = serde_json::to_value(filled_draft()).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "name": "A",
                "phone": "1",
                "email": "a@x.com",
                "date": "2024-01-01",
                "purpose": "P",
                "meets_whom": "B",
                "comments": ""
            })
        );
    }

    #[test]
    fn missing_required_ignores_comments_and_whitespace_counts_as_blank() {
        let mut draft = filled_draft();
        assert!(draft.missing_required().is_empty());

        draft.set(FormField::Email, "   ");
        draft.set(FormField::Name, "");
        assert_eq!(
            draft.missing_required(),
            vec![FormField::Name, FormField::Email]
        );

        assert_eq!(
            VisitorDraft::default().missing_required().len(),
            FormField::ALL.len() - 1
        );
    }

    #[test]
    fn set_and_get_address_the_same_slot() {
        let mut draft = VisitorDraft::default();
        for field in FormField::ALL {
            draft.set(field, field.wire_name());
        }
        for field in FormField::ALL {
            assert_eq!(draft.get(field), field.wire_name());
        }
        assert_eq!(draft.meets_whom, "meets_whom");
    }

    #[test]
    fn record_tolerates_null_comments_and_extra_timestamp() {
        let record: VisitorRecord = serde_json::from_str(
            r#"{"id":4,"name":"A","phone":"1","email":"a@x.com","date":"2024-01-01",
                "purpose":"P","meets_whom":"B","comments":null,
                "created_at":"2024-01-01 09:15:00"}"#,
        )
        .expect("record");

        assert_eq!(record.id, VisitorId(4));
        assert_eq!(record.comments(), None);
        let created = record.created_at().expect("timestamp parses");
        assert_eq!(created.format("%H:%M").to_string(), "09:15");
    }

    #[test]
    fn record_without_optional_fields_deserializes() {
        let record: VisitorRecord = serde_json::from_str(
            r#"{"id":9,"name":"A","phone":"1","email":"a@x.com","date":"2024-01-01",
                "purpose":"P","meets_whom":"B"}"#,
        )
        .expect("record");
        assert_eq!(record.comments, None);
        assert_eq!(record.created_at, None);
        assert_eq!(record.created_at(), None);
    }

    #[test]
    fn form_field_parses_from_wire_name() {
        assert_eq!("meets_whom".parse::<FormField>().ok(), Some(FormField::MeetsWhom));
        let err = "id".parse::<FormField>().expect_err("id is not editable");
        assert_eq!(err.to_string(), "unknown form field 'id'");
    }

    #[test]
    fn only_comments_is_optional() {
        let optional: Vec<_> = FormField::ALL
            .into_iter()
            .filter(|field| !field.is_required())
            .collect();
        assert_eq!(optional, vec![FormField::Comments]);
        assert_eq!(FormField::Comments.input_kind(), InputKind::Multiline);
    }
}

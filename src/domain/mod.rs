use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod booking;

/// Format used by competition dates in the seed data
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type ParseError = chrono::ParseError;

/// A club that can buy places in competitions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    /// Unique name of the club
    pub name: String,
    /// Unique email used to log in
    pub email: String,
    /// Points left to spend
    ///
    /// One point buys one place.
    #[serde(with = "lenient_u32")]
    pub points: u32,
}

/// A competition with a limited number of places
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    /// Unique name of the competition
    pub name: String,
    #[serde(with = "competition_date")]
    pub date: NaiveDateTime,
    /// Places still available
    #[serde(rename = "numberOfPlaces", with = "lenient_u32")]
    pub number_of_places: u32,
}

impl Competition {
    /// Whether the competition already took place at `reference`
    ///
    /// Only a reference strictly after the competition date counts as past.
    pub fn is_past(&self, reference: NaiveDateTime) -> bool {
        reference > self.date
    }
}

pub fn parse_competition_date(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
}

/// Split competitions into past and upcoming ones, keeping their order
pub fn split_by_date(
    competitions: Vec<Competition>,
    reference: NaiveDateTime,
) -> (Vec<Competition>, Vec<Competition>) {
    competitions
        .into_iter()
        .partition(|competition| competition.is_past(reference))
}

mod competition_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_competition_date, DATE_FORMAT};

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse_competition_date(&value).map_err(|err| {
            serde::de::Error::custom(format!("invalid competition date {value:?}: {err}"))
        })
    }
}

/// Counters in the seed files are sometimes stored as strings
mod lenient_u32 {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S>(value: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(value),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map_err(|err| serde::de::Error::custom(format!("invalid count {text:?}: {err}"))),
        }
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use thiserror::Error;

use crate::db::schema::STORAGE_DATE_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HairColor {
    Brown,
    Blond,
    Red,
    Bald,
}

#[derive(Debug, Error)]
#[error("unknown hair color `{0}`")]
pub struct UnknownHairColor(pub String);

impl HairColor {
    pub const ALL: [HairColor; 4] = [
        HairColor::Brown,
        HairColor::Blond,
        HairColor::Red,
        HairColor::Bald,
    ];

    /// Code stored in the `couleur_cheveux` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            HairColor::Brown => "brun",
            HairColor::Blond => "blond",
            HairColor::Red => "roux",
            HairColor::Bald => "chauve",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HairColor::Brown => "brown",
            HairColor::Blond => "blond",
            HairColor::Red => "red",
            HairColor::Bald => "bald",
        }
    }

    /// Comma-separated list of the stored codes, used in error messages.
    pub fn allowed_codes() -> String {
        Self::ALL
            .iter()
            .map(HairColor::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for HairColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HairColor {
    type Err = UnknownHairColor;

    /// Accepts the stored code or the English label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s || color.label() == s)
            .ok_or_else(|| UnknownHairColor(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub birth_date: NaiveDate,
    pub available_credit: f64,
    pub is_good_client: bool,
    pub hair_color: HairColor,
}

impl Client {
    /// Birth date in the `YYYY-MM-DD` storage form.
    pub fn storage_birth_date(&self) -> String {
        self.birth_date.format(STORAGE_DATE_FORMAT).to_string()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Client {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let birth_date: String = row.try_get("date_naissance")?;
        let birth_date = NaiveDate::parse_from_str(&birth_date, STORAGE_DATE_FORMAT).map_err(
            |e| sqlx::Error::ColumnDecode {
                index: "date_naissance".to_string(),
                source: Box::new(e),
            },
        )?;

        let hair_color: String = row.try_get("couleur_cheveux")?;
        let hair_color = hair_color
            .parse::<HairColor>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "couleur_cheveux".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: Some(row.try_get("IDCLIENT")?),
            name: row.try_get("nom_client")?,
            phone: row.try_get("numero_telephone")?,
            address: row.try_get("adresse")?,
            postal_code: row.try_get("code_postal")?,
            city: row.try_get("ville")?,
            birth_date,
            available_credit: row.try_get("credit_disponible")?,
            is_good_client: row.try_get("bon_client")?,
            hair_color,
        })
    }
}

/// Raw form input for one client, every attribute still a string except
/// the good-client checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFields {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    /// `DD/MM/YYYY`
    pub birth_date: String,
    pub available_credit: String,
    pub is_good_client: bool,
    pub hair_color: String,
}

impl ClientFields {
    /// Display-form fields for editing an existing client.
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            postal_code: client.postal_code.clone(),
            city: client.city.clone(),
            birth_date: crate::validation::to_display_date(&client.storage_birth_date()),
            available_credit: client.available_credit.to_string(),
            is_good_client: client.is_good_client,
            hair_color: client.hair_color.as_str().to_string(),
        }
    }
}

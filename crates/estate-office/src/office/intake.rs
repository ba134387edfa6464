//! Bulk listing intake from CSV exports (portal downloads, spreadsheet
//! handoffs). Produces drafts only; the service owns id assignment and
//! authorization when the drafts are added.

use super::domain::{
    Coordinates, FurnishingStatus, ImageRef, Location, PropertyCategory, PropertyConfiguration,
    PropertyDraft, PropertyType,
};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("failed to read listing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listing CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unrecognized {field} '{value}'")]
    UnknownValue {
        row: usize,
        field: &'static str,
        value: String,
    },
}

pub struct ListingCsvImporter;

impl ListingCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyDraft>, ListingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PropertyDraft>, ListingImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut drafts = Vec::new();
        for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
            let row = record?;
            drafts.push(row.into_draft(index + 1)?);
        }

        Ok(drafts)
    }
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Description", default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Suburb")]
    suburb: String,
    #[serde(rename = "Area")]
    area: String,
    #[serde(rename = "Road")]
    road_name: String,
    #[serde(rename = "Latitude")]
    lat: f64,
    #[serde(rename = "Longitude")]
    lng: f64,
    #[serde(rename = "Price")]
    price: u64,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Type")]
    property_type: String,
    #[serde(rename = "Configuration")]
    configuration: String,
    #[serde(rename = "Furnishing")]
    furnishing: String,
    #[serde(rename = "Images", default, deserialize_with = "empty_string_as_none")]
    images: Option<String>,
}

impl ListingRow {
    fn into_draft(self, row: usize) -> Result<PropertyDraft, ListingImportError> {
        let category = parse_category(&self.category)
            .ok_or_else(|| unknown(row, "category", &self.category))?;
        let property_type = parse_property_type(&self.property_type)
            .ok_or_else(|| unknown(row, "type", &self.property_type))?;
        let configuration = parse_configuration(&self.configuration)
            .ok_or_else(|| unknown(row, "configuration", &self.configuration))?;
        let furnishing = parse_furnishing(&self.furnishing)
            .ok_or_else(|| unknown(row, "furnishing", &self.furnishing))?;

        let images = self
            .images
            .map(|raw| {
                raw.split('|')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(|key| ImageRef(key.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(PropertyDraft {
            title: self.title,
            description: self.description.unwrap_or_default(),
            location: Location {
                city: self.city,
                suburb: self.suburb,
                area: self.area,
                road_name: self.road_name,
            },
            coordinates: Coordinates {
                lat: self.lat,
                lng: self.lng,
            },
            price: self.price,
            category,
            property_type,
            configuration,
            furnishing,
            images,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn unknown(row: usize, field: &'static str, value: &str) -> ListingImportError {
    ListingImportError::UnknownValue {
        row,
        field,
        value: value.to_string(),
    }
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .collect()
}

fn parse_category(value: &str) -> Option<PropertyCategory> {
    match normalize(value).as_str() {
        "resale" => Some(PropertyCategory::Resale),
        "rental" | "rent" => Some(PropertyCategory::Rental),
        "underconstruction" | "newbuild" => Some(PropertyCategory::UnderConstruction),
        _ => None,
    }
}

fn parse_property_type(value: &str) -> Option<PropertyType> {
    match normalize(value).as_str() {
        "residential" => Some(PropertyType::Residential),
        "commercial" => Some(PropertyType::Commercial),
        "industrial" => Some(PropertyType::Industrial),
        _ => None,
    }
}

fn parse_configuration(value: &str) -> Option<PropertyConfiguration> {
    match normalize(value).as_str() {
        "studio" => Some(PropertyConfiguration::Studio),
        "1bhk" | "onebhk" => Some(PropertyConfiguration::OneBhk),
        "2bhk" | "twobhk" => Some(PropertyConfiguration::TwoBhk),
        "3bhk" | "threebhk" => Some(PropertyConfiguration::ThreeBhk),
        "4bhk" | "fourbhk" => Some(PropertyConfiguration::FourBhk),
        "5bhk" | "fivebhk" => Some(PropertyConfiguration::FiveBhk),
        "penthouse" => Some(PropertyConfiguration::Penthouse),
        "villa" => Some(PropertyConfiguration::Villa),
        "rowhouse" => Some(PropertyConfiguration::RowHouse),
        "duplex" => Some(PropertyConfiguration::Duplex),
        "plot" => Some(PropertyConfiguration::Plot),
        "officespace" | "office" => Some(PropertyConfiguration::OfficeSpace),
        "shop" => Some(PropertyConfiguration::Shop),
        "warehouse" => Some(PropertyConfiguration::Warehouse),
        _ => None,
    }
}

fn parse_furnishing(value: &str) -> Option<FurnishingStatus> {
    match normalize(value).as_str() {
        "unfurnished" => Some(FurnishingStatus::Unfurnished),
        "semifurnished" => Some(FurnishingStatus::SemiFurnished),
        "furnished" | "fullyfurnished" => Some(FurnishingStatus::Furnished),
        _ => None,
    }
}

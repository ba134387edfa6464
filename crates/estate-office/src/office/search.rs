//! Property matching: the simple criteria search and the multi-value
//! advanced filter. Both are pure; the service applies them to its ordered
//! snapshot of the collection.

use super::domain::{
    Coordinates, FurnishingStatus, Property, PropertyCategory, PropertyConfiguration, PropertyId,
    PropertyStatus, PropertyType,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Optional per-field criteria combined with AND. An absent field always
/// matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub city: Option<String>,
    pub suburb: Option<String>,
    pub area: Option<String>,
    pub road_name: Option<String>,
    pub category: Option<PropertyCategory>,
    pub property_type: Option<PropertyType>,
    pub configuration: Option<PropertyConfiguration>,
    pub furnishing: Option<FurnishingStatus>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub status: Option<PropertyStatus>,
    pub center: Option<Coordinates>,
    pub radius: Option<f64>,
}

impl SearchCriteria {
    pub fn matches(&self, property: &Property) -> bool {
        let location = &property.location;
        if !self.city.as_ref().map_or(true, |c| location.city == *c) {
            return false;
        }
        if !self.suburb.as_ref().map_or(true, |s| location.suburb == *s) {
            return false;
        }
        if !self.area.as_ref().map_or(true, |a| location.area == *a) {
            return false;
        }
        if !self
            .road_name
            .as_ref()
            .map_or(true, |r| location.road_name == *r)
        {
            return false;
        }
        if !self.category.map_or(true, |c| property.category == c) {
            return false;
        }
        if !self
            .property_type
            .map_or(true, |t| property.property_type == t)
        {
            return false;
        }
        if !self
            .configuration
            .map_or(true, |c| property.configuration == c)
        {
            return false;
        }
        if !self.furnishing.map_or(true, |f| property.furnishing == f) {
            return false;
        }
        if !self.min_price.map_or(true, |min| property.price >= min) {
            return false;
        }
        if !self.max_price.map_or(true, |max| property.price <= max) {
            return false;
        }
        if !self.status.map_or(true, |s| property.status == s) {
            return false;
        }
        match (&self.center, self.radius) {
            (Some(center), Some(radius)) => {
                within_radius(center, radius, &property.coordinates)
            }
            _ => true,
        }
    }
}

/// Squared-degree comparison, not geodesic distance.
pub fn within_radius(center: &Coordinates, radius: f64, point: &Coordinates) -> bool {
    let dlat = center.lat - point.lat;
    let dlng = center.lng - point.lng;
    dlat * dlat + dlng * dlng <= radius * radius
}

/// One allowed value in the `locations` dimension: city equality is required,
/// suburb and area only when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub city: String,
    pub suburb: Option<String>,
    pub area: Option<String>,
}

impl LocationFilter {
    fn matches(&self, property: &Property) -> bool {
        let location = &property.location;
        location.city == self.city
            && self.suburb.as_ref().map_or(true, |s| location.suburb == *s)
            && self.area.as_ref().map_or(true, |a| location.area == *a)
    }
}

/// Inclusive price band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateFilter {
    pub center: Coordinates,
    pub radius: f64,
}

impl CoordinateFilter {
    fn contains(&self, coordinates: &Coordinates) -> bool {
        within_radius(&self.center, self.radius, coordinates)
    }
}

/// Eight set-valued dimensions. Within a dimension a property matches any of
/// the listed values (OR); across dimensions every non-empty dimension must
/// match (AND). An empty dimension is a pass-through, not "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedPropertyFilter {
    #[serde(default)]
    pub locations: Vec<LocationFilter>,
    #[serde(default)]
    pub categories: Vec<PropertyCategory>,
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
    #[serde(default)]
    pub configurations: Vec<PropertyConfiguration>,
    #[serde(default)]
    pub furnishings: Vec<FurnishingStatus>,
    #[serde(default)]
    pub price_ranges: Vec<PriceRange>,
    #[serde(default)]
    pub statuses: Vec<PropertyStatus>,
    #[serde(default)]
    pub coordinate_filters: Vec<CoordinateFilter>,
}

impl AdvancedPropertyFilter {
    /// Intersects the per-dimension OR-matched id sets, keeping the order of
    /// the base collection.
    pub fn apply(&self, base: &[Property]) -> Vec<Property> {
        let mut survivors: Vec<&Property> = base.iter().collect();

        for matched in self.dimension_matches(base) {
            survivors.retain(|property| matched.contains(&property.id));
            if survivors.is_empty() {
                break;
            }
        }

        survivors.into_iter().cloned().collect()
    }

    fn dimension_matches<'a>(&self, base: &'a [Property]) -> Vec<HashSet<&'a PropertyId>> {
        let mut dimensions = Vec::new();

        if !self.locations.is_empty() {
            dimensions.push(or_matched(base, |p| {
                self.locations.iter().any(|f| f.matches(p))
            }));
        }
        if !self.categories.is_empty() {
            dimensions.push(or_matched(base, |p| self.categories.contains(&p.category)));
        }
        if !self.property_types.is_empty() {
            dimensions.push(or_matched(base, |p| {
                self.property_types.contains(&p.property_type)
            }));
        }
        if !self.configurations.is_empty() {
            dimensions.push(or_matched(base, |p| {
                self.configurations.contains(&p.configuration)
            }));
        }
        if !self.furnishings.is_empty() {
            dimensions.push(or_matched(base, |p| {
                self.furnishings.contains(&p.furnishing)
            }));
        }
        if !self.price_ranges.is_empty() {
            dimensions.push(or_matched(base, |p| {
                self.price_ranges.iter().any(|range| range.contains(p.price))
            }));
        }
        if !self.statuses.is_empty() {
            dimensions.push(or_matched(base, |p| self.statuses.contains(&p.status)));
        }
        if !self.coordinate_filters.is_empty() {
            dimensions.push(or_matched(base, |p| {
                self.coordinate_filters
                    .iter()
                    .any(|f| f.contains(&p.coordinates))
            }));
        }

        dimensions
    }
}

fn or_matched<'a, F>(base: &'a [Property], predicate: F) -> HashSet<&'a PropertyId>
where
    F: Fn(&Property) -> bool,
{
    base.iter()
        .filter(|property| predicate(property))
        .map(|property| &property.id)
        .collect()
}

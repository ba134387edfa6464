//! Aggregate reporting over a caller-scoped slice of the property
//! collection. The deployment has a single configured region, so the combined
//! report's density and pricing views are projections of one aggregate; the
//! vector shape leaves room for more regions later.

use super::domain::{
    FurnishingStatus, Property, PropertyCategory, PropertyConfiguration, PropertyType,
};
use serde::Serialize;

/// One labeled bucket of a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    pub key: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceSpread {
    pub lowest: u64,
    pub highest: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAnalytics {
    pub region: String,
    pub total_properties: u64,
    pub by_category: Vec<DistributionSlice>,
    pub by_type: Vec<DistributionSlice>,
    pub by_configuration: Vec<DistributionSlice>,
    pub by_furnishing: Vec<DistributionSlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_spread: Option<PriceSpread>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionDensityEntry {
    pub region: String,
    pub property_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPricingEntry {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_spread: Option<PriceSpread>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedAnalytics {
    pub summary: RegionAnalytics,
    pub density: Vec<RegionDensityEntry>,
    pub pricing_heatmap: Vec<RegionPricingEntry>,
}

pub fn category_distribution(properties: &[Property]) -> Vec<DistributionSlice> {
    PropertyCategory::ordered()
        .into_iter()
        .map(|category| DistributionSlice {
            key: category.label(),
            count: properties.iter().filter(|p| p.category == category).count() as u64,
        })
        .collect()
}

pub fn type_distribution(properties: &[Property]) -> Vec<DistributionSlice> {
    PropertyType::ordered()
        .into_iter()
        .map(|property_type| DistributionSlice {
            key: property_type.label(),
            count: properties
                .iter()
                .filter(|p| p.property_type == property_type)
                .count() as u64,
        })
        .collect()
}

pub fn configuration_distribution(properties: &[Property]) -> Vec<DistributionSlice> {
    PropertyConfiguration::ordered()
        .into_iter()
        .map(|configuration| DistributionSlice {
            key: configuration.label(),
            count: properties
                .iter()
                .filter(|p| p.configuration == configuration)
                .count() as u64,
        })
        .collect()
}

pub fn furnishing_distribution(properties: &[Property]) -> Vec<DistributionSlice> {
    FurnishingStatus::ordered()
        .into_iter()
        .map(|furnishing| DistributionSlice {
            key: furnishing.label(),
            count: properties
                .iter()
                .filter(|p| p.furnishing == furnishing)
                .count() as u64,
        })
        .collect()
}

pub fn aggregate_region(region: &str, properties: &[Property]) -> RegionAnalytics {
    let total = properties.len() as u64;

    let average_price = if properties.is_empty() {
        None
    } else {
        let sum: u64 = properties.iter().map(|p| p.price).sum();
        Some(sum / total)
    };

    let price_spread = properties
        .iter()
        .map(|p| p.price)
        .fold(None, |spread: Option<PriceSpread>, price| {
            Some(match spread {
                None => PriceSpread {
                    lowest: price,
                    highest: price,
                },
                Some(spread) => PriceSpread {
                    lowest: spread.lowest.min(price),
                    highest: spread.highest.max(price),
                },
            })
        });

    RegionAnalytics {
        region: region.to_string(),
        total_properties: total,
        by_category: category_distribution(properties),
        by_type: type_distribution(properties),
        by_configuration: configuration_distribution(properties),
        by_furnishing: furnishing_distribution(properties),
        average_price,
        price_spread,
    }
}

pub fn combined_analytics(region: &str, properties: &[Property]) -> CombinedAnalytics {
    let summary = aggregate_region(region, properties);

    let density = vec![RegionDensityEntry {
        region: summary.region.clone(),
        property_count: summary.total_properties,
    }];

    let pricing_heatmap = vec![RegionPricingEntry {
        region: summary.region.clone(),
        average_price: summary.average_price,
        price_spread: summary.price_spread,
    }];

    CombinedAnalytics {
        summary,
        density,
        pricing_heatmap,
    }
}

//! Conjoint attribute space: profiles, the profile catalog, and part-worths.
//!
//! Attribute levels are fixed at compile time so the indicator encoding and
//! its column order never depend on what happens to be observed in a dataset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Design-matrix column names, in encoding order.
pub const PARAMETER_NAMES: [&str; 4] = ["brand_netflix", "brand_prime", "ads", "price"];

/// Streaming brand attribute. `Hulu` is the reference level and carries no
/// indicator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brand {
    #[serde(rename = "N")]
    Netflix,
    #[serde(rename = "P")]
    Prime,
    #[serde(rename = "H")]
    Hulu,
}

impl Brand {
    pub const ALL: [Self; 3] = [Self::Netflix, Self::Prime, Self::Hulu];
}

/// Advertising attribute. `AdFree` is the reference level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdPolicy {
    #[serde(rename = "Yes")]
    Ads,
    #[serde(rename = "No")]
    AdFree,
}

impl AdPolicy {
    pub const ALL: [Self; 2] = [Self::Ads, Self::AdFree];
}

/// One hypothetical offering shown inside a choice task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub brand: Brand,
    pub ads: AdPolicy,
    pub price: f64,
}

impl Profile {
    /// Indicator encoding `[brand_netflix, brand_prime, ads, price]`.
    ///
    /// Hulu and AdFree are the dropped reference levels; price stays
    /// continuous.
    #[must_use]
    pub fn design_row(&self) -> [f64; 4] {
        [
            if self.brand == Brand::Netflix { 1.0 } else { 0.0 },
            if self.brand == Brand::Prime { 1.0 } else { 0.0 },
            if self.ads == AdPolicy::Ads { 1.0 } else { 0.0 },
            self.price,
        ]
    }
}

/// Part-worth vector for the indicator encoding, one weight per column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartWorths {
    pub brand_netflix: f64,
    pub brand_prime: f64,
    pub ads: f64,
    pub price: f64,
}

impl PartWorths {
    #[must_use]
    pub const fn new(brand_netflix: f64, brand_prime: f64, ads: f64, price: f64) -> Self {
        Self {
            brand_netflix,
            brand_prime,
            ads,
            price,
        }
    }

    /// Coefficients in design-matrix column order.
    #[must_use]
    pub fn to_vec(self) -> Vec<f64> {
        vec![self.brand_netflix, self.brand_prime, self.ads, self.price]
    }

    /// Deterministic utility of a profile under these part-worths.
    #[must_use]
    pub fn utility(self, profile: &Profile) -> f64 {
        let row = profile.design_row();
        row.iter()
            .zip(self.to_vec())
            .map(|(value, weight)| value * weight)
            .sum()
    }
}

/// Errors returned when constructing a profile catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("price grid must contain at least one level")]
    EmptyPriceGrid,
    #[error("price grid contains non-finite values")]
    NonFinitePrice,
}

/// Full Cartesian product of brand, ad policy, and a price grid.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    /// Build the catalog over an explicit price grid.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the grid is empty or contains non-finite
    /// prices.
    pub fn new(prices: &[f64]) -> Result<Self, CatalogError> {
        if prices.is_empty() {
            return Err(CatalogError::EmptyPriceGrid);
        }
        if prices.iter().any(|price| !price.is_finite()) {
            return Err(CatalogError::NonFinitePrice);
        }
        Ok(Self::from_grid(prices))
    }

    /// Reference catalog: prices 8, 12, ..., 32 (42 profiles).
    #[must_use]
    pub fn streaming_default() -> Self {
        let prices: Vec<f64> = (0..7)
            .map(|step| 4.0f64.mul_add(step_to_f64(step), 8.0))
            .collect();
        Self::from_grid(&prices)
    }

    fn from_grid(prices: &[f64]) -> Self {
        let mut profiles = Vec::with_capacity(Brand::ALL.len() * AdPolicy::ALL.len() * prices.len());
        for brand in Brand::ALL {
            for ads in AdPolicy::ALL {
                for &price in prices {
                    profiles.push(Profile { brand, ads, price });
                }
            }
        }
        Self { profiles }
    }

    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn step_to_f64(step: u32) -> f64 {
    f64::from(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_catalog_is_full_cartesian_product() {
        let catalog = ProfileCatalog::streaming_default();
        assert_eq!(catalog.len(), 42);
        assert!(
            catalog
                .profiles()
                .iter()
                .all(|profile| (8.0..=32.0).contains(&profile.price))
        );
    }

    #[test]
    fn catalog_rejects_empty_grid() {
        let err = ProfileCatalog::new(&[]).expect_err("empty grid should fail");
        assert_eq!(err, CatalogError::EmptyPriceGrid);
    }

    #[test]
    fn catalog_rejects_non_finite_prices() {
        let err = ProfileCatalog::new(&[8.0, f64::NAN]).expect_err("nan price should fail");
        assert_eq!(err, CatalogError::NonFinitePrice);
    }

    #[test]
    fn reference_levels_encode_to_zero_indicators() {
        let profile = Profile {
            brand: Brand::Hulu,
            ads: AdPolicy::AdFree,
            price: 12.0,
        };
        assert_eq!(profile.design_row(), [0.0, 0.0, 0.0, 12.0]);
    }

    #[test]
    fn utility_matches_manual_dot_product() {
        let worths = PartWorths::new(1.0, 0.5, -0.8, -0.1);
        let profile = Profile {
            brand: Brand::Prime,
            ads: AdPolicy::Ads,
            price: 20.0,
        };
        assert_relative_eq!(worths.utility(&profile), 0.5 - 0.8 - 2.0);
    }
}

//! The register exports backing the dashboard, loaded once up front.

mod csv;

use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use polars::frame::DataFrame;

use crate::chart::{key_values, numeric_values, time_values};
use crate::fs::require_dir_exists;
use crate::shapes::DistrictShapes;
use crate::types::UnmatchedPolicy;

/// Column names as exported by the register.
pub mod columns {
    /// Survey year.
    pub const YEAR: &str = "StichtagDatJahr";
    /// Registered dogs, city-wide.
    pub const DOGS_TOTAL: &str = "AnzahlHunde";
    /// Registered dog owners, city-wide.
    pub const OWNERS_TOTAL: &str = "AnzahlHalter";
    /// District number, 1 through 12.
    pub const DISTRICT_CODE: &str = "KreisCd";
    /// District name, e.g. "Kreis 7".
    pub const DISTRICT_NAME: &str = "Stadtkreis";
    /// Registered dogs in one district.
    pub const DOGS_PER_DISTRICT: &str = "AnzahlHundeStadtkreis";
    /// Year-over-year change of the district dog count, in percent.
    pub const GROWTH_RATE: &str = "WachstumsrateHundeStadtkreis";
    /// Dogs per square kilometer of district area.
    pub const DOGS_PER_KM2: &str = "HundeProKM2";
    /// Dogs per thousand district inhabitants.
    pub const DOGS_PER_1000: &str = "HundePer1000EW";
}

const ANNUAL_CSV: &str = "dogs_zurich_annual.csv";
const DISTRICT_ANNUAL_CSV: &str = "dogs_zurich_annual_district.csv";
const DISTRICT_2023_CSV: &str = "dogs_zurich_2023_stadtkreis.csv";
const SHAPES_GEOJSON: &str = "stadtkreise.geojson";

/// All reference data the dashboard pages read. Constructed once via
/// [`Dataset::load`] and passed around immutably from then on.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// City-wide dog and owner counts per year.
    pub annual: DataFrame,
    /// Dog counts and growth rates per district and year.
    pub district_annual: DataFrame,
    /// Per-district metrics for the most recent complete year.
    pub district_2023: DataFrame,
    /// District boundaries keyed by district name.
    pub shapes: DistrictShapes,
}

/// Outcome of [`Dataset::check`].
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub annual_rows: usize,
    pub district_annual_rows: usize,
    pub district_2023_rows: usize,
    pub district_count: usize,
    /// Shape keys with no row in the per-district metrics.
    pub unshaded_districts: Vec<String>,
    /// Metric keys with no shape; these plot as extra series but never shade.
    pub unknown_districts: Vec<String>,
}

impl Dataset {
    /// Load every export from `dir`. File names are fixed by the register.
    pub fn load(dir: &Path) -> Result<Self> {
        require_dir_exists(dir)?;
        let annual = csv::read_csv(&dir.join(ANNUAL_CSV))?;
        let district_annual = csv::read_csv(&dir.join(DISTRICT_ANNUAL_CSV))?;
        let district_2023 = csv::read_csv(&dir.join(DISTRICT_2023_CSV))?;
        let shapes = DistrictShapes::from_geojson_file(&dir.join(SHAPES_GEOJSON), "name")?;
        Ok(Self { annual, district_annual, district_2023, shapes })
    }

    /// Validate the loaded frames against what the pages expect: required
    /// columns present and typed, and district keys consistent with the
    /// shapes. Under [`UnmatchedPolicy::Deny`] an unshaded district fails.
    pub fn check(&self, policy: UnmatchedPolicy) -> Result<CheckReport> {
        ensure!(self.annual.height() > 0, "Annual export has no rows");
        ensure!(self.district_annual.height() > 0, "District export has no rows");
        ensure!(self.district_2023.height() > 0, "2023 export has no rows");

        time_values(&self.annual, columns::YEAR).context("Annual export")?;
        numeric_values(&self.annual, columns::DOGS_TOTAL).context("Annual export")?;
        numeric_values(&self.annual, columns::OWNERS_TOTAL).context("Annual export")?;

        time_values(&self.district_annual, columns::YEAR).context("District export")?;
        key_values(&self.district_annual, columns::DISTRICT_CODE).context("District export")?;
        numeric_values(&self.district_annual, columns::DOGS_PER_DISTRICT)
            .context("District export")?;
        numeric_values(&self.district_annual, columns::GROWTH_RATE).context("District export")?;

        let keys_2023 =
            key_values(&self.district_2023, columns::DISTRICT_NAME).context("2023 export")?;
        numeric_values(&self.district_2023, columns::DOGS_TOTAL).context("2023 export")?;
        numeric_values(&self.district_2023, columns::DOGS_PER_KM2).context("2023 export")?;
        numeric_values(&self.district_2023, columns::DOGS_PER_1000).context("2023 export")?;

        let unshaded_districts = self.shapes.unmatched_keys(&keys_2023);
        let unknown_districts: Vec<String> = {
            let mut seen = std::collections::HashSet::new();
            keys_2023
                .iter()
                .filter(|key| !self.shapes.contains_key(key) && seen.insert(key.as_str()))
                .cloned()
                .collect()
        };
        if policy == UnmatchedPolicy::Deny && !unshaded_districts.is_empty() {
            bail!("Districts without a metric row: {}", unshaded_districts.join(", "));
        }

        Ok(CheckReport {
            annual_rows: self.annual.height(),
            district_annual_rows: self.district_annual.height(),
            district_2023_rows: self.district_2023.height(),
            district_count: self.shapes.len(),
            unshaded_districts,
            unknown_districts,
        })
    }
}

//! Regions (tax administration chambers) whose auction listings are crawled.
//!
//! Each chamber publishes its notices on its own subdomain of `kas.gov.pl`
//! under a path derived from the seat city. The listing itself is a portal
//! asset-publisher view addressed by a fixed set of query parameters plus
//! the 1-based page number in `cur`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const BASE_DOMAIN: &str = "kas.gov.pl";

/// Portal parameters shared by every listing request, in request order.
/// The page number (`cur`) is appended after these.
pub const LISTING_QUERY: [(&str, &str); 9] = [
    ("p_p_id", "101_INSTANCE_Uvm3"),
    ("p_p_lifecycle", "0"),
    ("p_p_state", "normal"),
    ("p_p_mode", "view"),
    ("p_p_col_id", "column-2"),
    ("p_p_col_count", "1"),
    ("_101_INSTANCE_Uvm3_delta", "20"),
    ("_101_INSTANCE_Uvm3_advancedSearch", "false"),
    ("_101_INSTANCE_Uvm3_andOperator", "true"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Voivodship subdomain label, e.g. `mazowieckie`.
    pub voivodship: String,
    /// Seat city in the locative case as used in the chamber path, e.g. `warszawie`.
    pub city_loc: String,
    /// Overrides `https://{host}` as the scheme+authority for every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl RegionConfig {
    #[must_use]
    pub fn new(voivodship: &str, city_loc: &str) -> Self {
        Self {
            voivodship: voivodship.to_owned(),
            city_loc: city_loc.to_owned(),
            origin: None,
        }
    }

    /// Same region, but every request goes to `origin` instead of the portal.
    #[must_use]
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.trim_end_matches('/').to_owned());
        self
    }

    /// Identifier used for region selection and output file names.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.voivodship
    }

    /// Request host, e.g. `www.mazowieckie.kas.gov.pl`.
    #[must_use]
    pub fn host(&self) -> String {
        format!("www.{}.{BASE_DOMAIN}", self.voivodship)
    }

    /// Scheme and authority that relative links are resolved against.
    #[must_use]
    pub fn origin(&self) -> String {
        self.origin.as_deref().map_or_else(
            || format!("https://{}", self.host()),
            |origin| origin.trim_end_matches('/').to_owned(),
        )
    }

    #[must_use]
    pub fn listing_path(&self) -> String {
        format!(
            "/izba-administracji-skarbowej-w-{}/ogloszenia/obwieszczenia-o-licytacjach",
            self.city_loc
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionConfig>,
}

/// Regions crawled when no regions file is present.
#[must_use]
pub fn default_regions() -> Vec<RegionConfig> {
    vec![
        RegionConfig::new("mazowieckie", "warszawie"),
        RegionConfig::new("kujawsko-pomorskie", "bydgoszczy"),
    ]
}

/// Load and validate the regions configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<Vec<RegionConfig>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let regions_file: RegionsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::RegionsFileParse)?;

    validate_regions(&regions_file.regions)?;

    Ok(regions_file.regions)
}

/// Keep only the regions named in `filter`, in the order requested.
///
/// An empty filter selects every region.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownRegion`] for a slug that is not configured.
pub fn select_regions(
    all: &[RegionConfig],
    filter: &[String],
) -> Result<Vec<RegionConfig>, ConfigError> {
    if filter.is_empty() {
        return Ok(all.to_vec());
    }

    filter
        .iter()
        .map(|slug| {
            all.iter()
                .find(|r| r.slug() == slug.as_str())
                .cloned()
                .ok_or_else(|| ConfigError::UnknownRegion(slug.clone()))
        })
        .collect()
}

fn is_path_label(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && s.chars().all(|c| c.is_ascii_lowercase() || c == '-')
}

fn validate_regions(regions: &[RegionConfig]) -> Result<(), ConfigError> {
    if regions.is_empty() {
        return Err(ConfigError::Validation(
            "at least one region must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for region in regions {
        if !is_path_label(&region.voivodship) {
            return Err(ConfigError::Validation(format!(
                "invalid voivodship '{}'; use lowercase ASCII letters and dashes",
                region.voivodship
            )));
        }

        if !is_path_label(&region.city_loc) {
            return Err(ConfigError::Validation(format!(
                "region '{}' has invalid city_loc '{}'",
                region.voivodship, region.city_loc
            )));
        }

        if !seen.insert(region.slug()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region: '{}'",
                region.voivodship
            )));
        }
    }

    Ok(())
}

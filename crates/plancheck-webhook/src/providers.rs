//! Built-in provider directory
//!
//! Stands in for a provider database; the list is fixed.

use serde::{Deserialize, Serialize};

/// A care provider near the member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Display name with credentials
    pub name: String,
    /// Street address
    pub address: String,
    /// Distance from the member, in miles
    pub distance_miles: f64,
}

/// Provider list as returned to the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDirectory {
    /// Providers, in directory order
    pub providers: Vec<Provider>,
}

const DIRECTORY: &[(&str, &str, f64)] = &[
    ("Dr. Lisa Hernandez, MD", "1200 McKinney St, Houston, TX 77010", 1.2),
    ("Dr. Kevin Patel, DO", "500 Crawford St, Suite 250, Houston, TX 77002", 0.6),
    ("Dr. Maria Gomez, MD", "1415 Louisiana St, Houston, TX 77002", 0.8),
    ("Dr. Angela Wu, MD", "2800 Kirby Dr, Suite B100, Houston, TX 77098", 3.4),
    ("Dr. Brian Thompson, MD", "3201 Allen Pkwy, Houston, TX 77019", 2.9),
];

impl ProviderDirectory {
    /// The built-in directory
    pub fn builtin() -> Self {
        Self {
            providers: DIRECTORY
                .iter()
                .map(|(name, address, distance_miles)| Provider {
                    name: name.to_string(),
                    address: address.to_string(),
                    distance_miles: *distance_miles,
                })
                .collect(),
        }
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_directory() {
        let directory = ProviderDirectory::builtin();
        assert_eq!(directory.len(), 5);
        assert_eq!(directory.providers[0].name, "Dr. Lisa Hernandez, MD");
        assert_eq!(directory.providers[1].distance_miles, 0.6);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ProviderDirectory::builtin()).unwrap();
        let first = &json["providers"][0];
        assert_eq!(first["address"], "1200 McKinney St, Houston, TX 77010");
        assert_eq!(first["distance_miles"], 1.2);
    }
}

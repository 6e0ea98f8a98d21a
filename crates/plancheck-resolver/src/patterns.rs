//! Text patterns for in-network deductible detection

use crate::currency::usd_from_grouped;
use regex::Regex;
use std::sync::LazyLock;

/// "in-network", "in network" or "innetwork", any case
static IN_NETWORK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)in[-\s]?network").unwrap());

/// Explicit inline "In-Network:" label
static IN_NETWORK_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)in-network:").unwrap());

static DEDUCTIBLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)deductible").unwrap());

/// "Individual Deductible: $1,500" with optional `$` and separators
static INDIVIDUAL_DEDUCTIBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)individual\s+deductible:\s*\$?\s*([0-9,]+)").unwrap()
});

pub(crate) fn mentions_in_network(text: &str) -> bool {
    IN_NETWORK.is_match(text)
}

pub(crate) fn has_in_network_label(text: &str) -> bool {
    IN_NETWORK_LABEL.is_match(text)
}

pub(crate) fn mentions_deductible(text: &str) -> bool {
    DEDUCTIBLE.is_match(text)
}

/// Dollar amount from the first `Individual Deductible:` occurrence in `text`.
///
/// Only the first occurrence is considered; if its capture holds no digits the
/// text does not match.
pub(crate) fn individual_deductible(text: &str) -> Option<String> {
    let captures = INDIVIDUAL_DEDUCTIBLE.captures(text)?;
    usd_from_grouped(captures.get(1)?.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_network_variants() {
        assert!(mentions_in_network("In-Network Benefits"));
        assert!(mentions_in_network("in network providers"));
        assert!(mentions_in_network("INNETWORK"));
        assert!(!mentions_in_network("Out-of-Net work"));
        assert!(!mentions_in_network("Network adequacy"));
    }

    #[test]
    fn test_in_network_label_requires_hyphen_and_colon() {
        assert!(has_in_network_label("Tier 1 In-Network: Individual Deductible: $500"));
        assert!(has_in_network_label("in-network: yes"));
        assert!(!has_in_network_label("In-Network Benefits"));
        assert!(!has_in_network_label("In Network: $500"));
    }

    #[test]
    fn test_deductible_word() {
        assert!(mentions_deductible("Your DEDUCTIBLE is"));
        assert!(!mentions_deductible("Copay: $20"));
    }

    #[test]
    fn test_individual_deductible_amounts() {
        assert_eq!(
            individual_deductible("Individual Deductible: $1,234").as_deref(),
            Some("$1,234")
        );
        assert_eq!(
            individual_deductible("individual deductible:500").as_deref(),
            Some("$500")
        );
        assert_eq!(
            individual_deductible("Individual  Deductible: $ 2,500 per year").as_deref(),
            Some("$2,500")
        );
        assert_eq!(
            individual_deductible("In-Network: Individual Deductible: $750; Family Deductible: $1,500")
                .as_deref(),
            Some("$750")
        );
        assert_eq!(
            individual_deductible("Individual Deductible: 98765432109876543210").as_deref(),
            Some("$98,765,432,109,876,543,210")
        );
    }

    #[test]
    fn test_individual_deductible_no_match() {
        assert_eq!(individual_deductible("Family Deductible: $1,500"), None);
        assert_eq!(individual_deductible("Individual Deductible: none"), None);
        assert_eq!(individual_deductible("Individual Deductible: ,"), None);
    }
}

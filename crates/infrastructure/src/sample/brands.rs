//! Demo brand list for the brand switcher.

use dreamtrue_domain::{Brand, BrandStatus};

/// The brands shown in the demo account's switcher.
#[must_use]
pub fn sample_brands() -> Vec<Brand> {
    vec![
        Brand {
            id: "1".to_string(),
            name: "TechFlow Solutions".to_string(),
            icon: "TF".to_string(),
            color: "#3B82F6".to_string(),
            last_updated: "2 hours ago".to_string(),
            status: BrandStatus::Active,
        },
        Brand {
            id: "2".to_string(),
            name: "GreenEarth Energy".to_string(),
            icon: "GE".to_string(),
            color: "#10B981".to_string(),
            last_updated: "1 day ago".to_string(),
            status: BrandStatus::Completed,
        },
        Brand {
            id: "3".to_string(),
            name: "UrbanFit App".to_string(),
            icon: "UF".to_string(),
            color: "#F59E0B".to_string(),
            last_updated: "3 days ago".to_string(),
            status: BrandStatus::InProgress,
        },
        Brand {
            id: "4".to_string(),
            name: "DataVault Security".to_string(),
            icon: "DV".to_string(),
            color: "#8B5CF6".to_string(),
            last_updated: "1 week ago".to_string(),
            status: BrandStatus::Completed,
        },
        Brand {
            id: "5".to_string(),
            name: "CloudScale Systems".to_string(),
            icon: "CS".to_string(),
            color: "#EF4444".to_string(),
            last_updated: "2 weeks ago".to_string(),
            status: BrandStatus::Completed,
        },
        Brand {
            id: "6".to_string(),
            name: "EcoFashion Co".to_string(),
            icon: "EF".to_string(),
            color: "#06B6D4".to_string(),
            last_updated: "3 weeks ago".to_string(),
            status: BrandStatus::Completed,
        },
    ]
}

/// Looks up a demo brand by id.
#[must_use]
pub fn brand_by_id(id: &str) -> Option<Brand> {
    sample_brands().into_iter().find(|brand| brand.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_brands_have_unique_ids() {
        let brands = sample_brands();
        let mut ids: Vec<_> = brands.iter().map(|b| b.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), brands.len());
    }

    #[test]
    fn test_brand_lookup() {
        assert_eq!(
            brand_by_id("3").map(|b| b.name),
            Some("UrbanFit App".to_string())
        );
        assert!(brand_by_id("99").is_none());
    }
}

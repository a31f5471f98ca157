use crate::workflows::intake::OrgProfile;

/// How much of the funding-request description rides along in the
/// query. Hard cut, not word-aware; downstream ranking relies on the
/// exact 200-character prefix.
pub const DESCRIPTION_SNIPPET_CHARS: usize = 200;

/// Deterministically derive the search query from a profile. Fragments
/// join in a fixed order, each skipped when its source field is empty,
/// so an entirely empty profile yields an empty string (a valid query,
/// not an error).
pub fn synthesize_query(profile: &OrgProfile) -> String {
    let mut fragments: Vec<String> = Vec::new();

    if let Some(kind) = profile.organization.kind {
        fragments.push(kind.label().to_string());
    }
    if let Some(region) = profile.organization.region {
        fragments.push(format!("in {}", region.label()));
    }

    let categories = profile
        .mission
        .categories
        .iter()
        .map(|category| category.label())
        .collect::<Vec<_>>()
        .join(" ");
    if !categories.is_empty() {
        fragments.push(categories);
    }

    let populations = profile
        .mission
        .target_population
        .iter()
        .map(|population| population.label())
        .collect::<Vec<_>>()
        .join(" ");
    if !populations.is_empty() {
        fragments.push(populations);
    }

    let purposes = profile
        .current_funding_request
        .purpose_categories
        .iter()
        .map(|purpose| purpose.label())
        .collect::<Vec<_>>()
        .join(" ");
    if !purposes.is_empty() {
        fragments.push(purposes);
    }

    let description = &profile.current_funding_request.description;
    if !description.is_empty() {
        fragments.push(truncate_chars(description, DESCRIPTION_SNIPPET_CHARS));
    }

    fragments.join(" ")
}

fn truncate_chars(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::{
        FocusCategory, FundingRequestPatch, MissionPatch, OrganisationKind, OrganisationPatch,
        PurposeCategory, Region, SectionPatch, TargetPopulation,
    };

    #[test]
    fn empty_profile_yields_empty_query() {
        assert_eq!(synthesize_query(&OrgProfile::default()), "");
    }

    #[test]
    fn kind_and_region_form_the_leading_fragments() {
        let mut profile = OrgProfile::default();
        profile.apply(SectionPatch::Organization(OrganisationPatch {
            kind: Some(OrganisationKind::ClubOrTeam),
            region: Some(Region::Taranaki),
            ..OrganisationPatch::default()
        }));
        assert_eq!(synthesize_query(&profile), "Club/Team in Taranaki");
    }

    #[test]
    fn skipped_fragments_introduce_no_extra_whitespace() {
        let mut profile = OrgProfile::default();
        profile.apply(SectionPatch::Mission(MissionPatch {
            categories: Some(vec![FocusCategory::Sport, FocusCategory::Youth]),
            target_population: Some(vec![TargetPopulation::Youth]),
            ..MissionPatch::default()
        }));
        profile.apply(SectionPatch::FundingRequest(FundingRequestPatch {
            purpose_categories: Some(vec![PurposeCategory::EquipmentAssets]),
            ..FundingRequestPatch::default()
        }));

        assert_eq!(
            synthesize_query(&profile),
            "Sport Youth Youth (13-24) Equipment/Assets"
        );
    }

    #[test]
    fn description_contributes_exactly_its_first_200_characters() {
        let description: String = std::iter::repeat('x').take(250).collect();
        let mut profile = OrgProfile::default();
        profile.apply(SectionPatch::FundingRequest(FundingRequestPatch {
            description: Some(description.clone()),
            ..FundingRequestPatch::default()
        }));

        let query = synthesize_query(&profile);
        assert_eq!(query, description[..200].to_string());
        assert_eq!(query.chars().count(), 200);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let description: String = std::iter::repeat('ā').take(250).collect();
        let snippet = truncate_chars(&description, DESCRIPTION_SNIPPET_CHARS);
        assert_eq!(snippet.chars().count(), 200);
    }

    #[test]
    fn full_demo_profile_orders_fragments_deterministically() {
        let query = synthesize_query(&OrgProfile::demo());
        assert!(query.starts_with(
            "Registered Charitable Trust in Taranaki Sport Youth Community Health"
        ));
        assert!(query.contains("Children (0-12) Youth (13-24) Low income Rural communities"));
        assert!(query.contains("Equipment/Assets Building/Facilities"));
        assert!(query.contains("We are seeking funding for two key projects"));
    }
}

use super::profile::OrgProfile;
use super::wizard::WizardStep;
use serde::Serialize;

/// Names one sub-object of the profile. Used to key the validity
/// predicates and the per-section readouts in session snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Organization,
    Contact,
    Legal,
    Mission,
    Financials,
    FundingRequest,
    Affiliations,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Organization,
        SectionKey::Contact,
        SectionKey::Legal,
        SectionKey::Mission,
        SectionKey::Financials,
        SectionKey::FundingRequest,
        SectionKey::Affiliations,
    ];
}

/// Required-field predicate per section. Sections with no required
/// fields are always valid. Validation gaps never raise; forward
/// navigation is simply withheld while a predicate is false.
pub fn section_is_valid(profile: &OrgProfile, key: SectionKey) -> bool {
    match key {
        SectionKey::Organization => {
            let org = &profile.organization;
            !org.name.is_empty() && org.kind.is_some() && org.region.is_some()
        }
        SectionKey::Contact => {
            !profile.contact.name.is_empty() && !profile.contact.email.is_empty()
        }
        SectionKey::Mission => {
            let mission = &profile.mission;
            !mission.purpose.is_empty()
                && !mission.categories.is_empty()
                && !mission.target_population.is_empty()
        }
        SectionKey::FundingRequest => {
            let request = &profile.current_funding_request;
            !request.project_name.is_empty()
                && !request.description.is_empty()
                && !request.amount_requested.is_empty()
                && !request.purpose_categories.is_empty()
        }
        SectionKey::Legal | SectionKey::Financials | SectionKey::Affiliations => true,
    }
}

/// A step is complete when every section it collects is valid. The
/// Review step collects nothing and is always complete.
pub fn step_is_complete(profile: &OrgProfile, step: WizardStep) -> bool {
    step.sections()
        .iter()
        .all(|key| section_is_valid(profile, *key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::profile::{
        ContactPatch, FundingRequestPatch, MissionPatch, OrganisationKind, OrganisationPatch,
        PurposeCategory, Region, SectionPatch,
    };
    use crate::workflows::intake::profile::{FocusCategory, TargetPopulation};

    #[test]
    fn empty_profile_passes_only_optional_sections() {
        let profile = OrgProfile::default();
        assert!(!section_is_valid(&profile, SectionKey::Organization));
        assert!(!section_is_valid(&profile, SectionKey::Contact));
        assert!(!section_is_valid(&profile, SectionKey::Mission));
        assert!(!section_is_valid(&profile, SectionKey::FundingRequest));
        assert!(section_is_valid(&profile, SectionKey::Legal));
        assert!(section_is_valid(&profile, SectionKey::Financials));
        assert!(section_is_valid(&profile, SectionKey::Affiliations));
    }

    #[test]
    fn demo_profile_passes_every_section() {
        let profile = OrgProfile::demo();
        for key in SectionKey::ALL {
            assert!(section_is_valid(&profile, key), "section {key:?} invalid");
        }
    }

    #[test]
    fn organization_step_requires_contact_details_too() {
        let mut profile = OrgProfile::default();
        profile.apply(SectionPatch::Organization(OrganisationPatch {
            name: Some("Karori Brass".to_string()),
            kind: Some(OrganisationKind::IncorporatedSociety),
            region: Some(Region::Wellington),
            ..OrganisationPatch::default()
        }));
        assert!(!step_is_complete(&profile, WizardStep::Organization));

        profile.apply(SectionPatch::Contact(ContactPatch {
            name: Some("Jo Harper".to_string()),
            email: Some("jo@karoribrass.org.nz".to_string()),
            ..ContactPatch::default()
        }));
        assert!(step_is_complete(&profile, WizardStep::Organization));
    }

    #[test]
    fn mission_step_needs_purpose_categories_and_population() {
        let mut profile = OrgProfile::default();
        profile.apply(SectionPatch::Mission(MissionPatch {
            purpose: Some("Community brass tuition".to_string()),
            categories: Some(vec![FocusCategory::ArtsCulture]),
            ..MissionPatch::default()
        }));
        assert!(!step_is_complete(&profile, WizardStep::Mission));

        profile.apply(SectionPatch::Mission(MissionPatch {
            target_population: Some(vec![TargetPopulation::GeneralCommunity]),
            ..MissionPatch::default()
        }));
        assert!(step_is_complete(&profile, WizardStep::Mission));
    }

    #[test]
    fn funding_request_step_checks_all_required_fields() {
        let mut profile = OrgProfile::default();
        profile.apply(SectionPatch::FundingRequest(FundingRequestPatch {
            project_name: Some("Instrument refresh".to_string()),
            description: Some("Replace cornets past repair.".to_string()),
            purpose_categories: Some(vec![PurposeCategory::EquipmentAssets]),
            ..FundingRequestPatch::default()
        }));
        assert!(!step_is_complete(&profile, WizardStep::FundingRequest));

        profile.apply(SectionPatch::FundingRequest(FundingRequestPatch {
            amount_requested: Some("12000".to_string()),
            ..FundingRequestPatch::default()
        }));
        assert!(step_is_complete(&profile, WizardStep::FundingRequest));
    }

    #[test]
    fn optional_steps_are_always_complete() {
        let profile = OrgProfile::default();
        assert!(step_is_complete(&profile, WizardStep::Financials));
        assert!(step_is_complete(&profile, WizardStep::Review));
    }
}

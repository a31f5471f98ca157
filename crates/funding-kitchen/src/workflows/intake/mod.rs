//! Guided intake: the profile being collected, the per-section validity
//! predicates, and the wizard state machine that walks the five steps.

mod profile;
mod validation;
mod wizard;

pub use profile::{
    ContactDetails, ContactPatch, FinancialProfile, FinancialsPatch, FocusCategory,
    FundingRequest, FundingRequestPatch, LegalDetails, LegalPatch, MissionPatch, MissionProfile,
    Month, OrgProfile, OrganisationDetails, OrganisationKind, OrganisationPatch, PurposeCategory,
    Region, SectionPatch, TargetPopulation,
};
pub use validation::{section_is_valid, step_is_complete, SectionKey};
pub use wizard::{FunderSearch, IntakeWizard, MatchError, WizardError, WizardStep};

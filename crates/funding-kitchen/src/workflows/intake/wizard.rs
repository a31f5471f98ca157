use super::profile::{OrgProfile, SectionPatch};
use super::validation::{step_is_complete, SectionKey};
use crate::workflows::matching::{
    normalize_matches, synthesize_query, FunderMatch, MatchServiceError, RawMatchResult,
    DEFAULT_SEARCH_LIMIT,
};
use serde::Serialize;
use tracing::{error, info};

/// The five fixed intake steps, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Organization,
    Mission,
    Financials,
    FundingRequest,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Organization,
        WizardStep::Mission,
        WizardStep::Financials,
        WizardStep::FundingRequest,
        WizardStep::Review,
    ];

    pub const fn index(self) -> usize {
        match self {
            WizardStep::Organization => 0,
            WizardStep::Mission => 1,
            WizardStep::Financials => 2,
            WizardStep::FundingRequest => 3,
            WizardStep::Review => 4,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(WizardStep::Organization),
            1 => Some(WizardStep::Mission),
            2 => Some(WizardStep::Financials),
            3 => Some(WizardStep::FundingRequest),
            4 => Some(WizardStep::Review),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::Organization => "Organization",
            WizardStep::Mission => "Mission & Impact",
            WizardStep::Financials => "Financials",
            WizardStep::FundingRequest => "Funding Request",
            WizardStep::Review => "Review & Match",
        }
    }

    /// Profile sections collected on this step. The forward gate
    /// requires each of them to be valid before the step counts as
    /// complete.
    pub const fn sections(self) -> &'static [SectionKey] {
        match self {
            WizardStep::Organization => {
                &[SectionKey::Organization, SectionKey::Contact, SectionKey::Legal]
            }
            WizardStep::Mission => &[SectionKey::Mission],
            WizardStep::Financials => &[SectionKey::Financials],
            WizardStep::FundingRequest => &[SectionKey::FundingRequest],
            WizardStep::Review => &[],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("a funder search is already in flight for this session")]
    SearchInFlight,
    #[error("complete the required fields on '{0}' before continuing")]
    StepIncomplete(&'static str),
}

/// Abstracts the retrieval backend so the wizard can be exercised with
/// in-memory stubs. The production implementation is `MatchClient`.
#[allow(async_fn_in_trait)]
pub trait FunderSearch {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawMatchResult>, MatchServiceError>;
}

/// Linear state machine over the intake steps. Owns the profile being
/// built and the most recent match result. One instance per user
/// session; nothing is shared across sessions.
#[derive(Debug, Default)]
pub struct IntakeWizard {
    current_step: usize,
    profile: OrgProfile,
    last_match: Option<Vec<FunderMatch>>,
    searching: bool,
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: OrgProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::from_index(self.current_step).unwrap_or(WizardStep::Review)
    }

    pub fn profile(&self) -> &OrgProfile {
        &self.profile
    }

    pub fn last_match(&self) -> Option<&[FunderMatch]> {
        self.last_match.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Move one step forward. Bounds-only: semantic completeness is the
    /// caller's gate (`can_advance`), matching how the form suppresses
    /// its Next button rather than erroring.
    pub fn advance(&mut self) {
        if self.current_step < WizardStep::Review.index() {
            self.current_step += 1;
        }
    }

    /// Whether the forward gate is open: the current step's required
    /// sections are all valid and there is a step to move to.
    pub fn can_advance(&self) -> bool {
        self.current_step < WizardStep::Review.index()
            && step_is_complete(&self.profile, self.current_step())
    }

    pub fn retreat(&mut self) {
        if self.current_step > 0 {
            self.current_step -= 1;
        }
    }

    /// Unrestricted jump, any direction, used by "edit this section"
    /// links and step-indicator clicks. Out-of-range indexes are a
    /// silent no-op.
    pub fn jump_to(&mut self, index: usize) {
        if WizardStep::from_index(index).is_some() {
            self.current_step = index;
        }
    }

    pub fn update_section(&mut self, patch: SectionPatch) {
        self.profile.apply(patch);
    }

    /// Mark a search as started and return the query to send. Errors
    /// when one is already in flight: overlapping searches are
    /// disallowed rather than racing last-write-wins.
    pub fn begin_search(&mut self) -> Result<String, WizardError> {
        if self.searching {
            return Err(WizardError::SearchInFlight);
        }
        self.searching = true;
        Ok(synthesize_query(&self.profile))
    }

    /// Land the outcome of a search started with `begin_search`. The
    /// searching flag clears on every path; a failed search leaves the
    /// previous match result untouched.
    pub fn complete_search(
        &mut self,
        outcome: Result<Vec<RawMatchResult>, MatchServiceError>,
    ) -> Result<&[FunderMatch], MatchServiceError> {
        self.searching = false;
        match outcome {
            Ok(raw) => {
                let matches = normalize_matches(raw);
                info!(count = matches.len(), "funder search complete");
                self.last_match = Some(matches);
                Ok(self.last_match.as_deref().unwrap_or_default())
            }
            Err(err) => {
                error!(cause = %err, "funder search failed");
                Err(err)
            }
        }
    }

    /// Run the full pipeline against a search backend: synthesize the
    /// query, fire the request, normalize and store the result. For
    /// exclusive owners (CLI, tests); the HTTP layer splits
    /// begin/complete around its session lock instead.
    pub async fn run_match<S: FunderSearch>(
        &mut self,
        search: &S,
    ) -> Result<&[FunderMatch], MatchError> {
        let query = self.begin_search()?;
        let outcome = search.search(&query, DEFAULT_SEARCH_LIMIT).await;
        self.complete_search(outcome).map_err(MatchError::Service)
    }
}

/// Failures surfaced by `run_match`.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Service(#[from] MatchServiceError),
}

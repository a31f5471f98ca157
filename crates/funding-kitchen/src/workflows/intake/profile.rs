use serde::{Deserialize, Serialize};

/// Legal structure of the applicant organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganisationKind {
    #[serde(rename = "Incorporated Society")]
    IncorporatedSociety,
    #[serde(rename = "Registered Charitable Trust")]
    CharitableTrust,
    #[serde(rename = "Nonprofit (unincorporated group)")]
    UnincorporatedGroup,
    #[serde(rename = "Club/Team")]
    ClubOrTeam,
    #[serde(rename = "School")]
    School,
    #[serde(rename = "Local Body")]
    LocalBody,
    #[serde(rename = "Social Enterprise")]
    SocialEnterprise,
    #[serde(rename = "Maori Land Trust")]
    MaoriLandTrust,
}

impl OrganisationKind {
    pub const fn label(self) -> &'static str {
        match self {
            OrganisationKind::IncorporatedSociety => "Incorporated Society",
            OrganisationKind::CharitableTrust => "Registered Charitable Trust",
            OrganisationKind::UnincorporatedGroup => "Nonprofit (unincorporated group)",
            OrganisationKind::ClubOrTeam => "Club/Team",
            OrganisationKind::School => "School",
            OrganisationKind::LocalBody => "Local Body",
            OrganisationKind::SocialEnterprise => "Social Enterprise",
            OrganisationKind::MaoriLandTrust => "Maori Land Trust",
        }
    }
}

/// New Zealand regions offered by the intake form. `Nationwide` doubles
/// as the normalizer's fallback when a funder names no region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Northland")]
    Northland,
    #[serde(rename = "Auckland")]
    Auckland,
    #[serde(rename = "Waikato")]
    Waikato,
    #[serde(rename = "Bay of Plenty")]
    BayOfPlenty,
    #[serde(rename = "Gisborne")]
    Gisborne,
    #[serde(rename = "Hawke's Bay")]
    HawkesBay,
    #[serde(rename = "Taranaki")]
    Taranaki,
    #[serde(rename = "Manawatū-Whanganui")]
    ManawatuWhanganui,
    #[serde(rename = "Wellington")]
    Wellington,
    #[serde(rename = "Tasman")]
    Tasman,
    #[serde(rename = "Nelson")]
    Nelson,
    #[serde(rename = "Marlborough")]
    Marlborough,
    #[serde(rename = "West Coast")]
    WestCoast,
    #[serde(rename = "Canterbury")]
    Canterbury,
    #[serde(rename = "Otago")]
    Otago,
    #[serde(rename = "Southland")]
    Southland,
    #[serde(rename = "Nationwide")]
    Nationwide,
}

impl Region {
    pub const fn label(self) -> &'static str {
        match self {
            Region::Northland => "Northland",
            Region::Auckland => "Auckland",
            Region::Waikato => "Waikato",
            Region::BayOfPlenty => "Bay of Plenty",
            Region::Gisborne => "Gisborne",
            Region::HawkesBay => "Hawke's Bay",
            Region::Taranaki => "Taranaki",
            Region::ManawatuWhanganui => "Manawatū-Whanganui",
            Region::Wellington => "Wellington",
            Region::Tasman => "Tasman",
            Region::Nelson => "Nelson",
            Region::Marlborough => "Marlborough",
            Region::WestCoast => "West Coast",
            Region::Canterbury => "Canterbury",
            Region::Otago => "Otago",
            Region::Southland => "Southland",
            Region::Nationwide => "Nationwide",
        }
    }
}

/// Activity areas funders publish grants against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusCategory {
    #[serde(rename = "Sport")]
    Sport,
    #[serde(rename = "Arts & Culture")]
    ArtsCulture,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Health")]
    Health,
    #[serde(rename = "Youth")]
    Youth,
    #[serde(rename = "Community")]
    Community,
    #[serde(rename = "Environment")]
    Environment,
    #[serde(rename = "Heritage")]
    Heritage,
    #[serde(rename = "Welfare")]
    Welfare,
    #[serde(rename = "Disability")]
    Disability,
    #[serde(rename = "Elderly")]
    Elderly,
    #[serde(rename = "Māori")]
    Maori,
    #[serde(rename = "Pacific")]
    Pacific,
    #[serde(rename = "Rural")]
    Rural,
    #[serde(rename = "Women")]
    Women,
    #[serde(rename = "LGBTQI+")]
    Lgbtqi,
    #[serde(rename = "Housing")]
    Housing,
    #[serde(rename = "Employment")]
    Employment,
    #[serde(rename = "Research")]
    Research,
    #[serde(rename = "Emergency Services")]
    EmergencyServices,
}

impl FocusCategory {
    pub const fn label(self) -> &'static str {
        match self {
            FocusCategory::Sport => "Sport",
            FocusCategory::ArtsCulture => "Arts & Culture",
            FocusCategory::Education => "Education",
            FocusCategory::Health => "Health",
            FocusCategory::Youth => "Youth",
            FocusCategory::Community => "Community",
            FocusCategory::Environment => "Environment",
            FocusCategory::Heritage => "Heritage",
            FocusCategory::Welfare => "Welfare",
            FocusCategory::Disability => "Disability",
            FocusCategory::Elderly => "Elderly",
            FocusCategory::Maori => "Māori",
            FocusCategory::Pacific => "Pacific",
            FocusCategory::Rural => "Rural",
            FocusCategory::Women => "Women",
            FocusCategory::Lgbtqi => "LGBTQI+",
            FocusCategory::Housing => "Housing",
            FocusCategory::Employment => "Employment",
            FocusCategory::Research => "Research",
            FocusCategory::EmergencyServices => "Emergency Services",
        }
    }
}

/// Communities the organisation serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPopulation {
    #[serde(rename = "Children (0-12)")]
    Children,
    #[serde(rename = "Youth (13-24)")]
    Youth,
    #[serde(rename = "Adults")]
    Adults,
    #[serde(rename = "Elderly")]
    Elderly,
    #[serde(rename = "Family")]
    Family,
    #[serde(rename = "Māori")]
    Maori,
    #[serde(rename = "Pacific Peoples")]
    PacificPeoples,
    #[serde(rename = "Migrants/Refugees")]
    MigrantsRefugees,
    #[serde(rename = "Disabled")]
    Disabled,
    #[serde(rename = "LGBTQI+")]
    Lgbtqi,
    #[serde(rename = "Women")]
    Women,
    #[serde(rename = "Rural communities")]
    RuralCommunities,
    #[serde(rename = "Low income")]
    LowIncome,
    #[serde(rename = "General community")]
    GeneralCommunity,
}

impl TargetPopulation {
    pub const fn label(self) -> &'static str {
        match self {
            TargetPopulation::Children => "Children (0-12)",
            TargetPopulation::Youth => "Youth (13-24)",
            TargetPopulation::Adults => "Adults",
            TargetPopulation::Elderly => "Elderly",
            TargetPopulation::Family => "Family",
            TargetPopulation::Maori => "Māori",
            TargetPopulation::PacificPeoples => "Pacific Peoples",
            TargetPopulation::MigrantsRefugees => "Migrants/Refugees",
            TargetPopulation::Disabled => "Disabled",
            TargetPopulation::Lgbtqi => "LGBTQI+",
            TargetPopulation::Women => "Women",
            TargetPopulation::RuralCommunities => "Rural communities",
            TargetPopulation::LowIncome => "Low income",
            TargetPopulation::GeneralCommunity => "General community",
        }
    }
}

/// What the requested grant would pay for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurposeCategory {
    #[serde(rename = "Equipment/Assets")]
    EquipmentAssets,
    #[serde(rename = "Building/Facilities")]
    BuildingFacilities,
    #[serde(rename = "Programme delivery")]
    ProgrammeDelivery,
    #[serde(rename = "Salaries/Staffing")]
    SalariesStaffing,
    #[serde(rename = "Training/Development")]
    TrainingDevelopment,
    #[serde(rename = "Events")]
    Events,
    #[serde(rename = "Marketing/Promotion")]
    MarketingPromotion,
    #[serde(rename = "Research")]
    Research,
    #[serde(rename = "Feasibility study")]
    FeasibilityStudy,
    #[serde(rename = "Operational costs")]
    OperationalCosts,
    #[serde(rename = "Vehicle")]
    Vehicle,
}

impl PurposeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            PurposeCategory::EquipmentAssets => "Equipment/Assets",
            PurposeCategory::BuildingFacilities => "Building/Facilities",
            PurposeCategory::ProgrammeDelivery => "Programme delivery",
            PurposeCategory::SalariesStaffing => "Salaries/Staffing",
            PurposeCategory::TrainingDevelopment => "Training/Development",
            PurposeCategory::Events => "Events",
            PurposeCategory::MarketingPromotion => "Marketing/Promotion",
            PurposeCategory::Research => "Research",
            PurposeCategory::FeasibilityStudy => "Feasibility study",
            PurposeCategory::OperationalCosts => "Operational costs",
            PurposeCategory::Vehicle => "Vehicle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Identity and scale of the organisation. Counts stay numeric-as-text,
/// exactly as the form collects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganisationDetails {
    pub name: String,
    pub trading_as: String,
    pub kind: Option<OrganisationKind>,
    pub region: Option<Region>,
    pub districts: Vec<String>,
    pub year_established: String,
    pub member_count: String,
    pub staff_count: String,
    pub volunteer_count: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalDetails {
    pub charities_number: String,
    pub incorporated_number: String,
    pub has_constitution: bool,
    pub has_gaming_machines: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionProfile {
    pub purpose: String,
    pub activities: Vec<String>,
    pub target_population: Vec<TargetPopulation>,
    pub categories: Vec<FocusCategory>,
    pub impact_statement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub annual_revenue: String,
    pub annual_expenses: String,
    pub reserves: String,
    pub financial_year_end: Option<Month>,
    pub has_audited_accounts: bool,
    pub other_funding_sources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRequest {
    pub project_name: String,
    pub description: String,
    pub amount_requested: String,
    pub purpose_categories: Vec<PurposeCategory>,
    pub timeline: String,
    pub has_quotes: bool,
    pub other_funding_secured: String,
    pub own_contribution: String,
}

/// The structured organisation record built across the wizard steps.
/// `Default` yields the empty intake state: every scalar empty, every
/// flag false, every list empty, every select unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgProfile {
    pub organization: OrganisationDetails,
    pub contact: ContactDetails,
    pub legal: LegalDetails,
    pub mission: MissionProfile,
    pub affiliations: Vec<String>,
    pub financials: FinancialProfile,
    pub current_funding_request: FundingRequest,
}

/// Section-scoped partial update. Each variant carries `Option` fields;
/// `Some` replaces the field wholesale (lists included), `None` leaves
/// it untouched. Other sections are never affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "data")]
pub enum SectionPatch {
    #[serde(rename = "organization")]
    Organization(OrganisationPatch),
    #[serde(rename = "contact")]
    Contact(ContactPatch),
    #[serde(rename = "legal")]
    Legal(LegalPatch),
    #[serde(rename = "mission")]
    Mission(MissionPatch),
    #[serde(rename = "financials")]
    Financials(FinancialsPatch),
    #[serde(rename = "current_funding_request")]
    FundingRequest(FundingRequestPatch),
    #[serde(rename = "affiliations")]
    Affiliations(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganisationPatch {
    pub name: Option<String>,
    pub trading_as: Option<String>,
    pub kind: Option<OrganisationKind>,
    pub region: Option<Region>,
    pub districts: Option<Vec<String>>,
    pub year_established: Option<String>,
    pub member_count: Option<String>,
    pub staff_count: Option<String>,
    pub volunteer_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalPatch {
    pub charities_number: Option<String>,
    pub incorporated_number: Option<String>,
    pub has_constitution: Option<bool>,
    pub has_gaming_machines: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionPatch {
    pub purpose: Option<String>,
    pub activities: Option<Vec<String>>,
    pub target_population: Option<Vec<TargetPopulation>>,
    pub categories: Option<Vec<FocusCategory>>,
    pub impact_statement: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialsPatch {
    pub annual_revenue: Option<String>,
    pub annual_expenses: Option<String>,
    pub reserves: Option<String>,
    pub financial_year_end: Option<Month>,
    pub has_audited_accounts: Option<bool>,
    pub other_funding_sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundingRequestPatch {
    pub project_name: Option<String>,
    pub description: Option<String>,
    pub amount_requested: Option<String>,
    pub purpose_categories: Option<Vec<PurposeCategory>>,
    pub timeline: Option<String>,
    pub has_quotes: Option<bool>,
    pub other_funding_secured: Option<String>,
    pub own_contribution: Option<String>,
}

fn merge<T>(target: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *target = value;
    }
}

impl OrgProfile {
    /// Apply a section patch in place. No validation happens here; the
    /// validity predicates are evaluated separately by the wizard gate.
    pub fn apply(&mut self, patch: SectionPatch) {
        match patch {
            SectionPatch::Organization(p) => {
                let org = &mut self.organization;
                merge(&mut org.name, p.name);
                merge(&mut org.trading_as, p.trading_as);
                if p.kind.is_some() {
                    org.kind = p.kind;
                }
                if p.region.is_some() {
                    org.region = p.region;
                }
                merge(&mut org.districts, p.districts);
                merge(&mut org.year_established, p.year_established);
                merge(&mut org.member_count, p.member_count);
                merge(&mut org.staff_count, p.staff_count);
                merge(&mut org.volunteer_count, p.volunteer_count);
            }
            SectionPatch::Contact(p) => {
                let contact = &mut self.contact;
                merge(&mut contact.name, p.name);
                merge(&mut contact.role, p.role);
                merge(&mut contact.email, p.email);
                merge(&mut contact.phone, p.phone);
            }
            SectionPatch::Legal(p) => {
                let legal = &mut self.legal;
                merge(&mut legal.charities_number, p.charities_number);
                merge(&mut legal.incorporated_number, p.incorporated_number);
                merge(&mut legal.has_constitution, p.has_constitution);
                merge(&mut legal.has_gaming_machines, p.has_gaming_machines);
            }
            SectionPatch::Mission(p) => {
                let mission = &mut self.mission;
                merge(&mut mission.purpose, p.purpose);
                merge(&mut mission.activities, p.activities);
                merge(&mut mission.target_population, p.target_population);
                merge(&mut mission.categories, p.categories);
                merge(&mut mission.impact_statement, p.impact_statement);
            }
            SectionPatch::Financials(p) => {
                let fin = &mut self.financials;
                merge(&mut fin.annual_revenue, p.annual_revenue);
                merge(&mut fin.annual_expenses, p.annual_expenses);
                merge(&mut fin.reserves, p.reserves);
                if p.financial_year_end.is_some() {
                    fin.financial_year_end = p.financial_year_end;
                }
                merge(&mut fin.has_audited_accounts, p.has_audited_accounts);
                merge(&mut fin.other_funding_sources, p.other_funding_sources);
            }
            SectionPatch::FundingRequest(p) => {
                let request = &mut self.current_funding_request;
                merge(&mut request.project_name, p.project_name);
                merge(&mut request.description, p.description);
                merge(&mut request.amount_requested, p.amount_requested);
                merge(&mut request.purpose_categories, p.purpose_categories);
                merge(&mut request.timeline, p.timeline);
                merge(&mut request.has_quotes, p.has_quotes);
                merge(&mut request.other_funding_secured, p.other_funding_secured);
                merge(&mut request.own_contribution, p.own_contribution);
            }
            SectionPatch::Affiliations(list) => {
                self.affiliations = list;
            }
        }
    }

    /// Fully populated fixture used by the CLI demo, the demo session
    /// endpoint, and tests.
    pub fn demo() -> Self {
        Self {
            organization: OrganisationDetails {
                name: "Taranaki Youth Rugby Trust".to_string(),
                trading_as: "Taranaki Junior Rugby".to_string(),
                kind: Some(OrganisationKind::CharitableTrust),
                region: Some(Region::Taranaki),
                districts: vec!["New Plymouth".to_string(), "South Taranaki".to_string()],
                year_established: "2012".to_string(),
                member_count: "450".to_string(),
                staff_count: "1".to_string(),
                volunteer_count: "45".to_string(),
            },
            contact: ContactDetails {
                name: "Sarah Mitchell".to_string(),
                role: "Trust Secretary".to_string(),
                email: "sarah@taranakijuniorrugby.org.nz".to_string(),
                phone: "027 555 1234".to_string(),
            },
            legal: LegalDetails {
                charities_number: "CC54321".to_string(),
                incorporated_number: String::new(),
                has_constitution: true,
                has_gaming_machines: false,
            },
            mission: MissionProfile {
                purpose: "To develop youth rugby in Taranaki by providing coaching, equipment, \
                          and competition opportunities for young players aged 5-18, with a focus \
                          on making rugby accessible to all families regardless of financial \
                          circumstances."
                    .to_string(),
                activities: vec![
                    "Weekly coaching sessions".to_string(),
                    "Holiday rugby camps".to_string(),
                    "Equipment lending scheme".to_string(),
                    "Hardship fund for fees".to_string(),
                ],
                target_population: vec![
                    TargetPopulation::Children,
                    TargetPopulation::Youth,
                    TargetPopulation::LowIncome,
                    TargetPopulation::RuralCommunities,
                ],
                categories: vec![
                    FocusCategory::Sport,
                    FocusCategory::Youth,
                    FocusCategory::Community,
                    FocusCategory::Health,
                ],
                impact_statement: "In 2024 we provided rugby opportunities to 450 young people \
                                   across Taranaki. 35% received subsidized fees through our \
                                   hardship fund, and 12 of our junior players were selected for \
                                   Taranaki representative teams."
                    .to_string(),
            },
            affiliations: Vec::new(),
            financials: FinancialProfile {
                annual_revenue: "85000".to_string(),
                annual_expenses: "78000".to_string(),
                reserves: "22000".to_string(),
                financial_year_end: Some(Month::December),
                has_audited_accounts: true,
                other_funding_sources: vec![
                    "Player registrations ($35,000)".to_string(),
                    "Fundraising events ($15,000)".to_string(),
                    "Previous grants ($12,000)".to_string(),
                ],
            },
            current_funding_request: FundingRequest {
                project_name: "Equipment Upgrade and Clubroom Improvements".to_string(),
                description: "We are seeking funding for two key projects: (1) Replacement of \
                              aging training equipment including tackle bags, hit shields, and \
                              training balls that are now 8+ years old. (2) Upgrade of our \
                              clubroom facilities to improve accessibility, including a \
                              wheelchair ramp and improved lighting for evening sessions."
                    .to_string(),
                amount_requested: "45000".to_string(),
                purpose_categories: vec![
                    PurposeCategory::EquipmentAssets,
                    PurposeCategory::BuildingFacilities,
                ],
                timeline: "March - October 2025".to_string(),
                has_quotes: true,
                other_funding_secured: "8000".to_string(),
                own_contribution: "7000".to_string(),
            },
        }
    }
}

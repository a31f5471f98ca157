use clap::Args;
use funding_kitchen::config::MatchServiceConfig;
use funding_kitchen::error::AppError;
use funding_kitchen::workflows::intake::{IntakeWizard, OrgProfile, WizardStep};
use funding_kitchen::workflows::matching::{FunderMatch, MatchClient};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of candidate funders to request from the match service
    #[arg(long, default_value_t = 15)]
    pub(crate) limit: usize,
    /// Print the profile and synthesized query without calling the match service
    #[arg(long)]
    pub(crate) offline: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let profile = OrgProfile::demo();
    render_profile_review(&profile);

    let mut wizard = IntakeWizard::with_profile(profile);
    wizard.jump_to(WizardStep::Review.index());

    let query = wizard.begin_search().map_err(AppError::Wizard)?;
    println!("\nSynthesized search query ({} chars):", query.len());
    println!("  {query}");

    if args.offline {
        wizard
            .complete_search(Ok(Vec::new()))
            .map_err(AppError::MatchService)?;
        println!("\nOffline mode: skipping the match service call.");
        return Ok(());
    }

    let config = MatchServiceConfig::from_env();
    println!("\nMatch service: {}", config.base_url);
    let client = MatchClient::new(config)?;

    if !client.health().await {
        wizard
            .complete_search(Ok(Vec::new()))
            .map_err(AppError::MatchService)?;
        println!("Match service is not reachable; start it or rerun with --offline.");
        return Ok(());
    }

    let outcome = client.search(&query, args.limit).await;
    let matches = wizard
        .complete_search(outcome)
        .map_err(AppError::MatchService)?;
    render_matches(matches);

    Ok(())
}

fn render_profile_review(profile: &OrgProfile) {
    let org = &profile.organization;
    let mission = &profile.mission;
    let request = &profile.current_funding_request;

    println!("Funding Kitchen demo profile");
    println!("  Organization : {}", org.name);
    if let Some(kind) = org.kind {
        println!("  Type         : {}", kind.label());
    }
    if let Some(region) = org.region {
        println!("  Region       : {}", region.label());
    }
    println!(
        "  Contact      : {} ({})",
        profile.contact.name, profile.contact.email
    );
    println!(
        "  Categories   : {}",
        mission
            .categories
            .iter()
            .map(|category| category.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Serves       : {}",
        mission
            .target_population
            .iter()
            .map(|population| population.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Project      : {}", request.project_name);
    println!("  Amount       : ${}", request.amount_requested);
}

fn render_matches(matches: &[FunderMatch]) {
    if matches.is_empty() {
        println!("\nNo matches found. Try adjusting categories or region.");
        return;
    }

    println!("\nMatching funding opportunities:");
    for funder in matches {
        println!(
            "  {:>2}. {} - {}% match",
            funder.rank, funder.fund_name, funder.score
        );
        println!(
            "      Funder: {} | Region: {} | Range: {} | Deadline: {}",
            funder.funder_name, funder.region, funder.funding_range, funder.deadline
        );
        if !funder.categories.is_empty() {
            println!("      Categories: {}", funder.categories.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funding_kitchen::workflows::matching::normalize_matches;

    #[test]
    fn demo_renders_without_panicking() {
        let profile = OrgProfile::demo();
        render_profile_review(&profile);

        let matches = normalize_matches(vec![serde_json::from_value(serde_json::json!({
            "document": "# Demo Fund",
            "relevance": 0.5,
        }))
        .expect("raw result parses")]);
        render_matches(&matches);
        render_matches(&[]);
    }
}

use clap::Subcommand;
use resolution_core::model::{
    AssignmentId, AssignmentPatch, MutationOutcome, RoadmapStats, UserIdentity, WEEKEND_COUNT,
    Weekend, WeekendId,
};
use services::{AppServices, RoadmapSession, SuggestOutcome};

#[derive(Subcommand)]
pub enum RoadmapAction {
    /// Print the roadmap with one weekend expanded
    Show {
        /// Weekend to expand (defaults to the first)
        #[arg(long)]
        weekend: Option<WeekendId>,
        /// Print the stored JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print progress statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Add an assignment to a weekend
    Add {
        weekend: WeekendId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an assignment
    Delete {
        weekend: WeekendId,
        assignment: String,
    },
    /// Flip an assignment between done and not done
    Toggle {
        weekend: WeekendId,
        assignment: String,
    },
    /// Edit fields of an assignment
    Update {
        weekend: WeekendId,
        assignment: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Minutes spent
        #[arg(long)]
        time: Option<u32>,
    },
    /// Rename a weekend
    Rename { weekend: WeekendId, title: String },
    /// Ask for 2-3 tasks for an empty weekend
    Suggest { weekend: WeekendId },
}

pub async fn run(
    services: &AppServices,
    user: UserIdentity,
    action: RoadmapAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = services.open_session(user).await?;

    match action {
        RoadmapAction::Show { weekend, json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.roadmap())?);
                return Ok(());
            }
            if let Some(weekend) = weekend {
                session.expand(weekend);
            }
            print_roadmap(&session);
        }
        RoadmapAction::Stats { json } => {
            let stats = session.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
        }
        RoadmapAction::Add {
            weekend,
            title,
            description,
        } => match session.add_assignment(weekend, title, description).await? {
            Some(id) => println!("{id}"),
            None => println!("no change: weekend {weekend} not found"),
        },
        RoadmapAction::Delete {
            weekend,
            assignment,
        } => {
            let outcome = session
                .delete_assignment(weekend, &AssignmentId::new(assignment))
                .await?;
            report(outcome);
        }
        RoadmapAction::Toggle {
            weekend,
            assignment,
        } => {
            let outcome = session
                .toggle_assignment(weekend, &AssignmentId::new(assignment))
                .await?;
            report(outcome);
        }
        RoadmapAction::Update {
            weekend,
            assignment,
            title,
            description,
            notes,
            time,
        } => {
            let mut patch = AssignmentPatch::new();
            if let Some(title) = title {
                patch = patch.title(title);
            }
            if let Some(description) = description {
                patch = patch.description(description);
            }
            if let Some(notes) = notes {
                patch = patch.notes(notes);
            }
            if let Some(minutes) = time {
                patch = patch.time_spent(minutes);
            }
            let outcome = session
                .update_assignment(weekend, &AssignmentId::new(assignment), patch)
                .await?;
            report(outcome);
        }
        RoadmapAction::Rename { weekend, title } => {
            report(session.rename_weekend(weekend, title).await?);
        }
        RoadmapAction::Suggest { weekend } => {
            match session
                .suggest_for_weekend(weekend, services.suggestions())
                .await?
            {
                SuggestOutcome::Added {
                    reasoning,
                    assignments,
                } => {
                    println!("{reasoning}");
                    for id in assignments {
                        println!("{id}");
                    }
                }
                SuggestOutcome::InFlight => {
                    println!("suggestions for weekend {weekend} are already loading");
                }
                SuggestOutcome::NotEmpty => {
                    println!("weekend {weekend} already has assignments");
                }
            }
        }
    }
    Ok(())
}

fn report(outcome: MutationOutcome) {
    match outcome {
        MutationOutcome::Applied => println!("ok"),
        MutationOutcome::Unchanged => println!("no change"),
    }
}

fn print_roadmap(session: &RoadmapSession) {
    let stats = session.stats();
    println!(
        "{} · {}% of the timeline",
        session.user(),
        stats.timeline_percentage()
    );
    for weekend in session.roadmap().weekends() {
        print_weekend(weekend, session.expanded() == Some(weekend.id()));
    }
}

fn print_weekend(weekend: &Weekend, expanded: bool) {
    let marker = if weekend.is_complete() { "✓" } else { " " };
    println!(
        "[{marker}] W{:<2} {}  ({}/{})",
        weekend.id().value(),
        weekend.title(),
        weekend.completed_count(),
        weekend.assignments().len()
    );
    if !expanded {
        return;
    }
    if weekend.is_empty() {
        println!("      no assignments yet");
    }
    for assignment in weekend.assignments() {
        let check = if assignment.is_completed() { "x" } else { " " };
        println!("      [{check}] {}  {}", assignment.title(), assignment.id());
        println!("          {}", assignment.description());
        if !assignment.notes().is_empty() {
            println!("          notes: {}", assignment.notes());
        }
        if assignment.time_spent() > 0 {
            println!("          time: {} min", assignment.time_spent());
        }
    }
}

fn print_stats(stats: &RoadmapStats) {
    println!("timeline:      {}%", stats.timeline_percentage());
    println!("weekends done: {}/{WEEKEND_COUNT}", stats.weekends_done());
    println!("tasks done:    {}/{}", stats.tasks_done(), stats.total_tasks());
    println!("time invested: {}h", stats.time_hours_display());
}

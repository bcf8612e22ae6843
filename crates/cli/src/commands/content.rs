//! Figures, events and the AI historian.

use black_excellence_client::{ApiClient, ChatOptions};
use black_excellence_core::{EventId, FigureId};

use super::CliError;

#[allow(clippy::print_stdout)]
pub async fn figures(api: &ApiClient) -> Result<(), CliError> {
    for figure in api.get_figures().await? {
        println!(
            "{:>4}  {} ({})  {}",
            figure.id,
            figure.name,
            figure.lifespan(),
            figure.profession
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn figure(api: &ApiClient, id: FigureId) -> Result<(), CliError> {
    let figure = api
        .get_figure(id)
        .await
        .map_err(|e| CliError::inline(&e, "Figure not found."))?;

    println!("{} ({})", figure.name, figure.lifespan());
    println!("{} · {}", figure.profession, figure.category);
    println!();
    println!("{}", figure.biography);
    if !figure.achievements.is_empty() {
        println!();
        for achievement in &figure.achievements {
            println!("  - {achievement}");
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn events(api: &ApiClient) -> Result<(), CliError> {
    for event in api.get_events().await? {
        println!("{:>4}  {}  {} ({})", event.id, event.year, event.title, event.location);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn event(api: &ApiClient, id: EventId) -> Result<(), CliError> {
    let event = api
        .get_event(id)
        .await
        .map_err(|e| CliError::inline(&e, "Event not found."))?;

    println!("{} ({}, {})", event.title, event.year, event.location);
    println!();
    println!("{}", event.description);
    println!();
    println!("Significance: {}", event.significance);
    if !event.key_figures.is_empty() {
        println!("Key figures: {}", event.key_figures.join(", "));
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn categories(api: &ApiClient) -> Result<(), CliError> {
    for category in api.get_categories().await? {
        println!("{category}");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn ask(api: &ApiClient, question: &str, options: ChatOptions) -> Result<(), CliError> {
    let answer = api
        .ask_ai(question, options)
        .await
        .map_err(|e| CliError::inline(&e, "The historian could not answer right now."))?;
    println!("{answer}");
    Ok(())
}

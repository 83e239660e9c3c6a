use anyhow::Result;
use clap::Parser;
use social_post_generator::app::App;
use social_post_generator::models::{GeneratedPost, RequestState};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "social-post-generator")]
#[command(about = "Generate a social media post (title, description and image) for a business")]
struct CliArgs {
    /// Kind of business, e.g. "Cafeteria".
    #[arg(long, short = 'b')]
    business_type: String,

    /// What the post should be about.
    #[arg(long, short = 's')]
    summary: String,

    /// Directory to save the generated image into.
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the generated post as JSON.
    #[arg(long)]
    json: bool,
}

fn print_post(post: &GeneratedPost, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(post)?);
    } else {
        println!("Title:\n{}\n", post.title());
        println!("Description:\n{}", post.description());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_post_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut app = match App::from_env() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting social-post-generator");

    match app.submit(&args.business_type, &args.summary).await {
        RequestState::Succeeded(post) => {
            print_post(post, args.json)?;
            if let Some(dir) = &args.output_dir {
                let path = App::save_image(post, dir)?;
                println!("\nImage saved to {}", path.display());
            }
            Ok(())
        }
        RequestState::Failed(message) => {
            error!("Generation failed: {}", message);
            std::process::exit(1);
        }
        state => {
            error!("Unexpected request state: {:?}", state);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_cli_parses_form_fields() {
        let args = CliArgs::try_parse_from([
            "social-post-generator",
            "--business-type",
            "Cafeteria",
            "--summary",
            "Novo café gelado",
            "-o",
            "out",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.business_type, "Cafeteria");
        assert_eq!(args.summary, "Novo café gelado");
        assert_eq!(args.output_dir.unwrap().to_str(), Some("out"));
        assert!(args.json);
    }

    #[test]
    fn test_cli_requires_both_fields() {
        assert!(CliArgs::try_parse_from(["social-post-generator", "-b", "Cafeteria"]).is_err());
    }
}

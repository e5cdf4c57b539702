use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripgen_backend::{error::TripError, plan_rng, transport::ReqwestTransport};
use tripgen_shared::{
    build_prompt_template, build_system_prompt, call_external_generator, combine_prompt,
    generate_plan, render_plan, render_plan_text, AiConfig, AiSettings, TripForm,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate a day-by-day trip itinerary")]
struct Args {
    /// Destination city
    #[arg(long, default_value = "")]
    city: String,

    /// Number of days; the leading integer is used and clamped to 1..=30
    #[arg(long, default_value = "3")]
    days: String,

    /// low, medium or high
    #[arg(long, default_value = "medium")]
    budget: String,

    /// balanced, family, adventure, luxury, budget or cultural
    #[arg(long, default_value = "balanced")]
    style: String,

    /// Dietary preference mentioned in meal suggestions
    #[arg(long, default_value = "")]
    diet: String,

    /// relaxed, moderate or packed
    #[arg(long, default_value = "moderate")]
    pace: String,

    /// Seed for a reproducible plan
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the combined system and user prompt instead of a plan
    #[arg(long)]
    prompt: bool,

    /// Chat-completion endpoint; with model and key set the plan comes from the AI
    #[arg(long, env = "TRIPGEN_AI_ENDPOINT")]
    ai_endpoint: Option<String>,

    #[arg(long, env = "TRIPGEN_AI_MODEL")]
    ai_model: Option<String>,

    #[arg(long, env = "TRIPGEN_AI_KEY", hide_env_values = true)]
    ai_key: Option<String>,

    #[arg(long, default_value = "")]
    max_tokens: String,
}

impl Args {
    fn form(&self) -> TripForm {
        TripForm {
            city: self.city.clone(),
            days: self.days.clone(),
            budget: self.budget.clone(),
            style: self.style.clone(),
            diet: self.diet.clone(),
            pace: self.pace.clone(),
        }
    }

    fn ai_settings(&self) -> AiSettings {
        AiSettings {
            enabled: self.ai_endpoint.is_some() || self.ai_model.is_some() || self.ai_key.is_some(),
            endpoint: self.ai_endpoint.clone().unwrap_or_default(),
            model: self.ai_model.clone().unwrap_or_default(),
            api_key: self.ai_key.clone().unwrap_or_default(),
            max_tokens: self.max_tokens.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let output = run(&args).await?;
    println!("{output}");
    Ok(())
}

async fn run(args: &Args) -> Result<String, TripError> {
    let form = args.form();
    if args.prompt {
        return Ok(combine_prompt(
            build_system_prompt(),
            &build_prompt_template(&form),
        ));
    }

    let request = form.validate()?;
    let ai = args.ai_settings();
    if ai.enabled {
        let config = AiConfig::from_settings(&ai)?;
        let text = call_external_generator(&ReqwestTransport::new(), &config, &request).await?;
        return Ok(text);
    }

    let mut rng = plan_rng(args.seed);
    let days = generate_plan(&request, &mut rng);
    tracing::info!("generated {} days for {}", days.len(), request.city);
    let output = match args.format {
        OutputFormat::Text => render_plan_text(&days, &request),
        OutputFormat::Html => render_plan(&days, &request),
        OutputFormat::Json => serde_json::to_string_pretty(&days)?,
    };
    Ok(output)
}

use crate::{
    config::{AssistantConfig, GEMINI_API_KEY_ENV},
    core::function_call::FunctionCall,
    prompts::PromptPattern,
    tools::{FunctionDispatcher, TravelFunction},
    types::{travel_plan::PlanSchema, trip_request::TripRequest},
    TravelAssistant,
};
use anyhow::{anyhow, bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;
use std::{env, fs, path::Path, time::Duration};
use tracing::{error, info};

/// CLI entry point for the trip-agent tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();

    match matches.subcommand() {
        Some(("plan", sub)) => plan(sub).await,
        Some(("packing", sub)) => packing(sub).await,
        Some(("lookup", sub)) => lookup(sub).await,
        Some(("prompt", sub)) => prompt(sub),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn command() -> Command {
    Command::new("trip-agent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A Gemini function-calling travel assistant")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("Gemini API key (or set GEMINI_API_KEY env var)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .global(true)
                .help("Gemini model to use"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .help("Per-request timeout in seconds")
                .default_value("120"),
        )
        .subcommand(
            Command::new("plan")
                .about("Plan a trip with function calling")
                .arg(trip_arg("origin", "Departure city"))
                .arg(trip_arg("destination", "Destination city"))
                .arg(trip_arg("start-date", "First day of the trip (YYYY-MM-DD)"))
                .arg(trip_arg("end-date", "Last day of the trip (YYYY-MM-DD)"))
                .arg(
                    Arg::new("travelers")
                        .long("travelers")
                        .value_name("COUNT")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("1"),
                )
                .arg(
                    Arg::new("preference")
                        .short('p')
                        .long("preference")
                        .value_name("PREFERENCE")
                        .action(ArgAction::Append)
                        .help("Travel preference, repeatable"),
                )
                .arg(Arg::new("budget").long("budget").value_name("BUDGET"))
                .arg(
                    Arg::new("requirements")
                        .long("requirements")
                        .value_name("TEXT")
                        .help("Special requirements"),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .value_name("TEXT")
                        .help("Additional context for the planner"),
                )
                .arg(
                    Arg::new("request")
                        .long("request")
                        .value_name("FILE|JSON")
                        .conflicts_with_all(["origin", "destination", "start-date", "end-date"])
                        .help("Trip request as a JSON file or inline JSON object"),
                )
                .arg(
                    Arg::new("rag-context")
                        .long("rag-context")
                        .value_name("TEXT")
                        .help("Retrieved travel knowledge to ground the plan"),
                )
                .arg(
                    Arg::new("schema")
                        .short('s')
                        .long("schema")
                        .value_name("SCHEMA")
                        .help("Plan schema: flat or typed")
                        .default_value("flat"),
                )
                .arg(
                    Arg::new("max-iterations")
                        .short('i')
                        .long("max-iterations")
                        .value_name("COUNT")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Validate function arguments against their JSON schemas"),
                )
                .arg(
                    Arg::new("steps")
                        .long("steps")
                        .action(ArgAction::SetTrue)
                        .help("Print the recorded planning steps"),
                ),
        )
        .subcommand(
            Command::new("packing")
                .about("Generate a packing list")
                .arg(
                    Arg::new("destination")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("date")
                        .short('d')
                        .long("date")
                        .value_name("DATE")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("activity")
                        .short('a')
                        .long("activity")
                        .value_name("ACTIVITY")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("weather")
                        .long("weather")
                        .value_name("JSON")
                        .help("Weather report to take into account"),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Call one travel data provider directly")
                .arg(
                    Arg::new("function")
                        .required(true)
                        .index(1)
                        .help("getWeather, getFlights, getHotels or getAttractions"),
                )
                .arg(
                    Arg::new("arguments")
                        .index(2)
                        .default_value("{}")
                        .help("Arguments as a JSON object"),
                )
                .arg(Arg::new("strict").long("strict").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("prompt")
                .about("Render a prompt-engineering pattern")
                .arg(Arg::new("pattern").required(true).index(1))
                .arg(
                    Arg::new("destination")
                        .long("destination")
                        .value_name("CITY")
                        .default_value("Goa"),
                )
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_name("DAYS")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("5"),
                ),
        )
}

fn trip_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("VALUE")
        .required_unless_present("request")
        .help(help)
}

fn config_from(matches: &ArgMatches) -> anyhow::Result<AssistantConfig> {
    // Get API key from argument or environment
    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var(GEMINI_API_KEY_ENV).ok())
        .ok_or_else(|| {
            anyhow!("Gemini API key is required. Set {GEMINI_API_KEY_ENV} or use --api-key")
        })?;

    let mut config = match AssistantConfig::from_env() {
        Ok(config) => AssistantConfig {
            api_key,
            ..config
        },
        Err(_) => AssistantConfig::new(api_key),
    };

    let timeout_seconds: u64 = matches
        .get_one::<String>("timeout")
        .map(|value| value.parse())
        .transpose()
        .context("--timeout must be a whole number of seconds")?
        .unwrap_or(120);
    config = config.with_timeout(Duration::from_secs(timeout_seconds));
    Ok(config)
}

fn apply_model(config: AssistantConfig, matches: &ArgMatches) -> AssistantConfig {
    match matches.get_one::<String>("model") {
        Some(model) => config.with_model(model.as_str()),
        None => config,
    }
}

fn trip_request_from(matches: &ArgMatches) -> anyhow::Result<TripRequest> {
    if let Some(raw) = matches.get_one::<String>("request") {
        let text = if Path::new(raw).is_file() {
            fs::read_to_string(raw).with_context(|| format!("failed to read {raw}"))?
        } else {
            raw.clone()
        };
        return serde_json::from_str(&text).context("--request must be a trip request JSON object");
    }

    let field = |name: &str| -> anyhow::Result<String> {
        matches
            .get_one::<String>(name)
            .cloned()
            .ok_or_else(|| anyhow!("--{name} is required"))
    };

    let mut request = TripRequest::new(
        field("origin")?,
        field("destination")?,
        field("start-date")?,
        field("end-date")?,
    )
    .with_travelers(matches.get_one::<u32>("travelers").copied().unwrap_or(1));

    if let Some(preferences) = matches.get_many::<String>("preference") {
        request = request.with_preferences(preferences.cloned());
    }
    if let Some(budget) = matches.get_one::<String>("budget") {
        request = request.with_budget(budget.as_str());
    }
    if let Some(requirements) = matches.get_one::<String>("requirements") {
        request = request.with_special_requirements(requirements.as_str());
    }
    if let Some(context) = matches.get_one::<String>("context") {
        request = request.with_additional_context(context.as_str());
    }
    Ok(request)
}

async fn plan(matches: &ArgMatches) -> anyhow::Result<()> {
    let schema: PlanSchema = matches
        .get_one::<String>("schema")
        .map(|value| value.parse())
        .transpose()
        .map_err(|err: String| anyhow!(err))?
        .unwrap_or(PlanSchema::Flat);
    let max_iterations = matches.get_one::<usize>("max-iterations").copied().unwrap_or(10);

    let config = config_from(matches)?
        .with_schema(schema)
        .with_max_iterations(max_iterations);
    let config = apply_model(config, matches);
    let request = trip_request_from(matches)?;

    let mut assistant = TravelAssistant::new(config)?;
    if matches.get_flag("strict") {
        let dispatcher = FunctionDispatcher::new(assistant.config().weather_api_key.clone()).strict();
        assistant = assistant.with_dispatcher(dispatcher);
    }

    info!(
        "Planning {} -> {} ({} to {}) with {}",
        request.origin,
        request.destination,
        request.start_date,
        request.end_date,
        assistant.config().model
    );

    let outcome = assistant
        .plan_trip(&request, matches.get_one::<String>("rag-context").map(String::as_str))
        .await;

    if matches.get_flag("steps") {
        println!("{}", outcome.replay());
    }
    println!("{}", serde_json::to_string_pretty(&outcome.response)?);

    if outcome.is_error() {
        error!("Trip planning did not produce a plan");
    } else {
        info!(
            "Plan ready after {} iteration(s) and {} function call(s)",
            outcome.iterations,
            outcome.function_call_count()
        );
    }
    Ok(())
}

async fn packing(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = apply_model(config_from(matches)?, matches);
    let assistant = TravelAssistant::new(config)?;

    let destination = matches
        .get_one::<String>("destination")
        .ok_or_else(|| anyhow!("destination is required"))?;
    let dates: Vec<String> = matches
        .get_many::<String>("date")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let activities: Vec<String> = matches
        .get_many::<String>("activity")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let weather: Option<Value> = matches
        .get_one::<String>("weather")
        .map(|raw| serde_json::from_str(raw))
        .transpose()
        .context("--weather must be valid JSON")?;

    let list = assistant
        .generate_packing_list(destination, &dates, &activities, weather.as_ref())
        .await;
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}

async fn lookup(matches: &ArgMatches) -> anyhow::Result<()> {
    let name = matches
        .get_one::<String>("function")
        .ok_or_else(|| anyhow!("function name is required"))?;
    let function: TravelFunction = name.parse()?;
    let raw = matches
        .get_one::<String>("arguments")
        .map(String::as_str)
        .unwrap_or("{}");
    let arguments: Value = serde_json::from_str(raw).context("arguments must be valid JSON")?;

    let mut dispatcher = FunctionDispatcher::new(env::var("WEATHER_API_KEY").ok());
    if matches.get_flag("strict") {
        dispatcher = dispatcher.strict();
    }

    let result = dispatcher
        .execute_function_call(&FunctionCall::new(function.name(), arguments))
        .await;
    println!("{}", serde_json::to_string_pretty(&result.response)?);
    if result.is_error {
        bail!("{} returned an error payload", function);
    }
    Ok(())
}

fn prompt(matches: &ArgMatches) -> anyhow::Result<()> {
    let pattern: PromptPattern = matches
        .get_one::<String>("pattern")
        .ok_or_else(|| anyhow!("pattern is required"))?
        .parse()
        .map_err(|err: String| anyhow!(err))?;
    let destination = matches
        .get_one::<String>("destination")
        .map(String::as_str)
        .unwrap_or("Goa");
    let days = matches.get_one::<u32>("days").copied().unwrap_or(5);

    println!("{}", pattern.render(destination, days));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_trip_request_from_flags() {
        let matches = command().get_matches_from([
            "trip-agent",
            "plan",
            "--origin",
            "Delhi",
            "--destination",
            "Goa",
            "--start-date",
            "2025-09-15",
            "--end-date",
            "2025-09-20",
            "--travelers",
            "2",
            "-p",
            "beach",
            "-p",
            "culture",
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let request = trip_request_from(sub).unwrap();
        assert_eq!(request.destination, "Goa");
        assert_eq!(request.travelers, 2);
        assert_eq!(request.preferences, vec!["beach", "culture"]);
    }

    #[test]
    fn test_trip_request_from_json() {
        let matches = command().get_matches_from([
            "trip-agent",
            "plan",
            "--request",
            r#"{"origin":"Delhi","destination":"Goa","start_date":"2025-09-15","end_date":"2025-09-20"}"#,
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let request = trip_request_from(sub).unwrap();
        assert_eq!(request.origin, "Delhi");
        assert_eq!(request.travelers, 1);
    }
}

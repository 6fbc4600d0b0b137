use anyhow::Result;
use crop_sahayaka::api::ApiClient;
use crop_sahayaka::api::Verbatim;
use crop_sahayaka::chat::{ChatReply, ChatWidget, FALLBACK_REPLY};
use crop_sahayaka::config::Config;
use crop_sahayaka::i18n::{
    FileStore, LanguagePreference, PreferenceStore, TranslationMetrics, TranslationValidator,
};
use crop_sahayaka::notification::{NotificationKind, Notifications};
use crop_sahayaka::recommendations::{
    Dashboard, FormField, RecommendationResult, DISTRICTS, SEASONS,
};
use crop_sahayaka::request_flow::Dispatch;
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::pin::Pin;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    ToggleLanguage,
    Set(FormField, String),
    ShowForm,
    Options,
    Run,
    ShowResult,
    Metrics,
    Help,
    Quit,
    Chat(String),
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Command {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Chat(line.to_string());
        };

        let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
        match name {
            "lang" => Command::ToggleLanguage,
            "set" => {
                let (field, value) = args.trim().split_once(' ').unwrap_or((args.trim(), ""));
                match field.parse() {
                    Ok(field) => Command::Set(field, value.trim().to_string()),
                    Err(_) => Command::Unknown(line.to_string()),
                }
            }
            "form" => Command::ShowForm,
            "options" => Command::Options,
            "run" => Command::Run,
            "result" => Command::ShowResult,
            "metrics" => Command::Metrics,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// A request that settled in the background.
enum Settled {
    Recommendations(Dispatch<Verbatim<RecommendationResult>>),
    Chat(Dispatch<ChatReply>),
}

type Pending<'a> = Pin<Box<dyn Future<Output = Settled> + 'a>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("crop_sahayaka=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!("Using service at {}", config.api_base_url);

    if !TranslationValidator::check_registry() {
        warn!("Some display strings may render incorrectly");
    }

    let mut preference = LanguagePreference::load(FileStore::new(&config.preference_dir));
    let client = ApiClient::new(config.api_base_url.clone());
    let notifications = Notifications::new();
    let dashboard = Dashboard::new(client.clone(), notifications.clone());
    let chat = ChatWidget::new(client);
    let (dashboard, chat) = (&dashboard, &chat);

    print_banner(&preference);
    println!("{}", chat.welcome(preference.language()));
    println!("({})", chat.placeholder(preference.language()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: FuturesUnordered<Pending<'_>> = FuturesUnordered::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let language = preference.language();

                match Command::parse(&line) {
                    Command::ToggleLanguage => {
                        let language = preference.toggle();
                        println!(
                            "{}",
                            preference.t("language_switched").replace("{language}", language.native_name())
                        );
                    }
                    Command::Set(field, value) => {
                        dashboard.set_field(field, value);
                    }
                    Command::ShowForm => print_form(dashboard, &preference),
                    Command::Options => {
                        println!("{}: {}", preference.t("field_district"), DISTRICTS.join(", "));
                        println!("{}: {}", preference.t("field_season"), SEASONS.join(", "));
                    }
                    Command::Run => {
                        if dashboard.can_submit() {
                            println!("{}", preference.t("running_analysis"));
                            pending.push(Box::pin(async move {
                                Settled::Recommendations(dashboard.submit(language).await)
                            }));
                        } else {
                            print_form(dashboard, &preference);
                        }
                    }
                    Command::ShowResult => match dashboard.result() {
                        Some(result) => print_result(&result, &preference),
                        None => {
                            println!("{}", preference.t("ready_for_analysis_title"));
                            println!("{}", preference.t("ready_for_analysis_description"));
                        }
                    },
                    Command::Metrics => {
                        println!("{}", serde_json::to_string_pretty(&TranslationMetrics::global().report())?);
                    }
                    Command::Help => print_help(),
                    Command::Quit => break,
                    Command::Chat(text) if text.is_empty() => {}
                    Command::Chat(text) => {
                        if let Some(indicator) = chat.thinking_indicator(language) {
                            println!("{}", indicator);
                            continue;
                        }
                        chat.set_input(text);
                        pending.push(Box::pin(async move {
                            Settled::Chat(chat.submit_input(language).await)
                        }));
                        println!("{}", preference.t("chat_thinking"));
                    }
                    Command::Unknown(line) => {
                        println!("Unknown command: {} (try /help)", line);
                    }
                }
            }
            Some(settled) = pending.next(), if !pending.is_empty() => {
                match settled {
                    Settled::Recommendations(Dispatch::Succeeded(result)) => {
                        print_result(&result, &preference);
                    }
                    Settled::Chat(Dispatch::Succeeded(reply)) => {
                        println!("{} > {}", preference.t("chat_title"), reply.reply);
                    }
                    Settled::Chat(Dispatch::Failed(_)) => {
                        println!("{} > {}", preference.t("chat_title"), FALLBACK_REPLY);
                    }
                    _ => {}
                }
                print_notifications(&notifications);
            }
        }
    }

    // In-flight requests are abandoned before the widgets go away.
    drop(pending);
    Ok(())
}

fn print_banner<S: PreferenceStore>(preference: &LanguagePreference<S>) {
    println!(
        "{} {}",
        preference.t("hero_title_part1"),
        preference.t("hero_title_accent")
    );
    println!("{}", preference.t("hero_subtitle"));
    println!(
        "[{}] {} | {} | {}",
        preference.language().native_name(),
        preference.t("home_label"),
        preference.t("dashboard_label"),
        preference.t("how_it_works_label")
    );
    print_help();
}

fn print_help() {
    println!("/lang  /set <field> <value>  /form  /options  /run  /result  /metrics  /quit");
    println!("Anything else is sent to the chat assistant.");
}

fn print_form<S: PreferenceStore>(dashboard: &Dashboard, preference: &LanguagePreference<S>) {
    let form = dashboard.form();
    println!("{}", preference.t("region_parameters"));
    for field in FormField::ALL {
        let value = form.get(field);
        let shown = if value.trim().is_empty() { "-" } else { value };
        println!("  {:<28} ({}) {}", preference.t(field.label_key()), field, shown);
    }
    println!("[{}]", dashboard.submit_label(preference.language()));
}

fn print_result<S: PreferenceStore>(result: &RecommendationResult, preference: &LanguagePreference<S>) {
    let metrics = &result.metrics;
    println!("{}: {}", preference.t("metric_crop_diversity"), metrics.crop_diversity);
    println!("{}: {}/10", preference.t("metric_soil_health"), metrics.soil_health);
    println!("{}: {}/10", preference.t("metric_resilience"), metrics.resilience);

    for point in &result.radar_data {
        println!("  {:<20} {:>5.1}", point.category, point.value);
    }

    println!("{}", preference.t("top_recommendations"));
    for rec in &result.recommendations {
        println!(
            "  {} [{:?}] {}% {}",
            rec.name,
            rec.category,
            rec.confidence,
            preference.t("confidence_suffix")
        );
        println!("    {}: {}", preference.t("expected_yield"), rec.expected_yield);
        println!("    {}: {}", preference.t("estimated_profit"), rec.profit);
        println!("    {}: {}", preference.t("diversification_benefit"), rec.benefit);
    }
}

fn print_notifications(notifications: &Notifications) {
    for notification in notifications.drain() {
        let marker = match notification.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Failure => "✗",
        };
        println!("{} {}: {}", marker, notification.title, notification.description);
    }
}

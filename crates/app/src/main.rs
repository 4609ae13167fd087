//! DreamTrue client - Main Entry Point
//!
//! Wires the dev adapters into the session core and walks the product's
//! screen flow (login → company intake → analysis loading → dashboard)
//! as a scripted console demo. Set `RUST_LOG=debug` to watch the
//! controller and adapters narrate the transitions.

use std::sync::Arc;
use std::time::Duration;

use dreamtrue_application::ports::{Clock, SettingsRepository};
use dreamtrue_application::store::Action;
use dreamtrue_application::{AnalysisSimulation, AuthFlowController, SessionStore, UploadQueue};
use dreamtrue_domain::{ChatMessage, ChatRole, CompanyData, User, UserSettings, generate_id};
use dreamtrue_infrastructure::{
    DevIdentityProvider, FileSettingsRepository, InMemoryProfileRepository, NoopAutomationGate,
    SystemClock, analysis_stages, demo_playbook_html, inspect_upload, sample_brands,
};

/// The screens of the client, in walkthrough order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    CompanyIntake,
    AnalysisLoading,
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings().await;

    let provider = Arc::new(DevIdentityProvider::with_demo_account());
    let demo_user_id = provider
        .user_id_for("demo@dreamtrue.ai")
        .ok_or("demo account missing from dev provider")?;
    let profiles = InMemoryProfileRepository::new()
        .with_profile(User::new(demo_user_id, "demo@dreamtrue.ai", "Demo User"));

    let store = Arc::new(SessionStore::new());
    let clock = SystemClock::new();
    let mut controller = AuthFlowController::new(
        Arc::clone(&provider),
        profiles,
        NoopAutomationGate::new(),
        clock,
        Arc::clone(&store),
    );
    controller.watch_provider_session();
    controller.restore_session().await?;

    let mut screen = Screen::Login;
    let mut analysis = None;

    loop {
        match screen {
            Screen::Login => {
                println!("== Sign in");
                controller.sign_in("demo@dreamtrue.ai", "demo123").await?;
                let state = store.snapshot();
                println!(
                    "   signed in as {}",
                    state
                        .auth
                        .user
                        .as_ref()
                        .map_or("<nobody>", |u| u.email.as_str())
                );
                screen = Screen::CompanyIntake;
            }
            Screen::CompanyIntake => {
                println!("== Company intake");
                let company = CompanyData {
                    name: "Acme Robotics".to_string(),
                    url: Some("https://acme-robotics.example".to_string()),
                    location: Some("Austin, TX".to_string()),
                    industry: Some("industrial robotics".to_string()),
                };
                println!("   analyzing {}", company.name);
                let playbook = demo_playbook_html(&company);
                analysis = Some(AnalysisSimulation::start(
                    &store,
                    &clock,
                    company,
                    analysis_stages(settings.analysis_stage_ticks),
                    settings.analysis_total_ticks,
                    playbook,
                ));
                screen = Screen::AnalysisLoading;
            }
            Screen::AnalysisLoading => {
                println!("== Analysis in progress");
                if let Some(sim) = analysis.as_mut() {
                    let mut ticker = tokio::time::interval(Duration::from_millis(200));
                    let mut last_message = String::new();
                    loop {
                        ticker.tick().await;
                        let progress = sim.tick(&store, &clock);
                        if progress.message != last_message {
                            println!("   {}", progress.message);
                            last_message = progress.message.clone();
                        }
                        if progress.finished {
                            break;
                        }
                    }
                }
                screen = Screen::Dashboard;
            }
            Screen::Dashboard => {
                show_dashboard(&store, &clock);
                run_mfa_settings_demo(&mut controller, &provider).await?;
                println!("== Sign out");
                controller.sign_out().await;
                break;
            }
        }
    }

    let final_state = store.snapshot();
    println!(
        "   session ended (authenticated: {})",
        final_state.auth.authenticated
    );
    Ok(())
}

async fn load_settings() -> UserSettings {
    match FileSettingsRepository::at_default_location() {
        Some(repo) => repo.load().await.unwrap_or_default(),
        None => UserSettings::default(),
    }
}

fn show_dashboard(store: &SessionStore, clock: &SystemClock) {
    println!("== Dashboard");
    let state = store.snapshot();
    if let Some(report) = &state.current_report {
        println!(
            "   report for {}: {:?} ({} chars of playbook)",
            report.company.name,
            report.status,
            report.playbook_html.as_ref().map_or(0, String::len)
        );
    }

    println!("   brands:");
    for brand in sample_brands() {
        println!("     {} [{}] {:?}", brand.name, brand.icon, brand.status);
    }

    // Document upload tab, simulated end to end.
    let mut uploads = UploadQueue::new();
    uploads.add(inspect_upload("brand-guidelines.pdf", 48_213, clock.now()));
    uploads.add(inspect_upload("competitor-teardown.docx", 109_877, clock.now()));
    while !uploads.is_settled() {
        uploads.tick();
    }
    println!("   documents ready: {}", uploads.ready_count());

    // Chat panel with the canned assistant reply.
    store.dispatch(Action::AddChatMessage(ChatMessage::new(
        generate_id(),
        ChatRole::User,
        "What should we fix first?",
        clock.now(),
    )));
    store.dispatch(Action::AddChatMessage(ChatMessage::new(
        generate_id(),
        ChatRole::Assistant,
        "Start with the value proposition; the playbook's next steps walk through it.",
        clock.now(),
    )));
    for message in &store.snapshot().chat_messages {
        println!("   [{:?}] {}", message.role, message.content);
    }
}

async fn run_mfa_settings_demo(
    controller: &mut AuthFlowController<
        Arc<DevIdentityProvider>,
        InMemoryProfileRepository,
        NoopAutomationGate,
        SystemClock,
    >,
    provider: &Arc<DevIdentityProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("== Settings: enroll phone second factor");
    controller.setup_mfa("+1 (555) 765-4321").await?;
    let code = provider
        .last_issued_code()
        .ok_or("dev provider issued no code")?;
    controller.verify_mfa_enrollment(&code).await?;
    println!("   enrolled; disabling again for the demo account");
    controller.disable_mfa().await?;
    Ok(())
}

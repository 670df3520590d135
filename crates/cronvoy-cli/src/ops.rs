//! CLI command bodies: wire the engine to the HTTP collaborators and run
//! one operation to completion.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, bail};

use cronvoy_client::http::{HttpAppInventory, HttpSchedulerClient};
use cronvoy_client::ArtifactCommandLauncher;
use cronvoy_engine::Scheduler;
use cronvoy_types::{CRON_EXPRESSION_KEY, LEGACY_CRON_EXPRESSION_KEY, ScheduleRequest, TaskDefinition};

fn build_engine() -> Scheduler {
    let config = cronvoy_config::load_config().unwrap_or_default();
    let client = HttpSchedulerClient::new(&config.scheduler.api_url, config.scheduler.token);
    let inventory = HttpAppInventory::new(&config.platform.api_url, config.platform.token);
    Scheduler::new(
        Arc::new(client),
        Arc::new(inventory),
        Arc::new(ArtifactCommandLauncher),
    )
}

pub async fn run_schedule(
    name: String,
    app: String,
    cron: String,
    artifact: String,
    args: Vec<String>,
    extra_properties: Vec<String>,
) -> anyhow::Result<()> {
    let mut properties = HashMap::new();
    for pair in extra_properties {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("property '{pair}' is not in key=value form");
        };
        properties.insert(key.to_string(), value.to_string());
    }
    properties.insert(CRON_EXPRESSION_KEY.to_string(), cron);

    let request = ScheduleRequest {
        definition: TaskDefinition::new(app),
        properties,
        command_line_args: args,
        schedule_name: name.clone(),
        artifact,
    };

    build_engine()
        .schedule(&request)
        .await
        .with_context(|| format!("could not create schedule '{name}'"))?;
    println!("schedule '{name}' created");
    Ok(())
}

pub async fn run_unschedule(name: String) -> anyhow::Result<()> {
    build_engine().unschedule(&name).await?;
    println!("schedule '{name}' removed");
    Ok(())
}

pub async fn run_list(app: Option<String>) -> anyhow::Result<()> {
    let engine = build_engine();
    let schedules = match app {
        Some(app) => engine.list_for_app(&app).await?,
        None => engine.list().await?,
    };

    if schedules.is_empty() {
        println!("no schedules");
        return Ok(());
    }
    for info in schedules {
        let expression = info
            .schedule_properties
            .get(LEGACY_CRON_EXPRESSION_KEY)
            .map(String::as_str)
            .unwrap_or("(no trigger)");
        println!(
            "{}  app={}  cron={}",
            info.schedule_name, info.task_definition_name, expression
        );
    }
    Ok(())
}

pub async fn run_execute(name: String) -> anyhow::Result<()> {
    build_engine().execute(&name).await?;
    println!("ad-hoc run of '{name}' requested");
    Ok(())
}

pub async fn run_history(name: String) -> anyhow::Result<()> {
    let runs = build_engine().history(&name).await?;
    if runs.is_empty() {
        println!("no runs recorded for '{name}'");
        return Ok(());
    }
    for run in runs {
        let started = run
            .started_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".into());
        println!("{}  state={}  started={}  {}", run.id, run.state, started, run.message);
    }
    Ok(())
}

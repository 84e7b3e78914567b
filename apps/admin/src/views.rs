//! One handler per subcommand. Results go to stdout as pretty JSON, operator
//! feedback goes through the context's notifier.

use std::fs;

use anyhow::Context;
use client_core::{
    resource::{Readable, Switchable, Writable},
    AdminContext, ConfirmOptions, DialogKind, LogQuery, PageQuery, Resource, ResourceClient,
    ServerQuery,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use shared::{
    domain::{DestinationId, ServerId, TaskId},
    protocol::{Ack, Page},
};
use tracing::debug;

use crate::{
    cli::{
        Command, DestinationCommand, LogCommand, PageArgs, PayloadArgs, ServerCommand,
        TaskCommand,
    },
    terminal,
};

pub async fn run(ctx: &AdminContext, command: Command, assume_yes: bool) -> anyhow::Result<()> {
    match command {
        Command::Servers(cmd) => servers(ctx, cmd, assume_yes).await,
        Command::Destinations(cmd) => destinations(ctx, cmd, assume_yes).await,
        Command::Tasks(cmd) => tasks(ctx, cmd, assume_yes).await,
        Command::Logs(cmd) => logs(ctx, cmd).await,
    }
}

async fn servers(ctx: &AdminContext, cmd: ServerCommand, assume_yes: bool) -> anyhow::Result<()> {
    let client = ctx.api.servers();
    match cmd {
        ServerCommand::List { enabled, page } => {
            let query = ServerQuery {
                enabled,
                page: page.page,
                page_size: page.page_size,
            };
            list(ctx, &client, &query).await
        }
        ServerCommand::Get { id } => get(&client, ServerId(id)).await,
        ServerCommand::Create(payload) => create(ctx, &client, &payload, "Server").await,
        ServerCommand::Update { id, payload } => {
            update(ctx, &client, ServerId(id), &payload, "Server").await
        }
        ServerCommand::Delete { id } => {
            delete(ctx, &client, ServerId(id), "server", assume_yes).await
        }
        ServerCommand::Enable { id } => {
            set_enabled(ctx, &client, ServerId(id), true, "Server").await
        }
        ServerCommand::Disable { id } => {
            set_enabled(ctx, &client, ServerId(id), false, "Server").await
        }
    }
}

async fn destinations(
    ctx: &AdminContext,
    cmd: DestinationCommand,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let client = ctx.api.destinations();
    match cmd {
        DestinationCommand::List { page } => list(ctx, &client, &page_query(page)).await,
        DestinationCommand::Get { id } => get(&client, DestinationId(id)).await,
        DestinationCommand::Create(payload) => create(ctx, &client, &payload, "Destination").await,
        DestinationCommand::Update { id, payload } => {
            update(ctx, &client, DestinationId(id), &payload, "Destination").await
        }
        DestinationCommand::Delete { id } => {
            delete(ctx, &client, DestinationId(id), "destination", assume_yes).await
        }
        DestinationCommand::Enable { id } => {
            set_enabled(ctx, &client, DestinationId(id), true, "Destination").await
        }
        DestinationCommand::Disable { id } => {
            set_enabled(ctx, &client, DestinationId(id), false, "Destination").await
        }
        DestinationCommand::Toggle { id } => {
            let ack = client.toggle(DestinationId(id)).await?;
            acknowledge(ctx, ack, "Destination toggled")
        }
    }
}

async fn tasks(ctx: &AdminContext, cmd: TaskCommand, assume_yes: bool) -> anyhow::Result<()> {
    let client = ctx.api.tasks();
    match cmd {
        TaskCommand::List { page } => list(ctx, &client, &page_query(page)).await,
        TaskCommand::Get { id } => get(&client, TaskId(id)).await,
        TaskCommand::Create(payload) => create(ctx, &client, &payload, "Task").await,
        TaskCommand::Update { id, payload } => {
            update(ctx, &client, TaskId(id), &payload, "Task").await
        }
        TaskCommand::Delete { id } => delete(ctx, &client, TaskId(id), "task", assume_yes).await,
        TaskCommand::Enable { id } => set_enabled(ctx, &client, TaskId(id), true, "Task").await,
        TaskCommand::Disable { id } => set_enabled(ctx, &client, TaskId(id), false, "Task").await,
        TaskCommand::Execute { id } => {
            let options = ConfirmOptions::new()
                .title("Run backup")
                .message(format!("Start task {id} now?"))
                .kind(DialogKind::Info)
                .confirm_text("Run");
            if !confirmed(ctx, options, assume_yes).await? {
                ctx.notifier.info("Cancelled");
                return Ok(());
            }
            let ack = client.execute(TaskId(id)).await?;
            acknowledge(ctx, ack, "Task started")
        }
    }
}

async fn logs(ctx: &AdminContext, cmd: LogCommand) -> anyhow::Result<()> {
    let LogCommand::List {
        task_id,
        page,
        entries,
    } = cmd;
    let client = ctx.api.logs();
    let query = LogQuery {
        task_id: task_id.map(TaskId),
        page: page.page,
        page_size: page.page_size,
    };
    if !entries {
        return list(ctx, &client, &query).await;
    }

    let page = client.list(&query).await?;
    let mut runs = Vec::with_capacity(page.data.len());
    for log in &page.data {
        let trace = log.entries().unwrap_or_else(|err| {
            ctx.notifier
                .warning(format!("log {} has an unreadable execution trace: {err}", log.id));
            Vec::new()
        });
        runs.push(json!({
            "id": log.id,
            "task_id": log.task_id,
            "status": log.status,
            "start_time": log.start_time,
            "end_time": log.end_time,
            "entries": trace,
        }));
    }
    print_json(&runs)?;
    more_pages_hint(ctx, &page);
    Ok(())
}

fn page_query(args: PageArgs) -> PageQuery {
    PageQuery {
        page: args.page,
        page_size: args.page_size,
    }
}

async fn list<R>(
    ctx: &AdminContext,
    client: &ResourceClient<R>,
    query: &R::Query,
) -> anyhow::Result<()>
where
    R: Resource,
    R::Record: Serialize,
{
    let page = client.list(query).await?;
    print_json(&page)?;
    more_pages_hint(ctx, &page);
    Ok(())
}

async fn get<R>(client: &ResourceClient<R>, id: R::Id) -> anyhow::Result<()>
where
    R: Readable,
    R::Record: Serialize,
{
    print_json(&client.get(id).await?)
}

async fn create<R>(
    ctx: &AdminContext,
    client: &ResourceClient<R>,
    payload: &PayloadArgs,
    label: &str,
) -> anyhow::Result<()>
where
    R: Writable,
    R::Record: Serialize,
    R::Request: DeserializeOwned,
{
    let request: R::Request = read_payload(payload)?;
    let saved = client.create(&request).await?;
    print_json(&saved.record)?;
    ctx.notifier.success(format!("{label} created"));
    if let Some(warning) = saved.warning {
        ctx.notifier.warning(warning);
    }
    Ok(())
}

async fn update<R>(
    ctx: &AdminContext,
    client: &ResourceClient<R>,
    id: R::Id,
    payload: &PayloadArgs,
    label: &str,
) -> anyhow::Result<()>
where
    R: Writable,
    R::Record: Serialize,
    R::Request: DeserializeOwned,
{
    let request: R::Request = read_payload(payload)?;
    let saved = client.update(id, &request).await?;
    print_json(&saved.record)?;
    ctx.notifier.success(format!("{label} updated"));
    if let Some(warning) = saved.warning {
        ctx.notifier.warning(warning);
    }
    Ok(())
}

async fn delete<R: Writable>(
    ctx: &AdminContext,
    client: &ResourceClient<R>,
    id: R::Id,
    noun: &str,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let options = ConfirmOptions::new()
        .title(format!("Delete {noun}"))
        .message(format!("Delete {noun} {id}? This cannot be undone."))
        .kind(DialogKind::Danger)
        .confirm_text("Delete");
    if !confirmed(ctx, options, assume_yes).await? {
        ctx.notifier.info("Cancelled");
        return Ok(());
    }
    let ack = client.delete(id).await?;
    acknowledge(ctx, ack, &format!("Deleted {noun} {id}"))
}

async fn set_enabled<R>(
    ctx: &AdminContext,
    client: &ResourceClient<R>,
    id: R::Id,
    enabled: bool,
    label: &str,
) -> anyhow::Result<()>
where
    R: Switchable,
    R::Record: Serialize,
{
    let saved = client.set_enabled(id, enabled).await?;
    print_json(&saved.record)?;
    let state = if enabled { "enabled" } else { "disabled" };
    ctx.notifier.success(format!("{label} {state}"));
    if let Some(warning) = saved.warning {
        ctx.notifier.warning(warning);
    }
    Ok(())
}

/// Opens the dialog and waits for the answer. `assume_yes` answers it
/// without touching the terminal.
async fn confirmed(
    ctx: &AdminContext,
    options: ConfirmOptions,
    assume_yes: bool,
) -> anyhow::Result<bool> {
    let pending = ctx.confirm.confirm(options);
    if assume_yes {
        debug!("confirmation auto-accepted");
        ctx.confirm.handle_confirm();
    } else {
        terminal::ask(&ctx.confirm)
            .await
            .context("failed to read confirmation")?;
    }
    Ok(pending.await?)
}

fn acknowledge(ctx: &AdminContext, ack: Ack, fallback: &str) -> anyhow::Result<()> {
    let message = ack
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ctx.notifier.success(message);
    Ok(())
}

fn more_pages_hint<T>(ctx: &AdminContext, page: &Page<T>) {
    if page.has_next() {
        let p = page.pagination;
        let current = p.current_page();
        ctx.notifier.info(format!(
            "page {current} of {} ({} total), use --page {} for more",
            p.total_page,
            p.total,
            current + 1
        ));
    }
}

fn read_payload<T: DeserializeOwned>(args: &PayloadArgs) -> anyhow::Result<T> {
    match (&args.data, &args.file) {
        (Some(raw), _) => serde_json::from_str(raw).context("--data is not a valid request body"),
        (None, Some(path)) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("'{}' is not a valid request body", path.display()))
        }
        (None, None) => anyhow::bail!("either --data or --file is required"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;

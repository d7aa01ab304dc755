//! Task command handlers for the cronhub CLI

use serde_json::Value;

use cronhub_client::{ClientResult, TaskApiClient, TaskDetail, TaskQuery};

use crate::output;
use crate::TaskCommands;

pub(crate) async fn handle_task_command(
    cmd: TaskCommands,
    config: &cronhub_client::ClientConfig,
) -> ClientResult<()> {
    let client = TaskApiClient::new(config)?;

    match cmd {
        TaskCommands::List {
            name,
            tag,
            status,
            host_id,
            page,
            page_size,
        } => {
            let query = TaskQuery {
                name,
                tag,
                status,
                host_id,
                page: Some(page),
                page_size: Some(page_size),
                ..TaskQuery::default()
            };

            match client.list(&query).await {
                Ok(listing) => {
                    if listing.tasks.data.is_empty() {
                        output::warning("No tasks matched the query");
                    } else {
                        output::success(format!(
                            "Found {} tasks ({} total)",
                            listing.tasks.data.len(),
                            listing.tasks.total
                        ));
                        output::blank();
                        for task in &listing.tasks.data {
                            output::item(format!(
                                "#{} {} [{}]",
                                field(task, "id"),
                                field(task, "name"),
                                field(task, "spec"),
                            ));
                            output::dim(format!(
                                "    status: {} | tag: {} | protocol: {}",
                                field(task, "status"),
                                field(task, "tag"),
                                field(task, "protocol"),
                            ));
                        }
                        output::blank();
                    }
                    output::dim(format!("{} hosts registered", record_count(&listing.hosts)));
                }
                Err(e) => {
                    output::error(format!("Failed to list tasks: {e}"));
                    return Err(e);
                }
            }
        }
        TaskCommands::Show { id } => match client.detail(id).await {
            Ok(TaskDetail::New { hosts }) => {
                output::header("Available hosts (no task id given)");
                print_hosts(&hosts);
            }
            Ok(TaskDetail::Existing { task, hosts }) => {
                output::header("Task Details");
                print_record(&task)?;
                output::blank();
                output::dim(format!("{} hosts registered", record_count(&hosts)));
            }
            Err(e) => {
                output::error(format!("Failed to fetch task: {e}"));
                return Err(e);
            }
        },
        TaskCommands::Save { payload } => {
            let payload: Value = serde_json::from_str(&payload).map_err(|e| {
                cronhub_client::ClientError::InvalidInput(format!("Invalid JSON payload: {e}"))
            })?;
            let updating = payload.get("id").is_some();
            output::plain(if updating {
                format!("Updating task #{}", field(&payload, "id"))
            } else {
                "Creating task".to_string()
            });

            match client.save(&payload).await {
                Ok(_) => output::success("Task saved"),
                Err(e) => {
                    output::error(format!("Failed to save task: {e}"));
                    return Err(e);
                }
            }
        }
        TaskCommands::Remove { id } => {
            report(client.remove(id).await, format!("Task #{id} removed"))?;
        }
        TaskCommands::Enable { id } => {
            report(client.enable(id).await, format!("Task #{id} enabled"))?;
        }
        TaskCommands::Disable { id } => {
            report(client.disable(id).await, format!("Task #{id} disabled"))?;
        }
        TaskCommands::Run { id } => {
            report(
                client.run(id).await,
                format!("Task #{id} triggered; check its execution log for the result"),
            )?;
        }
        TaskCommands::BatchEnable { ids } => {
            report(
                client.batch_enable(&ids).await,
                format!("{} tasks enabled", ids.len()),
            )?;
        }
        TaskCommands::BatchDisable { ids } => {
            report(
                client.batch_disable(&ids).await,
                format!("{} tasks disabled", ids.len()),
            )?;
        }
        TaskCommands::BatchRemove { ids } => {
            report(
                client.batch_remove(&ids).await,
                format!("{} tasks removed", ids.len()),
            )?;
        }
    }
    Ok(())
}

/// Report a write operation: success line on Ok, error line (and propagation)
/// on Err.
fn report(result: ClientResult<Value>, success_msg: String) -> ClientResult<()> {
    match result {
        Ok(_) => {
            output::success(success_msg);
            Ok(())
        }
        Err(e) => {
            output::error(format!("Operation failed: {e}"));
            Err(e)
        }
    }
}

/// Pull a display string out of an opaque backend record.
fn field(record: &Value, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn record_count(records: &Value) -> usize {
    records.as_array().map(Vec::len).unwrap_or(0)
}

fn print_hosts(hosts: &Value) {
    match hosts.as_array() {
        Some(list) if !list.is_empty() => {
            for host in list {
                output::item(format!(
                    "#{} {} ({}:{})",
                    field(host, "id"),
                    field(host, "alias"),
                    field(host, "name"),
                    field(host, "port"),
                ));
            }
        }
        _ => output::warning("No hosts registered"),
    }
}

/// Print every field of an opaque record as "key: value" lines.
fn print_record(record: &Value) -> ClientResult<()> {
    match record.as_object() {
        Some(map) => {
            for (key, value) in map {
                output::label(key, field_value(value));
            }
        }
        None => output::plain(serde_json::to_string_pretty(record)?),
    }
    Ok(())
}

fn field_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Line-oriented console front end.
//!
//! Reads one command per line and prints the filtered view to stdout.
//!
//! ```text
//! list                 show the current view
//! search <text>        set the search term
//! name <text>          set the form's name field
//! age <text>           set the form's age field
//! edit <id>            load a record into the form
//! submit               create, or update when editing
//! delete <id>          delete a record
//! quit
//! ```

use crate::remote::RemoteCollection;
use crate::session::{Session, ViewModel};
use roster_engine::Field;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;

/// Drive `session` from `input` until `quit` or end of input.
///
/// Submits and deletes run as local tasks so the prompt never waits on the
/// service; every one of them has finished by the time this returns. Must
/// be called inside a [`tokio::task::LocalSet`].
pub async fn run<S, R>(session: Session<S>, input: R) -> std::io::Result<()>
where
    S: RemoteCollection + 'static,
    R: AsyncBufRead + Unpin,
{
    // Failure is already logged; the view simply stays empty.
    let _ = session.activate().await;
    render(&session.view());

    let mut pending = JoinSet::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "list" => {}
            "search" => session.on_search_change(arg),
            "name" => session.on_field_change(Field::Name, arg),
            "age" => session.on_field_change(Field::Age, arg),
            "edit" => match session.find_by_label(arg) {
                Some(record) => session.on_edit(&record),
                None => tracing::warn!(id = %arg, "No such record"),
            },
            "submit" => {
                let session = session.clone();
                pending.spawn_local(async move {
                    if session.on_submit().await.is_ok() {
                        render(&session.view());
                    }
                });
                continue;
            }
            "delete" => match session.find_by_label(arg).and_then(|r| r.id) {
                Some(id) => {
                    let session = session.clone();
                    pending.spawn_local(async move {
                        if session.on_delete(&id).await.is_ok() {
                            render(&session.view());
                        }
                    });
                    continue;
                }
                None => tracing::warn!(id = %arg, "No such record"),
            },
            other => {
                tracing::warn!(command = %other, "Unknown command");
                continue;
            }
        }

        render(&session.view());
    }

    while let Some(joined) = pending.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "Background request task failed");
        }
    }

    Ok(())
}

/// Print `view` to stdout.
pub fn render(view: &ViewModel) {
    println!();
    if !view.search_term.is_empty() {
        println!("search: {:?}", view.search_term);
    }
    for record in &view.visible {
        let id = record
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let image = record.image.as_deref().unwrap_or("");
        println!(
            "[{}] {}  age {}  {}",
            id,
            record.name,
            record.age.search_text(),
            image
        );
    }
    if view.visible.is_empty() {
        println!("(no records)");
    }
    let mode = if view.editing { "update" } else { "submit" };
    println!(
        "form: name={:?} age={:?} ({})",
        view.form.name, view.form.age, mode
    );
}

//! Task list commands for CLI.
//!
//! The list is kept as JSON in the database's key-value table.

use clap::Subcommand;
use snailtimer_core::{Database, TaskList};

const TASKS_KEY: &str = "tasks";

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        text: String,
    },
    /// List tasks in insertion order
    List {
        /// Print JSON instead of a checklist
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },
}

fn load_tasks(db: &Database) -> TaskList {
    match db.kv_get(TASKS_KEY) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("discarding unreadable task list: {e}");
            TaskList::new()
        }),
        Ok(None) => TaskList::new(),
        Err(e) => {
            tracing::warn!("failed to read task list: {e}");
            TaskList::new()
        }
    }
}

fn save_tasks(db: &Database, tasks: &TaskList) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(tasks)?;
    db.kv_set(TASKS_KEY, &json)?;
    Ok(())
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut tasks = load_tasks(&db);

    match action {
        TaskAction::Add { text } => match tasks.add(&text) {
            Some(task) => {
                println!("Task added: {}", task.id);
                save_tasks(&db, &tasks)?;
            }
            None => tracing::debug!("ignoring empty task text"),
        },
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for task in tasks.tasks() {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{mark}] {}  {}", task.text, task.id);
                }
                println!("{} of {} left", tasks.pending_count(), tasks.len());
            }
        }
        TaskAction::Toggle { id } => {
            if tasks.toggle(&id) {
                save_tasks(&db, &tasks)?;
                println!("Task toggled: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Remove { id } => {
            if tasks.remove(&id) {
                save_tasks(&db, &tasks)?;
                println!("Task removed: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }
    Ok(())
}

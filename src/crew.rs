use std::sync::Arc;

use tracing::info;

use crate::error::{HiveError, Result};
use crate::task::Task;
use crate::traits::{Executor, Inputs};
use crate::worker::Worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Process {
    /// Tasks run one after another; each sees the previous output.
    Sequential,
}

#[derive(Debug)]
pub struct Crew {
    workers: Vec<Arc<Worker>>,
    tasks: Vec<Task>,
    process: Process,
}

impl Crew {
    pub fn new(workers: Vec<Arc<Worker>>, tasks: Vec<Task>, process: Process) -> Result<Self> {
        if tasks.is_empty() {
            return Err(HiveError::Plan("a crew needs at least one task".to_string()));
        }

        for task in &tasks {
            if !workers.iter().any(|worker| Arc::ptr_eq(worker, &task.worker)) {
                return Err(HiveError::Plan(format!(
                    "task assigned to '{}' who is not a member of the crew",
                    task.worker.role()
                )));
            }
        }

        Ok(Crew {
            workers,
            tasks,
            process,
        })
    }

    pub fn workers(&self) -> &[Arc<Worker>] {
        &self.workers
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn process(&self) -> Process {
        self.process
    }

    pub async fn kickoff(&self, executor: &dyn Executor, inputs: &Inputs) -> Result<String> {
        info!(
            workers = self.workers.len(),
            tasks = self.tasks.len(),
            process = ?self.process,
            "crew kickoff"
        );
        executor.execute(self, inputs).await
    }
}
